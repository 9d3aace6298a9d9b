use anyhow::Context;
use ruledns_domain::RuleTable;
use ruledns_infrastructure::dns::rules::compile_rules;
use std::path::Path;
use tracing::info;

/// Reads and compiles the rule file. Any compile error aborts startup.
pub fn load_rules(path: impl AsRef<Path>) -> anyhow::Result<RuleTable> {
    let path = path.as_ref();
    let source = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read rules file {}", path.display()))?;

    let table = compile_rules(&source)
        .with_context(|| format!("Failed to compile rules file {}", path.display()))?;

    info!(path = %path.display(), rules = table.len(), "Rules loaded");
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_load_rules_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# test rules").unwrap();
        writeln!(file, "A example.com IN -> A 93.184.216.34 IN").unwrap();
        writeln!(file, "A blocked.test IN -> -").unwrap();

        let table = load_rules(file.path()).unwrap();
        assert_eq!(table.len(), 2);
    }

    #[test]
    fn test_compile_error_names_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "A example.com IN -> A 1.2.3 IN").unwrap();

        let err = load_rules(file.path()).unwrap_err();
        let rendered = format!("{:#}", err);
        assert!(rendered.contains("Failed to compile rules file"));
        assert!(rendered.contains("1.2.3"));
    }

    #[test]
    fn test_missing_file() {
        assert!(load_rules("/nonexistent/rules.conf").is_err());
    }
}
