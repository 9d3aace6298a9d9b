use crate::errors::DomainError;
use compact_str::CompactString;
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;

pub const MAX_LABEL_LEN: usize = 63;
pub const MAX_NAME_WIRE_LEN: usize = 255;

/// A domain name as an ordered sequence of labels, most specific first.
///
/// Comparison is byte-exact: `Example.COM` and `example.com` are different
/// names. The root name has no labels.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DomainName {
    labels: SmallVec<[CompactString; 4]>,
}

impl DomainName {
    pub fn root() -> Self {
        Self::default()
    }

    /// Builds a name from individual labels, validating each one.
    pub fn from_labels<I, S>(labels: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut name = Self::root();
        for label in labels {
            name.push_label(label.as_ref())?;
        }
        Ok(name)
    }

    /// Appends one label. Used by the wire decoder while it walks a name.
    pub fn push_label(&mut self, label: &str) -> Result<(), DomainError> {
        if label.is_empty() {
            return Err(DomainError::InvalidDomainName(
                "empty label inside name".to_string(),
            ));
        }
        if label.len() > MAX_LABEL_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' is {} bytes, limit is {}",
                label,
                label.len(),
                MAX_LABEL_LEN
            )));
        }
        if !label.is_ascii() {
            return Err(DomainError::InvalidDomainName(format!(
                "label '{}' is not ASCII",
                label
            )));
        }
        if self.wire_len() + label.len() + 1 > MAX_NAME_WIRE_LEN {
            return Err(DomainError::InvalidDomainName(format!(
                "name exceeds {} bytes on the wire",
                MAX_NAME_WIRE_LEN
            )));
        }
        self.labels.push(CompactString::from(label));
        Ok(())
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.labels.iter().map(|label| label.as_str())
    }

    pub fn label_count(&self) -> usize {
        self.labels.len()
    }

    pub fn is_root(&self) -> bool {
        self.labels.is_empty()
    }

    /// Uncompressed wire size: a length byte per label plus the terminator.
    pub fn wire_len(&self) -> usize {
        self.labels.iter().map(|label| label.len() + 1).sum::<usize>() + 1
    }
}

impl fmt::Display for DomainName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.labels.is_empty() {
            return f.write_str(".");
        }
        for (i, label) in self.labels.iter().enumerate() {
            if i > 0 {
                f.write_str(".")?;
            }
            f.write_str(label)?;
        }
        Ok(())
    }
}

impl FromStr for DomainName {
    type Err = DomainError;

    /// Parses dotted text. A single trailing dot is accepted; `""` and `"."`
    /// both denote the root.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.strip_suffix('.').unwrap_or(s);
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        Self::from_labels(trimmed.split('.')).map_err(|e| match e {
            DomainError::InvalidDomainName(reason) => {
                DomainError::InvalidDomainName(format!("'{}': {}", s, reason))
            }
            other => other,
        })
    }
}
