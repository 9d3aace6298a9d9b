use ruledns_domain::config::{Config, ConfigError, UpstreamConfig};
use ruledns_domain::CliOverrides;
use std::io::Write;

#[test]
fn test_config_default_values() {
    let config = Config::default();

    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.server.bind_address, "0.0.0.0");
    assert_eq!(config.upstream.server, "1.1.1.1:53");
    assert_eq!(config.upstream.timeout_secs, 5);
    assert_eq!(config.upstream.max_pending, 4096);
    assert_eq!(config.rules.path, "rules.conf");
    assert_eq!(config.rules.answer_ttl, 1);
    assert_eq!(config.logging.level, "info");
    assert!(!config.logging.json);
    assert!(config.validate().is_ok());
}

#[test]
fn test_config_deserialization_with_all_fields() {
    let toml_str = r#"
        [server]
        bind_address = "127.0.0.1"
        dns_port = 5353

        [upstream]
        server = "9.9.9.9:53"
        timeout_secs = 2
        max_pending = 128

        [rules]
        path = "/etc/ruledns/rules.conf"
        answer_ttl = 60

        [logging]
        level = "debug"
        json = true
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.server.listen_addr(), "127.0.0.1:5353");
    assert_eq!(config.upstream.server, "9.9.9.9:53");
    assert_eq!(config.upstream.timeout().as_secs(), 2);
    assert_eq!(config.upstream.max_pending, 128);
    assert_eq!(config.rules.path, "/etc/ruledns/rules.conf");
    assert_eq!(config.rules.answer_ttl, 60);
    assert_eq!(config.logging.level, "debug");
    assert!(config.logging.json);
}

#[test]
fn test_config_partial_sections_use_defaults() {
    let toml_str = r#"
        [rules]
        path = "custom.rules"
    "#;

    let config: Config = toml::from_str(toml_str).unwrap();

    assert_eq!(config.rules.path, "custom.rules");
    assert_eq!(config.rules.answer_ttl, 1);
    assert_eq!(config.server.dns_port, 53);
    assert_eq!(config.upstream.server, "1.1.1.1:53");
}

#[test]
fn test_load_from_file_applies_overrides() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server]\ndns_port = 5300\n\n[logging]\nlevel = \"warn\"").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let overrides = CliOverrides {
        bind_address: Some("127.0.0.1".to_string()),
        rules_path: Some("other.rules".to_string()),
        log_level: Some("trace".to_string()),
        ..CliOverrides::default()
    };

    let config = Config::load(Some(&path), overrides).unwrap();

    assert_eq!(config.server.dns_port, 5300);
    assert_eq!(config.server.bind_address, "127.0.0.1");
    assert_eq!(config.rules.path, "other.rules");
    assert_eq!(config.logging.level, "trace");
}

#[test]
fn test_load_missing_file_fails() {
    let result = Config::load(Some("/nonexistent/ruledns.toml"), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::FileRead(_, _))));
}

#[test]
fn test_load_invalid_toml_fails() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "[server\ndns_port = ").unwrap();
    let path = file.path().to_str().unwrap().to_string();

    let result = Config::load(Some(&path), CliOverrides::default());
    assert!(matches!(result, Err(ConfigError::Parse(_))));
}

#[test]
fn test_validate_rejects_zero_port() {
    let mut config = Config::default();
    config.server.dns_port = 0;
    assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
}

#[test]
fn test_validate_rejects_bad_upstream() {
    let mut config = Config::default();
    config.upstream.server = "not-an-address".to_string();
    assert!(config.validate().is_err());

    let upstream = UpstreamConfig {
        server: "8.8.8.8".to_string(),
        ..UpstreamConfig::default()
    };
    assert!(upstream.socket_addr().is_err());
}

#[test]
fn test_validate_rejects_zero_timeout_and_capacity() {
    let mut config = Config::default();
    config.upstream.timeout_secs = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.upstream.max_pending = 0;
    assert!(config.validate().is_err());
}

#[test]
fn test_validate_rejects_empty_rules_path() {
    let mut config = Config::default();
    config.rules.path = "  ".to_string();
    assert!(config.validate().is_err());
}

#[test]
fn test_listen_addr_brackets_ipv6() {
    let mut config = Config::default();
    config.server.bind_address = "::".to_string();
    config.server.dns_port = 5353;
    assert_eq!(config.server.listen_addr(), "[::]:5353");
    assert!(config.server.listen_addr().parse::<std::net::SocketAddr>().is_ok());
}
