use serde::{Deserialize, Serialize};

use super::errors::ConfigError;
use super::logging::LoggingConfig;
use super::rules::RulesConfig;
use super::server::ServerConfig;
use super::upstream::UpstreamConfig;

/// Main configuration structure for ruledns
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// Listening socket
    #[serde(default)]
    pub server: ServerConfig,

    /// Where unmatched queries go
    #[serde(default)]
    pub upstream: UpstreamConfig,

    /// Rule file and answer shaping
    #[serde(default)]
    pub rules: RulesConfig,

    /// Logging configuration
    #[serde(default)]
    pub logging: LoggingConfig,
}

const LOCAL_CONFIG: &str = "ruledns.toml";
const SYSTEM_CONFIG: &str = "/etc/ruledns/config.toml";

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. ruledns.toml in current directory
    /// 3. /etc/ruledns/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = path {
            Self::from_file(path)?
        } else if let Some(found) = Self::get_config_path() {
            Self::from_file(&found)?
        } else {
            Self::default()
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(rules) = overrides.rules_path {
            self.rules.path = rules;
        }
        if let Some(upstream) = overrides.upstream {
            self.upstream.server = upstream;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.upstream.socket_addr()?;

        if self.upstream.timeout_secs == 0 {
            return Err(ConfigError::Validation(
                "Upstream timeout must be at least one second".to_string(),
            ));
        }

        if self.upstream.max_pending == 0 {
            return Err(ConfigError::Validation(
                "Upstream max_pending cannot be 0".to_string(),
            ));
        }

        if self.rules.path.trim().is_empty() {
            return Err(ConfigError::Validation(
                "No rules file configured".to_string(),
            ));
        }

        Ok(())
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG).exists() {
            Some(LOCAL_CONFIG.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG).exists() {
            Some(SYSTEM_CONFIG.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub rules_path: Option<String>,
    pub upstream: Option<String>,
    pub log_level: Option<String>,
}
