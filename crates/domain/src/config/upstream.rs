use super::errors::ConfigError;
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UpstreamConfig {
    /// Resolver that receives queries no rule matched, as `IP:PORT`.
    #[serde(default = "default_server")]
    pub server: String,

    /// How long a forwarded query waits for its reply before it is dropped.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Upper bound on queries awaiting an upstream reply.
    #[serde(default = "default_max_pending")]
    pub max_pending: usize,
}

impl UpstreamConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.server.parse::<SocketAddr>().map_err(|e| {
            ConfigError::Validation(format!("Invalid upstream server '{}': {}", self.server, e))
        })
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            server: default_server(),
            timeout_secs: default_timeout_secs(),
            max_pending: default_max_pending(),
        }
    }
}

fn default_server() -> String {
    "1.1.1.1:53".to_string()
}

fn default_timeout_secs() -> u64 {
    5
}

fn default_max_pending() -> usize {
    4096
}
