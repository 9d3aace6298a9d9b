use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RulesConfig {
    /// Rule file compiled once at startup.
    #[serde(default = "default_rules_path")]
    pub path: String,

    /// TTL placed on answers synthesised from `Found` rules.
    #[serde(default = "default_answer_ttl")]
    pub answer_ttl: u32,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            path: default_rules_path(),
            answer_ttl: default_answer_ttl(),
        }
    }
}

fn default_rules_path() -> String {
    "rules.conf".to_string()
}

fn default_answer_ttl() -> u32 {
    1
}
