use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Root configuration container.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub effects: EffectsConfig,
    #[serde(default)]
    pub facts: FactsConfig,
}

/// Settings for built-in effect adapters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectsConfig {
    /// Counter timer tick interval in milliseconds (default: 1000).
    #[serde(default = "default_timer_interval_ms")]
    pub timer_interval_ms: u64,
}

/// Number-fact service settings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FactsConfig {
    /// Service base URL; requests go to `{base_url}/{number}?json`.
    #[serde(default = "default_facts_base_url")]
    pub base_url: String,
    /// Request timeout in seconds (default: 10).
    #[serde(default = "default_facts_timeout")]
    pub timeout_seconds: u64,
}

fn default_timer_interval_ms() -> u64 {
    1000
}

fn default_facts_base_url() -> String {
    "http://numbersapi.com".to_string()
}

fn default_facts_timeout() -> u64 {
    10
}

impl Default for EffectsConfig {
    fn default() -> Self {
        Self {
            timer_interval_ms: default_timer_interval_ms(),
        }
    }
}

impl Default for FactsConfig {
    fn default() -> Self {
        Self {
            base_url: default_facts_base_url(),
            timeout_seconds: default_facts_timeout(),
        }
    }
}

impl Config {
    pub fn timer_interval(&self) -> Duration {
        Duration::from_millis(self.effects.timer_interval_ms)
    }
}

impl FactsConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}
