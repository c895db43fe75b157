//! Assistant (LLM provider) configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

fn default_model() -> String {
    "gemini-2.5-flash".to_string()
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com".to_string()
}

const fn default_max_iterations() -> u32 {
    8
}

const fn default_timeout_secs() -> u64 {
    60
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AssistantConfig {
    /// Gemini API key.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_model")]
    pub model: String,

    /// API root, overridable for proxies and tests.
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Upper bound on model calls per chat turn.
    #[serde(default = "default_max_iterations")]
    pub max_iterations: u32,

    /// Request timeout for each model call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for AssistantConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            model: default_model(),
            base_url: default_base_url(),
            max_iterations: default_max_iterations(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl AssistantConfig {
    #[must_use]
    pub fn is_configured(&self) -> bool {
        !self.api_key.trim().is_empty()
    }

    /// Fail unless an API key is present.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingSetting`] when `api_key` is blank.
    pub fn require_configured(&self) -> Result<(), ConfigError> {
        if self.is_configured() {
            Ok(())
        } else {
            Err(ConfigError::missing("assistant", "api_key"))
        }
    }
}
