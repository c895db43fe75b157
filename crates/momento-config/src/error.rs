//! Errors raised while loading or checking a [`crate::MomentoConfig`].

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    /// A TOML file or `MOMENTO_*` variable could not be read into the config.
    #[error("Failed to load Momento config: {0}")]
    Load(#[from] figment::Error),

    /// A setting needed by an optional feature is blank, e.g. `[assistant] api_key`.
    #[error("[{section}] {key} is not set (MOMENTO_{env_section}__{env_key})")]
    MissingSetting {
        section: &'static str,
        key: &'static str,
        env_section: String,
        env_key: String,
    },

    #[error("{field} {reason}")]
    InvalidValue { field: String, reason: String },
}

impl ConfigError {
    pub(crate) fn missing(section: &'static str, key: &'static str) -> Self {
        Self::MissingSetting {
            section,
            key,
            env_section: section.to_uppercase(),
            env_key: key.to_uppercase(),
        }
    }
}
