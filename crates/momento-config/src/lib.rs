//! # momento-config
//!
//! Layered configuration loading for Momento using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`MOMENTO_*` prefix, `__` as separator)
//! 2. `config.toml` in the directory passed with `--config-dir`
//! 3. Project-level `.momento/config.toml`
//! 4. User-level `~/.config/momento/config.toml`
//! 5. Built-in defaults
//!
//! # Environment Variable Mapping
//!
//! Figment maps `MOMENTO_ASSISTANT__API_KEY` -> `assistant.api_key`,
//! `MOMENTO_SERVER__ADDR` -> `server.addr`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use momento_config::MomentoConfig;
//!
//! let config = MomentoConfig::load_with_dotenv().expect("config");
//! if config.assistant.is_configured() {
//!     println!("model: {}", config.assistant.model);
//! }
//! ```

mod assistant;
mod database;
mod display;
mod error;
mod general;
mod server;

pub use assistant::AssistantConfig;
pub use database::DatabaseConfig;
pub use display::DisplayConfig;
pub use error::ConfigError;
pub use general::GeneralConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Largest offset any real zone uses (UTC+14:00).
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct MomentoConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl MomentoConfig {
    /// Load configuration from all sources (TOML files + environment variables).
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_from(None)
    }

    /// Load configuration, layering `extra` above the project file when given.
    pub fn load_from(extra: Option<&Path>) -> Result<Self, ConfigError> {
        let config: Self = Self::figment_with(extra).extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with `.env` file support.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Build the figment provider chain without an explicit file.
    pub fn figment() -> Figment {
        Self::figment_with(None)
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment directly or add providers on top.
    pub fn figment_with(extra: Option<&Path>) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = PathBuf::from(".momento/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        if let Some(path) = extra {
            figment = figment.merge(Toml::file(path));
        }

        figment.merge(Env::prefixed("MOMENTO_").split("__"))
    }

    /// Reject values that would only fail later at runtime.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] naming the first bad field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.database.path.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "database.path".into(),
                reason: "must not be empty".into(),
            });
        }
        if self.assistant.max_iterations == 0 {
            return Err(ConfigError::InvalidValue {
                field: "assistant.max_iterations".into(),
                reason: "must be at least 1".into(),
            });
        }
        if self.display.utc_offset_minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::InvalidValue {
                field: "display.utc_offset_minutes".into(),
                reason: format!("must be within ±{MAX_OFFSET_MINUTES}"),
            });
        }
        if self.general.default_limit == 0 {
            return Err(ConfigError::InvalidValue {
                field: "general.default_limit".into(),
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("momento").join("config.toml"))
    }
}
