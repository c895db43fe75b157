//! HTTP server configuration.

use serde::{Deserialize, Serialize};

fn default_addr() -> String {
    "127.0.0.1:3000".to_string()
}

const fn default_permissive_cors() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    /// Socket address to bind.
    #[serde(default = "default_addr")]
    pub addr: String,

    /// Bearer token required on every request. Empty disables auth.
    #[serde(default)]
    pub auth_token: String,

    /// Allow any origin. Needed when the UI is served from another port.
    #[serde(default = "default_permissive_cors")]
    pub permissive_cors: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            addr: default_addr(),
            auth_token: String::new(),
            permissive_cors: default_permissive_cors(),
        }
    }
}

impl ServerConfig {
    /// The token to enforce, if auth is enabled.
    #[must_use]
    pub fn auth_token(&self) -> Option<&str> {
        let token = self.auth_token.trim();
        (!token.is_empty()).then_some(token)
    }
}
