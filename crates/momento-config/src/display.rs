//! How timestamps are rendered for people.

use momento_core::time::{DEFAULT_DISPLAY_OFFSET_MINUTES, DisplayOptions};
use serde::{Deserialize, Serialize};

const fn default_offset() -> i32 {
    DEFAULT_DISPLAY_OFFSET_MINUTES
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Display zone as minutes east of UTC (330 = UTC+05:30).
    #[serde(default = "default_offset")]
    pub utc_offset_minutes: i32,

    #[serde(default)]
    pub include_seconds: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            utc_offset_minutes: default_offset(),
            include_seconds: false,
        }
    }
}

impl DisplayConfig {
    #[must_use]
    pub fn options(&self) -> DisplayOptions {
        DisplayOptions::default()
            .with_offset_minutes(self.utc_offset_minutes)
            .with_seconds(self.include_seconds)
    }
}
