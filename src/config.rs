//! Page behavior configuration.
//!
//! Every field has a default matching the markup the server renders, so an
//! empty JSON object (or no config at all) yields the stock behavior.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::time::Duration;

use serde::Deserialize;

use crate::error::ConfigError;

pub const DEFAULT_TOGGLE_ID: &str = "theme-toggle";
pub const DEFAULT_COUNTDOWN_ID: &str = "countdown";
pub const DEFAULT_STORAGE_KEY: &str = "theme";
pub const DEFAULT_LIGHT_CLASS: &str = "light-mode";
pub const DEFAULT_COUNTDOWN_SECONDS: i64 = 5;
pub const DEFAULT_TICK_MS: u64 = 1000;
pub const DEFAULT_REDIRECT_PATH: &str = "/";
/// `setTimeout`/`setInterval` delays are signed 32-bit milliseconds.
pub const MAX_TICK_MS: u64 = i32::MAX as u64;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    pub toggle_id: String,
    pub countdown_id: String,
    pub storage_key: String,
    pub light_class: String,
    pub countdown_seconds: i64,
    pub tick_ms: u64,
    pub redirect_path: String,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            toggle_id: DEFAULT_TOGGLE_ID.to_owned(),
            countdown_id: DEFAULT_COUNTDOWN_ID.to_owned(),
            storage_key: DEFAULT_STORAGE_KEY.to_owned(),
            light_class: DEFAULT_LIGHT_CLASS.to_owned(),
            countdown_seconds: DEFAULT_COUNTDOWN_SECONDS,
            tick_ms: DEFAULT_TICK_MS,
            redirect_path: DEFAULT_REDIRECT_PATH.to_owned(),
        }
    }
}

impl PageConfig {
    /// Parse config overrides from JSON. Missing fields keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Json`] for malformed input and
    /// [`ConfigError::ZeroTick`] when `tick_ms` is zero, and
    /// [`ConfigError::TickTooLarge`] above [`MAX_TICK_MS`].
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        if config.tick_ms == 0 {
            return Err(ConfigError::ZeroTick);
        }
        if config.tick_ms > MAX_TICK_MS {
            return Err(ConfigError::TickTooLarge(config.tick_ms));
        }
        Ok(config)
    }

    /// Like [`Self::from_json`], but falls back to defaults on bad input.
    pub fn from_json_or_default(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|r| !r.trim().is_empty()) else {
            return Self::default();
        };
        match Self::from_json(raw) {
            Ok(config) => config,
            Err(e) => {
                log::warn!("ignoring page config: {e}");
                Self::default()
            }
        }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_ms)
    }
}
