// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Optional `rcd.toml` settings

use std::path::{Path, PathBuf};
use std::time::Duration;

use rc_engine::RuntimeConfig;
use serde::Deserialize;
use thiserror::Error;

/// Settings errors
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid settings: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid settings: {0} must be greater than zero")]
    Zero(&'static str),
}

/// Daemon timing and socket settings
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Settings {
    /// How long an offered respawn stays reserved
    #[serde(with = "humantime_serde")]
    pub offer_ttl: Duration,
    /// Length of one countdown minute
    #[serde(with = "humantime_serde")]
    pub tick_interval: Duration,
    /// Pause between gateway connection attempts
    #[serde(with = "humantime_serde")]
    pub reconnect_delay: Duration,
    /// How often the event loop fires due timers
    #[serde(with = "humantime_serde")]
    pub poll_interval: Duration,
    pub socket_path: Option<PathBuf>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            offer_ttl: Duration::from_secs(10 * 60),
            tick_interval: Duration::from_secs(60),
            reconnect_delay: Duration::from_secs(5),
            poll_interval: Duration::from_secs(1),
            socket_path: None,
        }
    }
}

impl Settings {
    pub fn parse(text: &str) -> Result<Self, SettingsError> {
        let settings: Settings = toml::from_str(text)?;
        settings.validate()?;
        Ok(settings)
    }

    /// Load from `path`; a missing file yields the defaults
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        match std::fs::read_to_string(path) {
            Ok(text) => Self::parse(&text),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(e) => Err(e.into()),
        }
    }

    fn validate(&self) -> Result<(), SettingsError> {
        if self.tick_interval.is_zero() {
            return Err(SettingsError::Zero("tick_interval"));
        }
        if self.poll_interval.is_zero() {
            return Err(SettingsError::Zero("poll_interval"));
        }
        if self.offer_ttl.is_zero() {
            return Err(SettingsError::Zero("offer_ttl"));
        }
        Ok(())
    }

    pub fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            offer_ttl: self.offer_ttl,
            tick_interval: self.tick_interval,
            reconnect_delay: self.reconnect_delay,
        }
    }
}

#[cfg(test)]
#[path = "settings_tests.rs"]
mod tests;
