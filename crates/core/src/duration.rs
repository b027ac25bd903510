// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claim duration grammar
//!
//! Durations are written `H:MM` or `HH:MM`. Hours must be in `0..=2`,
//! minutes in `0..=59`, and the total may not exceed two and a half hours.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use thiserror::Error;

// Allow expect here as the regex is compile-time verified to be valid
#[allow(clippy::expect_used)]
static DURATION_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(\d{1,2}):(\d{2})$").expect("constant regex pattern is valid"));

const MAX_HOURS: u32 = 2;
const MAX_MINUTES: u32 = 150;

/// Rejected duration input
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DurationError {
    #[error("invalid duration '{0}': use H:MM or HH:MM (maximum 2:30)")]
    Malformed(String),
    #[error("invalid duration '{0}': hours must be 0-2 and minutes 0-59")]
    OutOfRange(String),
    #[error("invalid duration '{input}': {minutes} minutes exceeds the 2:30 maximum")]
    TooLong { input: String, minutes: u32 },
}

/// Validated claim length in whole minutes
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimDuration(u32);

impl ClaimDuration {
    /// Longest claim that can be requested
    pub const MAX: ClaimDuration = ClaimDuration(MAX_MINUTES);

    /// Used when no duration is supplied
    pub const DEFAULT: ClaimDuration = ClaimDuration::MAX;

    /// Parse an optional user-supplied duration, defaulting when absent
    pub fn parse(input: Option<&str>) -> Result<Self, DurationError> {
        match input {
            None => Ok(Self::DEFAULT),
            Some(text) => text.parse(),
        }
    }

    /// Build from a minute count, enforcing the same upper bound as the grammar
    pub fn from_minutes(minutes: u32) -> Result<Self, DurationError> {
        if minutes > MAX_MINUTES {
            return Err(DurationError::TooLong {
                input: format!("{}:{:02}", minutes / 60, minutes % 60),
                minutes,
            });
        }
        Ok(Self(minutes))
    }

    pub fn minutes(self) -> u32 {
        self.0
    }
}

impl std::str::FromStr for ClaimDuration {
    type Err = DurationError;

    fn from_str(text: &str) -> Result<Self, Self::Err> {
        let text = text.trim();
        let caps = DURATION_PATTERN
            .captures(text)
            .ok_or_else(|| DurationError::Malformed(text.to_string()))?;

        let hours: u32 = caps[1]
            .parse()
            .map_err(|_| DurationError::Malformed(text.to_string()))?;
        let minutes: u32 = caps[2]
            .parse()
            .map_err(|_| DurationError::Malformed(text.to_string()))?;

        if hours > MAX_HOURS || minutes >= 60 {
            return Err(DurationError::OutOfRange(text.to_string()));
        }

        let total = hours * 60 + minutes;
        if total > MAX_MINUTES {
            return Err(DurationError::TooLong {
                input: text.to_string(),
                minutes: total,
            });
        }
        Ok(Self(total))
    }
}

impl std::fmt::Display for ClaimDuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{:02}", self.0 / 60, self.0 % 60)
    }
}

/// Format a remaining-minutes counter for the board, e.g. `[02:30]`
pub fn format_remaining(minutes: u32) -> String {
    format!("[{:02}:{:02}]", minutes / 60, minutes % 60)
}

#[cfg(test)]
#[path = "duration_tests.rs"]
mod tests;
