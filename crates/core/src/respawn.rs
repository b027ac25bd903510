// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Respawn catalog
//!
//! Respawns are the contested in-world locations that can be claimed. The
//! catalog is a fixed table; unknown codes are still claimable and get a
//! generic description.

use serde::{Deserialize, Serialize};

/// Short, case-insensitive code of a respawn (e.g. `f4`)
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct ResourceCode(String);

impl ResourceCode {
    pub fn new(code: impl AsRef<str>) -> Self {
        Self(code.as_ref().trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for ResourceCode {
    fn from(code: String) -> Self {
        Self::new(code)
    }
}

impl From<&str> for ResourceCode {
    fn from(code: &str) -> Self {
        Self::new(code)
    }
}

impl From<ResourceCode> for String {
    fn from(code: ResourceCode) -> Self {
        code.0
    }
}

impl std::fmt::Display for ResourceCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Display name and tier of a respawn
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RespawnInfo {
    pub name: String,
    pub tier: String,
}

const KNOWN_RESPAWNS: &[(&str, &str, &str)] = &[
    ("f4", "Cobra Castelo", "Tier 1"),
    ("a1", "Dragão Vermelho", "Tier 2"),
    ("b3", "Lich Supremo", "Tier 3"),
    ("x7", "Demônio Ancião", "Tier 4"),
    ("c2", "Orc Warlord", "Tier 1"),
    ("d5", "Hydra Anciã", "Tier 2"),
    ("e8", "Necromante Negro", "Tier 3"),
    ("g1", "Titan de Ferro", "Tier 4"),
];

/// Lookup table from resource code to respawn description
#[derive(Clone, Debug)]
pub struct RespawnCatalog {
    entries: Vec<(ResourceCode, RespawnInfo)>,
}

impl Default for RespawnCatalog {
    fn default() -> Self {
        let entries = KNOWN_RESPAWNS
            .iter()
            .map(|(code, name, tier)| {
                (
                    ResourceCode::new(code),
                    RespawnInfo {
                        name: (*name).to_string(),
                        tier: (*tier).to_string(),
                    },
                )
            })
            .collect();
        Self { entries }
    }
}

impl RespawnCatalog {
    /// Whether the code is part of the fixed table
    pub fn is_known(&self, code: &ResourceCode) -> bool {
        self.entries.iter().any(|(c, _)| c == code)
    }

    /// Describe a respawn, falling back to a generic entry for unknown codes
    pub fn describe(&self, code: &ResourceCode) -> RespawnInfo {
        self.entries
            .iter()
            .find(|(c, _)| c == code)
            .map(|(_, info)| info.clone())
            .unwrap_or_else(|| RespawnInfo {
                name: format!("Respawn {}", code.as_str().to_uppercase()),
                tier: "Tier ?".to_string(),
            })
    }

    pub fn codes(&self) -> impl Iterator<Item = &ResourceCode> {
        self.entries.iter().map(|(c, _)| c)
    }
}

#[cfg(test)]
#[path = "respawn_tests.rs"]
mod tests;
