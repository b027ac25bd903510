// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claim holders

use serde::{Deserialize, Serialize};

/// Stable identifier of a user that can hold claims
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HolderId(pub String);

impl HolderId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for HolderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A user as seen by the scheduler: identity plus the display name they had
/// when issuing the command
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Holder {
    pub id: HolderId,
    pub name: String,
}

impl Holder {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: HolderId::new(id),
            name: name.into(),
        }
    }
}
