// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Active claims

use crate::duration::{format_remaining, ClaimDuration};
use crate::holder::{Holder, HolderId};
use crate::respawn::{ResourceCode, RespawnInfo};
use chrono::{DateTime, Utc};

/// Exclusive, time-boxed hold of one holder on one respawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Claim {
    pub holder: HolderId,
    pub holder_name: String,
    pub resource: ResourceCode,
    pub resource_name: String,
    pub tier: String,
    pub remaining_minutes: u32,
    pub started_at: DateTime<Utc>,
}

impl Claim {
    pub fn new(
        holder: &Holder,
        resource: ResourceCode,
        info: RespawnInfo,
        duration: ClaimDuration,
        started_at: DateTime<Utc>,
    ) -> Self {
        Self {
            holder: holder.id.clone(),
            holder_name: holder.name.clone(),
            resource,
            resource_name: info.name,
            tier: info.tier,
            remaining_minutes: duration.minutes(),
            started_at,
        }
    }

    /// Count down one minute, returning what is left
    pub fn tick(&mut self) -> u32 {
        self.remaining_minutes = self.remaining_minutes.saturating_sub(1);
        self.remaining_minutes
    }

    pub fn is_held_by(&self, holder: &HolderId) -> bool {
        &self.holder == holder
    }

    /// Remaining time as shown on the board, e.g. `[01:10]`
    pub fn remaining_display(&self) -> String {
        format_remaining(self.remaining_minutes)
    }
}

#[cfg(test)]
#[path = "claim_tests.rs"]
mod tests;
