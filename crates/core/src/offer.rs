// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending accept-offers

use crate::duration::ClaimDuration;
use crate::holder::HolderId;
use crate::queue::QueueEntry;
use crate::respawn::ResourceCode;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Time-limited right of first refusal on a freed respawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Offer {
    pub holder: HolderId,
    pub holder_name: String,
    pub resource: ResourceCode,
    pub desired: ClaimDuration,
    pub expires_at: DateTime<Utc>,
}

impl Offer {
    /// Promote a queue entry into an offer that lapses after `ttl`
    pub fn from_entry(entry: QueueEntry, now: DateTime<Utc>, ttl: Duration) -> Self {
        let ttl = chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::zero());
        Self {
            holder: entry.holder,
            holder_name: entry.holder_name,
            resource: entry.resource,
            desired: entry.desired,
            expires_at: now + ttl,
        }
    }

    /// Time left before the offer lapses, `None` once it has
    pub fn remaining(&self, now: DateTime<Utc>) -> Option<Duration> {
        (self.expires_at - now).to_std().ok().filter(|d| !d.is_zero())
    }
}

#[cfg(test)]
#[path = "offer_tests.rs"]
mod tests;
