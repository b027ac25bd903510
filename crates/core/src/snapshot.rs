// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Persisted record shapes
//!
//! Two independent records are written: the ordered list of claims and the
//! queue record holding waiting entries and outstanding offers. Timestamps
//! are milliseconds since the Unix epoch. Field aliases accept backups
//! written by the previous bot.

use crate::claim::Claim;
use crate::duration::{ClaimDuration, DurationError};
use crate::holder::HolderId;
use crate::offer::Offer;
use crate::queue::QueueEntry;
use crate::respawn::ResourceCode;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

const MILLIS_PER_MINUTE: i64 = 60_000;

pub fn to_millis(at: DateTime<Utc>) -> i64 {
    at.timestamp_millis()
}

pub fn from_millis(ms: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(ms).unwrap_or_default()
}

/// One entry of the claims record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClaimRecord {
    #[serde(alias = "userId")]
    pub holder_id: String,
    #[serde(alias = "userName")]
    pub holder_name: String,
    #[serde(alias = "codigo")]
    pub resource_code: String,
    #[serde(alias = "nomeRespawn")]
    pub resource_name: String,
    pub tier: String,
    #[serde(alias = "tempoRestante")]
    pub remaining_minutes: i64,
    #[serde(alias = "iniciadoEm")]
    pub started_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none", alias = "salvoEm")]
    pub saved_at: Option<i64>,
}

impl ClaimRecord {
    pub fn capture(claim: &Claim, saved_at: DateTime<Utc>) -> Self {
        Self {
            holder_id: claim.holder.0.clone(),
            holder_name: claim.holder_name.clone(),
            resource_code: claim.resource.to_string(),
            resource_name: claim.resource_name.clone(),
            tier: claim.tier.clone(),
            remaining_minutes: i64::from(claim.remaining_minutes),
            started_at: to_millis(claim.started_at),
            saved_at: Some(to_millis(saved_at)),
        }
    }

    /// Whole minutes elapsed since the record was written.
    ///
    /// Records without `savedAt` count from `startedAt`, which under-counts
    /// after more than one restart.
    pub fn elapsed_minutes(&self, now: DateTime<Utc>) -> i64 {
        let reference = self.saved_at.unwrap_or(self.started_at);
        ((to_millis(now) - reference) / MILLIS_PER_MINUTE).max(0)
    }

    /// Minutes left after compensating for downtime; zero or less means expired
    pub fn remaining_at(&self, now: DateTime<Utc>) -> i64 {
        self.remaining_minutes - self.elapsed_minutes(now)
    }

    pub fn resource(&self) -> ResourceCode {
        ResourceCode::new(&self.resource_code)
    }

    pub fn holder(&self) -> HolderId {
        HolderId::new(self.holder_id.clone())
    }

    /// Rebuild the live claim with the given remaining minutes
    pub fn restore(&self, remaining_minutes: u32) -> Claim {
        Claim {
            holder: self.holder(),
            holder_name: self.holder_name.clone(),
            resource: self.resource(),
            resource_name: self.resource_name.clone(),
            tier: self.tier.clone(),
            remaining_minutes,
            started_at: from_millis(self.started_at),
        }
    }
}

/// One waiting entry of the queue record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueEntryRecord {
    #[serde(alias = "userId")]
    pub holder_id: String,
    #[serde(alias = "userName")]
    pub holder_name: String,
    #[serde(alias = "codigo")]
    pub resource_code: String,
    #[serde(alias = "tempoDesejado")]
    pub desired_minutes: u32,
    #[serde(alias = "adicionadoEm")]
    pub enqueued_at: i64,
}

impl From<&QueueEntry> for QueueEntryRecord {
    fn from(entry: &QueueEntry) -> Self {
        Self {
            holder_id: entry.holder.0.clone(),
            holder_name: entry.holder_name.clone(),
            resource_code: entry.resource.to_string(),
            desired_minutes: entry.desired.minutes(),
            enqueued_at: to_millis(entry.enqueued_at),
        }
    }
}

impl TryFrom<QueueEntryRecord> for QueueEntry {
    type Error = DurationError;

    fn try_from(record: QueueEntryRecord) -> Result<Self, Self::Error> {
        Ok(QueueEntry {
            holder: HolderId::new(record.holder_id),
            holder_name: record.holder_name,
            resource: ResourceCode::new(&record.resource_code),
            desired: ClaimDuration::from_minutes(record.desired_minutes)?,
            enqueued_at: from_millis(record.enqueued_at),
        })
    }
}

/// One outstanding offer of the queue record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OfferRecord {
    #[serde(alias = "userId")]
    pub holder_id: String,
    #[serde(alias = "userName")]
    pub holder_name: String,
    #[serde(alias = "codigo")]
    pub resource_code: String,
    #[serde(alias = "tempoDesejado")]
    pub desired_minutes: u32,
    #[serde(alias = "expiraEm")]
    pub expires_at: i64,
}

impl From<&Offer> for OfferRecord {
    fn from(offer: &Offer) -> Self {
        Self {
            holder_id: offer.holder.0.clone(),
            holder_name: offer.holder_name.clone(),
            resource_code: offer.resource.to_string(),
            desired_minutes: offer.desired.minutes(),
            expires_at: to_millis(offer.expires_at),
        }
    }
}

impl TryFrom<OfferRecord> for Offer {
    type Error = DurationError;

    fn try_from(record: OfferRecord) -> Result<Self, Self::Error> {
        Ok(Offer {
            holder: HolderId::new(record.holder_id),
            holder_name: record.holder_name,
            resource: ResourceCode::new(&record.resource_code),
            desired: ClaimDuration::from_minutes(record.desired_minutes)?,
            expires_at: from_millis(record.expires_at),
        })
    }
}

/// Waiting entries (FIFO per resource, in order) plus outstanding offers
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QueueRecord {
    #[serde(default, alias = "filas")]
    pub queue_entries: Vec<QueueEntryRecord>,
    #[serde(default, alias = "timeouts")]
    pub offers: Vec<OfferRecord>,
}

impl QueueRecord {
    pub fn is_empty(&self) -> bool {
        self.queue_entries.is_empty() && self.offers.is_empty()
    }
}

#[cfg(test)]
#[path = "snapshot_tests.rs"]
mod tests;
