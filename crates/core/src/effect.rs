// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effects requested by the scheduler and the events it emits

use crate::holder::HolderId;
use crate::respawn::ResourceCode;
use crate::snapshot::{ClaimRecord, QueueRecord};
use crate::traced::TracedEffect;
use serde::{Deserialize, Serialize};

/// Side effects produced by scheduler operations.
///
/// The scheduler itself never performs I/O; the executor runs these after
/// the registry mutation has been committed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Emit an event for logging and observers
    Emit(Event),
    /// Overwrite the claims record
    SaveClaims { records: Vec<ClaimRecord> },
    /// Overwrite the queue record
    SaveQueue { record: QueueRecord },
    /// Push the rendered board to the display surface
    PublishBoard { text: String },
    /// Best-effort private message
    Notify { holder: HolderId, text: String },
    /// Attention-grabbing poke, falling back to a private message
    Alert { holder: HolderId, text: String },
}

impl TracedEffect for Effect {
    fn name(&self) -> &'static str {
        match self {
            Effect::Emit(_) => "emit",
            Effect::SaveClaims { .. } => "save_claims",
            Effect::SaveQueue { .. } => "save_queue",
            Effect::PublishBoard { .. } => "publish_board",
            Effect::Notify { .. } => "notify",
            Effect::Alert { .. } => "alert",
        }
    }

    fn fields(&self) -> Vec<(&'static str, String)> {
        match self {
            Effect::Emit(event) => vec![("event", event.name().to_string())],
            Effect::SaveClaims { records } => vec![("claims", records.len().to_string())],
            Effect::SaveQueue { record } => vec![
                ("entries", record.queue_entries.len().to_string()),
                ("offers", record.offers.len().to_string()),
            ],
            Effect::PublishBoard { text } => vec![("lines", text.lines().count().to_string())],
            Effect::Notify { holder, .. } | Effect::Alert { holder, .. } => {
                vec![("holder", holder.to_string())]
            }
        }
    }
}

/// Events emitted on every state transition
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Event {
    ClaimAcquired {
        holder: HolderId,
        resource: ResourceCode,
        minutes: u32,
    },
    ClaimReplaced {
        holder: HolderId,
        resource: ResourceCode,
        minutes: u32,
    },
    ClaimReleased {
        holder: HolderId,
        resource: ResourceCode,
    },
    ClaimExpired {
        holder: HolderId,
        resource: ResourceCode,
    },
    Enqueued {
        holder: HolderId,
        resource: ResourceCode,
        position: usize,
    },
    Dequeued {
        holder: HolderId,
        resource: ResourceCode,
    },
    OfferCreated {
        holder: HolderId,
        resource: ResourceCode,
        minutes: u32,
    },
    OfferAccepted {
        holder: HolderId,
        resource: ResourceCode,
        minutes: u32,
    },
    OfferDeclined {
        holder: HolderId,
        resource: ResourceCode,
    },
    OfferExpired {
        holder: HolderId,
        resource: ResourceCode,
    },
    ResourceFreed {
        resource: ResourceCode,
    },
}

impl Event {
    /// Event name in "category:action" form
    pub fn name(&self) -> &'static str {
        match self {
            Event::ClaimAcquired { .. } => "claim:acquired",
            Event::ClaimReplaced { .. } => "claim:replaced",
            Event::ClaimReleased { .. } => "claim:released",
            Event::ClaimExpired { .. } => "claim:expired",
            Event::Enqueued { .. } => "queue:enqueued",
            Event::Dequeued { .. } => "queue:dequeued",
            Event::OfferCreated { .. } => "offer:created",
            Event::OfferAccepted { .. } => "offer:accepted",
            Event::OfferDeclined { .. } => "offer:declined",
            Event::OfferExpired { .. } => "offer:expired",
            Event::ResourceFreed { .. } => "resource:freed",
        }
    }

    pub fn resource(&self) -> &ResourceCode {
        match self {
            Event::ClaimAcquired { resource, .. }
            | Event::ClaimReplaced { resource, .. }
            | Event::ClaimReleased { resource, .. }
            | Event::ClaimExpired { resource, .. }
            | Event::Enqueued { resource, .. }
            | Event::Dequeued { resource, .. }
            | Event::OfferCreated { resource, .. }
            | Event::OfferAccepted { resource, .. }
            | Event::OfferDeclined { resource, .. }
            | Event::OfferExpired { resource, .. }
            | Event::ResourceFreed { resource } => resource,
        }
    }
}

#[cfg(test)]
#[path = "effect_tests.rs"]
mod tests;
