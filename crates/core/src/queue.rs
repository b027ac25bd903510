// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Waiting-list entries

use crate::duration::ClaimDuration;
use crate::holder::{Holder, HolderId};
use crate::respawn::ResourceCode;
use chrono::{DateTime, Utc};

/// A holder waiting in line for a claimed respawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueEntry {
    pub holder: HolderId,
    pub holder_name: String,
    pub resource: ResourceCode,
    pub desired: ClaimDuration,
    pub enqueued_at: DateTime<Utc>,
}

impl QueueEntry {
    pub fn new(
        holder: &Holder,
        resource: ResourceCode,
        desired: ClaimDuration,
        enqueued_at: DateTime<Utc>,
    ) -> Self {
        Self {
            holder: holder.id.clone(),
            holder_name: holder.name.clone(),
            resource,
            desired,
            enqueued_at,
        }
    }

    pub fn holder(&self) -> Holder {
        Holder {
            id: self.holder.clone(),
            name: self.holder_name.clone(),
        }
    }
}
