// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Registry of active claims

use chrono::{DateTime, Utc};
use rc_core::{Claim, ClaimRecord, Conflict, HolderId, NotFound, ResourceCode};
use std::collections::BTreeMap;

/// Whether an acquire created a claim or restarted the holder's own
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Acquired {
    New,
    Replaced,
}

/// Authoritative map of claims, at most one per respawn
#[derive(Debug, Default)]
pub struct ClaimRegistry {
    claims: BTreeMap<ResourceCode, Claim>,
}

impl ClaimRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a claim, replacing the same holder's previous claim on that
    /// respawn. Fails if another holder has it.
    pub fn acquire(&mut self, claim: Claim) -> Result<Acquired, Conflict> {
        if let Some(existing) = self.claims.get(&claim.resource) {
            if existing.holder != claim.holder {
                return Err(Conflict::HeldByOther {
                    resource: claim.resource.clone(),
                    holder_name: existing.holder_name.clone(),
                });
            }
        }
        match self.claims.insert(claim.resource.clone(), claim) {
            Some(_) => Ok(Acquired::Replaced),
            None => Ok(Acquired::New),
        }
    }

    /// Remove the holder's claim on a respawn
    pub fn release(&mut self, holder: &HolderId, resource: &ResourceCode) -> Result<Claim, NotFound> {
        if !self.holds(holder, resource) {
            return Err(NotFound::Claim {
                resource: resource.clone(),
            });
        }
        self.claims.remove(resource).ok_or_else(|| NotFound::Claim {
            resource: resource.clone(),
        })
    }

    /// Count the holder's claim down by one minute.
    ///
    /// Returns the minutes left, or `None` if the claim no longer exists.
    pub fn tick(&mut self, holder: &HolderId, resource: &ResourceCode) -> Option<u32> {
        self.claims
            .get_mut(resource)
            .filter(|c| c.is_held_by(holder))
            .map(Claim::tick)
    }

    pub fn get(&self, resource: &ResourceCode) -> Option<&Claim> {
        self.claims.get(resource)
    }

    pub fn is_claimed(&self, resource: &ResourceCode) -> bool {
        self.claims.contains_key(resource)
    }

    pub fn holds(&self, holder: &HolderId, resource: &ResourceCode) -> bool {
        self.claims
            .get(resource)
            .is_some_and(|c| c.is_held_by(holder))
    }

    /// Claims in respawn-code order
    pub fn iter(&self) -> impl Iterator<Item = &Claim> {
        self.claims.values()
    }

    pub fn len(&self) -> usize {
        self.claims.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claims.is_empty()
    }

    pub fn clear(&mut self) {
        self.claims.clear();
    }

    /// Snapshot of every claim, stamped with the save time
    pub fn records(&self, saved_at: DateTime<Utc>) -> Vec<ClaimRecord> {
        self.claims
            .values()
            .map(|c| ClaimRecord::capture(c, saved_at))
            .collect()
    }
}

#[cfg(test)]
#[path = "registry_tests.rs"]
mod tests;
