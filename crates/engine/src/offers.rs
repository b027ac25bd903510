// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Pending accept-offers
//!
//! An offer is keyed by (holder, respawn). Timeouts live in the timer
//! engine under the same key.

use crate::queue::QueueManager;
use chrono::{DateTime, Utc};
use rc_core::{HolderId, Offer, OfferRecord, ResourceCode};
use std::collections::BTreeMap;
use std::time::Duration;

#[derive(Debug, Default)]
pub struct OfferManager {
    offers: BTreeMap<(HolderId, ResourceCode), Offer>,
}

impl OfferManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Promote the head of the respawn's queue into an offer lapsing after `ttl`.
    ///
    /// Returns `None` when nobody is waiting.
    pub fn create_offer(
        &mut self,
        queues: &mut QueueManager,
        resource: &ResourceCode,
        now: DateTime<Utc>,
        ttl: Duration,
    ) -> Option<Offer> {
        let entry = queues.pop_head(resource)?;
        let offer = Offer::from_entry(entry, now, ttl);
        self.offers
            .insert((offer.holder.clone(), offer.resource.clone()), offer.clone());
        Some(offer)
    }

    /// Insert a restored offer. Refused if the holder already has one for
    /// the respawn or the respawn is already offered to someone.
    pub fn insert(&mut self, offer: Offer) -> bool {
        let key = (offer.holder.clone(), offer.resource.clone());
        if self.offers.contains_key(&key) || self.has_for_resource(&offer.resource) {
            return false;
        }
        self.offers.insert(key, offer);
        true
    }

    /// Remove the holder's offer on one respawn
    pub fn take(&mut self, holder: &HolderId, resource: &ResourceCode) -> Option<Offer> {
        self.offers.remove(&(holder.clone(), resource.clone()))
    }

    /// The holder's soonest-lapsing offer across all respawns
    pub fn first_for_holder(&self, holder: &HolderId) -> Option<&Offer> {
        self.offers
            .iter()
            .filter(|((h, _), _)| h == holder)
            .map(|(_, offer)| offer)
            .min_by_key(|offer| offer.expires_at)
    }

    pub fn get(&self, holder: &HolderId, resource: &ResourceCode) -> Option<&Offer> {
        self.offers.get(&(holder.clone(), resource.clone()))
    }

    pub fn contains(&self, holder: &HolderId, resource: &ResourceCode) -> bool {
        self.get(holder, resource).is_some()
    }

    /// The outstanding offer on a respawn, whoever holds it
    pub fn for_resource(&self, resource: &ResourceCode) -> Option<&Offer> {
        self.offers.values().find(|o| &o.resource == resource)
    }

    pub fn has_for_resource(&self, resource: &ResourceCode) -> bool {
        self.for_resource(resource).is_some()
    }

    /// Offers in respawn-code order
    pub fn by_resource(&self) -> Vec<&Offer> {
        let mut offers: Vec<&Offer> = self.offers.values().collect();
        offers.sort_by(|a, b| a.resource.cmp(&b.resource));
        offers
    }

    pub fn len(&self) -> usize {
        self.offers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.offers.is_empty()
    }

    pub fn clear(&mut self) {
        self.offers.clear();
    }

    pub fn records(&self) -> Vec<OfferRecord> {
        self.by_resource().into_iter().map(OfferRecord::from).collect()
    }
}

#[cfg(test)]
#[path = "offers_tests.rs"]
mod tests;
