// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Rebuilding scheduler state from the persisted records.
//!
//! Waiting entries are restored first so that claims which expired while the
//! daemon was down can hand off to the right holder. Valid offers come next,
//! and hand-off runs once per freed respawn at the very end.

use crate::scheduler::ClaimScheduler;
use crate::timers::TimerKey;
use rc_core::{ClaimRecord, Clock, Effect, Event, Offer, QueueEntry, QueueRecord, ResourceCode};
use std::collections::BTreeSet;

/// What recovery did with the loaded records
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RecoveryReport {
    pub claims_restored: usize,
    pub claims_expired: usize,
    pub entries_restored: usize,
    pub offers_restored: usize,
    pub offers_dropped: usize,
}

impl RecoveryReport {
    /// Whether the restored state differs from what was loaded
    pub fn changed_state(&self) -> bool {
        self.claims_expired > 0 || self.offers_dropped > 0
    }
}

impl<C: Clock> ClaimScheduler<C> {
    /// Merge persisted records into the (normally empty) live state.
    ///
    /// Claims are compensated for downtime; claims and offers that lapsed
    /// while down trigger the same hand-off a live expiry would.
    pub fn restore(
        &mut self,
        claims: Option<Vec<ClaimRecord>>,
        queue: Option<QueueRecord>,
    ) -> (RecoveryReport, Vec<Effect>) {
        let mut report = RecoveryReport::default();
        let mut effects = Vec::new();
        let mut freed: BTreeSet<ResourceCode> = BTreeSet::new();
        let QueueRecord {
            queue_entries,
            offers,
        } = queue.unwrap_or_default();

        for record in queue_entries {
            match QueueEntry::try_from(record) {
                Ok(entry) => {
                    if self.queues.restore(entry) {
                        report.entries_restored += 1;
                    }
                }
                Err(e) => tracing::warn!(error = %e, "skipping unreadable queue entry"),
            }
        }

        let utc_now = self.clock.utc_now();
        for record in claims.unwrap_or_default() {
            let resource = record.resource();
            let holder = record.holder();
            let remaining = record.remaining_at(utc_now);

            if self.claims.is_claimed(&resource) {
                tracing::warn!(%holder, %resource, "duplicate claim record, skipping");
                continue;
            }
            if remaining <= 0 {
                tracing::info!(%holder, %resource, remaining, "claim expired while down");
                report.claims_expired += 1;
                effects.push(Effect::Emit(Event::ClaimExpired {
                    holder,
                    resource: resource.clone(),
                }));
                freed.insert(resource);
                continue;
            }

            let remaining = u32::try_from(remaining).unwrap_or(u32::MAX);
            if self.claims.acquire(record.restore(remaining)).is_err() {
                continue;
            }
            self.queues.remove(&holder, &resource);
            self.timers.schedule_repeating(
                TimerKey::claim_tick(&holder, &resource),
                self.config.tick_interval,
                self.clock.now() + self.config.tick_interval,
            );
            tracing::info!(%holder, %resource, remaining, "claim restored");
            report.claims_restored += 1;
        }

        for record in offers {
            let offer = match Offer::try_from(record) {
                Ok(offer) => offer,
                Err(e) => {
                    tracing::warn!(error = %e, "skipping unreadable offer");
                    continue;
                }
            };
            let Some(left) = offer.remaining(utc_now) else {
                // The slot is lost; the holder has to queue again
                tracing::info!(holder = %offer.holder, resource = %offer.resource, "offer lapsed while down");
                report.offers_dropped += 1;
                effects.push(Effect::Emit(Event::OfferExpired {
                    holder: offer.holder.clone(),
                    resource: offer.resource.clone(),
                }));
                freed.insert(offer.resource);
                continue;
            };
            if self.claims.is_claimed(&offer.resource) {
                tracing::warn!(resource = %offer.resource, "offer for a claimed respawn, skipping");
                continue;
            }

            let key = TimerKey::offer_expiry(&offer.holder, &offer.resource);
            let holder = offer.holder.clone();
            let resource = offer.resource.clone();
            if !self.offers.insert(offer) {
                tracing::warn!(%holder, %resource, "duplicate offer, skipping");
                continue;
            }
            self.queues.remove(&holder, &resource);
            self.timers.schedule_once(key, self.clock.now() + left);
            tracing::info!(%holder, %resource, secs = left.as_secs(), "offer restored");
            report.offers_restored += 1;
        }

        for resource in &freed {
            self.hand_off(resource, &mut effects);
        }

        if report.changed_state() {
            effects.extend(self.snapshot_effects());
        }
        effects.push(Effect::PublishBoard {
            text: self.render_board(),
        });

        tracing::info!(
            claims = report.claims_restored,
            expired = report.claims_expired,
            queued = report.entries_restored,
            offers = report.offers_restored,
            dropped = report.offers_dropped,
            "recovery complete"
        );
        (report, effects)
    }
}

#[cfg(test)]
#[path = "recovery_tests.rs"]
mod tests;
