// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Claim scheduler: the composition root over claims, queues, offers, and
//! timers.
//!
//! Every operation is synchronous and mutates state atomically, returning the
//! effects (persistence, board, notifications) that the executor should run
//! afterwards. A failed operation returns an error and leaves state untouched.

use crate::offers::OfferManager;
use crate::queue::QueueManager;
use crate::registry::{Acquired, ClaimRegistry};
use crate::timers::{TimerEngine, TimerKey};
use rc_core::{
    render_board, Claim, ClaimDuration, ClaimError, ClaimRecord, ClaimSummary, Clock, Command,
    Conflict, Effect, Event, Holder, HolderId, NotFound, QueueEntry, QueueRecord, QueueStatus,
    Reply, ResourceCode, RespawnCatalog, WaitingSummary,
};
use std::time::{Duration, Instant};

/// Result of a scheduler operation: a value plus the effects to execute
pub type Outcome<T> = Result<(T, Vec<Effect>), ClaimError>;

/// Timing knobs
#[derive(Debug, Clone)]
pub struct SchedulerConfig {
    /// How long an offer stays open
    pub offer_ttl: Duration,
    /// Length of one countdown minute
    pub tick_interval: Duration,
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            offer_ttl: Duration::from_secs(10 * 60),
            tick_interval: Duration::from_secs(60),
        }
    }
}

/// Live counts for status reporting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SchedulerCounts {
    pub claims: usize,
    pub queued: usize,
    pub offers: usize,
    pub timers: usize,
}

pub struct ClaimScheduler<C: Clock> {
    pub(crate) clock: C,
    pub(crate) config: SchedulerConfig,
    pub(crate) catalog: RespawnCatalog,
    pub(crate) claims: ClaimRegistry,
    pub(crate) queues: QueueManager,
    pub(crate) offers: OfferManager,
    pub(crate) timers: TimerEngine,
}

impl<C: Clock> ClaimScheduler<C> {
    pub fn new(clock: C, config: SchedulerConfig) -> Self {
        Self {
            clock,
            config,
            catalog: RespawnCatalog::default(),
            claims: ClaimRegistry::new(),
            queues: QueueManager::new(),
            offers: OfferManager::new(),
            timers: TimerEngine::new(),
        }
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.config
    }

    pub fn claims(&self) -> &ClaimRegistry {
        &self.claims
    }

    pub fn queues(&self) -> &QueueManager {
        &self.queues
    }

    pub fn offers(&self) -> &OfferManager {
        &self.offers
    }

    pub fn timers(&self) -> &TimerEngine {
        &self.timers
    }

    pub fn counts(&self) -> SchedulerCounts {
        SchedulerCounts {
            claims: self.claims.len(),
            queued: self.queues.len(),
            offers: self.offers.len(),
            timers: self.timers.len(),
        }
    }

    /// Dispatch a parsed command on behalf of `holder`
    pub fn handle(&mut self, holder: &Holder, command: Command) -> Outcome<Reply> {
        match command {
            Command::Claim { resource, duration } => {
                self.claim(holder, &resource, duration.as_deref())
            }
            Command::Release { resource } => self.release(&holder.id, &resource),
            Command::Enqueue { resource, duration } => {
                self.enqueue(holder, &resource, duration.as_deref())
            }
            Command::Dequeue { resource } => self.dequeue(&holder.id, &resource),
            Command::QueueStatus { resource } => {
                Ok((Reply::Status(self.queue_status(&resource)), Vec::new()))
            }
            Command::AcceptOffer => self.accept_offer(holder),
            Command::Leave { resource } => self.leave(&holder.id, &resource),
            Command::ListClaims => Ok((
                Reply::Claims {
                    claims: self.list_claims(),
                },
                Vec::new(),
            )),
        }
    }

    /// Claim a respawn.
    ///
    /// A holder with a pending offer on the respawn accepts it; a supplied
    /// duration overrides the minutes they asked for when queueing.
    pub fn claim(
        &mut self,
        holder: &Holder,
        resource: &ResourceCode,
        duration: Option<&str>,
    ) -> Outcome<Reply> {
        let requested = duration.map(str::parse::<ClaimDuration>).transpose()?;

        if self.offers.contains(&holder.id, resource) {
            return self.accept_offer_on(holder, resource, requested);
        }
        if let Some(offer) = self.offers.for_resource(resource) {
            return Err(Conflict::Reserved {
                resource: resource.clone(),
                holder_name: offer.holder_name.clone(),
            }
            .into());
        }

        let duration = requested.unwrap_or(ClaimDuration::DEFAULT);
        let mut effects = Vec::new();
        let reply = self.acquire(holder, resource, duration, false, &mut effects)?;
        self.push_state_effects(&mut effects);
        Ok((reply, effects))
    }

    /// Release the holder's claim and hand the respawn to the next in line
    pub fn release(&mut self, holder: &HolderId, resource: &ResourceCode) -> Outcome<Reply> {
        self.claims.release(holder, resource)?;
        self.timers.cancel(&TimerKey::claim_tick(holder, resource));
        tracing::info!(%holder, %resource, "claim released");

        let mut effects = vec![Effect::Emit(Event::ClaimReleased {
            holder: holder.clone(),
            resource: resource.clone(),
        })];
        self.hand_off(resource, &mut effects);
        self.push_state_effects(&mut effects);

        Ok((
            Reply::Released {
                resource: resource.clone(),
            },
            effects,
        ))
    }

    /// Join the line for a claimed respawn
    pub fn enqueue(
        &mut self,
        holder: &Holder,
        resource: &ResourceCode,
        duration: Option<&str>,
    ) -> Outcome<Reply> {
        let desired = ClaimDuration::parse(duration)?;

        if self.offers.contains(&holder.id, resource) {
            return Err(Conflict::OfferPending {
                resource: resource.clone(),
            }
            .into());
        }
        if self.claims.holds(&holder.id, resource) {
            return Err(Conflict::AlreadyHolding {
                resource: resource.clone(),
            }
            .into());
        }
        if self.queues.contains(&holder.id, resource) {
            return Err(Conflict::AlreadyQueued {
                resource: resource.clone(),
            }
            .into());
        }
        if !self.claims.is_claimed(resource) {
            return Err(Conflict::ResourceFree {
                resource: resource.clone(),
            }
            .into());
        }

        let entry = QueueEntry::new(holder, resource.clone(), desired, self.clock.utc_now());
        let position = self.queues.enqueue(entry)?;
        tracing::info!(holder = %holder.id, %resource, position, "enqueued");

        let mut effects = vec![Effect::Emit(Event::Enqueued {
            holder: holder.id.clone(),
            resource: resource.clone(),
            position,
        })];
        self.push_state_effects(&mut effects);

        Ok((
            Reply::Enqueued {
                resource: resource.clone(),
                position,
                desired_minutes: desired.minutes(),
            },
            effects,
        ))
    }

    /// Leave the line, or decline a pending offer
    pub fn dequeue(&mut self, holder: &HolderId, resource: &ResourceCode) -> Outcome<Reply> {
        let entry = self.queues.remove(holder, resource);
        let offer = self.offers.take(holder, resource);
        if entry.is_none() && offer.is_none() {
            return Err(NotFound::QueueEntry {
                resource: resource.clone(),
            }
            .into());
        }

        let mut effects = Vec::new();
        if entry.is_some() {
            tracing::info!(%holder, %resource, "dequeued");
            effects.push(Effect::Emit(Event::Dequeued {
                holder: holder.clone(),
                resource: resource.clone(),
            }));
        }
        let declined_offer = offer.is_some();
        if declined_offer {
            self.timers.cancel(&TimerKey::offer_expiry(holder, resource));
            tracing::info!(%holder, %resource, "offer declined");
            effects.push(Effect::Emit(Event::OfferDeclined {
                holder: holder.clone(),
                resource: resource.clone(),
            }));
            self.hand_off(resource, &mut effects);
        }
        self.push_state_effects(&mut effects);

        Ok((
            Reply::Dequeued {
                resource: resource.clone(),
                declined_offer,
            },
            effects,
        ))
    }

    /// Drop whatever the holder has on a respawn: the claim if they hold it,
    /// otherwise their place in line or pending offer
    pub fn leave(&mut self, holder: &HolderId, resource: &ResourceCode) -> Outcome<Reply> {
        if self.claims.holds(holder, resource) {
            return self.release(holder, resource);
        }
        if self.queues.contains(holder, resource) || self.offers.contains(holder, resource) {
            return self.dequeue(holder, resource);
        }
        Err(NotFound::Participation {
            resource: resource.clone(),
        }
        .into())
    }

    /// Accept the holder's outstanding offer (the soonest to lapse if several)
    pub fn accept_offer(&mut self, holder: &Holder) -> Outcome<Reply> {
        let resource = self
            .offers
            .first_for_holder(&holder.id)
            .map(|o| o.resource.clone())
            .ok_or(NotFound::Offer)?;
        self.accept_offer_on(holder, &resource, None)
    }

    fn accept_offer_on(
        &mut self,
        holder: &Holder,
        resource: &ResourceCode,
        requested: Option<ClaimDuration>,
    ) -> Outcome<Reply> {
        if let Some(claim) = self.claims.get(resource) {
            if !claim.is_held_by(&holder.id) {
                return Err(Conflict::HeldByOther {
                    resource: resource.clone(),
                    holder_name: claim.holder_name.clone(),
                }
                .into());
            }
        }
        let offer = self.offers.take(&holder.id, resource).ok_or(NotFound::Offer)?;
        self.timers
            .cancel(&TimerKey::offer_expiry(&holder.id, resource));

        let duration = requested.unwrap_or(offer.desired);
        let mut effects = vec![Effect::Emit(Event::OfferAccepted {
            holder: holder.id.clone(),
            resource: resource.clone(),
            minutes: duration.minutes(),
        })];
        let reply = self.acquire(holder, resource, duration, true, &mut effects)?;
        self.push_state_effects(&mut effects);
        Ok((reply, effects))
    }

    /// Insert the claim and arm its countdown
    fn acquire(
        &mut self,
        holder: &Holder,
        resource: &ResourceCode,
        duration: ClaimDuration,
        from_offer: bool,
        effects: &mut Vec<Effect>,
    ) -> Result<Reply, ClaimError> {
        let info = self.catalog.describe(resource);
        let claim = Claim::new(holder, resource.clone(), info, duration, self.clock.utc_now());
        let summary = ClaimSummary::from(&claim);
        let acquired = self.claims.acquire(claim)?;

        // A holder can never be both holding and waiting
        self.queues.remove(&holder.id, resource);

        self.timers.schedule_repeating(
            TimerKey::claim_tick(&holder.id, resource),
            self.config.tick_interval,
            self.clock.now() + self.config.tick_interval,
        );

        let minutes = duration.minutes();
        let event = match acquired {
            Acquired::New => Event::ClaimAcquired {
                holder: holder.id.clone(),
                resource: resource.clone(),
                minutes,
            },
            Acquired::Replaced => Event::ClaimReplaced {
                holder: holder.id.clone(),
                resource: resource.clone(),
                minutes,
            },
        };
        tracing::info!(holder = %holder.id, %resource, minutes, from_offer, "claim acquired");
        effects.push(Effect::Emit(event));

        Ok(Reply::Claimed {
            claim: summary,
            replaced: acquired == Acquired::Replaced,
            from_offer,
        })
    }

    /// Full picture of one respawn
    pub fn queue_status(&self, resource: &ResourceCode) -> QueueStatus {
        let mut status = QueueStatus::empty(resource.clone(), self.catalog.describe(resource));
        status.claim = self.claims.get(resource).map(ClaimSummary::from);
        status.waiting = self
            .queues
            .entries(resource)
            .enumerate()
            .map(|(i, e)| WaitingSummary::new(i + 1, e))
            .collect();
        status.offer = self.offers.for_resource(resource).map(Into::into);
        status
    }

    /// First holder in line, without removing them
    pub fn peek_head(&self, resource: &ResourceCode) -> Option<&QueueEntry> {
        self.queues.peek_head(resource)
    }

    /// Active claims ordered by respawn code
    pub fn list_claims(&self) -> Vec<ClaimSummary> {
        self.claims.iter().map(ClaimSummary::from).collect()
    }

    /// Fire every timer that is due and apply its consequences
    pub fn poll_timers(&mut self) -> Vec<Effect> {
        let now = self.clock.now();
        let mut effects = Vec::new();
        let mut fired = 0usize;

        while let Some(key) = self.timers.pop_due(now) {
            fired += 1;
            match key {
                TimerKey::ClaimTick { holder, resource } => {
                    self.on_claim_tick(&holder, &resource, &mut effects);
                }
                TimerKey::OfferExpiry { holder, resource } => {
                    self.on_offer_expired(&holder, &resource, &mut effects);
                }
            }
        }

        if fired > 0 {
            self.push_state_effects(&mut effects);
        }
        effects
    }

    fn on_claim_tick(
        &mut self,
        holder: &HolderId,
        resource: &ResourceCode,
        effects: &mut Vec<Effect>,
    ) {
        let Some(remaining) = self.claims.tick(holder, resource) else {
            // Claim went away without its timer; drop the timer too
            self.timers.cancel(&TimerKey::claim_tick(holder, resource));
            return;
        };
        tracing::debug!(%holder, %resource, remaining, "claim tick");
        if remaining > 0 {
            return;
        }

        self.timers.cancel(&TimerKey::claim_tick(holder, resource));
        let Ok(claim) = self.claims.release(holder, resource) else {
            return;
        };
        tracing::info!(%holder, %resource, "claim expired");
        effects.push(Effect::Emit(Event::ClaimExpired {
            holder: holder.clone(),
            resource: resource.clone(),
        }));
        effects.push(Effect::Alert {
            holder: holder.clone(),
            text: format!(
                "Your claim on {} ({}) has expired.",
                claim.resource_name, claim.resource
            ),
        });
        self.hand_off(resource, effects);
    }

    fn on_offer_expired(
        &mut self,
        holder: &HolderId,
        resource: &ResourceCode,
        effects: &mut Vec<Effect>,
    ) {
        let Some(offer) = self.offers.take(holder, resource) else {
            return;
        };
        tracing::info!(%holder, %resource, "offer expired");
        effects.push(Effect::Emit(Event::OfferExpired {
            holder: holder.clone(),
            resource: resource.clone(),
        }));
        let info = self.catalog.describe(&offer.resource);
        effects.push(Effect::Notify {
            holder: holder.clone(),
            text: format!(
                "Your offer for {} ({}) expired. Join the queue again to wait for it.",
                info.name, offer.resource
            ),
        });
        self.hand_off(resource, effects);
    }

    /// Offer a freed respawn to the next holder in line, if any.
    ///
    /// Does nothing while the respawn is claimed or already offered.
    pub(crate) fn hand_off(&mut self, resource: &ResourceCode, effects: &mut Vec<Effect>) {
        if self.claims.is_claimed(resource) || self.offers.has_for_resource(resource) {
            return;
        }

        let ttl = self.config.offer_ttl;
        let Some(offer) =
            self.offers
                .create_offer(&mut self.queues, resource, self.clock.utc_now(), ttl)
        else {
            tracing::info!(%resource, "respawn is free");
            effects.push(Effect::Emit(Event::ResourceFreed {
                resource: resource.clone(),
            }));
            return;
        };

        self.timers.schedule_once(
            TimerKey::offer_expiry(&offer.holder, resource),
            self.clock.now() + ttl,
        );
        tracing::info!(holder = %offer.holder, %resource, "offer created");

        let info = self.catalog.describe(resource);
        effects.push(Effect::Emit(Event::OfferCreated {
            holder: offer.holder.clone(),
            resource: resource.clone(),
            minutes: offer.desired.minutes(),
        }));
        effects.push(Effect::Notify {
            holder: offer.holder.clone(),
            text: format!(
                "{} ({}, {}) is available for you. Accept within {} minutes to claim it for {}.",
                info.name,
                resource,
                info.tier,
                ttl.as_secs() / 60,
                offer.desired
            ),
        });
    }

    /// Effects that overwrite both persisted records with the current state
    pub fn snapshot_effects(&self) -> Vec<Effect> {
        let (records, record) = self.snapshot();
        vec![
            Effect::SaveClaims { records },
            Effect::SaveQueue { record },
        ]
    }

    /// Both persisted records for the current state, stamped now
    pub fn snapshot(&self) -> (Vec<ClaimRecord>, QueueRecord) {
        let claims = self.claims.records(self.clock.utc_now());
        let queue = QueueRecord {
            queue_entries: self.queues.records(),
            offers: self.offers.records(),
        };
        (claims, queue)
    }

    /// Current board text
    pub fn render_board(&self) -> String {
        let claims: Vec<&Claim> = self.claims.iter().collect();
        render_board(&claims, &self.queues.heads(), &self.offers.by_resource())
    }

    fn push_state_effects(&self, effects: &mut Vec<Effect>) {
        effects.extend(self.snapshot_effects());
        effects.push(Effect::PublishBoard {
            text: self.render_board(),
        });
    }

    /// Earliest pending timer deadline
    pub fn next_deadline(&self) -> Option<Instant> {
        self.timers.next_deadline()
    }

    /// Drop all in-memory state and timers
    pub fn teardown(&mut self) {
        self.timers.clear();
        self.claims.clear();
        self.queues.clear();
        self.offers.clear();
    }
}

#[cfg(test)]
#[path = "scheduler_tests.rs"]
mod tests;
