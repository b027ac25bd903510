// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Async runtime around the claim scheduler.
//!
//! Scheduler operations run under one lock and never await; the effects they
//! return are executed after the lock is dropped. Anything that happens during
//! an effect's suspension point sees already-consistent state.

use crate::error::RuntimeError;
use crate::executor::Executor;
use crate::recovery::RecoveryReport;
use crate::scheduler::{ClaimScheduler, SchedulerConfig, SchedulerCounts};
use rc_adapters::GatewayAdapter;
use rc_core::{ClaimRecord, Clock, Command, Effect, Holder, QueueRecord, Reply};
use rc_storage::SnapshotStore;
use std::sync::{Mutex, MutexGuard};
use std::time::{Duration, Instant};

/// Runtime timing configuration
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    pub offer_ttl: Duration,
    pub tick_interval: Duration,
    /// Fixed pause between gateway connection attempts
    pub reconnect_delay: Duration,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        let scheduler = SchedulerConfig::default();
        Self {
            offer_ttl: scheduler.offer_ttl,
            tick_interval: scheduler.tick_interval,
            reconnect_delay: Duration::from_secs(5),
        }
    }
}

/// Records set aside while the gateway reconnects
struct Parked {
    claims: Vec<ClaimRecord>,
    queue: QueueRecord,
}

struct State<C: Clock> {
    scheduler: ClaimScheduler<C>,
    /// Present exactly while a reconnect is running
    parked: Option<Parked>,
    closed: bool,
}

impl<C: Clock> State<C> {
    fn refusal(&self) -> Option<RuntimeError> {
        if self.closed {
            Some(RuntimeError::ShuttingDown)
        } else if self.parked.is_some() {
            Some(RuntimeError::Reconnecting)
        } else {
            None
        }
    }
}

/// Runtime that coordinates the scheduler, the gateway and persistence
pub struct Runtime<G, C: Clock> {
    state: Mutex<State<C>>,
    executor: Executor<G>,
    reconnect_delay: Duration,
}

impl<G, C> Runtime<G, C>
where
    G: GatewayAdapter,
    C: Clock,
{
    pub fn new(gateway: G, store: SnapshotStore, clock: C, config: RuntimeConfig) -> Self {
        let scheduler = ClaimScheduler::new(
            clock,
            SchedulerConfig {
                offer_ttl: config.offer_ttl,
                tick_interval: config.tick_interval,
            },
        );
        Self {
            state: Mutex::new(State {
                scheduler,
                parked: None,
                closed: false,
            }),
            executor: Executor::new(gateway, store),
            reconnect_delay: config.reconnect_delay,
        }
    }

    fn lock(&self) -> MutexGuard<'_, State<C>> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Handle a command from a holder
    pub async fn handle(&self, holder: &Holder, command: Command) -> Result<Reply, RuntimeError> {
        let name = command.name();
        let result = {
            let mut state = self.lock();
            if let Some(refusal) = state.refusal() {
                return Err(refusal);
            }
            state.scheduler.handle(holder, command)
        };
        match result {
            Ok((reply, effects)) => {
                tracing::debug!(holder = %holder.id, command = name, "command applied");
                self.executor.execute_all(effects).await;
                Ok(reply)
            }
            Err(e) => {
                tracing::info!(holder = %holder.id, command = name, error = %e, "command rejected");
                Err(e.into())
            }
        }
    }

    /// Fire due timers. Returns whether anything fired.
    ///
    /// Timers are paused while reconnecting and after shutdown.
    pub async fn tick(&self) -> bool {
        let effects = {
            let mut state = self.lock();
            if state.refusal().is_some() {
                return false;
            }
            state.scheduler.poll_timers()
        };
        if effects.is_empty() {
            return false;
        }
        self.executor.execute_all(effects).await;
        true
    }

    /// Load both snapshot records, clear them, and rebuild live state.
    ///
    /// An unreadable record is logged and treated as empty.
    pub async fn recover(&self) -> RecoveryReport {
        let store = self.executor.store();
        let claims = store.load_claims().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %store.claims_path().display(), "claims record unreadable, ignoring");
            None
        });
        let queue = store.load_queue().unwrap_or_else(|e| {
            tracing::warn!(error = %e, path = %store.queue_path().display(), "queue record unreadable, ignoring");
            None
        });
        if let Err(e) = store.clear() {
            tracing::warn!(error = %e, "failed to clear snapshot records");
        }

        let (report, effects) = self.lock().scheduler.restore(claims, queue);
        self.executor.execute_all(effects).await;
        report
    }

    /// Connect the gateway, retrying with a fixed delay until it succeeds.
    ///
    /// Gives up and returns false once the runtime has been shut down.
    pub async fn connect_with_retry(&self) -> bool {
        let mut attempt: u32 = 0;
        loop {
            if self.lock().closed {
                return false;
            }
            attempt = attempt.saturating_add(1);
            match self.executor.gateway().connect().await {
                Ok(()) => {
                    self.executor.reset_link();
                    tracing::info!(attempt, "gateway connected");
                    return true;
                }
                Err(e) => {
                    tracing::warn!(
                        attempt,
                        error = %e,
                        delay_ms = self.reconnect_delay.as_millis() as u64,
                        "gateway connect failed, retrying"
                    );
                    tokio::time::sleep(self.reconnect_delay).await;
                }
            }
        }
    }

    /// Whether the executor has seen the gateway drop
    pub fn link_lost(&self) -> bool {
        self.executor.link_lost()
    }

    pub fn is_reconnecting(&self) -> bool {
        self.lock().parked.is_some()
    }

    /// Park the current state, reconnect, and restore the parked state.
    ///
    /// The parked records are also written to disk in case the process dies
    /// mid-reconnect, but the restore reads them from memory. Returns false
    /// without doing anything if a reconnect is already running or the
    /// runtime is shut down, and false if shutdown interrupts the reconnect.
    pub async fn reconnect(&self) -> bool {
        let snapshot = {
            let mut state = self.lock();
            if state.refusal().is_some() {
                return false;
            }
            let (claims, queue) = state.scheduler.snapshot();
            state.scheduler.teardown();
            state.parked = Some(Parked {
                claims: claims.clone(),
                queue: queue.clone(),
            });
            save_effects(claims, queue)
        };
        tracing::warn!("gateway link lost, reconnecting");
        self.executor.execute_all(snapshot).await;

        if !self.connect_with_retry().await {
            tracing::info!("reconnect abandoned, runtime shut down");
            return false;
        }

        let (report, effects) = {
            let mut state = self.lock();
            let Some(parked) = state.parked.take() else {
                return false;
            };
            let (report, mut effects) = state
                .scheduler
                .restore(Some(parked.claims), Some(parked.queue));
            if !report.changed_state() {
                effects.extend(state.scheduler.snapshot_effects());
            }
            (report, effects)
        };
        self.executor.execute_all(effects).await;

        tracing::info!(
            claims = report.claims_restored,
            queued = report.entries_restored,
            offers = report.offers_restored,
            "reconnected"
        );
        true
    }

    /// Persist current state and cancel all timers.
    ///
    /// During a reconnect the parked records are what gets persisted. Later
    /// commands are refused.
    pub async fn shutdown(&self) {
        let snapshot = {
            let mut state = self.lock();
            state.closed = true;
            let (claims, queue) = match state.parked.take() {
                Some(parked) => (parked.claims, parked.queue),
                None => state.scheduler.snapshot(),
            };
            state.scheduler.teardown();
            save_effects(claims, queue)
        };
        self.executor.execute_all(snapshot).await;
        tracing::info!("runtime state saved");
    }

    pub fn counts(&self) -> SchedulerCounts {
        self.lock().scheduler.counts()
    }

    pub fn board(&self) -> String {
        self.lock().scheduler.render_board()
    }

    pub fn next_deadline(&self) -> Option<Instant> {
        self.lock().scheduler.next_deadline()
    }
}

fn save_effects(records: Vec<ClaimRecord>, record: QueueRecord) -> Vec<Effect> {
    vec![
        Effect::SaveClaims { records },
        Effect::SaveQueue { record },
    ]
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
