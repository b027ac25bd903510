// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Effect executor

use rc_adapters::{GatewayAdapter, GatewayError};
use rc_core::{Effect, Event, HolderId, TracedEffect};
use rc_storage::{SnapshotError, SnapshotStore};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use thiserror::Error;
use tracing::Instrument;

/// Errors that can occur during effect execution
#[derive(Debug, Error)]
pub enum ExecuteError {
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),
    #[error("snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// Runs effects against the gateway and the snapshot store.
///
/// Failures are logged and never undo the state change that produced the
/// effect. A disconnect from the gateway is remembered so the runtime can
/// reconnect.
#[derive(Clone)]
pub struct Executor<G> {
    gateway: G,
    store: SnapshotStore,
    link_lost: Arc<AtomicBool>,
}

impl<G: GatewayAdapter> Executor<G> {
    pub fn new(gateway: G, store: SnapshotStore) -> Self {
        Self {
            gateway,
            store,
            link_lost: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn store(&self) -> &SnapshotStore {
        &self.store
    }

    /// Whether a gateway call has failed with a disconnect since the last reset
    pub fn link_lost(&self) -> bool {
        self.link_lost.load(Ordering::SeqCst)
    }

    pub fn reset_link(&self) {
        self.link_lost.store(false, Ordering::SeqCst);
    }

    /// Execute a single effect with tracing
    pub async fn execute(&self, effect: Effect) -> Result<(), ExecuteError> {
        let span = tracing::info_span!("effect", effect = effect.name());

        async {
            tracing::info!(fields = ?effect.fields(), "executing");

            let start = std::time::Instant::now();
            let result = self.execute_inner(effect).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "completed"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "failed"
                ),
            }
            result
        }
        .instrument(span)
        .await
    }

    /// Execute effects in order. Errors are logged and do not stop the batch.
    pub async fn execute_all(&self, effects: Vec<Effect>) {
        for effect in effects {
            let _ = self.execute(effect).await;
        }
    }

    async fn execute_inner(&self, effect: Effect) -> Result<(), ExecuteError> {
        match effect {
            Effect::Emit(event) => {
                log_event(&event);
                Ok(())
            }

            Effect::SaveClaims { records } => Ok(self.store.save_claims(&records)?),

            Effect::SaveQueue { record } => Ok(self.store.save_queue(&record)?),

            Effect::PublishBoard { text } => {
                let result = self.gateway.publish_board(&text).await;
                self.watch(result)
            }

            Effect::Notify { holder, text } => {
                let result = self.gateway.send_message(&holder, &text).await;
                self.watch(result)
            }

            Effect::Alert { holder, text } => self.alert(&holder, &text).await,
        }
    }

    /// Poke, falling back to a private message when the poke is refused
    async fn alert(&self, holder: &HolderId, text: &str) -> Result<(), ExecuteError> {
        match self.gateway.poke(holder, text).await {
            Ok(()) => Ok(()),
            Err(e) if e.is_disconnect() => self.watch(Err(e)),
            Err(e) => {
                tracing::warn!(%holder, error = %e, "poke failed, sending message instead");
                let result = self.gateway.send_message(holder, text).await;
                self.watch(result)
            }
        }
    }

    fn watch(&self, result: Result<(), GatewayError>) -> Result<(), ExecuteError> {
        if let Err(e) = &result {
            if e.is_disconnect() {
                self.link_lost.store(true, Ordering::SeqCst);
            }
        }
        Ok(result?)
    }
}

fn log_event(event: &Event) {
    match event {
        Event::ClaimAcquired {
            holder,
            resource,
            minutes,
        }
        | Event::ClaimReplaced {
            holder,
            resource,
            minutes,
        }
        | Event::OfferCreated {
            holder,
            resource,
            minutes,
        }
        | Event::OfferAccepted {
            holder,
            resource,
            minutes,
        } => tracing::info!(event = event.name(), %holder, %resource, minutes),
        Event::Enqueued {
            holder,
            resource,
            position,
        } => tracing::info!(event = event.name(), %holder, %resource, position),
        Event::ClaimReleased { holder, resource }
        | Event::ClaimExpired { holder, resource }
        | Event::Dequeued { holder, resource }
        | Event::OfferDeclined { holder, resource }
        | Event::OfferExpired { holder, resource } => {
            tracing::info!(event = event.name(), %holder, %resource)
        }
        Event::ResourceFreed { resource } => tracing::info!(event = event.name(), %resource),
    }
}

#[cfg(test)]
#[path = "executor_tests.rs"]
mod tests;
