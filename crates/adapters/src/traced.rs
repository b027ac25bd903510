// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Traced adapter wrappers for consistent observability

use crate::gateway::{GatewayAdapter, GatewayError};
use async_trait::async_trait;
use rc_core::HolderId;
use tracing::Instrument;

/// Wrapper that adds tracing to any GatewayAdapter
#[derive(Clone)]
pub struct TracedGatewayAdapter<G> {
    inner: G,
}

impl<G> TracedGatewayAdapter<G> {
    pub fn new(inner: G) -> Self {
        Self { inner }
    }

    pub fn inner(&self) -> &G {
        &self.inner
    }
}

#[async_trait]
impl<G: GatewayAdapter> GatewayAdapter for TracedGatewayAdapter<G> {
    async fn connect(&self) -> Result<(), GatewayError> {
        let span = tracing::info_span!("gateway.connect");
        async {
            tracing::info!("connecting");
            let start = std::time::Instant::now();
            let result = self.inner.connect().await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::info!(elapsed_ms = elapsed.as_millis() as u64, "connected"),
                Err(e) => tracing::warn!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "connect failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn publish_board(&self, text: &str) -> Result<(), GatewayError> {
        let span = tracing::info_span!("gateway.publish_board");
        async {
            tracing::debug!(lines = text.lines().count(), "publishing");
            let start = std::time::Instant::now();
            let result = self.inner.publish_board(text).await;
            let elapsed = start.elapsed();

            match &result {
                Ok(()) => tracing::debug!(elapsed_ms = elapsed.as_millis() as u64, "published"),
                Err(e) => tracing::error!(
                    elapsed_ms = elapsed.as_millis() as u64,
                    error = %e,
                    "publish failed"
                ),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn send_message(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError> {
        let span = tracing::info_span!("gateway.send_message", %holder);
        async {
            tracing::debug!(text_len = text.len(), "sending");
            let result = self.inner.send_message(holder, text).await;

            // Delivery is best-effort; a failed message is not fatal
            match &result {
                Ok(()) => tracing::debug!("sent"),
                Err(e) => tracing::warn!(error = %e, "send failed"),
            }

            result
        }
        .instrument(span)
        .await
    }

    async fn poke(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError> {
        let span = tracing::info_span!("gateway.poke", %holder);
        async {
            let result = self.inner.poke(holder, text).await;
            match &result {
                Ok(()) => tracing::debug!("poked"),
                Err(e) => tracing::warn!(error = %e, "poke failed"),
            }
            result
        }
        .instrument(span)
        .await
    }
}

#[cfg(test)]
#[path = "traced_tests.rs"]
mod tests;
