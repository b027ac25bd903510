// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Chat/display gateway adapters

mod log;

pub use self::log::LogGateway;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeGatewayAdapter, GatewayCall};

use async_trait::async_trait;
use rc_core::HolderId;
use thiserror::Error;

/// Errors from gateway operations
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The link to the gateway is gone; the caller should reconnect
    #[error("gateway disconnected: {0}")]
    Disconnected(String),
    /// The gateway refused this particular request
    #[error("gateway rejected request: {0}")]
    Rejected(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl GatewayError {
    pub fn is_disconnect(&self) -> bool {
        matches!(self, GatewayError::Disconnected(_))
    }
}

/// Adapter for the chat server that displays the board and reaches holders
#[async_trait]
pub trait GatewayAdapter: Clone + Send + Sync + 'static {
    /// Establish (or re-establish) the gateway connection
    async fn connect(&self) -> Result<(), GatewayError>;

    /// Replace the shared board text
    async fn publish_board(&self, text: &str) -> Result<(), GatewayError>;

    /// Send a private message to a holder
    async fn send_message(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError>;

    /// Poke a holder (an attention-grabbing alert)
    async fn poke(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError>;
}
