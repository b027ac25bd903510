// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for the engine runtime

use rc_core::ClaimError;
use thiserror::Error;

/// Errors that can occur in the runtime
#[derive(Debug, Error)]
pub enum RuntimeError {
    #[error(transparent)]
    Claim(#[from] ClaimError),
    #[error("reconnecting to the gateway, try again shortly")]
    Reconnecting,
    #[error("shutting down")]
    ShuttingDown,
}

impl RuntimeError {
    /// Short machine-readable category for clients
    pub fn kind(&self) -> &'static str {
        match self {
            RuntimeError::Claim(e) => e.kind(),
            RuntimeError::Reconnecting | RuntimeError::ShuttingDown => "unavailable",
        }
    }
}
