// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake gateway adapter for testing
#![cfg_attr(coverage_nightly, coverage(off))]

use super::{GatewayAdapter, GatewayError};
use async_trait::async_trait;
use rc_core::HolderId;
use std::sync::{Arc, Mutex};

/// Recorded gateway call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GatewayCall {
    Connect,
    PublishBoard { text: String },
    SendMessage { holder: HolderId, text: String },
    Poke { holder: HolderId, text: String },
}

#[derive(Default)]
struct FakeState {
    connect_failures: u32,
    poke_fails: bool,
    disconnected: bool,
}

/// Fake gateway adapter for testing
#[derive(Clone, Default)]
pub struct FakeGatewayAdapter {
    calls: Arc<Mutex<Vec<GatewayCall>>>,
    state: Arc<Mutex<FakeState>>,
}

impl FakeGatewayAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<GatewayCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Forget recorded calls
    pub fn clear_calls(&self) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clear();
    }

    /// Every board text published so far
    pub fn boards(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::PublishBoard { text } => Some(text),
                _ => None,
            })
            .collect()
    }

    pub fn last_board(&self) -> Option<String> {
        self.boards().pop()
    }

    /// Private messages delivered to a holder
    pub fn messages_to(&self, holder: &HolderId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::SendMessage { holder: h, text } if &h == holder => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Pokes delivered to a holder
    pub fn pokes_to(&self, holder: &HolderId) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                GatewayCall::Poke { holder: h, text } if &h == holder => Some(text),
                _ => None,
            })
            .collect()
    }

    /// Make the next `n` connect attempts fail
    pub fn fail_next_connects(&self, n: u32) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).connect_failures = n;
    }

    /// Make pokes fail (as when the holder is offline)
    pub fn fail_pokes(&self, fail: bool) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).poke_fails = fail;
    }

    /// Drop the link: calls fail with `Disconnected` until `connect` succeeds
    pub fn disconnect(&self) {
        self.state.lock().unwrap_or_else(|e| e.into_inner()).disconnected = true;
    }

    pub fn is_connected(&self) -> bool {
        !self.state.lock().unwrap_or_else(|e| e.into_inner()).disconnected
    }

    fn record(&self, call: GatewayCall) {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).push(call);
    }

    fn check_link(&self) -> Result<(), GatewayError> {
        if self.state.lock().unwrap_or_else(|e| e.into_inner()).disconnected {
            return Err(GatewayError::Disconnected("link lost".to_string()));
        }
        Ok(())
    }
}

#[async_trait]
impl GatewayAdapter for FakeGatewayAdapter {
    async fn connect(&self) -> Result<(), GatewayError> {
        self.record(GatewayCall::Connect);
        let mut state = self.state.lock().unwrap_or_else(|e| e.into_inner());
        if state.connect_failures > 0 {
            state.connect_failures -= 1;
            return Err(GatewayError::Disconnected("connection refused".to_string()));
        }
        state.disconnected = false;
        Ok(())
    }

    async fn publish_board(&self, text: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::PublishBoard {
            text: text.to_string(),
        });
        self.check_link()
    }

    async fn send_message(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::SendMessage {
            holder: holder.clone(),
            text: text.to_string(),
        });
        self.check_link()
    }

    async fn poke(&self, holder: &HolderId, text: &str) -> Result<(), GatewayError> {
        self.record(GatewayCall::Poke {
            holder: holder.clone(),
            text: text.to_string(),
        });
        self.check_link()?;
        if self.state.lock().unwrap_or_else(|e| e.into_inner()).poke_fails {
            return Err(GatewayError::Rejected("holder not reachable".to_string()));
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
