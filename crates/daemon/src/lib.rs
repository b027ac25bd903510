// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Respawn claim daemon (rcd) library: lifecycle, settings, and the
//! client/server protocol

pub mod lifecycle;
pub mod protocol;
pub mod server;
pub mod settings;

pub use lifecycle::{Config, DaemonState, LifecycleError};
pub use protocol::{ProtocolError, Request, Response, PROTOCOL_VERSION};
pub use settings::{Settings, SettingsError};
