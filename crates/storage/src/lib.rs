// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Whole-state snapshot storage for the claim scheduler

mod snapshot;

pub use snapshot::{SnapshotError, SnapshotStore, CLAIMS_FILE, QUEUE_FILE};
