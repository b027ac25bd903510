// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Respawn claim engine: registries, timers, scheduling and recovery

mod error;
mod executor;
mod offers;
mod queue;
mod recovery;
mod registry;
mod runtime;
mod scheduler;
mod timers;

pub use error::RuntimeError;
pub use executor::{ExecuteError, Executor};
pub use offers::OfferManager;
pub use queue::QueueManager;
pub use recovery::RecoveryReport;
pub use registry::{Acquired, ClaimRegistry};
pub use runtime::{Runtime, RuntimeConfig};
pub use scheduler::{ClaimScheduler, Outcome, SchedulerConfig, SchedulerCounts};
pub use timers::{TimerEngine, TimerKey};
