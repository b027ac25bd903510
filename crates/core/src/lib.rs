// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Respawn claim domain types
//!
//! Pure data and rules with no I/O: identifiers, the respawn catalog, the
//! duration grammar, claims, queue entries, offers, persisted record shapes,
//! and the effects the scheduler asks the outside world to perform.

pub mod board;
pub mod claim;
pub mod clock;
pub mod command;
pub mod duration;
pub mod effect;
pub mod error;
pub mod holder;
pub mod offer;
pub mod queue;
pub mod respawn;
pub mod snapshot;
pub mod traced;

pub use board::render_board;
pub use claim::Claim;
pub use clock::{Clock, FakeClock, SystemClock};
pub use command::{ClaimSummary, Command, OfferSummary, QueueStatus, Reply, WaitingSummary};
pub use duration::{format_remaining, ClaimDuration, DurationError};
pub use effect::{Effect, Event};
pub use error::{ClaimError, Conflict, NotFound};
pub use holder::{Holder, HolderId};
pub use offer::Offer;
pub use queue::QueueEntry;
pub use respawn::{ResourceCode, RespawnCatalog, RespawnInfo};
pub use snapshot::{ClaimRecord, OfferRecord, QueueEntryRecord, QueueRecord};
pub use traced::TracedEffect;
