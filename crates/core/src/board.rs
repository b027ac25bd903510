// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Plain-text claim board
//!
//! The board is a pure function of the registries so that re-rendering the
//! same state always yields the same text.

use crate::claim::Claim;
use crate::offer::Offer;
use crate::queue::QueueEntry;
use crate::respawn::ResourceCode;
use std::collections::BTreeMap;

/// Rendered when nothing is claimed or offered
pub const EMPTY_BOARD: &str = "No active claims";

/// Render active claims (with the next holder in line) and outstanding offers.
///
/// `claims` and `offers` are expected in resource order.
pub fn render_board(
    claims: &[&Claim],
    heads: &BTreeMap<ResourceCode, &QueueEntry>,
    offers: &[&Offer],
) -> String {
    let mut lines = Vec::with_capacity(claims.len() + offers.len());

    for claim in claims {
        let mut line = format!(
            "{} - {} {} ({}): {}",
            claim.resource,
            claim.remaining_display(),
            claim.resource_name,
            claim.tier,
            claim.holder_name
        );
        if let Some(next) = heads.get(&claim.resource) {
            line.push_str(&format!(" | Next: {}", next.holder_name));
        }
        lines.push(line);
    }

    for offer in offers {
        lines.push(format!(
            "{} - [OFFER] reserved for {} until {} UTC",
            offer.resource,
            offer.holder_name,
            offer.expires_at.format("%H:%M")
        ));
    }

    if lines.is_empty() {
        return EMPTY_BOARD.to_string();
    }
    lines.join("\n")
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod tests;
