// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Commands accepted by the scheduler and the replies it produces

use crate::claim::Claim;
use crate::offer::Offer;
use crate::queue::QueueEntry;
use crate::respawn::{ResourceCode, RespawnInfo};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A parsed user command. Durations are still raw text so the scheduler can
/// report validation failures verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Command {
    Claim {
        resource: ResourceCode,
        #[serde(default)]
        duration: Option<String>,
    },
    Release {
        resource: ResourceCode,
    },
    Enqueue {
        resource: ResourceCode,
        #[serde(default)]
        duration: Option<String>,
    },
    Dequeue {
        resource: ResourceCode,
    },
    QueueStatus {
        resource: ResourceCode,
    },
    AcceptOffer,
    Leave {
        resource: ResourceCode,
    },
    ListClaims,
}

impl Command {
    pub fn name(&self) -> &'static str {
        match self {
            Command::Claim { .. } => "claim",
            Command::Release { .. } => "release",
            Command::Enqueue { .. } => "enqueue",
            Command::Dequeue { .. } => "dequeue",
            Command::QueueStatus { .. } => "queue_status",
            Command::AcceptOffer => "accept_offer",
            Command::Leave { .. } => "leave",
            Command::ListClaims => "list_claims",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimSummary {
    pub holder_id: String,
    pub holder_name: String,
    pub resource: ResourceCode,
    pub resource_name: String,
    pub tier: String,
    pub remaining_minutes: u32,
}

impl From<&Claim> for ClaimSummary {
    fn from(claim: &Claim) -> Self {
        Self {
            holder_id: claim.holder.0.clone(),
            holder_name: claim.holder_name.clone(),
            resource: claim.resource.clone(),
            resource_name: claim.resource_name.clone(),
            tier: claim.tier.clone(),
            remaining_minutes: claim.remaining_minutes,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaitingSummary {
    /// 1-based place in line
    pub position: usize,
    pub holder_id: String,
    pub holder_name: String,
    pub desired_minutes: u32,
}

impl WaitingSummary {
    pub fn new(position: usize, entry: &QueueEntry) -> Self {
        Self {
            position,
            holder_id: entry.holder.0.clone(),
            holder_name: entry.holder_name.clone(),
            desired_minutes: entry.desired.minutes(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferSummary {
    pub holder_id: String,
    pub holder_name: String,
    pub desired_minutes: u32,
    pub expires_at: DateTime<Utc>,
}

impl From<&Offer> for OfferSummary {
    fn from(offer: &Offer) -> Self {
        Self {
            holder_id: offer.holder.0.clone(),
            holder_name: offer.holder_name.clone(),
            desired_minutes: offer.desired.minutes(),
            expires_at: offer.expires_at,
        }
    }
}

/// Everything known about one respawn
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueStatus {
    pub resource: ResourceCode,
    pub resource_name: String,
    pub tier: String,
    pub claim: Option<ClaimSummary>,
    pub waiting: Vec<WaitingSummary>,
    pub offer: Option<OfferSummary>,
}

impl QueueStatus {
    pub fn empty(resource: ResourceCode, info: RespawnInfo) -> Self {
        Self {
            resource,
            resource_name: info.name,
            tier: info.tier,
            claim: None,
            waiting: Vec::new(),
            offer: None,
        }
    }
}

/// Successful outcome of a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Reply {
    Claimed {
        claim: ClaimSummary,
        /// The holder already had this respawn and the claim was restarted
        replaced: bool,
        /// The claim came from accepting a pending offer
        from_offer: bool,
    },
    Released {
        resource: ResourceCode,
    },
    Enqueued {
        resource: ResourceCode,
        position: usize,
        desired_minutes: u32,
    },
    Dequeued {
        resource: ResourceCode,
        declined_offer: bool,
    },
    Status(QueueStatus),
    Claims {
        claims: Vec<ClaimSummary>,
    },
}

impl std::fmt::Display for Reply {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Reply::Claimed {
                claim, from_offer, ..
            } => {
                let verb = if *from_offer { "accepted" } else { "claimed" };
                write!(
                    f,
                    "{} {} ({}) {}: {}",
                    verb,
                    claim.resource_name,
                    claim.tier,
                    claim.resource,
                    crate::duration::format_remaining(claim.remaining_minutes)
                )
            }
            Reply::Released { resource } => write!(f, "released {}", resource),
            Reply::Enqueued {
                resource, position, ..
            } => write!(f, "queued for {} at position #{}", resource, position),
            Reply::Dequeued {
                resource,
                declined_offer,
            } => {
                if *declined_offer {
                    write!(f, "declined offer for {}", resource)
                } else {
                    write!(f, "left the queue for {}", resource)
                }
            }
            Reply::Status(status) => {
                write!(f, "{} ({}) {}", status.resource_name, status.tier, status.resource)?;
                match &status.claim {
                    Some(c) => write!(
                        f,
                        ": {} {}",
                        c.holder_name,
                        crate::duration::format_remaining(c.remaining_minutes)
                    )?,
                    None => write!(f, ": free")?,
                }
                if let Some(offer) = &status.offer {
                    write!(f, ", offered to {}", offer.holder_name)?;
                }
                for w in &status.waiting {
                    write!(f, "\n#{} {}", w.position, w.holder_name)?;
                }
                Ok(())
            }
            Reply::Claims { claims } => {
                if claims.is_empty() {
                    return write!(f, "no active claims");
                }
                let lines: Vec<String> = claims
                    .iter()
                    .map(|c| {
                        format!(
                            "{} - {} {}: {}",
                            c.resource,
                            crate::duration::format_remaining(c.remaining_minutes),
                            c.resource_name,
                            c.holder_name
                        )
                    })
                    .collect();
                write!(f, "{}", lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
#[path = "command_tests.rs"]
mod tests;
