// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Domain errors surfaced to the requesting user

use crate::duration::DurationError;
use crate::respawn::ResourceCode;
use thiserror::Error;

/// Rejection of a scheduler operation. State is unchanged when returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClaimError {
    #[error(transparent)]
    Validation(#[from] DurationError),
    #[error(transparent)]
    Conflict(#[from] Conflict),
    #[error(transparent)]
    NotFound(#[from] NotFound),
}

impl ClaimError {
    /// Short machine-readable category
    pub fn kind(&self) -> &'static str {
        match self {
            ClaimError::Validation(_) => "validation",
            ClaimError::Conflict(_) => "conflict",
            ClaimError::NotFound(_) => "not_found",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Conflict {
    #[error("{resource} is already claimed by {holder_name}")]
    HeldByOther {
        resource: ResourceCode,
        holder_name: String,
    },
    #[error("you already hold {resource}")]
    AlreadyHolding { resource: ResourceCode },
    #[error("you are already queued for {resource}")]
    AlreadyQueued { resource: ResourceCode },
    #[error("you already have a pending offer for {resource}")]
    OfferPending { resource: ResourceCode },
    #[error("{resource} is free, claim it directly")]
    ResourceFree { resource: ResourceCode },
    #[error("{resource} is reserved for {holder_name} until the offer is accepted or lapses")]
    Reserved {
        resource: ResourceCode,
        holder_name: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NotFound {
    #[error("you have no claim on {resource}")]
    Claim { resource: ResourceCode },
    #[error("you are not queued for {resource}")]
    QueueEntry { resource: ResourceCode },
    #[error("you have no pending offer")]
    Offer,
    #[error("you are not holding or waiting for {resource}")]
    Participation { resource: ResourceCode },
}
