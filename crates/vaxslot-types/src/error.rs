//! Error types for the vaxslot entitlement ledger.
//!
//! All errors use the `VX_ERR_` prefix convention for easy grepping in
//! logs. Error codes are grouped by subsystem:
//! - 1xx: Slot errors
//! - 2xx: Offer errors
//! - 3xx: Authorization errors
//!
//! Every failure aborts the whole operation: a rejected call leaves all
//! slots, offers and indexes exactly as they were.

use thiserror::Error;

use crate::{AccountAddr, OfferId};

/// Central error enum for all vaxslot operations.
#[derive(Debug, Error)]
pub enum VaxslotError {
    // =================================================================
    // Slot Errors (1xx)
    // =================================================================
    /// Issuance with a non-positive slot type.
    #[error("VX_ERR_100: slot type must be greater than zero (got {got})")]
    InvalidSlotType { got: u32 },

    /// The target address already holds a slot.
    #[error("VX_ERR_101: address {0} already holds a slot")]
    AlreadyIssued(AccountAddr),

    /// The named party holds no slot (vaccination target, swap sender,
    /// or swap receiver).
    #[error("VX_ERR_102: address {0} has no slot")]
    NoSlot(AccountAddr),

    /// The named party's slot exists but has already been used, so it
    /// is not eligible for swapping.
    #[error("VX_ERR_103: slot of {0} has already been used")]
    SlotInUse(AccountAddr),

    // =================================================================
    // Offer Errors (2xx)
    // =================================================================
    /// The referenced offer does not exist (never created, withdrawn,
    /// accepted, or cascaded away).
    #[error("VX_ERR_200: offer {0} not found")]
    OfferNotFound(OfferId),

    /// The sender already has an outstanding created offer.
    #[error("VX_ERR_201: address {0} already has an outstanding offer")]
    DuplicateOffer(AccountAddr),

    // =================================================================
    // Authorization Errors (3xx)
    // =================================================================
    /// Role or identity mismatch for the attempted operation.
    #[error("VX_ERR_300: unauthorized: {reason}")]
    Unauthorized { reason: String },
}

/// Crate-wide `Result` alias.
pub type Result<T> = std::result::Result<T, VaxslotError>;
