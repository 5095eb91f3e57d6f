//! # Offer — a pending one-for-one slot swap
//!
//! An offer proposes swapping the sender's slot for the receiver's.
//! It stays pending until the receiver accepts, the sender withdraws it,
//! or a vaccination of either party cascades it away.
//!
//! ## State Machine
//!
//! ```text
//!   nonexistent ──create──▶ pending ──┬─ accepted ──▶ nonexistent
//!                                     ├─ deleted  ──▶ nonexistent
//!                                     └─ cascaded ──▶ nonexistent
//! ```
//!
//! Pending is the only non-terminal state. Removed offers leave no
//! tombstone and their IDs are never reused.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{AccountAddr, OfferId};

/// A pending swap proposed by `sender` to `receiver`.
///
/// An offer only ever exists while both parties hold valid unused slots:
/// creation validates both, and cascade purge removes the offer in the
/// same operation that invalidates either slot. Slot types shown to
/// either party are therefore looked up live from the registry rather
/// than captured here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Offer {
    /// Ledger-assigned identifier.
    pub id: OfferId,
    /// Proposer; their slot is what the receiver would get.
    pub sender: AccountAddr,
    /// Counterparty whose acceptance executes the swap.
    pub receiver: AccountAddr,
    /// When the offer was created.
    pub created_at: DateTime<Utc>,
}

/// What a party sees when querying an offer: the counterparty's current
/// slot type and address.
///
/// For the receiver the counterparty is the sender (what acceptance
/// would bring in); for the sender it is the receiver.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferTerms {
    /// The counterparty's current slot type.
    pub slot_type: u32,
    /// The counterparty's address.
    pub counterparty: AccountAddr,
}
