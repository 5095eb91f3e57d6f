//! # vaxslot-offers
//!
//! **Offer Ledger**: pending slot-swap proposals.
//!
//! ## Architecture
//!
//! 1. **OfferIndex**: per-address ordered ID lists, one keyed by sender
//!    ("created offers"), one by receiver ("incoming offers")
//! 2. **OfferLedger**: the offer map, a monotonic ID counter, creation
//!    and acceptance validation against the slot registry, and the
//!    cascade purge consumed from `SlotInvalidated` events
//!
//! ## Offer Flow
//!
//! ```text
//! create(registry, …) → pending ── accept(registry, …) → slots swapped
//!                              ├── delete(…)            → withdrawn
//!                              └── purge_party(…)       → cascaded
//! ```
//!
//! Eligibility is validated against the registry both at creation and
//! again at acceptance — never trusted from creation time.

pub mod index;
pub mod ledger;

pub use index::OfferIndex;
pub use ledger::OfferLedger;
