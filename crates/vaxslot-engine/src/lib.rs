//! # vaxslot-engine
//!
//! **Authorization & Coordination layer**: the public operation surface
//! of the vaccination-slot ledger.
//!
//! ## Architecture
//!
//! The engine sits between the host ledger and the two state stores:
//! 1. **SlotRegistry**: per-address entitlements (issue, vaccinate, swap)
//! 2. **OfferLedger**: pending swap proposals and their indexes
//!
//! ## Call Flow
//!
//! ```text
//! host ledger → CallContext → SlotEngine (role/identity gate)
//!            → SlotRegistry and/or OfferLedger → result or typed error
//! ```
//!
//! The engine owns the cross-entity effects: a vaccination's
//! `SlotInvalidated` event is fed to the offer ledger's cascade purge
//! within the same call, so the combined transition is atomic under the
//! host's serialized execution model.

pub mod engine;

pub use engine::SlotEngine;
