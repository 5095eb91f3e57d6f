//! # vaxslot-types
//!
//! Shared types, errors, and configuration for the **vaxslot** entitlement
//! ledger.
//!
//! This crate is the leaf dependency of the workspace — every other crate
//! depends on it. It defines:
//!
//! - **Identifiers**: [`AccountAddr`], [`OfferId`]
//! - **Slot model**: [`Slot`]
//! - **Offer model**: [`Offer`], [`OfferTerms`]
//! - **Domain events**: [`SlotInvalidated`]
//! - **Call context**: [`CallContext`] (caller identity + time, host-supplied)
//! - **Configuration**: [`EngineConfig`]
//! - **Errors**: [`VaxslotError`] with `VX_ERR_` prefix codes
//! - **Constants**: engine name, version, minimum slot type

pub mod config;
pub mod constants;
pub mod context;
pub mod error;
pub mod event;
pub mod ids;
pub mod offer;
pub mod slot;

// Re-export all primary types at crate root for ergonomic imports:
//   use vaxslot_types::{AccountAddr, Slot, Offer, VaxslotError, ...};

pub use config::*;
pub use context::*;
pub use error::*;
pub use event::*;
pub use ids::*;
pub use offer::*;
pub use slot::*;

// Constants are accessed via `vaxslot_types::constants::FOO`
// (not re-exported to avoid name collisions).
