//! # vaxslot-registry
//!
//! **Slot Registry**: the source of truth for per-address vaccination
//! entitlements.
//!
//! One [`Slot`](vaxslot_types::Slot) per address. Issuance, vaccination
//! (dose consumption and terminal destruction) and the ownership-swap
//! primitive mutate here; the offer ledger reads swap eligibility
//! through [`SlotRegistry::is_valid_unused`].
//!
//! Authority checks live one layer up, in the coordination engine — the
//! registry enforces entity-level preconditions only.

pub mod registry;

pub use registry::SlotRegistry;
