//! # Slot — the per-address vaccination entitlement
//!
//! A `Slot` grants its holder a fixed number of vaccine doses. The
//! authority issues at most one slot per address; each vaccination
//! consumes a dose until the slot is exhausted and destroyed.
//!
//! ## Lifecycle
//!
//! ```text
//!   ┌────────┐  vaccinate   ┌──────┐  last dose   ┌───────────┐
//!   │ UNUSED ├─────────────▶│ USED ├─────────────▶│ DESTROYED │
//!   └───┬────┘              └──┬───┘              └───────────┘
//!       │ swap (offer accepted)│ vaccinate (doses left)
//!       ▼                      ▼
//!   changes hands          stays USED
//! ```
//!
//! Only an UNUSED slot may enter a swap. Destruction removes the registry
//! entry outright — there is no tombstone and no renewal.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccountAddr;

/// A vaccination entitlement held by one address.
///
/// The registry stores at most one `Slot` per address; absence of a map
/// entry is the "no slot" state, so a `Slot` value always describes a
/// live entitlement.
///
/// Swap acceptance moves the whole record between two addresses: the
/// dose counter, type, interval and usage history travel with the
/// entitlement, and only `owner` is re-pointed at the new holder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Slot {
    /// When the authority issued this slot.
    pub issued_at: DateTime<Utc>,
    /// The authority that issued it.
    pub issuer: AccountAddr,
    /// Current holder. Mutable via swap acceptance only.
    pub owner: AccountAddr,
    /// Positive vaccine category. Immutable per slot instance.
    pub slot_type: u32,
    /// Remaining doses. Starts at `slot_type`; a stored slot always has
    /// at least one dose left.
    pub doses_left: u32,
    /// Most recent vaccination, `None` if the slot was never used.
    pub last_used: Option<DateTime<Utc>>,
    /// Minimum spacing between uses, in seconds. Carried for off-core
    /// scheduling policy; the core does not enforce it.
    pub interval_secs: u64,
}

impl Slot {
    /// `true` while no dose has been consumed — the eligibility
    /// condition for entering a swap.
    #[must_use]
    pub fn is_unused(&self) -> bool {
        self.last_used.is_none()
    }
}

/// Dummy slot for testing. **Never use in production.**
#[cfg(any(test, feature = "test-helpers"))]
impl Slot {
    /// Fresh unused slot for unit tests.
    pub fn dummy(issuer: AccountAddr, owner: AccountAddr, slot_type: u32) -> Self {
        Self {
            issued_at: Utc::now(),
            issuer,
            owner,
            slot_type,
            doses_left: slot_type,
            last_used: None,
            interval_secs: 0,
        }
    }
}
