//! Per-call context supplied by the host ledger.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::AccountAddr;

/// Caller identity and current time for one operation.
///
/// The host ledger authenticates the caller, serializes operations into
/// a single global order, and stamps each call with a monotonic `now`.
/// The engine trusts both fields; it never reads the wall clock itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// The authenticated caller of this operation.
    pub caller: AccountAddr,
    /// Current ledger time, monotonic across calls.
    pub now: DateTime<Utc>,
}

impl CallContext {
    #[must_use]
    pub fn new(caller: AccountAddr, now: DateTime<Utc>) -> Self {
        Self { caller, now }
    }
}
