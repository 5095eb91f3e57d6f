//! Domain events crossing component boundaries.

use serde::{Deserialize, Serialize};

use crate::AccountAddr;

/// Emitted by the slot registry when a vaccination leaves a slot no
/// longer valid for swapping — either used (a dose consumed) or burned
/// (the last dose consumed and the entry removed).
///
/// The coordination layer feeds this event to the offer ledger within
/// the same operation, so no pending offer ever outlives the validity
/// of the slots it references.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotInvalidated {
    /// Holder of the slot that was just consumed.
    pub owner: AccountAddr,
    /// `true` when the last dose was consumed and the slot destroyed.
    pub burned: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serde_roundtrip() {
        let event = SlotInvalidated {
            owner: AccountAddr::random(),
            burned: true,
        };
        let json = serde_json::to_string(&event).unwrap();
        let back: SlotInvalidated = serde_json::from_str(&json).unwrap();
        assert_eq!(event, back);
    }
}
