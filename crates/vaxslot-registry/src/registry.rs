//! Slot storage and state transitions.
//!
//! All mutations are atomic: every precondition is checked before the
//! first write, so a rejected call leaves the map unchanged.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use vaxslot_types::{constants, AccountAddr, Result, Slot, SlotInvalidated, VaxslotError};

/// Holds at most one [`Slot`] per address.
///
/// Absence of a map entry is the "no slot" state; destruction removes
/// the entry outright rather than tombstoning it, which frees the
/// address for a future issuance.
pub struct SlotRegistry {
    /// Live slots keyed by the holder's address.
    slots: HashMap<AccountAddr, Slot>,
}

impl SlotRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
        }
    }

    /// Record a newly issued slot for `target`.
    ///
    /// The coordination layer has already verified that `issuer` is the
    /// authority; the registry enforces the entity-level rules.
    ///
    /// # Errors
    /// - `InvalidSlotType` if `slot_type` is zero
    /// - `AlreadyIssued` if `target` already holds a slot
    pub fn issue(
        &mut self,
        issuer: AccountAddr,
        target: AccountAddr,
        slot_type: u32,
        interval_secs: u64,
        now: DateTime<Utc>,
    ) -> Result<()> {
        if slot_type < constants::MIN_SLOT_TYPE {
            return Err(VaxslotError::InvalidSlotType { got: slot_type });
        }
        if self.slots.contains_key(&target) {
            return Err(VaxslotError::AlreadyIssued(target));
        }

        self.slots.insert(
            target,
            Slot {
                issued_at: now,
                issuer,
                owner: target,
                slot_type,
                doses_left: slot_type,
                last_used: None,
                interval_secs,
            },
        );
        Ok(())
    }

    /// Look up the slot held by `addr`.
    #[must_use]
    pub fn slot(&self, addr: AccountAddr) -> Option<&Slot> {
        self.slots.get(&addr)
    }

    /// Whether `addr` holds a slot that has never been used — the
    /// eligibility gate for swap offers.
    #[must_use]
    pub fn is_valid_unused(&self, addr: AccountAddr) -> bool {
        self.slots.get(&addr).is_some_and(Slot::is_unused)
    }

    /// Consume one dose from `target`'s slot.
    ///
    /// Sets `last_used` and decrements the dose counter; consuming the
    /// last dose removes the slot entirely (the terminal transition for
    /// that slot instance). Every success returns a [`SlotInvalidated`]
    /// event for the offer cascade — the first dose already makes the
    /// slot ineligible for swapping.
    ///
    /// # Errors
    /// Returns `NoSlot` if `target` holds no slot.
    pub fn vaccinate(
        &mut self,
        target: AccountAddr,
        now: DateTime<Utc>,
    ) -> Result<SlotInvalidated> {
        let slot = self
            .slots
            .get_mut(&target)
            .ok_or(VaxslotError::NoSlot(target))?;

        // A stored slot always has at least one dose left; the entry is
        // removed the moment the counter reaches zero.
        slot.doses_left -= 1;
        slot.last_used = Some(now);

        let burned = slot.doses_left == 0;
        if burned {
            self.slots.remove(&target);
        }

        Ok(SlotInvalidated {
            owner: target,
            burned,
        })
    }

    /// Exchange the slot records of `a` and `b`.
    ///
    /// The records are re-keyed and each `owner` field re-pointed at its
    /// new holder; dose counter, type, interval, issuance and usage
    /// history travel with the record — the entitlement moves, not its
    /// history. A self-swap is a no-op.
    ///
    /// # Errors
    /// Returns `NoSlot` if either address holds no slot. Nothing is
    /// mutated on failure.
    pub fn swap_owners(&mut self, a: AccountAddr, b: AccountAddr) -> Result<()> {
        if !self.slots.contains_key(&a) {
            return Err(VaxslotError::NoSlot(a));
        }
        if !self.slots.contains_key(&b) {
            return Err(VaxslotError::NoSlot(b));
        }
        if a == b {
            return Ok(());
        }

        // Presence of both keys was checked; the removes cannot miss.
        if let (Some(mut slot_a), Some(mut slot_b)) =
            (self.slots.remove(&a), self.slots.remove(&b))
        {
            slot_a.owner = b;
            slot_b.owner = a;
            self.slots.insert(b, slot_a);
            self.slots.insert(a, slot_b);
        }
        Ok(())
    }

    /// Number of live slots.
    #[must_use]
    pub fn issued_count(&self) -> usize {
        self.slots.len()
    }
}

impl Default for SlotRegistry {
    fn default() -> Self {
        Self::new()
    }
}
