//! Offer storage, validation, and the cascade purge.
//!
//! The ledger validates slot eligibility against the registry at both
//! ends of an offer's life: `create` gates entry, `accept` re-validates
//! before the swap executes. All checks precede the first write, so any
//! rejected call is a no-op.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use vaxslot_registry::SlotRegistry;
use vaxslot_types::{AccountAddr, Offer, OfferId, Result, VaxslotError};

use crate::index::OfferIndex;

/// Holds all pending swap offers.
///
/// Offers are keyed by a monotonic [`OfferId`]; removed offers leave no
/// tombstone and their IDs are never reused.
pub struct OfferLedger {
    /// Pending offers by ID.
    offers: HashMap<OfferId, Offer>,
    /// IDs indexed by sender ("created offers").
    by_sender: OfferIndex,
    /// IDs indexed by receiver ("incoming offers").
    by_receiver: OfferIndex,
    /// Next ID to allocate. Never derived from `offers.len()`.
    next_id: OfferId,
}

impl OfferLedger {
    /// Create an empty ledger.
    #[must_use]
    pub fn new() -> Self {
        Self {
            offers: HashMap::new(),
            by_sender: OfferIndex::new(),
            by_receiver: OfferIndex::new(),
            next_id: OfferId(0),
        }
    }

    /// Record a new swap proposal from `sender` to `receiver`.
    ///
    /// Both parties must currently hold slots that have never been used,
    /// and the sender must not already have an outstanding offer.
    ///
    /// # Errors
    /// - `NoSlot` naming whichever party holds no slot (sender first)
    /// - `SlotInUse` naming whichever party's slot was already used
    /// - `DuplicateOffer` if the sender already has a pending offer
    pub fn create(
        &mut self,
        registry: &SlotRegistry,
        sender: AccountAddr,
        receiver: AccountAddr,
        now: DateTime<Utc>,
    ) -> Result<OfferId> {
        let sender_slot = registry.slot(sender).ok_or(VaxslotError::NoSlot(sender))?;
        let receiver_slot = registry
            .slot(receiver)
            .ok_or(VaxslotError::NoSlot(receiver))?;
        if !sender_slot.is_unused() {
            return Err(VaxslotError::SlotInUse(sender));
        }
        if !receiver_slot.is_unused() {
            return Err(VaxslotError::SlotInUse(receiver));
        }
        if self.by_sender.has_any(sender) {
            return Err(VaxslotError::DuplicateOffer(sender));
        }

        let id = self.next_id;
        self.next_id = id.next();
        self.offers.insert(
            id,
            Offer {
                id,
                sender,
                receiver,
                created_at: now,
            },
        );
        self.by_sender.append(sender, id);
        self.by_receiver.append(receiver, id);
        Ok(id)
    }

    /// Ordered IDs of offers addressed to `receiver`.
    #[must_use]
    pub fn offer_ids(&self, receiver: AccountAddr) -> Vec<OfferId> {
        self.by_receiver.ids(receiver)
    }

    /// Ordered IDs of offers created by `sender`.
    #[must_use]
    pub fn created_offer_ids(&self, sender: AccountAddr) -> Vec<OfferId> {
        self.by_sender.ids(sender)
    }

    /// Look up an offer on behalf of its receiver.
    ///
    /// # Errors
    /// `OfferNotFound` if absent; `Unauthorized` if `caller` is not the
    /// offer's receiver.
    pub fn offer_for_receiver(&self, id: OfferId, caller: AccountAddr) -> Result<&Offer> {
        let offer = self.offers.get(&id).ok_or(VaxslotError::OfferNotFound(id))?;
        if offer.receiver != caller {
            return Err(VaxslotError::Unauthorized {
                reason: format!("{caller} is not the receiver of {id}"),
            });
        }
        Ok(offer)
    }

    /// Look up an offer on behalf of its sender.
    ///
    /// # Errors
    /// `OfferNotFound` if absent; `Unauthorized` if `caller` is not the
    /// offer's sender.
    pub fn offer_for_sender(&self, id: OfferId, caller: AccountAddr) -> Result<&Offer> {
        let offer = self.offers.get(&id).ok_or(VaxslotError::OfferNotFound(id))?;
        if offer.sender != caller {
            return Err(VaxslotError::Unauthorized {
                reason: format!("{caller} is not the sender of {id}"),
            });
        }
        Ok(offer)
    }

    /// Withdraw a pending offer. Only its sender may do this.
    ///
    /// # Errors
    /// `OfferNotFound` if absent; `Unauthorized` if `caller` is not the
    /// offer's sender.
    pub fn delete(&mut self, id: OfferId, caller: AccountAddr) -> Result<()> {
        self.offer_for_sender(id, caller)?;
        self.remove_offer(id);
        Ok(())
    }

    /// Execute a swap: the receiver accepts, the entitlements change
    /// hands, and the offer is removed.
    ///
    /// Both slots are re-validated here — eligibility at creation time
    /// is not trusted.
    ///
    /// # Errors
    /// - `OfferNotFound` if the offer is absent
    /// - `Unauthorized` if `caller` is not the receiver
    /// - `NoSlot` / `SlotInUse` if either party's slot is no longer
    ///   present and unused
    pub fn accept(
        &mut self,
        registry: &mut SlotRegistry,
        id: OfferId,
        caller: AccountAddr,
    ) -> Result<()> {
        let offer = self.offer_for_receiver(id, caller)?;
        let (sender, receiver) = (offer.sender, offer.receiver);

        let sender_slot = registry.slot(sender).ok_or(VaxslotError::NoSlot(sender))?;
        let receiver_slot = registry
            .slot(receiver)
            .ok_or(VaxslotError::NoSlot(receiver))?;
        if !sender_slot.is_unused() {
            return Err(VaxslotError::SlotInUse(sender));
        }
        if !receiver_slot.is_unused() {
            return Err(VaxslotError::SlotInUse(receiver));
        }

        registry.swap_owners(sender, receiver)?;
        self.remove_offer(id);
        Ok(())
    }

    /// Cascade invalidation: drop every offer in which `addr`
    /// participates, as sender or receiver. Returns the purged IDs.
    ///
    /// Invoked by the coordination layer whenever a slot stops being
    /// valid, so no pending offer ever references an ineligible slot.
    /// Idempotent.
    pub fn purge_party(&mut self, addr: AccountAddr) -> Vec<OfferId> {
        let mut purged = self.by_sender.take(addr);
        purged.extend(self.by_receiver.take(addr));
        purged.sort_unstable();
        purged.dedup();

        // Clear the counterparty side of each purged offer; `addr`'s own
        // index entries are already gone via `take`.
        for id in &purged {
            if let Some(offer) = self.offers.remove(id) {
                self.by_sender.remove(offer.sender, *id);
                self.by_receiver.remove(offer.receiver, *id);
            }
        }
        purged
    }

    /// Number of pending offers.
    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.offers.len()
    }

    /// Whether an offer with `id` is pending.
    #[must_use]
    pub fn contains(&self, id: OfferId) -> bool {
        self.offers.contains_key(&id)
    }

    fn remove_offer(&mut self, id: OfferId) {
        if let Some(offer) = self.offers.remove(&id) {
            self.by_sender.remove(offer.sender, id);
            self.by_receiver.remove(offer.receiver, id);
        }
    }
}

impl Default for OfferLedger {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn addr(tag: u8) -> AccountAddr {
        AccountAddr::from_bytes([tag; 20])
    }

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 0, 0).unwrap()
    }

    /// Registry with unused slots for the given holders, type = tag.
    fn registry_with_slots(holders: &[u8]) -> SlotRegistry {
        let mut registry = SlotRegistry::new();
        for &tag in holders {
            registry
                .issue(addr(0xAA), addr(tag), u32::from(tag), 4, now())
                .unwrap();
        }
        registry
    }

    #[test]
    fn create_assigns_ids_from_zero_and_indexes_both_sides() {
        let registry = registry_with_slots(&[1, 2]);
        let mut ledger = OfferLedger::new();

        let id = ledger.create(&registry, addr(1), addr(2), now()).unwrap();
        assert_eq!(id, OfferId(0));
        assert_eq!(ledger.created_offer_ids(addr(1)), vec![id]);
        assert_eq!(ledger.offer_ids(addr(2)), vec![id]);
        assert_eq!(ledger.pending_count(), 1);
    }

    #[test]
    fn create_requires_sender_slot() {
        let registry = registry_with_slots(&[2]);
        let mut ledger = OfferLedger::new();

        let err = ledger
            .create(&registry, addr(1), addr(2), now())
            .unwrap_err();
        assert!(matches!(err, VaxslotError::NoSlot(a) if a == addr(1)));
        assert_eq!(ledger.pending_count(), 0);
    }

    #[test]
    fn create_requires_receiver_slot() {
        let registry = registry_with_slots(&[1]);
        let mut ledger = OfferLedger::new();

        let err = ledger
            .create(&registry, addr(1), addr(2), now())
            .unwrap_err();
        assert!(matches!(err, VaxslotError::NoSlot(a) if a == addr(2)));
    }

    #[test]
    fn create_rejects_used_sender_slot() {
        let mut registry = registry_with_slots(&[2, 3]);
        registry.vaccinate(addr(2), now()).unwrap();
        let mut ledger = OfferLedger::new();

        let err = ledger
            .create(&registry, addr(2), addr(3), now())
            .unwrap_err();
        assert!(matches!(err, VaxslotError::SlotInUse(a) if a == addr(2)));
    }

    #[test]
    fn create_rejects_used_receiver_slot() {
        let mut registry = registry_with_slots(&[2, 3]);
        registry.vaccinate(addr(3), now()).unwrap();
        let mut ledger = OfferLedger::new();

        let err = ledger
            .create(&registry, addr(2), addr(3), now())
            .unwrap_err();
        assert!(matches!(err, VaxslotError::SlotInUse(a) if a == addr(3)));
    }

    #[test]
    fn second_outstanding_offer_blocked() {
        let registry = registry_with_slots(&[1, 2, 3]);
        let mut ledger = OfferLedger::new();
        ledger.create(&registry, addr(1), addr(2), now()).unwrap();

        let err = ledger
            .create(&registry, addr(1), addr(3), now())
            .unwrap_err();
        assert!(matches!(err, VaxslotError::DuplicateOffer(a) if a == addr(1)));
        assert_eq!(ledger.pending_count(), 1);
    }

    #[test]
    fn ids_stay_monotonic_across_deletion() {
        let registry = registry_with_slots(&[1, 2]);
        let mut ledger = OfferLedger::new();

        let first = ledger.create(&registry, addr(1), addr(2), now()).unwrap();
        ledger.delete(first, addr(1)).unwrap();
        let second = ledger.create(&registry, addr(1), addr(2), now()).unwrap();

        assert_eq!(first, OfferId(0));
        assert_eq!(second, OfferId(1));
        assert!(!ledger.contains(first));
    }

    #[test]
    fn receiver_sees_only_their_offers_in_order() {
        let registry = registry_with_slots(&[1, 2, 3, 4]);
        let mut ledger = OfferLedger::new();
        let a = ledger.create(&registry, addr(4), addr(3), now()).unwrap();
        let b = ledger.create(&registry, addr(1), addr(2), now()).unwrap();
        let c = ledger.create(&registry, addr(3), addr(2), now()).unwrap();

        assert_eq!(ledger.offer_ids(addr(2)), vec![b, c]);
        assert_eq!(ledger.offer_ids(addr(3)), vec![a]);
        assert!(ledger.offer_ids(addr(1)).is_empty());
    }

    #[test]
    fn receiver_lookup_enforces_identity() {
        let registry = registry_with_slots(&[1, 2, 3]);
        let mut ledger = OfferLedger::new();
        let id = ledger.create(&registry, addr(1), addr(2), now()).unwrap();

        let offer = ledger.offer_for_receiver(id, addr(2)).unwrap();
        assert_eq!(offer.sender, addr(1));

        let err = ledger.offer_for_receiver(id, addr(3)).unwrap_err();
        assert!(matches!(err, VaxslotError::Unauthorized { .. }));
    }

    #[test]
    fn sender_lookup_enforces_identity() {
        let registry = registry_with_slots(&[1, 2]);
        let mut ledger = OfferLedger::new();
        let id = ledger.create(&registry, addr(1), addr(2), now()).unwrap();

        let offer = ledger.offer_for_sender(id, addr(1)).unwrap();
        assert_eq!(offer.receiver, addr(2));

        let err = ledger.offer_for_sender(id, addr(2)).unwrap_err();
        assert!(matches!(err, VaxslotError::Unauthorized { .. }));
    }

    #[test]
    fn unknown_offer_is_not_found() {
        let ledger = OfferLedger::new();
        let err = ledger.offer_for_receiver(OfferId(0), addr(1)).unwrap_err();
        assert!(matches!(err, VaxslotError::OfferNotFound(OfferId(0))));
    }

    #[test]
    fn delete_requires_sender() {
        let registry = registry_with_slots(&[1, 2]);
        let mut ledger = OfferLedger::new();
        let id = ledger.create(&registry, addr(1), addr(2), now()).unwrap();

        let err = ledger.delete(id, addr(2)).unwrap_err();
        assert!(matches!(err, VaxslotError::Unauthorized { .. }));
        assert!(ledger.contains(id));

        ledger.delete(id, addr(1)).unwrap();
        assert!(!ledger.contains(id));
        assert!(ledger.created_offer_ids(addr(1)).is_empty());
        assert!(ledger.offer_ids(addr(2)).is_empty());
    }

    #[test]
    fn accept_swaps_and_removes_offer() {
        let mut registry = registry_with_slots(&[2, 4]);
        let mut ledger = OfferLedger::new();
        let id = ledger
            .create(&registry, addr(2), addr(4), now())
            .unwrap();

        ledger.accept(&mut registry, id, addr(4)).unwrap();

        assert_eq!(registry.slot(addr(2)).unwrap().slot_type, 4);
        assert_eq!(registry.slot(addr(4)).unwrap().slot_type, 2);
        assert!(!ledger.contains(id));
        assert!(ledger.offer_ids(addr(4)).is_empty());
        assert!(ledger.created_offer_ids(addr(2)).is_empty());
    }

    #[test]
    fn accept_requires_receiver() {
        let mut registry = registry_with_slots(&[1, 2, 3]);
        let mut ledger = OfferLedger::new();
        let id = ledger.create(&registry, addr(1), addr(2), now()).unwrap();

        let err = ledger.accept(&mut registry, id, addr(3)).unwrap_err();
        assert!(matches!(err, VaxslotError::Unauthorized { .. }));
        assert!(ledger.contains(id));
    }

    #[test]
    fn accept_revalidates_slot_state() {
        let mut registry = registry_with_slots(&[2, 3]);
        let mut ledger = OfferLedger::new();
        let id = ledger.create(&registry, addr(2), addr(3), now()).unwrap();

        // Consume a dose behind the ledger's back (the coordination
        // layer would normally purge; the ledger must not rely on it).
        registry.vaccinate(addr(2), now()).unwrap();

        let err = ledger.accept(&mut registry, id, addr(3)).unwrap_err();
        assert!(matches!(err, VaxslotError::SlotInUse(a) if a == addr(2)));
        // Nothing swapped.
        assert_eq!(registry.slot(addr(3)).unwrap().slot_type, 3);
        assert!(ledger.contains(id));
    }

    #[test]
    fn purge_party_drops_both_directions() {
        let registry = registry_with_slots(&[1, 2, 3]);
        let mut ledger = OfferLedger::new();
        let outgoing = ledger.create(&registry, addr(1), addr(2), now()).unwrap();
        let incoming = ledger.create(&registry, addr(3), addr(1), now()).unwrap();

        let mut purged = ledger.purge_party(addr(1));
        purged.sort_unstable();
        assert_eq!(purged, vec![outgoing, incoming]);

        assert_eq!(ledger.pending_count(), 0);
        assert!(ledger.offer_ids(addr(2)).is_empty());
        assert!(ledger.created_offer_ids(addr(3)).is_empty());
    }

    #[test]
    fn purge_party_is_idempotent_and_spares_strangers() {
        let registry = registry_with_slots(&[1, 2, 3, 4]);
        let mut ledger = OfferLedger::new();
        ledger.create(&registry, addr(1), addr(2), now()).unwrap();
        let unrelated = ledger.create(&registry, addr(3), addr(4), now()).unwrap();

        assert_eq!(ledger.purge_party(addr(1)).len(), 1);
        assert!(ledger.purge_party(addr(1)).is_empty());
        assert!(ledger.contains(unrelated));
    }
}
