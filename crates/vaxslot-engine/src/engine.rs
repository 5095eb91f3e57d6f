//! The engine: authorization gates plus cross-entity coordination.

use vaxslot_offers::OfferLedger;
use vaxslot_registry::SlotRegistry;
use vaxslot_types::{
    AccountAddr, CallContext, EngineConfig, OfferId, OfferTerms, Result, Slot, SlotInvalidated,
    VaxslotError,
};

/// The public operation surface of the vaccination-slot ledger.
///
/// Owns the slot registry and the offer ledger, and gates every
/// operation on the caller identity supplied by the host: issuance and
/// vaccination are restricted to the configured authority, everything
/// else is self-service with entity-level identity checks.
///
/// The host ledger serializes calls, so `&mut self` is the only
/// synchronization needed; a host targeting a concurrent environment
/// wraps the engine in its own exclusive lock.
pub struct SlotEngine {
    /// The only address allowed to issue slots and vaccinate.
    authority: AccountAddr,
    registry: SlotRegistry,
    offers: OfferLedger,
}

impl SlotEngine {
    /// Create an engine with the authority fixed from configuration.
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        Self {
            authority: config.authority,
            registry: SlotRegistry::new(),
            offers: OfferLedger::new(),
        }
    }

    // =================================================================
    // Authority-only operations
    // =================================================================

    /// Issue a fresh slot to `target`.
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the authority
    /// - `InvalidSlotType` if `slot_type` is zero
    /// - `AlreadyIssued` if `target` already holds a slot
    pub fn issue_slot(
        &mut self,
        ctx: &CallContext,
        target: AccountAddr,
        slot_type: u32,
        interval_secs: u64,
    ) -> Result<()> {
        self.require_authority(ctx, "issue slots")?;
        self.registry
            .issue(ctx.caller, target, slot_type, interval_secs, ctx.now)?;

        tracing::info!(
            holder = %target,
            slot_type,
            interval_secs,
            "Slot issued"
        );
        Ok(())
    }

    /// Consume one dose from `target`'s slot, then cascade: every
    /// pending offer referencing `target` is purged in the same call.
    ///
    /// Returns the [`SlotInvalidated`] event (its `burned` flag tells
    /// the host whether the slot was destroyed).
    ///
    /// # Errors
    /// - `Unauthorized` if the caller is not the authority
    /// - `NoSlot` if `target` holds no slot
    pub fn vaccinate(&mut self, ctx: &CallContext, target: AccountAddr) -> Result<SlotInvalidated> {
        self.require_authority(ctx, "vaccinate")?;
        let event = self.registry.vaccinate(target, ctx.now)?;

        let purged = self.offers.purge_party(event.owner);
        if !purged.is_empty() {
            tracing::warn!(
                holder = %event.owner,
                purged = purged.len(),
                "Pending offers invalidated by vaccination"
            );
        }

        tracing::info!(
            patient = %target,
            burned = event.burned,
            "Vaccination recorded"
        );
        Ok(event)
    }

    // =================================================================
    // Self-service operations
    // =================================================================

    /// The caller's own slot, if any.
    #[must_use]
    pub fn slot(&self, ctx: &CallContext) -> Option<Slot> {
        self.registry.slot(ctx.caller).cloned()
    }

    /// Propose swapping the caller's slot for `receiver`'s.
    ///
    /// # Errors
    /// - `NoSlot` / `SlotInUse` naming the ineligible party
    /// - `DuplicateOffer` if the caller already has a pending offer
    pub fn create_offer(&mut self, ctx: &CallContext, receiver: AccountAddr) -> Result<OfferId> {
        let id = self
            .offers
            .create(&self.registry, ctx.caller, receiver, ctx.now)?;

        tracing::debug!(
            offer = %id,
            sender = %ctx.caller,
            receiver = %receiver,
            "Offer created"
        );
        Ok(id)
    }

    /// Ordered IDs of offers addressed to the caller.
    #[must_use]
    pub fn offer_ids(&self, ctx: &CallContext) -> Vec<OfferId> {
        self.offers.offer_ids(ctx.caller)
    }

    /// Terms of an incoming offer: the sender's current slot type and
    /// address. Receiver only.
    ///
    /// # Errors
    /// `OfferNotFound` if absent; `Unauthorized` if the caller is not
    /// the offer's receiver.
    pub fn offer_by_id(&self, ctx: &CallContext, id: OfferId) -> Result<OfferTerms> {
        let offer = self.offers.offer_for_receiver(id, ctx.caller)?;
        self.terms_for(offer.sender)
    }

    /// Ordered IDs of offers created by the caller.
    #[must_use]
    pub fn created_offer_ids(&self, ctx: &CallContext) -> Vec<OfferId> {
        self.offers.created_offer_ids(ctx.caller)
    }

    /// Terms of a created offer: the receiver's current slot type and
    /// address. Sender only.
    ///
    /// # Errors
    /// `OfferNotFound` if absent; `Unauthorized` if the caller is not
    /// the offer's sender.
    pub fn created_offer_by_id(&self, ctx: &CallContext, id: OfferId) -> Result<OfferTerms> {
        let offer = self.offers.offer_for_sender(id, ctx.caller)?;
        self.terms_for(offer.receiver)
    }

    /// Withdraw one of the caller's pending offers.
    ///
    /// # Errors
    /// `OfferNotFound` if absent; `Unauthorized` if the caller is not
    /// the offer's sender.
    pub fn delete_offer(&mut self, ctx: &CallContext, id: OfferId) -> Result<()> {
        self.offers.delete(id, ctx.caller)?;

        tracing::debug!(offer = %id, sender = %ctx.caller, "Offer withdrawn");
        Ok(())
    }

    /// Accept an incoming offer: slots change hands, the offer is gone.
    ///
    /// # Errors
    /// - `OfferNotFound` if the offer is absent
    /// - `Unauthorized` if the caller is not the receiver
    /// - `NoSlot` / `SlotInUse` if either slot fails re-validation
    pub fn accept_offer(&mut self, ctx: &CallContext, id: OfferId) -> Result<()> {
        self.offers.accept(&mut self.registry, id, ctx.caller)?;

        tracing::info!(
            offer = %id,
            receiver = %ctx.caller,
            "Offer accepted, slots swapped"
        );
        Ok(())
    }

    // =================================================================
    // Accessors
    // =================================================================

    /// The configured authority address.
    #[must_use]
    pub fn authority(&self) -> AccountAddr {
        self.authority
    }

    /// Read access to the slot registry.
    #[must_use]
    pub fn registry(&self) -> &SlotRegistry {
        &self.registry
    }

    /// Read access to the offer ledger.
    #[must_use]
    pub fn offers(&self) -> &OfferLedger {
        &self.offers
    }

    // =================================================================
    // Internals
    // =================================================================

    /// Counterparty view of an offer: their current slot type and
    /// address. A pending offer's parties always hold slots (cascade
    /// purge runs in the same operation that invalidates one), so the
    /// lookup cannot miss for an offer that still exists.
    fn terms_for(&self, counterparty: AccountAddr) -> Result<OfferTerms> {
        let slot = self
            .registry
            .slot(counterparty)
            .ok_or(VaxslotError::NoSlot(counterparty))?;
        Ok(OfferTerms {
            slot_type: slot.slot_type,
            counterparty,
        })
    }

    fn require_authority(&self, ctx: &CallContext, action: &str) -> Result<()> {
        if ctx.caller != self.authority {
            return Err(VaxslotError::Unauthorized {
                reason: format!("only the authority may {action}"),
            });
        }
        Ok(())
    }
}
