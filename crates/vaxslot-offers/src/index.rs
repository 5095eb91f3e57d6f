//! Per-address ordered offer-ID index.
//!
//! The ledger maintains two of these — one keyed by sender, one by
//! receiver — so both query directions avoid scanning the offer map.

use std::collections::HashMap;

use vaxslot_types::{AccountAddr, OfferId};

/// Ordered offer-ID lists keyed by address.
///
/// IDs keep their insertion order; removal preserves the relative order
/// of the remainder. An address with no IDs has no entry at all, so
/// [`OfferIndex::has_any`] is an exact occupancy check.
#[derive(Debug, Default)]
pub struct OfferIndex {
    entries: HashMap<AccountAddr, Vec<OfferId>>,
}

impl OfferIndex {
    #[must_use]
    pub fn new() -> Self {
        Self {
            entries: HashMap::new(),
        }
    }

    /// Append `id` to `addr`'s list.
    pub fn append(&mut self, addr: AccountAddr, id: OfferId) {
        self.entries.entry(addr).or_default().push(id);
    }

    /// Remove `id` from `addr`'s list, if present. Drops the entry when
    /// the list empties.
    pub fn remove(&mut self, addr: AccountAddr, id: OfferId) {
        if let Some(ids) = self.entries.get_mut(&addr) {
            ids.retain(|existing| *existing != id);
            if ids.is_empty() {
                self.entries.remove(&addr);
            }
        }
    }

    /// All IDs for `addr`, in insertion order.
    #[must_use]
    pub fn ids(&self, addr: AccountAddr) -> Vec<OfferId> {
        self.entries.get(&addr).cloned().unwrap_or_default()
    }

    /// Remove and return `addr`'s whole list.
    pub fn take(&mut self, addr: AccountAddr) -> Vec<OfferId> {
        self.entries.remove(&addr).unwrap_or_default()
    }

    /// Whether `addr` has any indexed IDs.
    #[must_use]
    pub fn has_any(&self, addr: AccountAddr) -> bool {
        self.entries.contains_key(&addr)
    }
}
