//! Transient quantity edits layered over the authoritative cart.

use std::collections::HashMap;

use hazelmarket_core::CartItemId;

use crate::types::CartItem;

/// Uncommitted per-line quantity edits.
///
/// Reseeding is a full replacement, never a merge: any unsaved edit is
/// discarded when the store changes, including edits for line items that
/// vanished from the new cart. This is the chosen resolution of the race
/// between user keystrokes and an in-flight fetch completing, not an
/// accident - see the module docs on [`crate::cart`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct QuantityOverlay {
    entries: HashMap<CartItemId, u32>,
}

impl QuantityOverlay {
    /// Create an empty overlay.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild the overlay to mirror every item's committed quantity.
    pub fn reseed(&mut self, items: &[CartItem]) {
        self.entries = items.iter().map(|item| (item.id, item.quantity)).collect();
    }

    /// Reseed a single line back to its committed quantity.
    pub fn reseed_item(&mut self, item: &CartItem) {
        self.entries.insert(item.id, item.quantity);
    }

    /// Drop the entry for a deleted line item.
    pub fn remove(&mut self, item_id: CartItemId) {
        self.entries.remove(&item_id);
    }

    /// Record a candidate quantity for a line item.
    ///
    /// A non-positive quantity is a no-op (the input field can briefly read
    /// zero or garbage while the user types). Returns whether the edit was
    /// applied.
    pub fn set_quantity(&mut self, item_id: CartItemId, quantity: i64) -> bool {
        match u32::try_from(quantity) {
            Ok(quantity) if quantity > 0 => {
                self.entries.insert(item_id, quantity);
                true
            }
            _ => false,
        }
    }

    /// The pending quantity for a line item, if any.
    #[must_use]
    pub fn get(&self, item_id: CartItemId) -> Option<u32> {
        self.entries.get(&item_id).copied()
    }

    /// The quantity used everywhere totals or displays are computed: the
    /// overlay value when present, else the item's committed quantity.
    #[must_use]
    pub fn effective_quantity(&self, item: &CartItem) -> u32 {
        self.entries
            .get(&item.id)
            .copied()
            .unwrap_or(item.quantity)
    }

    /// Number of tracked entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the overlay tracks no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
