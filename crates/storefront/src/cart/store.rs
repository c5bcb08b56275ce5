//! Authoritative server-confirmed cart state.

use hazelmarket_core::CartItemId;
use tracing::debug;

use crate::types::CartItem;

/// The server-confirmed list of cart line items.
///
/// Fetch results are sequence-stamped by the synchronizer: concurrent
/// fetches may complete out of order, and a response belonging to an older
/// request must not clobber state applied from a newer one. Last applied
/// wins by request order, not completion order.
#[derive(Debug, Default)]
pub struct CartStore {
    items: Vec<CartItem>,
    last_applied_fetch: u64,
}

impl CartStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The current line items.
    #[must_use]
    pub fn items(&self) -> &[CartItem] {
        &self.items
    }

    /// Look up a line item by id.
    #[must_use]
    pub fn get(&self, item_id: CartItemId) -> Option<&CartItem> {
        self.items.iter().find(|item| item.id == item_id)
    }

    /// Number of line items.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the cart has no line items.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Replace the entire cart with a fetch result.
    ///
    /// `seq` is the sequence number the synchronizer assigned when the
    /// fetch was issued. A result older than the last applied one is
    /// ignored; returns whether the result was applied.
    pub fn apply_fetch(&mut self, seq: u64, items: Vec<CartItem>) -> bool {
        if seq < self.last_applied_fetch {
            debug!(
                seq,
                last_applied = self.last_applied_fetch,
                "ignoring stale cart fetch"
            );
            return false;
        }
        self.last_applied_fetch = seq;
        self.items = items;
        true
    }

    /// Fold one server-confirmed item back into the store, replacing the
    /// existing line or appending if the line is new to us.
    pub fn apply_update(&mut self, item: CartItem) {
        if let Some(existing) = self.items.iter_mut().find(|i| i.id == item.id) {
            *existing = item;
        } else {
            self.items.push(item);
        }
    }

    /// Remove a line item. Removing an absent id is not an error.
    pub fn remove(&mut self, item_id: CartItemId) {
        self.items.retain(|item| item.id != item_id);
    }

    /// Drop every line item.
    pub fn clear(&mut self) {
        self.items.clear();
    }
}
