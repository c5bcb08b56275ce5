//! Cart synchronizer.
//!
//! [`CartSession`] ties the authoritative store, the quantity overlay, and
//! the catalog cache to a backend implementation. Every mutation is a
//! pessimistic round trip: the request goes out first and local state only
//! changes once the backend confirms. A failed request leaves local state
//! untouched, and nothing is retried automatically - one request per
//! explicit user action.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use hazelmarket_core::{CartItemId, ProductId};
use tracing::{debug, instrument};

use crate::api::{ApiError, StoreApi};
use crate::cart::overlay::QuantityOverlay;
use crate::cart::pricing::{self, OrderTotals};
use crate::cart::store::CartStore;
use crate::catalog::CatalogCache;
use crate::error::{Result, StateError};
use crate::types::{CartItem, CheckoutOutcome, User};

/// Store plus overlay, mutated together so the overlay always reseeds in
/// the same critical section that changes the store.
#[derive(Debug, Default)]
struct CartState {
    store: CartStore,
    overlay: QuantityOverlay,
}

/// Synchronizes the local cart with the backend.
///
/// The lock is only held to apply already-completed results; it is never
/// held across a backend request.
pub struct CartSession<B> {
    api: B,
    catalog: CatalogCache,
    state: Mutex<CartState>,
    fetch_seq: AtomicU64,
}

impl<B: StoreApi> CartSession<B> {
    /// Create a session over a backend and a (possibly shared) catalog.
    pub fn new(api: B, catalog: CatalogCache) -> Self {
        Self {
            api,
            catalog,
            state: Mutex::new(CartState::default()),
            fetch_seq: AtomicU64::new(0),
        }
    }

    fn lock_state(&self) -> MutexGuard<'_, CartState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// The catalog this session prices against.
    #[must_use]
    pub fn catalog(&self) -> &CatalogCache {
        &self.catalog
    }

    /// Load the full product catalog into the catalog cache.
    ///
    /// Fired independently of [`fetch_cart`](Self::fetch_cart); the two
    /// touch disjoint state and may run in parallel.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend request fails. The previously
    /// cached catalog is kept in that case.
    #[instrument(skip(self))]
    pub async fn load_catalog(&self) -> Result<()> {
        let products = self.api.fetch_products().await?;
        self.catalog.replace(products);
        Ok(())
    }

    /// Fetch the current user's cart, replacing the store and reseeding
    /// the overlay.
    ///
    /// Fetches are sequence-stamped when issued; a response that completes
    /// after a newer fetch has already been applied is discarded, so
    /// out-of-order completion cannot overwrite newer state.
    ///
    /// # Errors
    ///
    /// Returns [`StateError::NotAuthenticated`] without issuing a request
    /// if there is no signed-in user, or a network error from the backend.
    #[instrument(skip(self, viewer), fields(authenticated = viewer.is_some()))]
    pub async fn fetch_cart(&self, viewer: Option<&User>) -> Result<Vec<CartItem>> {
        if viewer.is_none() {
            return Err(StateError::NotAuthenticated);
        }

        let seq = self.fetch_seq.fetch_add(1, Ordering::Relaxed) + 1;
        let items = self.api.fetch_cart().await?;

        let mut state = self.lock_state();
        if state.store.apply_fetch(seq, items) {
            let CartState { store, overlay } = &mut *state;
            overlay.reseed(store.items());
        }
        Ok(state.store.items().to_vec())
    }

    /// Add a product to the cart, then refresh from the backend.
    ///
    /// The backend merges the quantity into an existing line for the same
    /// product, so the refreshed cart is the only reliable view of the
    /// result.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a non-positive quantity (no request
    /// issued), `NotAuthenticated` without a viewer, or a network error.
    #[instrument(skip(self, viewer), fields(authenticated = viewer.is_some()))]
    pub async fn add_to_cart(
        &self,
        viewer: Option<&User>,
        product_id: ProductId,
        quantity: u32,
    ) -> Result<Vec<CartItem>> {
        if viewer.is_none() {
            return Err(StateError::NotAuthenticated);
        }
        if quantity < 1 {
            return Err(StateError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        self.api.add_to_cart(product_id, quantity).await?;
        self.fetch_cart(viewer).await
    }

    /// Record an in-progress quantity edit in the overlay.
    ///
    /// This is the keystroke path: it never issues a request and never
    /// touches the store. Non-positive values are ignored. Returns whether
    /// the edit was recorded.
    pub fn edit_quantity(&self, item_id: CartItemId, quantity: i64) -> bool {
        self.lock_state().overlay.set_quantity(item_id, quantity)
    }

    /// Commit the overlay's pending quantity for a line item.
    ///
    /// This is the input-blur path: one request per explicit commit.
    ///
    /// # Errors
    ///
    /// Returns `NotFound` if the line item is unknown, or any error from
    /// [`update_quantity`](Self::update_quantity).
    #[instrument(skip(self))]
    pub async fn commit_quantity(&self, item_id: CartItemId) -> Result<CartItem> {
        let pending = self.lock_state().overlay.get(item_id);
        match pending {
            Some(quantity) => self.update_quantity(item_id, quantity).await,
            None => Err(StateError::NotFound(format!("cart item {item_id}"))),
        }
    }

    /// Push a quantity update to the backend and fold the confirmed item
    /// back into the store (which reseeds that item's overlay entry).
    ///
    /// # Errors
    ///
    /// A quantity below 1 is rejected client-side with a validation error
    /// and no request is issued. Backend failures surface unchanged; local
    /// state is untouched on any failure.
    #[instrument(skip(self))]
    pub async fn update_quantity(&self, item_id: CartItemId, quantity: u32) -> Result<CartItem> {
        if quantity < 1 {
            return Err(StateError::Validation(
                "quantity must be at least 1".to_string(),
            ));
        }

        let item = self.api.update_quantity(item_id, quantity).await?;

        let mut state = self.lock_state();
        state.store.apply_update(item.clone());
        state.overlay.reseed_item(&item);
        Ok(item)
    }

    /// Delete a line item.
    ///
    /// Idempotent: a backend `NotFound` (the line was already gone) counts
    /// as success, and the local line is dropped either way.
    ///
    /// # Errors
    ///
    /// Returns a network error if the request fails for any other reason;
    /// local state is untouched in that case.
    #[instrument(skip(self))]
    pub async fn delete_item(&self, item_id: CartItemId) -> Result<()> {
        match self.api.delete_item(item_id).await {
            Ok(()) => {}
            Err(ApiError::NotFound(_)) => {
                debug!(%item_id, "delete of absent cart item treated as success");
            }
            Err(err) => return Err(err.into()),
        }

        let mut state = self.lock_state();
        state.store.remove(item_id);
        state.overlay.remove(item_id);
        Ok(())
    }

    /// Signal intent-to-purchase.
    ///
    /// Checkout is a stub: the backend acknowledges the request but no
    /// order is committed, and the local cart is deliberately left as-is.
    ///
    /// # Errors
    ///
    /// Returns `NotAuthenticated` without a viewer, or a network error.
    #[instrument(skip(self, viewer), fields(authenticated = viewer.is_some()))]
    pub async fn checkout(&self, viewer: Option<&User>) -> Result<CheckoutOutcome> {
        if viewer.is_none() {
            return Err(StateError::NotAuthenticated);
        }

        let ack = self.api.checkout().await?;
        Ok(CheckoutOutcome::NotImplemented {
            message: ack.message,
        })
    }

    /// Snapshot of the server-confirmed line items.
    #[must_use]
    pub fn items(&self) -> Vec<CartItem> {
        self.lock_state().store.items().to_vec()
    }

    /// Number of line items in the cart.
    #[must_use]
    pub fn item_count(&self) -> usize {
        self.lock_state().store.len()
    }

    /// The quantity a display should show for a line item: the pending
    /// overlay edit when present, else the committed quantity.
    #[must_use]
    pub fn effective_quantity(&self, item_id: CartItemId) -> Option<u32> {
        let state = self.lock_state();
        state
            .store
            .get(item_id)
            .map(|item| state.overlay.effective_quantity(item))
    }

    /// Derive order totals from the current store, overlay, and catalog.
    ///
    /// Recomputed on every call; uncommitted overlay edits are reflected
    /// here while the store still reports committed quantities.
    #[must_use]
    pub fn totals(&self) -> OrderTotals {
        let state = self.lock_state();
        pricing::compute_totals(state.store.items(), &state.overlay, &self.catalog)
    }
}
