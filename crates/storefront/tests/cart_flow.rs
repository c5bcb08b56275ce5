//! End-to-end cart synchronization tests over an in-memory backend.

mod common;

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use hazelmarket_core::{CartItemId, ProductId};
use hazelmarket_storefront::StateError;
use hazelmarket_storefront::api::{ApiError, StoreApi};
use hazelmarket_storefront::cart::CartSession;
use hazelmarket_storefront::catalog::CatalogCache;
use hazelmarket_storefront::types::{
    CartItem, CheckoutAck, CheckoutOutcome, NewReview, Product, Review, ReviewPatch,
};
use rust_decimal::Decimal;
use tokio::sync::Notify;

use common::{FakeApi, cart_item, product, user};

fn session_with(api: FakeApi) -> CartSession<FakeApi> {
    CartSession::new(api, CatalogCache::new(Duration::from_secs(300)))
}

#[tokio::test]
async fn totals_follow_overlay_edits_until_commit() {
    // Worked example: p1 costs 10.00, cart holds quantity 2.
    let api = FakeApi::new(vec![product(1, 50, 1000)], vec![cart_item(1, 1, 2)]);
    let session = session_with(api.clone());
    let viewer = user(7);

    session.load_catalog().await.expect("catalog load");
    session
        .fetch_cart(Some(&viewer))
        .await
        .expect("cart fetch");

    let totals = session.totals();
    assert_eq!(totals.subtotal, Decimal::new(2000, 2));
    assert_eq!(totals.tax, Decimal::new(160, 2));
    assert_eq!(totals.shipping, Decimal::new(399, 2));
    assert_eq!(totals.total, Decimal::new(2559, 2));

    // Editing the overlay changes displayed totals but not the store.
    assert!(session.edit_quantity(CartItemId::new(1), 3));
    let totals = session.totals();
    assert_eq!(totals.subtotal, Decimal::new(3000, 2));
    assert_eq!(totals.tax, Decimal::new(240, 2));
    assert_eq!(totals.total, Decimal::new(3639, 2));
    assert_eq!(session.items(), vec![cart_item(1, 1, 2)]);
    assert_eq!(session.effective_quantity(CartItemId::new(1)), Some(3));

    // Committing pushes the overlay value through the backend.
    let committed = session
        .commit_quantity(CartItemId::new(1))
        .await
        .expect("commit");
    assert_eq!(committed.quantity, 3);
    assert_eq!(session.items(), vec![cart_item(1, 1, 3)]);
    assert_eq!(api.update_calls(), 1);
}

#[tokio::test]
async fn zero_quantity_is_rejected_without_a_request() {
    let api = FakeApi::new(vec![product(1, 50, 1000)], vec![cart_item(1, 1, 2)]);
    let session = session_with(api.clone());
    session.fetch_cart(Some(&user(7))).await.expect("cart fetch");

    // The overlay silently ignores the edit.
    assert!(!session.edit_quantity(CartItemId::new(1), 0));
    assert!(!session.edit_quantity(CartItemId::new(1), -3));

    // A direct update is a client-side validation error; no request goes out.
    let err = session
        .update_quantity(CartItemId::new(1), 0)
        .await
        .expect_err("must be rejected");
    assert!(matches!(err, StateError::Validation(_)));
    assert_eq!(api.update_calls(), 0);
    assert_eq!(session.items(), vec![cart_item(1, 1, 2)]);
}

#[tokio::test]
async fn delete_is_idempotent() {
    let api = FakeApi::new(vec![product(1, 50, 1000)], vec![cart_item(1, 1, 2)]);
    let session = session_with(api.clone());
    session.fetch_cart(Some(&user(7))).await.expect("cart fetch");

    session
        .delete_item(CartItemId::new(1))
        .await
        .expect("first delete");
    assert!(session.items().is_empty());

    // The backend 404s the second time; the synchronizer still succeeds.
    session
        .delete_item(CartItemId::new(1))
        .await
        .expect("second delete");
    assert!(session.items().is_empty());
    assert_eq!(api.delete_calls(), 2);
}

#[tokio::test]
async fn unauthenticated_operations_issue_no_request() {
    let api = FakeApi::new(vec![product(1, 50, 1000)], vec![cart_item(1, 1, 2)]);
    let session = session_with(api.clone());

    let err = session.fetch_cart(None).await.expect_err("no session");
    assert!(matches!(err, StateError::NotAuthenticated));
    assert_eq!(api.fetch_cart_calls(), 0);

    let err = session.checkout(None).await.expect_err("no session");
    assert!(matches!(err, StateError::NotAuthenticated));
}

#[tokio::test]
async fn add_to_cart_merges_and_refreshes() {
    let api = FakeApi::new(vec![product(1, 50, 1000)], vec![cart_item(1, 1, 2)]);
    let session = session_with(api.clone());
    let viewer = user(7);
    session.fetch_cart(Some(&viewer)).await.expect("cart fetch");

    // Same product: the backend merges into the existing line.
    session
        .add_to_cart(Some(&viewer), ProductId::new(1), 3)
        .await
        .expect("add");
    assert_eq!(session.items(), vec![cart_item(1, 1, 5)]);

    // Zero quantity never leaves the client.
    let err = session
        .add_to_cart(Some(&viewer), ProductId::new(1), 0)
        .await
        .expect_err("must be rejected");
    assert!(matches!(err, StateError::Validation(_)));
    assert_eq!(api.server_cart(), vec![cart_item(1, 1, 5)]);
}

#[tokio::test]
async fn checkout_is_an_explicit_stub() {
    let api = FakeApi::new(vec![product(1, 50, 1000)], vec![cart_item(1, 1, 2)]);
    let session = session_with(api.clone());
    let viewer = user(7);
    session.fetch_cart(Some(&viewer)).await.expect("cart fetch");

    let outcome = session.checkout(Some(&viewer)).await.expect("checkout");
    let CheckoutOutcome::NotImplemented { message } = outcome;
    assert_eq!(message, "Transaction received");

    // Intent only: the local cart is untouched.
    assert_eq!(session.items(), vec![cart_item(1, 1, 2)]);
}

// =============================================================================
// Out-of-order completion
// =============================================================================

/// Backend whose first cart fetch stalls until the second completes,
/// simulating out-of-order completion of concurrent fetches.
struct RacyApi {
    calls: AtomicUsize,
    release: Notify,
}

impl RacyApi {
    fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            release: Notify::new(),
        }
    }
}

impl StoreApi for RacyApi {
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        if self.calls.fetch_add(1, Ordering::SeqCst) == 0 {
            // First-issued request finishes last, carrying the old state.
            self.release.notified().await;
            Ok(vec![cart_item(1, 1, 2)])
        } else {
            self.release.notify_one();
            Ok(vec![cart_item(1, 1, 5)])
        }
    }

    async fn add_to_cart(&self, _product_id: ProductId, _quantity: u32) -> Result<(), ApiError> {
        Ok(())
    }

    async fn update_quantity(
        &self,
        _item_id: CartItemId,
        _quantity: u32,
    ) -> Result<CartItem, ApiError> {
        Err(ApiError::NotFound("unused".to_string()))
    }

    async fn delete_item(&self, _item_id: CartItemId) -> Result<(), ApiError> {
        Ok(())
    }

    async fn checkout(&self) -> Result<CheckoutAck, ApiError> {
        Ok(CheckoutAck {
            message: String::new(),
        })
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(Vec::new())
    }

    async fn fetch_reviews(&self, _product_id: ProductId) -> Result<Vec<Review>, ApiError> {
        Ok(Vec::new())
    }

    async fn create_review(
        &self,
        _product_id: ProductId,
        _review: &NewReview,
    ) -> Result<Review, ApiError> {
        Err(ApiError::NotFound("unused".to_string()))
    }

    async fn update_review(
        &self,
        _product_id: ProductId,
        _review_id: hazelmarket_core::ReviewId,
        _patch: &ReviewPatch,
    ) -> Result<Review, ApiError> {
        Err(ApiError::NotFound("unused".to_string()))
    }

    async fn delete_review(
        &self,
        _product_id: ProductId,
        _review_id: hazelmarket_core::ReviewId,
    ) -> Result<(), ApiError> {
        Ok(())
    }
}

#[tokio::test]
async fn stale_fetch_completion_cannot_overwrite_newer_state() {
    let session = CartSession::new(RacyApi::new(), CatalogCache::new(Duration::from_secs(300)));
    let viewer = user(7);

    // Two overlapping fetches: the first-issued one completes last.
    let (first, second) = tokio::join!(
        session.fetch_cart(Some(&viewer)),
        session.fetch_cart(Some(&viewer)),
    );
    first.expect("first fetch");
    second.expect("second fetch");

    // The newer fetch's result must win regardless of completion order.
    assert_eq!(session.items(), vec![cart_item(1, 1, 5)]);
    assert_eq!(session.effective_quantity(CartItemId::new(1)), Some(5));
}
