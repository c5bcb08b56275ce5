//! Backend API contract.
//!
//! [`StoreApi`] is the seam between the state layer and the marketplace
//! backend. [`RestClient`] implements it over the REST/JSON API; tests
//! substitute an in-memory implementation.
//!
//! Every operation is a single request/response exchange. There is no
//! automatic retry; callers decide whether to reissue a failed operation.

mod rest;

pub use rest::RestClient;

use std::future::Future;

use hazelmarket_core::{CartItemId, ProductId, ReviewId};
use thiserror::Error;

use crate::types::{CartItem, CheckoutAck, NewReview, Product, Review, ReviewPatch};

/// Errors returned by backend operations.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failure (connect, timeout, body decode).
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request for lack of a session (401).
    #[error("not authenticated")]
    NotAuthenticated,

    /// The addressed resource does not exist (404).
    #[error("not found: {0}")]
    NotFound(String),

    /// The backend rejected the request payload (400).
    #[error("rejected by backend: {0}")]
    Validation(String),

    /// Any other non-success response.
    #[error("server error ({status}): {message}")]
    Server {
        /// HTTP status code.
        status: u16,
        /// Message from the response body, or the status line.
        message: String,
    },
}

/// Backend operations used by the state layer.
///
/// Methods return `Send` futures so sessions built on an implementation can
/// be driven from spawned tasks.
pub trait StoreApi: Send + Sync {
    /// Fetch the current user's cart. Requires an active session.
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send;

    /// Add a product to the cart. The backend merges the quantity into an
    /// existing line for the same product.
    fn add_to_cart(
        &self,
        product_id: ProductId,
        quantity: u32,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Update one line item's quantity, returning the committed item.
    fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> impl Future<Output = Result<CartItem, ApiError>> + Send;

    /// Delete one line item. Deleting an absent id is not an error.
    fn delete_item(&self, item_id: CartItemId)
    -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Signal intent-to-purchase. Stub: produces an acknowledgement only.
    fn checkout(&self) -> impl Future<Output = Result<CheckoutAck, ApiError>> + Send;

    /// Fetch the full product catalog, including nested owner records.
    fn fetch_products(&self) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;

    /// Fetch all reviews for a product.
    fn fetch_reviews(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<Vec<Review>, ApiError>> + Send;

    /// Post a new review for a product.
    fn create_review(
        &self,
        product_id: ProductId,
        review: &NewReview,
    ) -> impl Future<Output = Result<Review, ApiError>> + Send;

    /// Update an existing review.
    fn update_review(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
        patch: &ReviewPatch,
    ) -> impl Future<Output = Result<Review, ApiError>> + Send;

    /// Delete an existing review.
    fn delete_review(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;
}
