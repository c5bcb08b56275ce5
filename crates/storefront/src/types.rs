//! Domain types shared across the state layer.
//!
//! Field names follow the marketplace JSON API: camelCase for product and
//! cart payloads, the legacy `userID`/`productID` spellings on reviews, and
//! snake_case on owner records.

use chrono::{DateTime, Utc};
use hazelmarket_core::{CartItemId, ProductId, ReviewId, Stars, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// The signed-in user, as supplied by the authentication collaborator.
///
/// Absence of a `User` means the viewer is not authenticated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub first_name: String,
}

/// A product owner as embedded in catalog and cart payloads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Owner {
    pub id: UserId,
    pub first_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
}

/// A catalog product. Immutable from the state layer's perspective.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub description: String,
    /// Non-negative decimal price in the display currency.
    pub price: Decimal,
    pub preview_image: String,
    pub owner: Owner,
}

/// One cart line item, referencing a catalog product.
///
/// Invariant: `quantity >= 1`. The backend rejects anything lower and the
/// client guards never send it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    /// Line-item identity, stable across sessions.
    pub id: CartItemId,
    pub product_id: ProductId,
    pub quantity: u32,
}

/// A product review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    pub id: ReviewId,
    #[serde(rename = "userID")]
    pub user_id: UserId,
    #[serde(rename = "productID")]
    pub product_id: ProductId,
    pub stars: Stars,
    #[serde(rename = "reviewText")]
    pub review_text: String,
    #[serde(rename = "createdAt")]
    pub created_at: DateTime<Utc>,
}

/// Payload for posting a new review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewReview {
    pub stars: Stars,
    #[serde(rename = "reviewText")]
    pub review_text: String,
}

/// Payload for updating an existing review.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewPatch {
    pub stars: Stars,
    #[serde(rename = "reviewText")]
    pub review_text: String,
}

/// Raw checkout acknowledgement from the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckoutAck {
    pub message: String,
}

/// Result of the checkout operation.
///
/// Checkout only signals intent-to-purchase. It is modeled as its own type
/// so downstream code cannot mistake the acknowledgement for a committed
/// order.
#[derive(Debug, Clone, PartialEq, Eq)]
#[must_use]
pub enum CheckoutOutcome {
    /// The backend acknowledged the request. No order was placed and no
    /// payment was taken.
    NotImplemented {
        /// Opaque acknowledgement message from the backend.
        message: String,
    },
}
