//! Review aggregation, display helpers, and guarded CRUD.
//!
//! Rating summaries and reviewer names are pure derivations recomputed on
//! every read. The CRUD wrappers apply the [`auth`] predicates client-side
//! before issuing any request, so an unauthorized write never reaches the
//! backend.

pub mod auth;

use hazelmarket_core::{ProductId, ReviewId, Stars};
use rust_decimal::Decimal;
use tracing::{instrument, warn};

use crate::api::StoreApi;
use crate::catalog::CatalogCache;
use crate::error::{Result, StateError};
use crate::types::{NewReview, Product, Review, ReviewPatch, User};

/// Shown when a reviewer cannot be resolved to a display name.
const UNKNOWN_REVIEWER_PLACEHOLDER: &str = "Anonymous";

/// Aggregated rating for a product's review list.
///
/// An unreviewed product is a distinguished state, not an average of zero.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RatingSummary {
    /// No reviews yet.
    Unrated,
    /// At least one review.
    Rated {
        /// Number of reviews.
        count: usize,
        /// Mean star rating, rounded to 2 decimal places.
        average: Decimal,
    },
}

/// Summarize a product's reviews.
///
/// Branches on emptiness before dividing, so the zero-review case can
/// never divide by zero.
#[must_use]
pub fn rating_summary(reviews: &[Review]) -> RatingSummary {
    if reviews.is_empty() {
        return RatingSummary::Unrated;
    }

    let sum: u32 = reviews
        .iter()
        .map(|review| u32::from(review.stars.as_u8()))
        .sum();
    let average = (Decimal::from(sum) / Decimal::from(reviews.len())).round_dp(2);

    RatingSummary::Rated {
        count: reviews.len(),
        average,
    }
}

/// Resolve a review's author to a display name via the catalog's owner
/// directory.
///
/// # Errors
///
/// Returns [`StateError::UnknownReviewer`] when no owner record matches.
/// Reviewer identity is derived from product ownership, so a reviewer who
/// owns no product is unresolvable.
pub fn reviewer_name(review: &Review, catalog: &CatalogCache) -> Result<String> {
    catalog
        .owner(review.user_id)
        .map(|owner| owner.first_name)
        .ok_or(StateError::UnknownReviewer(review.user_id))
}

/// Like [`reviewer_name`], but degrades to a placeholder instead of
/// failing, so rendering a review list never aborts on one bad record.
#[must_use]
pub fn reviewer_display_name(review: &Review, catalog: &CatalogCache) -> String {
    reviewer_name(review, catalog).unwrap_or_else(|_| {
        warn!(user_id = %review.user_id, "reviewer not present in owner directory");
        UNKNOWN_REVIEWER_PLACEHOLDER.to_string()
    })
}

/// Reviews sorted newest-first for display.
#[must_use]
pub fn newest_first(reviews: &[Review]) -> Vec<Review> {
    let mut sorted = reviews.to_vec();
    sorted.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    sorted
}

/// Format a review's creation date the way the review list renders it
/// (e.g., "March 2024").
#[must_use]
pub fn review_date(review: &Review) -> String {
    review.created_at.format("%B %Y").to_string()
}

// =============================================================================
// Guarded CRUD
// =============================================================================

/// Fetch all reviews for a product.
///
/// # Errors
///
/// Returns a network error if the backend request fails.
#[instrument(skip(api))]
pub async fn fetch_reviews<B: StoreApi>(api: &B, product_id: ProductId) -> Result<Vec<Review>> {
    Ok(api.fetch_reviews(product_id).await?)
}

/// Post a new review, enforcing the write rules client-side first.
///
/// # Errors
///
/// Returns `NotAuthenticated` without a viewer, or a validation error when
/// the viewer owns the product or has already reviewed it. Neither guard
/// failure issues a request.
#[instrument(skip(api, viewer, product, existing, review_text))]
pub async fn post_review<B: StoreApi>(
    api: &B,
    viewer: Option<&User>,
    product: &Product,
    existing: &[Review],
    stars: Stars,
    review_text: &str,
) -> Result<Review> {
    match auth::check_write_review(viewer, product, existing) {
        Ok(()) => {}
        Err(auth::WriteDenied::NotAuthenticated) => return Err(StateError::NotAuthenticated),
        Err(auth::WriteDenied::OwnListing) => {
            return Err(StateError::Validation(
                "product owners cannot review their own listings".to_string(),
            ));
        }
        Err(auth::WriteDenied::AlreadyReviewed) => {
            return Err(StateError::Validation(
                "you have already reviewed this product".to_string(),
            ));
        }
    }

    let review = NewReview {
        stars,
        review_text: review_text.to_string(),
    };
    Ok(api.create_review(product.id, &review).await?)
}

/// Update an existing review; only the author may edit.
///
/// # Errors
///
/// Returns `NotAuthenticated` or a validation error (no request issued)
/// when the viewer is not the review's author.
#[instrument(skip(api, viewer, review, review_text))]
pub async fn edit_review<B: StoreApi>(
    api: &B,
    viewer: Option<&User>,
    review: &Review,
    stars: Stars,
    review_text: &str,
) -> Result<Review> {
    if viewer.is_none() {
        return Err(StateError::NotAuthenticated);
    }
    if !auth::can_edit_or_delete(viewer, review) {
        return Err(StateError::Validation(
            "only the review's author can modify it".to_string(),
        ));
    }

    let patch = ReviewPatch {
        stars,
        review_text: review_text.to_string(),
    };
    Ok(api.update_review(review.product_id, review.id, &patch).await?)
}

/// Delete an existing review; only the author may delete.
///
/// # Errors
///
/// Same guard behavior as [`edit_review`].
#[instrument(skip(api, viewer, review))]
pub async fn delete_review<B: StoreApi>(
    api: &B,
    viewer: Option<&User>,
    review: &Review,
) -> Result<()> {
    if viewer.is_none() {
        return Err(StateError::NotAuthenticated);
    }
    if !auth::can_edit_or_delete(viewer, review) {
        return Err(StateError::Validation(
            "only the review's author can modify it".to_string(),
        ));
    }

    Ok(api.delete_review(review.product_id, review.id).await?)
}
