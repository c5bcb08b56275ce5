//! Review authorization predicates.
//!
//! Pure functions with no side effects, evaluated fresh on every
//! render/request - the decision is never cached.

use crate::types::{Product, Review, User};

/// Why a review write was denied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteDenied {
    /// No signed-in viewer.
    NotAuthenticated,
    /// The viewer owns the product.
    OwnListing,
    /// The viewer already has a review on this product (one review per
    /// user per product). Enforced here rather than as a storage
    /// constraint.
    AlreadyReviewed,
}

/// Check whether the viewer may post a review for a product, reporting
/// the reason when they may not.
///
/// This is the single source of the write rules; [`can_write_review`] and
/// the pre-flight guard in [`crate::reviews::post_review`] both go through
/// it.
///
/// # Errors
///
/// Returns the applicable [`WriteDenied`] reason.
pub fn check_write_review(
    viewer: Option<&User>,
    product: &Product,
    reviews: &[Review],
) -> Result<(), WriteDenied> {
    let Some(user) = viewer else {
        return Err(WriteDenied::NotAuthenticated);
    };
    if user.id == product.owner.id {
        return Err(WriteDenied::OwnListing);
    }
    if reviews.iter().any(|review| review.user_id == user.id) {
        return Err(WriteDenied::AlreadyReviewed);
    }
    Ok(())
}

/// Whether the viewer may post a review for a product.
#[must_use]
pub fn can_write_review(viewer: Option<&User>, product: &Product, reviews: &[Review]) -> bool {
    check_write_review(viewer, product, reviews).is_ok()
}

/// Whether the viewer may edit or delete a review: authenticated authors
/// only.
#[must_use]
pub fn can_edit_or_delete(viewer: Option<&User>, review: &Review) -> bool {
    viewer.is_some_and(|user| user.id == review.user_id)
}
