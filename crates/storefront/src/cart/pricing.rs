//! Order total derivation.
//!
//! Pure functions over the cart store, quantity overlay, and catalog
//! cache. Totals are recomputed on every read and never cached.

use rust_decimal::Decimal;

use crate::cart::overlay::QuantityOverlay;
use crate::catalog::CatalogCache;
use crate::config::DisplayConfig;
use crate::types::CartItem;

/// Fixed tax rate applied to the subtotal.
#[must_use]
pub fn tax_rate() -> Decimal {
    Decimal::new(8, 2) // 0.08
}

/// Flat shipping charged per order, regardless of item count.
#[must_use]
pub fn flat_shipping() -> Decimal {
    Decimal::new(399, 2) // 3.99
}

/// Derived order totals. Never persisted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub tax: Decimal,
    pub shipping: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    /// Format every amount for display with the configured currency.
    #[must_use]
    pub fn display(&self, display: &DisplayConfig) -> OrderTotalsDisplay {
        OrderTotalsDisplay {
            subtotal: display.format(self.subtotal),
            tax: display.format(self.tax),
            shipping: display.format(self.shipping),
            total: display.format(self.total),
        }
    }
}

/// Display-formatted order totals.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderTotalsDisplay {
    pub subtotal: String,
    pub tax: String,
    pub shipping: String,
    pub total: String,
}

/// Compute subtotal, tax, shipping, and total for the given cart.
///
/// Each line contributes `price x effective quantity`, where the effective
/// quantity prefers the overlay over the committed value. A line whose
/// product is missing from the catalog contributes zero so totals stay
/// usable while the catalog is still loading.
#[must_use]
pub fn compute_totals(
    items: &[CartItem],
    overlay: &QuantityOverlay,
    catalog: &CatalogCache,
) -> OrderTotals {
    let subtotal: Decimal = items
        .iter()
        .map(|item| {
            let price = catalog.price_of(item.product_id).unwrap_or_default();
            price * Decimal::from(overlay.effective_quantity(item))
        })
        .sum();

    let tax = (subtotal * tax_rate()).round_dp(2);
    let shipping = flat_shipping();
    let total = subtotal + tax + shipping;

    OrderTotals {
        subtotal,
        tax,
        shipping,
        total,
    }
}
