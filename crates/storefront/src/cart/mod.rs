//! Cart state: authoritative store, quantity overlay, pricing, and sync.
//!
//! Data flow: the store holds server-confirmed line items; the overlay is
//! seeded from the store whenever the store changes and absorbs user edits;
//! totals are derived from store + overlay + catalog on every read; the
//! synchronizer pushes committed edits through the backend and folds
//! confirmed results back into the store.

pub mod overlay;
pub mod pricing;
pub mod store;
pub mod sync;

pub use overlay::QuantityOverlay;
pub use pricing::{OrderTotals, compute_totals};
pub use store::CartStore;
pub use sync::CartSession;
