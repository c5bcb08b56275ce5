//! Product catalog cache and owner directory.
//!
//! The catalog is loaded wholesale from `GET /products` and is read-only
//! from the rest of the state layer's perspective. Entries age out on a TTL
//! so a long-lived session does not serve stale prices forever; a missing
//! entry is a normal state while a load is in flight, and consumers degrade
//! gracefully (pricing treats it as zero, review display falls back to a
//! placeholder name).
//!
//! The owner directory is rebuilt from the owners embedded in the product
//! payload on every load and gives review code a direct id-keyed lookup. A
//! reviewer who owns no product is still unresolvable; see
//! [`crate::reviews::reviewer_display_name`].

use std::sync::Arc;
use std::time::Duration;

use hazelmarket_core::{ProductId, UserId};
use moka::sync::Cache;
use rust_decimal::Decimal;
use tracing::debug;

use crate::types::{Owner, Product};

const MAX_PRODUCTS: u64 = 10_000;

/// Read-only product catalog keyed by product id.
///
/// Cheaply cloneable; clones share the same underlying cache.
#[derive(Clone)]
pub struct CatalogCache {
    inner: Arc<CatalogCacheInner>,
}

struct CatalogCacheInner {
    products: Cache<ProductId, Product>,
    owners: Cache<UserId, Owner>,
}

impl CatalogCache {
    /// Create an empty catalog cache whose entries live for `ttl`.
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        let products = Cache::builder()
            .max_capacity(MAX_PRODUCTS)
            .time_to_live(ttl)
            .build();
        let owners = Cache::builder()
            .max_capacity(MAX_PRODUCTS)
            .time_to_live(ttl)
            .build();

        Self {
            inner: Arc::new(CatalogCacheInner { products, owners }),
        }
    }

    /// Replace the cached catalog with a freshly loaded product list.
    ///
    /// The owner directory is rebuilt from the owners embedded in the
    /// products; owners no longer referenced by any product drop out.
    pub fn replace(&self, products: Vec<Product>) {
        self.inner.products.invalidate_all();
        self.inner.owners.invalidate_all();

        let count = products.len();
        for product in products {
            self.inner.owners.insert(product.owner.id, product.owner.clone());
            self.inner.products.insert(product.id, product);
        }
        self.inner.products.run_pending_tasks();
        self.inner.owners.run_pending_tasks();

        debug!(count, "catalog replaced");
    }

    /// Look up a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<Product> {
        self.inner.products.get(&id)
    }

    /// Price of a product, if the catalog currently knows it.
    #[must_use]
    pub fn price_of(&self, id: ProductId) -> Option<Decimal> {
        self.inner.products.get(&id).map(|product| product.price)
    }

    /// Direct owner-directory lookup by user id.
    #[must_use]
    pub fn owner(&self, user_id: UserId) -> Option<Owner> {
        self.inner.owners.get(&user_id)
    }

    /// Whether any products are currently cached.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inner.products.entry_count() == 0
    }
}
