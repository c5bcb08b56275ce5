//! Shared in-memory backend and fixture builders for integration tests.

#![allow(dead_code)]

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicI32, AtomicUsize, Ordering};

use chrono::{TimeZone, Utc};
use hazelmarket_core::{CartItemId, ProductId, ReviewId, Stars, UserId};
use hazelmarket_storefront::api::{ApiError, StoreApi};
use hazelmarket_storefront::types::{
    CartItem, CheckoutAck, NewReview, Owner, Product, Review, ReviewPatch, User,
};
use rust_decimal::Decimal;

pub fn user(id: i32) -> User {
    User {
        id: UserId::new(id),
        first_name: format!("User {id}"),
    }
}

pub fn product(id: i32, owner_id: i32, price_cents: i64) -> Product {
    Product {
        id: ProductId::new(id),
        name: format!("Product {id}"),
        description: "Handmade".to_string(),
        price: Decimal::new(price_cents, 2),
        preview_image: format!("https://img.example/{id}.jpg"),
        owner: Owner {
            id: UserId::new(owner_id),
            first_name: format!("Owner {owner_id}"),
            last_name: None,
        },
    }
}

pub fn cart_item(id: i32, product_id: i32, quantity: u32) -> CartItem {
    CartItem {
        id: CartItemId::new(id),
        product_id: ProductId::new(product_id),
        quantity,
    }
}

pub fn review(id: i32, user_id: i32, product_id: i32, stars: u8) -> Review {
    Review {
        id: ReviewId::new(id),
        user_id: UserId::new(user_id),
        product_id: ProductId::new(product_id),
        stars: Stars::new(stars).expect("valid stars"),
        review_text: "Well made".to_string(),
        created_at: Utc
            .with_ymd_and_hms(2024, 3, 1, 12, 0, 0)
            .single()
            .expect("valid date"),
    }
}

/// In-memory [`StoreApi`] implementation mimicking the marketplace
/// backend, with request counters so tests can assert which operations
/// issued requests.
///
/// Cheaply cloneable; clones share state, so tests can keep a handle for
/// assertions after moving a clone into a session.
#[derive(Clone)]
pub struct FakeApi {
    inner: Arc<FakeApiInner>,
}

struct FakeApiInner {
    cart: Mutex<Vec<CartItem>>,
    products: Vec<Product>,
    reviews: Mutex<Vec<Review>>,
    review_author: UserId,
    next_review_id: AtomicI32,
    fetch_cart_calls: AtomicUsize,
    update_calls: AtomicUsize,
    delete_calls: AtomicUsize,
    create_review_calls: AtomicUsize,
}

impl FakeApi {
    pub fn new(products: Vec<Product>, cart: Vec<CartItem>) -> Self {
        Self {
            inner: Arc::new(FakeApiInner {
                cart: Mutex::new(cart),
                products,
                reviews: Mutex::new(Vec::new()),
                review_author: UserId::new(999),
                next_review_id: AtomicI32::new(1),
                fetch_cart_calls: AtomicUsize::new(0),
                update_calls: AtomicUsize::new(0),
                delete_calls: AtomicUsize::new(0),
                create_review_calls: AtomicUsize::new(0),
            }),
        }
    }

    pub fn seed_reviews(&self, reviews: Vec<Review>) {
        let next = reviews.iter().map(|r| r.id.as_i32()).max().unwrap_or(0) + 1;
        self.inner.next_review_id.store(next, Ordering::SeqCst);
        *self.lock_reviews() = reviews;
    }

    fn lock_cart(&self) -> std::sync::MutexGuard<'_, Vec<CartItem>> {
        self.inner.cart.lock().expect("cart lock")
    }

    fn lock_reviews(&self) -> std::sync::MutexGuard<'_, Vec<Review>> {
        self.inner.reviews.lock().expect("reviews lock")
    }

    pub fn fetch_cart_calls(&self) -> usize {
        self.inner.fetch_cart_calls.load(Ordering::SeqCst)
    }

    pub fn update_calls(&self) -> usize {
        self.inner.update_calls.load(Ordering::SeqCst)
    }

    pub fn delete_calls(&self) -> usize {
        self.inner.delete_calls.load(Ordering::SeqCst)
    }

    pub fn create_review_calls(&self) -> usize {
        self.inner.create_review_calls.load(Ordering::SeqCst)
    }

    pub fn server_cart(&self) -> Vec<CartItem> {
        self.lock_cart().clone()
    }
}

impl StoreApi for FakeApi {
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        self.inner.fetch_cart_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.lock_cart().clone())
    }

    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        let mut cart = self.lock_cart();
        if let Some(line) = cart.iter_mut().find(|line| line.product_id == product_id) {
            // The backend merges into an existing line for the product.
            line.quantity += quantity;
        } else {
            let next_id = cart.iter().map(|line| line.id.as_i32()).max().unwrap_or(0) + 1;
            cart.push(CartItem {
                id: CartItemId::new(next_id),
                product_id,
                quantity,
            });
        }
        Ok(())
    }

    async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        self.inner.update_calls.fetch_add(1, Ordering::SeqCst);
        let mut cart = self.lock_cart();
        match cart.iter_mut().find(|line| line.id == item_id) {
            Some(line) => {
                line.quantity = quantity;
                Ok(line.clone())
            }
            None => Err(ApiError::NotFound("Item not found".to_string())),
        }
    }

    async fn delete_item(&self, item_id: CartItemId) -> Result<(), ApiError> {
        self.inner.delete_calls.fetch_add(1, Ordering::SeqCst);
        let mut cart = self.lock_cart();
        if cart.iter().any(|line| line.id == item_id) {
            cart.retain(|line| line.id != item_id);
            Ok(())
        } else {
            // The legacy backend 404s here; the synchronizer must treat
            // that as success.
            Err(ApiError::NotFound("Item not found".to_string()))
        }
    }

    async fn checkout(&self) -> Result<CheckoutAck, ApiError> {
        Ok(CheckoutAck {
            message: "Transaction received".to_string(),
        })
    }

    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        Ok(self.inner.products.clone())
    }

    async fn fetch_reviews(&self, product_id: ProductId) -> Result<Vec<Review>, ApiError> {
        Ok(self
            .lock_reviews()
            .iter()
            .filter(|review| review.product_id == product_id)
            .cloned()
            .collect())
    }

    async fn create_review(
        &self,
        product_id: ProductId,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        self.inner.create_review_calls.fetch_add(1, Ordering::SeqCst);
        let id = self.inner.next_review_id.fetch_add(1, Ordering::SeqCst);
        let created = Review {
            id: ReviewId::new(id),
            user_id: self.inner.review_author,
            product_id,
            stars: review.stars,
            review_text: review.review_text.clone(),
            created_at: Utc::now(),
        };
        self.lock_reviews().push(created.clone());
        Ok(created)
    }

    async fn update_review(
        &self,
        _product_id: ProductId,
        review_id: ReviewId,
        patch: &ReviewPatch,
    ) -> Result<Review, ApiError> {
        let mut reviews = self.lock_reviews();
        match reviews.iter_mut().find(|review| review.id == review_id) {
            Some(review) => {
                review.stars = patch.stars;
                review.review_text = patch.review_text.clone();
                Ok(review.clone())
            }
            None => Err(ApiError::NotFound("Review not found".to_string())),
        }
    }

    async fn delete_review(
        &self,
        _product_id: ProductId,
        review_id: ReviewId,
    ) -> Result<(), ApiError> {
        self.lock_reviews().retain(|review| review.id != review_id);
        Ok(())
    }
}
