//! REST client for the marketplace backend.
//!
//! Thin JSON-over-HTTP implementation of [`StoreApi`]. Session identity
//! rides on the cookie store (populated by the authentication collaborator)
//! or on an optional bearer token from configuration.

use std::sync::Arc;

use hazelmarket_core::{CartItemId, ProductId, ReviewId};
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::api::{ApiError, StoreApi};
use crate::config::ApiConfig;
use crate::types::{CartItem, CheckoutAck, NewReview, Product, Review, ReviewPatch};

/// Client for the marketplace REST API.
///
/// Cheaply cloneable via `Arc`.
#[derive(Clone)]
pub struct RestClient {
    inner: Arc<RestClientInner>,
}

struct RestClientInner {
    http: reqwest::Client,
    base_url: String,
    token: Option<SecretString>,
}

/// Error body shape used by the backend for non-success responses.
#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// `GET /cart` response envelope.
#[derive(Deserialize)]
struct CartEnvelope {
    cart: Vec<CartItem>,
}

/// `PUT /cart/items/{id}` response envelope.
#[derive(Deserialize)]
struct ItemEnvelope {
    item: CartItem,
}

#[derive(Serialize)]
struct AddToCartBody {
    #[serde(rename = "productId")]
    product_id: ProductId,
    quantity: u32,
}

#[derive(Serialize)]
struct UpdateQuantityBody {
    quantity: u32,
}

impl RestClient {
    /// Create a new REST client from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying HTTP client cannot be built.
    pub fn new(config: &ApiConfig) -> Result<Self, ApiError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .cookie_store(true)
            .build()?;

        Ok(Self {
            inner: Arc::new(RestClientInner {
                http,
                base_url: config.base_url.as_str().trim_end_matches('/').to_string(),
                token: config.token.clone(),
            }),
        })
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let url = format!("{}{path}", self.inner.base_url);
        let mut builder = self.inner.http.request(method, url);
        if let Some(token) = &self.inner.token {
            builder = builder.bearer_auth(token.expose_secret());
        }
        builder
    }

    /// Map a non-success response to an [`ApiError`], pulling the backend's
    /// message out of the body when one is present.
    async fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message)
            .unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });

        Err(match status {
            StatusCode::UNAUTHORIZED => ApiError::NotAuthenticated,
            StatusCode::NOT_FOUND => ApiError::NotFound(message),
            StatusCode::BAD_REQUEST => ApiError::Validation(message),
            _ => ApiError::Server {
                status: status.as_u16(),
                message,
            },
        })
    }
}

impl StoreApi for RestClient {
    #[instrument(skip(self))]
    async fn fetch_cart(&self) -> Result<Vec<CartItem>, ApiError> {
        let response = self.request(Method::GET, "/cart").send().await?;
        let envelope = Self::check(response).await?.json::<CartEnvelope>().await?;
        Ok(envelope.cart)
    }

    #[instrument(skip(self))]
    async fn add_to_cart(&self, product_id: ProductId, quantity: u32) -> Result<(), ApiError> {
        let body = AddToCartBody {
            product_id,
            quantity,
        };
        let response = self.request(Method::POST, "/cart").json(&body).send().await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn update_quantity(
        &self,
        item_id: CartItemId,
        quantity: u32,
    ) -> Result<CartItem, ApiError> {
        let body = UpdateQuantityBody { quantity };
        let response = self
            .request(Method::PUT, &format!("/cart/items/{item_id}"))
            .json(&body)
            .send()
            .await?;
        let envelope = Self::check(response).await?.json::<ItemEnvelope>().await?;
        Ok(envelope.item)
    }

    #[instrument(skip(self))]
    async fn delete_item(&self, item_id: CartItemId) -> Result<(), ApiError> {
        let response = self
            .request(Method::DELETE, &format!("/cart/items/{item_id}"))
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }

    #[instrument(skip(self))]
    async fn checkout(&self) -> Result<CheckoutAck, ApiError> {
        let response = self.request(Method::POST, "/cart/checkout").send().await?;
        Ok(Self::check(response).await?.json::<CheckoutAck>().await?)
    }

    #[instrument(skip(self))]
    async fn fetch_products(&self) -> Result<Vec<Product>, ApiError> {
        let response = self.request(Method::GET, "/products").send().await?;
        Ok(Self::check(response).await?.json::<Vec<Product>>().await?)
    }

    #[instrument(skip(self), fields(product_id = %product_id))]
    async fn fetch_reviews(&self, product_id: ProductId) -> Result<Vec<Review>, ApiError> {
        let response = self
            .request(Method::GET, &format!("/products/{product_id}/reviews"))
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<Vec<Review>>().await?)
    }

    #[instrument(skip(self, review), fields(product_id = %product_id))]
    async fn create_review(
        &self,
        product_id: ProductId,
        review: &NewReview,
    ) -> Result<Review, ApiError> {
        let response = self
            .request(Method::POST, &format!("/products/{product_id}/reviews"))
            .json(review)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<Review>().await?)
    }

    #[instrument(skip(self, patch), fields(product_id = %product_id, review_id = %review_id))]
    async fn update_review(
        &self,
        product_id: ProductId,
        review_id: ReviewId,
        patch: &ReviewPatch,
    ) -> Result<Review, ApiError> {
        let response = self
            .request(
                Method::PUT,
                &format!("/products/{product_id}/reviews/{review_id}"),
            )
            .json(patch)
            .send()
            .await?;
        Ok(Self::check(response).await?.json::<Review>().await?)
    }

    #[instrument(skip(self), fields(product_id = %product_id, review_id = %review_id))]
    async fn delete_review(&self, product_id: ProductId, review_id: ReviewId) -> Result<(), ApiError> {
        let response = self
            .request(
                Method::DELETE,
                &format!("/products/{product_id}/reviews/{review_id}"),
            )
            .send()
            .await?;
        Self::check(response).await?;
        Ok(())
    }
}
