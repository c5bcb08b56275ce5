//! Hazelmarket storefront state layer.
//!
//! This crate is the client-side state layer of the Hazelmarket storefront:
//! it tracks the shopping cart against the remote catalog, reconciles
//! locally edited quantities with the pessimistically synchronized server
//! cart, derives order totals, and aggregates per-product review ratings
//! with authorship-gated edit rights.
//!
//! # Architecture
//!
//! - [`catalog`] - Product catalog cache plus the owner directory, loaded
//!   wholesale from the backend
//! - [`cart`] - Authoritative cart store, transient quantity overlay,
//!   pricing engine, and the synchronizer tying them together
//! - [`reviews`] - Rating aggregation and authorization predicates
//! - [`api`] - Backend contract ([`api::StoreApi`]) and its REST client
//!
//! The backend is the source of truth for cart contents: every mutation is
//! a request/response round trip, and local state only ever holds
//! server-confirmed items. In-progress quantity edits live in the overlay
//! until explicitly committed.
//!
//! # Example
//!
//! ```rust,ignore
//! use hazelmarket_storefront::api::RestClient;
//! use hazelmarket_storefront::cart::CartSession;
//! use hazelmarket_storefront::catalog::CatalogCache;
//! use hazelmarket_storefront::config::ApiConfig;
//!
//! let config = ApiConfig::from_env()?;
//! let api = RestClient::new(&config)?;
//! let session = CartSession::new(api, CatalogCache::new(config.catalog_ttl));
//!
//! session.load_catalog().await?;
//! session.fetch_cart(Some(&viewer)).await?;
//!
//! session.edit_quantity(item_id, 3);
//! let totals = session.totals(); // reflects the uncommitted edit
//! session.commit_quantity(item_id).await?;
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod reviews;
pub mod telemetry;
pub mod types;

pub use error::{Result, StateError};
