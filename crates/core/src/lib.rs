//! Hazelmarket Core - Shared types library.
//!
//! This crate provides common types used across all Hazelmarket components:
//! - `storefront` - Client-side cart, pricing, and review state layer
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients. This keeps
//! it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for type-safe IDs, prices, and star ratings

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
