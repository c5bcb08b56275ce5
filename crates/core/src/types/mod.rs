//! Core types for Hazelmarket.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod id;
pub mod price;
pub mod stars;

pub use id::*;
pub use price::{CurrencyCode, CurrencyCodeError, Price};
pub use stars::{Stars, StarsError};
