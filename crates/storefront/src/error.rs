//! Error taxonomy for the state layer.
//!
//! No failure here is fatal to the process: every error is local to the
//! operation that produced it and the user action can be retried. Failed
//! requests never mutate local state.

use hazelmarket_core::UserId;
use thiserror::Error;

use crate::api::ApiError;

/// Errors surfaced by cart and review operations.
#[derive(Debug, Error)]
pub enum StateError {
    /// An operation that requires a signed-in user was invoked without one.
    #[error("not authenticated")]
    NotAuthenticated,

    /// Input rejected by a client-side guard before any request was issued.
    #[error("validation error: {0}")]
    Validation(String),

    /// A cart item or review no longer exists on the backend.
    #[error("not found: {0}")]
    NotFound(String),

    /// Transport or backend failure. Local state is left unchanged.
    #[error("network error: {0}")]
    Network(#[source] ApiError),

    /// A reviewer id could not be resolved to a display name.
    ///
    /// Display helpers degrade to a placeholder string instead of
    /// propagating this.
    #[error("unknown reviewer: {0}")]
    UnknownReviewer(UserId),
}

impl From<ApiError> for StateError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::NotAuthenticated => Self::NotAuthenticated,
            ApiError::NotFound(what) => Self::NotFound(what),
            ApiError::Validation(message) => Self::Validation(message),
            other => Self::Network(other),
        }
    }
}

/// Result type alias for `StateError`.
pub type Result<T> = std::result::Result<T, StateError>;
