//! Error types for the list cache
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Unified error type for the cache facade and its backends.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The store could not be reached, dropped the connection or timed out
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// A value or key could not be encoded or decoded
    #[error("Serialization failure: {0}")]
    SerializationFailure(String),

    /// Key not found, for callers that treat absence as an error.
    ///
    /// The facade itself reports absent keys as `None`, `0` or an empty
    /// list, and never returns this variant.
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Any other error reported by the store itself
    #[error("Store error: {0}")]
    Store(String),
}

// == Conversions ==
impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::SerializationFailure(err.to_string())
    }
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_io_error()
            || err.is_timeout()
            || err.is_connection_dropped()
            || err.is_connection_refusal()
        {
            CacheError::StoreUnavailable(err.to_string())
        } else {
            CacheError::Store(err.to_string())
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for CacheError {
    fn into_response(self) -> Response {
        let status = match &self {
            CacheError::StoreUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            CacheError::NotFound(_) => StatusCode::NOT_FOUND,
            CacheError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            CacheError::SerializationFailure(_) | CacheError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        (status, Json(ErrorResponse::new(self.to_string()))).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the list cache.
pub type Result<T> = std::result::Result<T, CacheError>;
