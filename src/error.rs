//! Error types for the customer service
//!
//! Provides unified error handling using thiserror. Cache errors never reach
//! the HTTP layer; store errors are mapped to responses through `ApiError`.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

// == Cache Error Enum ==
/// Failures raised by a cache backend.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Backend connection or timeout failure
    #[error("Cache unavailable: {0}")]
    Unavailable(String),

    /// Cached payload could not be encoded or decoded
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Rejected key or ttl
    #[error("Invalid cache request: {0}")]
    InvalidRequest(String),
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        CacheError::Unavailable(err.to_string())
    }
}

impl From<serde_json::Error> for CacheError {
    fn from(err: serde_json::Error) -> Self {
        CacheError::Serialization(err.to_string())
    }
}

// == Store Error Enum ==
/// Failures reported by the customer store. Loaders return these unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The looked-up record does not exist
    #[error("{0}")]
    NotFound(String),

    /// The write would break a referential guard
    #[error("{0}")]
    Conflict(String),

    /// The write carried invalid data
    #[error("{0}")]
    InvalidRequest(String),

    /// The store could not complete the operation
    #[error("Store failure: {0}")]
    Failure(String),
}

// == Api Error Enum ==
/// Errors surfaced to HTTP clients.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound(msg) => ApiError::NotFound(msg),
            StoreError::Conflict(msg) => ApiError::Conflict(msg),
            StoreError::InvalidRequest(msg) => ApiError::BadRequest(msg),
            StoreError::Failure(msg) => ApiError::Internal(msg),
        }
    }
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(ErrorResponse {
            error: self.to_string(),
        });

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Result of a cache backend call.
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// Result of a store call.
pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Result of an HTTP handler.
pub type Result<T> = std::result::Result<T, ApiError>;
