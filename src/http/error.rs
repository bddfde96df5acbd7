//! Mapping of handler failures to HTTP responses.
//!
//! Every failure becomes a bare `500 Internal Server Error`. The cause is
//! logged but never sent to the client.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use thiserror::Error;

use crate::store::StoreError;

/// Errors a handler can return.
#[derive(Debug, Error)]
pub enum ApiError {
    /// The store call failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::Store(e) => tracing::error!(error = %e, "Store call failed"),
        }
        (StatusCode::INTERNAL_SERVER_ERROR, "Internal Server Error").into_response()
    }
}
