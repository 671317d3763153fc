//! Response shaping.
//!
//! # Responsibilities
//! - Define the JSON error envelope returned on every failure
//! - Map fetch errors to HTTP status codes
//!
//! # Design Decisions
//! - All fetch failures map to 500; the cause only shows up in `details`
//! - Successful responses are plain `Json<Vec<Article>>`, no wrapper

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::news::FetchError;

/// Fixed label for the `error` field.
pub const INTERNAL_ERROR_LABEL: &str = "Internal server error";

/// Used when a failure renders to an empty message.
pub const UNKNOWN_ERROR: &str = "Unknown error";

/// JSON body of a failed request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub details: String,
}

impl ErrorResponse {
    /// Internal-error envelope with `details` as the cause.
    pub fn internal(details: impl Into<String>) -> Self {
        let details = details.into();
        Self {
            error: INTERNAL_ERROR_LABEL.to_string(),
            details: if details.trim().is_empty() {
                UNKNOWN_ERROR.to_string()
            } else {
                details
            },
        }
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

impl From<&FetchError> for ErrorResponse {
    fn from(err: &FetchError) -> Self {
        Self::internal(err.to_string())
    }
}

impl IntoResponse for FetchError {
    fn into_response(self) -> Response {
        ErrorResponse::from(&self).into_response()
    }
}
