//! Request identification.
//!
//! # Responsibilities
//! - Name the request ID header shared by the ID layers and the handlers
//! - Read the ID back out for log fields
//!
//! # Design Decisions
//! - Request ID added as early as possible for tracing
//! - A client-supplied ID is kept; otherwise a UUID v4 is generated

use axum::http::HeaderMap;

/// Header carrying the per-request correlation ID.
pub const X_REQUEST_ID: &str = "x-request-id";

/// The request ID set by the ID layer, or `"unknown"` outside the stack.
pub fn request_id(headers: &HeaderMap) -> &str {
    headers
        .get(X_REQUEST_ID)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("unknown")
}
