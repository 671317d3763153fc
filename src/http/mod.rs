//! HTTP front door.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, CORS, request ID, tracing layers)
//!     → news.rs (query defaults, deadline-bounded fetch)
//!     → response.rs (article array or error envelope)
//!     → Send to client
//! ```

pub mod news;
pub mod request;
pub mod response;
pub mod server;

pub use request::{request_id, X_REQUEST_ID};
pub use response::ErrorResponse;
pub use server::{AppState, HttpServer};
