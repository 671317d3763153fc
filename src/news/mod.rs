//! News search subsystem.
//!
//! # Data Flow
//! ```text
//! NewsQuery (defaults applied)
//!     → client.rs (build /v2/everything URL, single GET)
//!     → news API
//!     → client.rs (status check, envelope parse)
//!     → Vec<Article> | FetchError
//! ```

pub mod client;
pub mod error;
pub mod types;

pub use client::NewsClient;
pub use error::{FetchError, FetchResult};
pub use types::{Article, NewsQuery, UpstreamEnvelope};
