//! News search relay library.
//!
//! Exposes `GET /api/news`, forwards the query to a news-search API and
//! returns the article list as JSON.

pub mod config;
pub mod http;
pub mod lifecycle;
pub mod news;
pub mod observability;
pub mod resilience;

pub use config::schema::RelayConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
pub use news::{Article, FetchError, NewsClient, NewsQuery};
