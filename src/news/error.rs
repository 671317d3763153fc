//! Errors raised while fetching articles from the news API.

use std::time::Duration;

use thiserror::Error;

/// Every way a single fetch can fail. All of them surface to the client as a
/// 500 with the rendered message as `details`.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never produced a response (connect refused, reset, ...).
    #[error("Failed to fetch news: request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Upstream answered with a non-2xx status.
    #[error("Failed to fetch news: upstream returned {status}: {body}")]
    UpstreamHttp { status: u16, body: String },

    /// Upstream answered 2xx but reported its own error in the envelope.
    #[error("Failed to fetch news: News API error: {body}")]
    UpstreamApi {
        status: String,
        code: Option<String>,
        body: String,
    },

    /// 2xx body that is not a news envelope.
    #[error("Failed to fetch news: malformed response: {0}")]
    UpstreamParse(#[source] serde_json::Error),

    /// `status: "ok"` with no article list at all.
    #[error("Failed to fetch news: response has status ok but no articles")]
    MissingArticles,

    /// The fetch did not complete before the deadline.
    #[error("Request timed out after {} seconds", .0.as_secs())]
    Timeout(Duration),
}

impl FetchError {
    /// Short stable label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            FetchError::Transport(_) => "transport",
            FetchError::UpstreamHttp { .. } => "upstream_http",
            FetchError::UpstreamApi { .. } => "upstream_api",
            FetchError::UpstreamParse(_) => "upstream_parse",
            FetchError::MissingArticles => "missing_articles",
            FetchError::Timeout(_) => "timeout",
        }
    }
}

/// Result type for news fetches.
pub type FetchResult<T> = Result<T, FetchError>;
