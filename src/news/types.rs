//! Wire types shared by the upstream client and the HTTP layer.

use serde::{Deserialize, Serialize};

/// Language used when the caller sends none.
pub const DEFAULT_LANGUAGE: &str = "ru";
/// Sort order used when the caller sends none.
pub const DEFAULT_SORT_BY: &str = "publishedAt";

/// Envelope status meaning the article list can be trusted.
pub const STATUS_OK: &str = "ok";

/// A single news article.
///
/// Missing fields stay `None` and serialize as `null`, so every outbound
/// object carries exactly `title`, `description`, `url` and `urlToImage`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: Option<String>,
    pub description: Option<String>,
    pub url: Option<String>,
    #[serde(rename = "urlToImage")]
    pub image_url: Option<String>,
}

/// Top-level object returned by the news API.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamEnvelope {
    pub status: String,

    /// Informational only.
    #[serde(default)]
    pub total_results: Option<u64>,

    /// Absent or `null` is kept distinct from an empty list.
    #[serde(default)]
    pub articles: Option<Vec<Article>>,

    /// Upstream error code, only present on `status: "error"`.
    #[serde(default)]
    pub code: Option<String>,

    /// Upstream error message, only present on `status: "error"`.
    #[serde(default)]
    pub message: Option<String>,
}

impl UpstreamEnvelope {
    pub fn is_ok(&self) -> bool {
        self.status == STATUS_OK
    }
}

/// A search after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewsQuery {
    pub keyword: String,
    pub language: String,
    pub sort_by: String,
}

impl NewsQuery {
    /// Build a query, substituting defaults for absent or empty language and
    /// sort order. The keyword is passed through untouched.
    pub fn new(
        keyword: Option<String>,
        language: Option<String>,
        sort_by: Option<String>,
    ) -> Self {
        fn or_default(value: Option<String>, default: &str) -> String {
            value
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string())
        }

        Self {
            keyword: keyword.unwrap_or_default(),
            language: or_default(language, DEFAULT_LANGUAGE),
            sort_by: or_default(sort_by, DEFAULT_SORT_BY),
        }
    }
}
