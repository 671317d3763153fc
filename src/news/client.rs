//! News API client.
//!
//! # Responsibilities
//! - Build the `/v2/everything` query URL from a [`NewsQuery`]
//! - Issue exactly one GET per fetch (no retries)
//! - Classify the response into articles or a [`FetchError`]
//!
//! The client does not bound the call itself; callers wrap
//! [`NewsClient::fetch_articles`] in [`crate::resilience::timeouts::with_deadline`].

use url::Url;

use crate::config::UpstreamConfig;
use crate::news::error::{FetchError, FetchResult};
use crate::news::types::{Article, NewsQuery, UpstreamEnvelope};

/// Path of the search endpoint, relative to the base URL.
pub const EVERYTHING_PATH: &str = "v2/everything";

const API_KEY_PARAM: &str = "apiKey";

/// Client for the news-search API.
#[derive(Clone)]
pub struct NewsClient {
    http: reqwest::Client,
    endpoint: Url,
    api_key: String,
}

impl NewsClient {
    /// Create a client for the API rooted at `base_url`.
    ///
    /// Tests pass the address of a local stub here.
    pub fn new(base_url: &str, api_key: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            http: reqwest::Client::new(),
            endpoint: endpoint_url(base_url)?,
            api_key: api_key.into(),
        })
    }

    /// Create a client from the validated upstream configuration.
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, url::ParseError> {
        Self::new(&config.base_url, config.api_key.clone())
    }

    /// The search endpoint this client queries.
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// Full request URL for a query, including the API key.
    pub fn request_url(&self, query: &NewsQuery) -> Url {
        let mut url = self.endpoint.clone();
        url.query_pairs_mut()
            .append_pair("q", &query.keyword)
            .append_pair("language", &query.language)
            .append_pair("sortBy", &query.sort_by)
            .append_pair(API_KEY_PARAM, &self.api_key);
        url
    }

    /// Fetch the articles matching `query`.
    pub async fn fetch_articles(&self, query: &NewsQuery) -> FetchResult<Vec<Article>> {
        let url = self.request_url(query);
        tracing::info!(url = %redact_api_key(&url), "Fetching news");

        let response = self.http.get(url).send().await.map_err(|e| {
            tracing::error!(error = %e, "News API request failed");
            FetchError::Transport(e)
        })?;

        let status = response.status();
        let body = response.text().await.map_err(FetchError::Transport)?;

        if !status.is_success() {
            tracing::error!(status = status.as_u16(), body = %body, "News API response error");
            return Err(FetchError::UpstreamHttp {
                status: status.as_u16(),
                body,
            });
        }

        parse_envelope(&body)
    }
}

impl std::fmt::Debug for NewsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NewsClient")
            .field("endpoint", &self.endpoint.as_str())
            .finish()
    }
}

/// Turn a 2xx response body into the article list.
///
/// An envelope whose status is anything but `"ok"` is rejected even if it
/// carries articles. `"ok"` without an article list is rejected as well.
pub fn parse_envelope(body: &str) -> FetchResult<Vec<Article>> {
    let envelope: UpstreamEnvelope = serde_json::from_str(body).map_err(|e| {
        tracing::error!(error = %e, body = %body, "Malformed News API response");
        FetchError::UpstreamParse(e)
    })?;

    if !envelope.is_ok() {
        tracing::warn!(
            status = %envelope.status,
            code = envelope.code.as_deref().unwrap_or("-"),
            message = envelope.message.as_deref().unwrap_or("-"),
            "News API reported an error"
        );
        return Err(FetchError::UpstreamApi {
            status: envelope.status,
            code: envelope.code,
            body: body.to_string(),
        });
    }

    match envelope.articles {
        Some(articles) => {
            tracing::debug!(
                count = articles.len(),
                total_results = envelope.total_results.unwrap_or_default(),
                "News API returned articles"
            );
            Ok(articles)
        }
        None => {
            tracing::warn!("News API returned status ok without articles");
            Err(FetchError::MissingArticles)
        }
    }
}

fn endpoint_url(base_url: &str) -> Result<Url, url::ParseError> {
    let mut base = Url::parse(base_url)?;
    if !base.path().ends_with('/') {
        let path = format!("{}/", base.path());
        base.set_path(&path);
    }
    base.join(EVERYTHING_PATH)
}

/// Copy of `url` with the API key value masked, for logging.
pub fn redact_api_key(url: &Url) -> Url {
    let pairs: Vec<(String, String)> = url
        .query_pairs()
        .map(|(k, v)| {
            let v = if k == API_KEY_PARAM { "***".into() } else { v };
            (k.into_owned(), v.into_owned())
        })
        .collect();

    let mut redacted = url.clone();
    redacted.query_pairs_mut().clear().extend_pairs(pairs);
    redacted
}
