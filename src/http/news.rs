//! `GET /api/news` handler.

use std::sync::Arc;
use std::time::Instant;

use axum::{
    extract::{Query, State},
    http::HeaderMap,
    Json,
};

use crate::http::request::request_id;
use crate::http::server::AppState;
use crate::news::{Article, FetchError, NewsQuery};
use crate::resilience::timeouts::with_deadline;

/// Route served by [`get_news`].
pub const NEWS_PATH: &str = "/api/news";

/// Raw query parameters, before defaults.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NewsParams {
    pub keyword: Option<String>,
    pub language: Option<String>,
    pub sort_by: Option<String>,
}

impl NewsParams {
    /// Pick parameters out of decoded query pairs. A repeated name keeps its
    /// first value; unknown names are ignored.
    pub fn from_pairs(pairs: Vec<(String, String)>) -> Self {
        let mut params = Self::default();
        for (name, value) in pairs {
            let slot = match name.as_str() {
                "keyword" => &mut params.keyword,
                "language" => &mut params.language,
                "sortBy" => &mut params.sort_by,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value);
            }
        }
        params
    }
}

impl From<NewsParams> for NewsQuery {
    fn from(params: NewsParams) -> Self {
        NewsQuery::new(params.keyword, params.language, params.sort_by)
    }
}

/// Fetch articles for the requested keyword, bounded by the fetch deadline.
pub async fn get_news(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(pairs): Query<Vec<(String, String)>>,
) -> Result<Json<Vec<Article>>, FetchError> {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let query = NewsQuery::from(NewsParams::from_pairs(pairs));

    tracing::debug!(
        request_id = %request_id,
        keyword = %query.keyword,
        language = %query.language,
        sort_by = %query.sort_by,
        "News request received"
    );

    match with_deadline(state.fetch_timeout, state.news.fetch_articles(&query)).await {
        Ok(articles) => {
            tracing::debug!(
                request_id = %request_id,
                count = articles.len(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                "News request succeeded"
            );
            Ok(Json(articles))
        }
        Err(e) => {
            tracing::error!(
                request_id = %request_id,
                keyword = %query.keyword,
                kind = e.kind(),
                elapsed_ms = start.elapsed().as_millis() as u64,
                error = %e,
                "Error processing request"
            );
            Err(e)
        }
    }
}
