//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with the news route
//! - Wire up middleware (CORS, request ID, tracing)
//! - Bind server to listener
//! - Drain in-flight requests on shutdown

use std::sync::Arc;
use std::time::Duration;

use axum::{http::Method, routing::get, Router};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowHeaders, AllowOrigin, CorsLayer},
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::config::{ConfigError, RelayConfig, ValidationError};
use crate::http::news::{get_news, NEWS_PATH};
use crate::news::NewsClient;

/// Application state injected into handlers.
#[derive(Debug, Clone)]
pub struct AppState {
    pub news: NewsClient,
    pub fetch_timeout: Duration,
}

impl AppState {
    pub fn new(news: NewsClient, fetch_timeout: Duration) -> Self {
        Self { news, fetch_timeout }
    }
}

/// HTTP server for the relay.
pub struct HttpServer {
    router: Router,
    config: RelayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: RelayConfig) -> Result<Self, ConfigError> {
        let news = NewsClient::from_config(&config.upstream).map_err(|_| {
            ConfigError::Validation(vec![ValidationError::InvalidBaseUrl(
                config.upstream.base_url.clone(),
            )])
        })?;

        let state = AppState::new(news, Duration::from_secs(config.timeouts.fetch_secs));
        let router = build_router(state);

        Ok(Self { router, config })
    }

    /// Run the server until `shutdown` fires, then drain in-flight requests.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            upstream = %self.config.upstream.base_url,
            "Server started on http://{}",
            addr
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received, draining connections");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Build the Axum router with all middleware layers.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(NEWS_PATH, get(get_news))
        .with_state(Arc::new(state))
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::x_request_id())
                .layer(cors_layer()),
        )
}

/// Any origin may call the relay, with credentials.
///
/// Credentials rule out the `*` wildcard, so the request's own origin and
/// headers are echoed back instead.
fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_credentials(true)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers(AllowHeaders::mirror_request())
}
