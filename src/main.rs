//! News search relay.
//!
//! ```text
//!     Client ──GET /api/news──▶ ┌──────────────┐   GET /v2/everything   ┌──────────┐
//!                               │  http layer  │ ─────────────────────▶ │ news API │
//!     Client ◀──JSON articles── │ + NewsClient │ ◀───────────────────── │          │
//!                               └──────────────┘    envelope (JSON)     └──────────┘
//! ```
//!
//! Configuration comes from `news-relay.toml` (or `NEWS_RELAY_CONFIG`) with
//! `NEWS_API_KEY`, `NEWS_API_BASE_URL` and `NEWS_RELAY_BIND` overrides.

use news_relay::config::ObservabilityConfig;
use news_relay::http::HttpServer;
use news_relay::lifecycle::{signals, startup, Shutdown};
use news_relay::observability::logging;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (config, source) = match startup::resolve_config(|key| std::env::var(key).ok()) {
        Ok(resolved) => resolved,
        Err(e) => {
            logging::init(&ObservabilityConfig::default());
            tracing::error!(error = %e, "Failed to load configuration");
            return Err(e.into());
        }
    };

    logging::init(&config.observability);
    tracing::info!("news-relay v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?source,
        bind_address = %config.listener.bind_address,
        upstream = ?config.upstream,
        fetch_timeout_secs = config.timeouts.fetch_secs,
        "Configuration loaded"
    );

    let listener = startup::bind_listener(&config.listener).await.map_err(|e| {
        tracing::error!(error = %e, address = %config.listener.bind_address, "Failed to bind");
        e
    })?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    signals::spawn_signal_listener(shutdown);

    let server = HttpServer::new(config)?;
    server.run(listener, server_shutdown).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
