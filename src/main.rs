mod config;
mod error;
mod metrics;
mod models;
mod routes;
mod services;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::Config;
use crate::services::{
    channel_store::ChannelStore,
    cleanup::{start_cleanup_task, CleanupConfig},
    connections::ConnectionStore,
    xtream::{MockCatalog, XtreamCatalog},
};

/// Application state shared across handlers
pub struct AppState {
    pub config: Config,
    pub channels: ChannelStore,
    pub connections: ConnectionStore,
    pub catalog: Arc<dyn XtreamCatalog>,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let channels = if config.seed_demo_channels {
            ChannelStore::with_demo_channels()
        } else {
            ChannelStore::new()
        };
        let connections = ConnectionStore::new(config.token_ttl_seconds);

        Self {
            config,
            channels,
            connections,
            catalog: Arc::new(MockCatalog),
            start_time: Instant::now(),
        }
    }
}

/// Build the application router
pub fn build_router(state: Arc<AppState>) -> Router {
    // JSON escaping can roughly double a playlist's size on the wire
    let body_limit = state.config.max_m3u_bytes().saturating_mul(2);

    Router::new()
        // Health endpoints
        .route("/", get(routes::health::root))
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::health::metrics))
        .route("/ready", get(routes::health::ready))
        .route("/live", get(routes::health::live))
        // Channel endpoints
        .route(
            "/api/channels",
            get(routes::channels::list_channels).post(routes::channels::create_channel),
        )
        .route(
            "/api/channels/categories/list",
            get(routes::channels::list_categories),
        )
        .route(
            "/api/channels/countries/list",
            get(routes::channels::list_countries),
        )
        .route(
            "/api/channels/import-m3u",
            post(routes::channels::import_m3u),
        )
        .route(
            "/api/channels/:id",
            get(routes::channels::get_channel).delete(routes::channels::delete_channel),
        )
        // Auth endpoints
        .route("/api/auth/connect", post(routes::auth::connect))
        .route("/api/auth/server-info", get(routes::auth::server_info))
        .route("/api/auth/disconnect", post(routes::auth::disconnect))
        // Xtream catalog endpoints (token required)
        .route(
            "/api/xtream/live-categories",
            get(routes::xtream::live_categories),
        )
        .route("/api/xtream/live-streams", get(routes::xtream::live_streams))
        .route(
            "/api/xtream/vod-categories",
            get(routes::xtream::vod_categories),
        )
        .route("/api/xtream/vod-streams", get(routes::xtream::vod_streams))
        .route(
            "/api/xtream/series-categories",
            get(routes::xtream::series_categories),
        )
        .route("/api/xtream/epg/:stream_id", get(routes::xtream::epg))
        .route(
            "/api/xtream/stream-url/:stream_id",
            get(routes::xtream::stream_url),
        )
        .fallback(routes::health::not_found)
        // Middleware
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing/logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "iptv_server=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().json())
        .init();

    // Load configuration
    let config = Config::from_env();
    let port = config.port;
    let cleanup_interval_secs = config.cleanup_interval_secs;

    tracing::info!("Starting IPTV API Server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Environment: {}", config.node_env);

    let state = Arc::new(AppState::new(config));
    tracing::info!(
        "Channel store initialized with {} channels",
        state.channels.len().await
    );

    // Start cleanup task (runs in background)
    tokio::spawn(start_cleanup_task(
        state.connections.clone(),
        CleanupConfig {
            interval_secs: cleanup_interval_secs,
        },
    ));

    let app = build_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    tracing::info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
