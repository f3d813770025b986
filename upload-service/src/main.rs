use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{info, warn};

mod config;
mod errors;
mod handlers;
mod models;
mod storage;

use config::Config;
use shared::observability::{init_logging, LogConfig};
use storage::StorageHandle;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// `None` when the store could not be reached at startup.
    pub storage: Option<StorageHandle>,
}

pub fn app(state: AppState) -> Router {
    // Build CORS layer
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health::health_check))
        .route("/api/v1/uploads", post(handlers::file_upload::upload_file))
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    let config = Config::from_env()?;

    init_logging(LogConfig {
        level: config.logging.level,
        format: config.logging.format,
        service_name: "upload-service".to_string(),
        ..Default::default()
    })?;

    info!("Starting Upload Service...");

    // Storage is optional: without it the service still answers, uploads fail fast
    let storage = storage::initialize(config.minio.clone()).await;
    if storage.is_none() {
        warn!("Object storage unavailable; uploads will be rejected until restart");
    }

    let state = AppState { storage };

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Upload Service listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app(state)).await?;

    Ok(())
}
