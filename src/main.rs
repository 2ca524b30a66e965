//! Fraud Detection API Server
//!
//! REST facade over an external ML fraud scoring service.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                  FRAUD DETECTION API                     │
//! ├──────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌──────────────┐  ┌───────────────────┐  │
//! │  │  REST     │  │  Analysis    │  │  Scoring Client   │  │
//! │  │  Routes   │──│  Orchestra-  │──│  (→ ML service    │  │
//! │  │  (Axum)   │  │  tion        │  │   /api/predict)   │  │
//! │  └─────┬─────┘  └──────┬───────┘  └───────────────────┘  │
//! │        └───────────────┼                                 │
//! │                        ▼                                 │
//! │                 ┌─────────────┐                          │
//! │                 │ PostgreSQL  │                          │
//! │                 └─────────────┘                          │
//! └──────────────────────────────────────────────────────────┘
//! ```

mod analysis;
mod config;
mod db;
mod error;
mod handlers;
mod models;
mod scoring;

use axum::{
    routing::{get, post},
    Router,
};
use std::net::SocketAddr;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

pub use error::{AppError, AppResult};

use scoring::ScoringClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "fraud_detection_api=debug,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::from_env();

    tracing::info!("Fraud Detection API starting...");
    tracing::info!("Database: {}", config.database_url.split('@').last().unwrap_or("***"));
    tracing::info!("Scoring service: {}", config.ml_api_url);

    // Initialize database pool
    let pool = db::create_pool(&config.database_url).await?;

    // Apply schema
    tracing::info!("Running database migrations...");
    db::run_migrations(&pool).await?;

    // Scoring client with explicit base URL and timeout
    let scoring = ScoringClient::new(config.ml_api_url.clone(), config.ml_api_timeout_seconds);

    // Build application state
    let state = AppState { pool, scoring };

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    pub scoring: ScoringClient,
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/analyze", post(handlers::analyze::analyze))
        .route("/fraud-transactions", get(handlers::transactions::list_fraudulent))
        .route("/fraud-transactions/period", get(handlers::transactions::list_by_period))
        .route("/statistics", get(handlers::statistics::statistics))
        .route("/recent-transactions", get(handlers::transactions::list_recent))
        .route("/high-risk-transactions", get(handlers::transactions::list_high_risk))
        .route("/health", get(handlers::health::check));

    Router::new()
        .nest("/api/fraud-detection", api_routes)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        )
        .with_state(state)
}
