//! AgriRisk Pro API Server
//!
//! Farm insurance risk assessment service.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │                    AGRIRISK PRO API                         │
//! ├─────────────────────────────────────────────────────────────┤
//! │  ┌───────────┐  ┌───────────┐  ┌─────────────────────────┐ │
//! │  │  Risk     │  │  Fraud    │  │  ML Client              │ │
//! │  │  Scorer   │  │  Checker  │  │  (retry + fallback)     │ │
//! │  └─────┬─────┘  └─────┬─────┘  └────────────┬────────────┘ │
//! │        │        ┌─────┴──────┐              ▼              │
//! │        └───────▶│  Farmer    │       ML service (HTTP)     │
//! │                 │  Repository│                             │
//! │                 └─────┬──────┘                             │
//! │                       ▼                                     │
//! │               fraud_cases.json                              │
//! └─────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod error;
mod handlers;
mod models;
mod store;


use anyhow::Context;
use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{CorsLayer, Any},
    trace::TraceLayer,
    compression::CompressionLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use std::net::SocketAddr;
use std::sync::Arc;

use agririsk_core::{FarmerRepository, InMemoryFarmerRepository, MlClient};
use store::FraudCaseStore;

pub use error::{AppError, AppResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load configuration
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| "agririsk_server=debug,agririsk_core=info,tower_http=debug".into()))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = config::Config::from_env();

    tracing::info!("AgriRisk Pro API starting ({})...", config.environment);

    let state = AppState::from_config(config.clone())?;
    tracing::info!(
        "ML service: {} (timeout {}s, {} retries, fallback {})",
        state.ml.config().api_url,
        state.ml.config().timeout_seconds,
        state.ml.config().max_retries,
        if state.ml.config().enable_fallback { "on" } else { "off" }
    );
    tracing::info!("Fraud cases: {}", state.fraud_cases.path().display());

    let health = state.ml.health_check().await;
    if health.healthy {
        tracing::info!("ML service healthy ({}ms)", health.latency_ms);
    } else if config.is_production() {
        tracing::error!("ML service unavailable: {}", health.message);
    } else {
        tracing::warn!("ML service unavailable, predictions will use the local fallback: {}", health.message);
    }

    // Build router
    let app = create_router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("🚀 Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub config: config::Config,
    pub farmers: Arc<dyn FarmerRepository>,
    pub fraud_cases: Arc<FraudCaseStore>,
    pub ml: Arc<MlClient>,
}

impl AppState {
    pub fn new(config: config::Config, farmers: Arc<dyn FarmerRepository>, ml: MlClient) -> Self {
        Self {
            fraud_cases: Arc::new(FraudCaseStore::new(config.fraud_cases_path.clone())),
            config,
            farmers,
            ml: Arc::new(ml),
        }
    }

    /// Wire up farmer repository and ML client from configuration
    pub fn from_config(config: config::Config) -> anyhow::Result<Self> {
        let farmers = match &config.farmers_path {
            Some(path) => InMemoryFarmerRepository::from_json_file(path)
                .with_context(|| format!("Failed to load farmers from {}", path.display()))?,
            None => {
                tracing::warn!("FARMERS_PATH not set, farmer lookups will find nothing");
                InMemoryFarmerRepository::default()
            }
        };

        let ml = MlClient::new(config.ml.clone()).context("Failed to build ML client")?;

        Ok(Self::new(config, Arc::new(farmers), ml))
    }
}

/// Create the main router with all routes
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health::check))

        // Risk
        .route("/api/v1/risk/score", post(handlers::risk::score))
        .route("/api/v1/risk/assessment", post(handlers::risk::assessment))
        .route("/api/v1/premium", post(handlers::risk::premium))

        // Fraud
        .route("/api/v1/fraud/check", post(handlers::fraud::check))
        .route("/api/v1/fraud/cases", get(handlers::fraud::list))
        .route("/api/v1/fraud/cases/:id", get(handlers::fraud::get))

        // Farmers
        .route("/api/v1/farmers/:id", get(handlers::farmers::get))

        // ML service
        .route("/api/v1/ml/predict", post(handlers::ml::predict))
        .route("/api/v1/ml/predict/batch", post(handlers::ml::predict_batch))
        .route("/api/v1/ml/health", get(handlers::ml::health))
        .route("/api/v1/ml/model", get(handlers::ml::model_info))

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
