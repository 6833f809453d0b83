//! Daily Prep Assistant - Forecasting Server
//!
//! Predicts which menu items are likely to be ordered at a given date and
//! hour, so a kitchen can decide what to prepare ahead of service.

use axum::{routing::get, Router};
use std::{net::SocketAddr, sync::Arc};
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod config;
mod error;
mod external;
mod handlers;
mod models;
mod routes;
mod services;

pub use config::Config;

use external::WeatherClient;
use models::OrderHistory;
use services::{ForecastArtifacts, ForecastService, HistoryService, WeatherService};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub forecaster: Arc<ForecastService>,
    /// Integrated order history; `None` when the export could not be loaded
    pub history: Option<Arc<OrderHistory>>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prep_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    dotenvy::dotenv().ok();
    let config = config::Config::load()?;

    tracing::info!("Starting Daily Prep forecasting server");
    tracing::info!("Environment: {}", config.environment);

    // Model, feature schema and holidays are required to serve anything
    let artifacts = ForecastArtifacts::load(&config)?;
    let api_key = config.weather_api_key()?;
    let weather = WeatherService::new(Arc::new(WeatherClient::with_base_url(
        api_key,
        config.weather.api_endpoint.clone(),
    )));

    let history = match HistoryService::load_from_path(
        &config.data.rms_data_path,
        &config.data.default_location,
    ) {
        Ok(history) => {
            tracing::info!(
                records = history.len(),
                location = %history.location,
                "Integrated order history loaded"
            );
            Some(Arc::new(history))
        }
        Err(e) => {
            tracing::warn!("Integrated order history unavailable: {}", e);
            None
        }
    };

    // Create application state
    let state = AppState {
        config: Arc::new(config.clone()),
        forecaster: Arc::new(ForecastService::new(artifacts, weather)),
        history,
    };

    // Build application
    let app = create_app(state);

    // Start server
    let host: std::net::IpAddr = config.server.host.parse()?;
    let addr = SocketAddr::from((host, config.server.port));
    tracing::info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes and middleware
fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(cors),
        )
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "Daily Prep Assistant API v1.0"
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}
