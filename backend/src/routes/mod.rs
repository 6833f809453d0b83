//! Route definitions for the Daily Prep forecasting API

use axum::{
    routing::{get, post},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Integrated order history
        .route("/history", get(handlers::get_history_summary))
        .nest("/forecasts", forecast_routes())
}

/// Forecast routes
fn forecast_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(handlers::create_forecast))
        // Standalone mode: order history arrives with the request
        .route("/upload", post(handlers::upload_forecast))
}
