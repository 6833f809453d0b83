//! HTTP handlers

pub mod forecast;
pub mod health;

pub use forecast::{create_forecast, get_history_summary, upload_forecast};
pub use health::health_check;
