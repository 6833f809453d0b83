//! Shared types and models for the Daily Prep forecasting platform
//!
//! This crate contains the pure parts of the forecasting pipeline, shared
//! between the backend server and the browser client (via WASM).

pub mod calendar;
pub mod forecast;
pub mod models;
pub mod types;
pub mod validation;

pub use calendar::*;
pub use models::*;
pub use types::*;
pub use validation::*;
