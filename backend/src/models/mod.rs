//! Forecast models
//!
//! Re-exports models from the shared crate so handlers and services use one
//! set of request and result types.

pub use shared::models::*;
