//! Domain models for the prep forecasting platform

mod forecast;
mod order;
mod weather;

pub use forecast::*;
pub use order::*;
pub use weather::*;
