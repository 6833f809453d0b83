//! Forecasting services for the Daily Prep server

pub mod artifacts;
pub mod forecast;
pub mod history;
pub mod scorer;
pub mod weather;

pub use artifacts::ForecastArtifacts;
pub use forecast::ForecastService;
pub use history::HistoryService;
pub use scorer::{ClassifierModel, SchemaBoundScorer, Scorer};
pub use weather::WeatherService;
