//! Prediction pipeline stages that need no I/O

pub mod aggregate;
pub mod features;
pub mod rolling;
pub mod scenario;

pub use aggregate::{channel_split, overall_ranking};
pub use features::{
    encode_scenario, indicator_column, Alignment, EncodedRow, FeatureMatrix, FeatureSchema,
    SchemaError,
};
pub use rolling::rolling_average;
pub use scenario::build_scenarios;
