use std::sync::Arc;

use serde::{Deserialize, Serialize};

pub mod builder;
mod encoder;
mod error;
mod model;

pub use builder::PredictorBuilder;
pub use encoder::{CategoryMapping, ColumnEncoders};
pub use error::PredictorError;
pub use model::TennisPredictor;

/// One new, unencoded observation: the four predictive weather fields as the
/// form or JSON endpoint submits them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct WeatherInput {
    pub outlook: String,
    pub temp: String,
    pub humidity: String,
    pub wind: String,
}

impl WeatherInput {
    /// The field values in feature-column order.
    pub fn values(&self) -> [&str; 4] {
        [&self.outlook, &self.temp, &self.humidity, &self.wind]
    }
}

/// The decoded result of one prediction.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Prediction {
    /// The decoded label: "Yes" or "No" for the canonical dataset.
    pub label: String,
}

impl Prediction {
    /// Whether the label recommends playing.
    pub fn is_play(&self) -> bool {
        self.label.eq_ignore_ascii_case("yes")
    }
}

/// Information about the current state and configuration of a predictor
#[derive(Debug, Clone)]
pub struct PredictorInfo {
    /// Where the training set came from (a path, or "<in-memory>")
    pub dataset_source: String,
    /// Number of training rows the tree was fit on
    pub num_rows: usize,
    /// The label domain, in code order
    pub labels: Vec<String>,
    /// The fitted category mappings
    pub encoders: Arc<ColumnEncoders>,
}
