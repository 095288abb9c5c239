//! A small web demo that predicts whether tennis should be played given four
//! categorical weather attributes, using a decision tree fit on a fixed
//! 14-row labeled dataset.
//!
//! # Basic Usage
//!
//! ```rust
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use playtennis::{TennisPredictor, WeatherInput};
//!
//! let predictor = TennisPredictor::builder()
//!     .with_dataset_file("data/play_tennis.csv")?
//!     .build()?;
//!
//! let prediction = predictor.predict(&WeatherInput {
//!     outlook: "Overcast".to_string(),
//!     temp: "Hot".to_string(),
//!     humidity: "Normal".to_string(),
//!     wind: "Weak".to_string(),
//! })?;
//! println!("Play tennis: {}", prediction.label);
//! # Ok(())
//! # }
//! ```
//!
//! # Thread Safety
//!
//! A built predictor is immutable and `Send + Sync`; the server shares one
//! instance across requests behind `Arc`. Rebuilding for a changed dataset
//! means constructing a fresh predictor and swapping it in, never mutating a
//! live one.

pub mod dataset;
pub mod predictor;
pub mod server;

pub use dataset::{load_cached, Observation, TrainingSet};
pub use predictor::{
    CategoryMapping, ColumnEncoders, Prediction, PredictorBuilder, PredictorError, PredictorInfo,
    TennisPredictor, WeatherInput,
};
pub use server::router;

pub fn init_logger() {
    env_logger::init();
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_init_logger() {
        // Sole logger installation in the lib test process.
        super::init_logger();
        log::info!("logger installed");
    }
}
