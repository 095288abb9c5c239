use std::sync::Arc;

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use ndarray::Array2;

use super::encoder::ColumnEncoders;
use super::error::PredictorError;
use super::{Prediction, PredictorInfo, WeatherInput};

/// A fitted play-tennis predictor: the decision tree plus the category
/// mappings it was trained with.
///
/// Immutable once built. To pick up a changed dataset, build a fresh instance
/// and swap it in; nothing here is rebuilt in place.
pub struct TennisPredictor {
    pub(super) dataset_source: String,
    pub(super) tree: DecisionTree<f64, usize>,
    pub(super) encoders: Arc<ColumnEncoders>,
    pub(super) num_rows: usize,
}

// Compile-time verification of thread-safety
const _: () = {
    fn assert_send_sync<T: Send + Sync>() {}
    fn verify_thread_safety() {
        assert_send_sync::<TennisPredictor>();
    }
};

impl TennisPredictor {
    /// Creates a new PredictorBuilder for fluent construction
    pub fn builder() -> super::builder::PredictorBuilder {
        super::builder::PredictorBuilder::new()
    }

    /// Returns information about the predictor's current state
    pub fn info(&self) -> PredictorInfo {
        PredictorInfo {
            dataset_source: self.dataset_source.clone(),
            num_rows: self.num_rows,
            labels: self.encoders.label_mapping().categories().to_vec(),
            encoders: Arc::clone(&self.encoders),
        }
    }

    /// The fitted category mappings, for callers that need the valid domains
    /// (the form page builds its select options from these).
    pub fn encoders(&self) -> &ColumnEncoders {
        &self.encoders
    }

    /// Predicts whether to play tennis for one unencoded observation.
    ///
    /// Encodes the four fields with the session's fitted mappings, runs the
    /// tree, and decodes the label code back into its string. A value outside
    /// a fitted domain fails with `UnknownCategory`; an out-of-range label
    /// code (a programming error) fails with `InvalidCode`.
    pub fn predict(&self, input: &WeatherInput) -> Result<Prediction, PredictorError> {
        let codes = self.encoders.encode_features(input)?;

        let row: Vec<f64> = codes.iter().map(|&c| c as f64).collect();
        let x = Array2::from_shape_vec((1, 4), row)
            .map_err(|e| PredictorError::Build(format!("feature vector shape: {}", e)))?;

        let predicted = self.tree.predict(&x);
        let label_code = predicted[0];
        let label = self.encoders.label_mapping().decode(label_code)?;

        log::debug!(
            "predict {:?} -> codes {:?} -> label '{}'",
            input.values(),
            codes,
            label
        );
        Ok(Prediction {
            label: label.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::TrainingSet;

    const CANONICAL_CSV: &str = include_str!("../../data/play_tennis.csv");

    fn canonical_predictor() -> TennisPredictor {
        let set = TrainingSet::from_csv_bytes(CANONICAL_CSV.as_bytes()).unwrap();
        TennisPredictor::builder()
            .with_training_set(set)
            .unwrap()
            .build()
            .expect("predictor should build from the canonical dataset")
    }

    fn input(outlook: &str, temp: &str, humidity: &str, wind: &str) -> WeatherInput {
        WeatherInput {
            outlook: outlook.to_string(),
            temp: temp.to_string(),
            humidity: humidity.to_string(),
            wind: wind.to_string(),
        }
    }

    #[test]
    fn test_in_domain_input_returns_known_label() {
        let predictor = canonical_predictor();
        let prediction = predictor
            .predict(&input("Sunny", "Cool", "High", "Strong"))
            .unwrap();
        assert!(prediction.label == "Yes" || prediction.label == "No");
    }

    #[test]
    fn test_memorized_training_row() {
        // D13 in the canonical dataset; the fitted tree reproduces it.
        let predictor = canonical_predictor();
        let prediction = predictor
            .predict(&input("Overcast", "Hot", "Normal", "Weak"))
            .unwrap();
        assert_eq!(prediction.label, "Yes");
        assert!(prediction.is_play());
    }

    #[test]
    fn test_unknown_category_is_rejected() {
        let predictor = canonical_predictor();
        let err = predictor
            .predict(&input("Cloudy", "Hot", "High", "Weak"))
            .unwrap_err();
        assert!(matches!(err, PredictorError::UnknownCategory { .. }));
    }

    #[test]
    fn test_predict_is_deterministic() {
        let predictor = canonical_predictor();
        let observation = input("Rain", "Mild", "High", "Weak");
        let first = predictor.predict(&observation).unwrap();
        for _ in 0..10 {
            assert_eq!(predictor.predict(&observation).unwrap().label, first.label);
        }
    }

    #[test]
    fn test_info_reports_dataset_shape() {
        let predictor = canonical_predictor();
        let info = predictor.info();
        assert_eq!(info.num_rows, 14);
        assert_eq!(info.labels, vec!["No".to_string(), "Yes".to_string()]);
    }
}
