use std::path::Path;
use std::sync::Arc;

use linfa::prelude::*;
use linfa_trees::DecisionTree;
use log::info;

use super::encoder::ColumnEncoders;
use super::error::PredictorError;
use super::model::TennisPredictor;
use crate::dataset::{self, TrainingSet};

/// A builder for constructing a TennisPredictor with a fluent interface.
///
/// Exactly one dataset source must be supplied: a CSV file on disk (loaded
/// through the process-wide cache) or an already-parsed training set.
#[derive(Default)]
pub struct PredictorBuilder {
    dataset_source: Option<String>,
    training_set: Option<Arc<TrainingSet>>,
    max_depth: Option<usize>,
}

impl PredictorBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the dataset source to a CSV file on disk.
    ///
    /// The file is read and parsed immediately so that a missing or malformed
    /// dataset fails here, with `DataUnavailable`, rather than at build time.
    pub fn with_dataset_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self, PredictorError> {
        if self.training_set.is_some() {
            return Err(PredictorError::Build(
                "dataset source already set".to_string(),
            ));
        }
        let path = path.as_ref();
        self.training_set = Some(dataset::load_cached(path)?);
        self.dataset_source = Some(path.display().to_string());
        Ok(self)
    }

    /// Sets the dataset source to an in-memory training set.
    pub fn with_training_set(mut self, training_set: TrainingSet) -> Result<Self, PredictorError> {
        if self.training_set.is_some() {
            return Err(PredictorError::Build(
                "dataset source already set".to_string(),
            ));
        }
        self.dataset_source = Some("<in-memory>".to_string());
        self.training_set = Some(Arc::new(training_set));
        Ok(self)
    }

    /// Caps the depth of the fitted tree. Unset by default, matching the
    /// reference behavior of fitting with library defaults. Note the default
    /// stopping rules can still leave mixed leaves unsplit, so even an
    /// uncapped tree does not guarantee every training row is reproduced.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = Some(max_depth);
        self
    }

    /// Fits the encoders and the decision tree, and returns the final
    /// immutable predictor.
    pub fn build(self) -> Result<TennisPredictor, PredictorError> {
        let training_set = self.training_set.ok_or_else(|| {
            PredictorError::Build("a dataset source must be set before build".to_string())
        })?;

        let encoders = ColumnEncoders::fit(&training_set);
        let (features, labels) = encoders.encode_rows(&training_set)?;

        let dataset = Dataset::new(features, labels);
        let tree: DecisionTree<f64, usize> = DecisionTree::params()
            .max_depth(self.max_depth)
            .fit(&dataset)
            .map_err(|e| PredictorError::Training(e.to_string()))?;

        info!(
            "Fitted decision tree on {} rows ({} labels)",
            training_set.len(),
            encoders.label_mapping().len()
        );

        Ok(TennisPredictor {
            dataset_source: self
                .dataset_source
                .unwrap_or_else(|| "<in-memory>".to_string()),
            tree,
            encoders: Arc::new(encoders),
            num_rows: training_set.len(),
        })
    }
}
