use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::sync::{Arc, Mutex};

use lazy_static::lazy_static;
use serde::Deserialize;
use sha2::{Digest, Sha256};

use crate::predictor::PredictorError;

/// Column names the dataset file must carry, in no particular order.
pub const REQUIRED_COLUMNS: [&str; 6] = ["day", "outlook", "temp", "humidity", "wind", "play"];

/// The four predictive columns, in the order the feature matrix uses them.
pub const FEATURE_COLUMNS: [&str; 4] = ["outlook", "temp", "humidity", "wind"];

/// The label column.
pub const LABEL_COLUMN: &str = "play";

/// One labeled weather record. The `day` field is an identifier only and is
/// excluded from modeling.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Observation {
    pub day: String,
    pub outlook: String,
    pub temp: String,
    pub humidity: String,
    pub wind: String,
    pub play: String,
}

impl Observation {
    /// The predictive fields in `FEATURE_COLUMNS` order.
    pub fn features(&self) -> [&str; 4] {
        [&self.outlook, &self.temp, &self.humidity, &self.wind]
    }
}

/// An ordered, immutable set of labeled observations.
///
/// Loaded once per distinct file content and shared read-only from there on;
/// nothing mutates a training set after parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrainingSet {
    rows: Vec<Observation>,
}

impl TrainingSet {
    /// Parses a training set from raw CSV bytes.
    ///
    /// The header row must contain every column in [`REQUIRED_COLUMNS`];
    /// anything else is reported as `DataUnavailable`, including a header
    /// missing a single column.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, PredictorError> {
        let mut reader = csv::Reader::from_reader(bytes);

        let headers = reader
            .headers()
            .map_err(|e| PredictorError::DataUnavailable(format!("unreadable header row: {}", e)))?
            .clone();
        for column in REQUIRED_COLUMNS {
            if !headers.iter().any(|h| h == column) {
                return Err(PredictorError::DataUnavailable(format!(
                    "missing required column '{}'",
                    column
                )));
            }
        }

        let mut rows = Vec::new();
        for record in reader.deserialize() {
            let row: Observation = record
                .map_err(|e| PredictorError::DataUnavailable(format!("malformed row: {}", e)))?;
            rows.push(row);
        }
        if rows.is_empty() {
            return Err(PredictorError::DataUnavailable(
                "dataset contains no rows".to_string(),
            ));
        }

        log::info!("Parsed training set: {} rows", rows.len());
        Ok(Self { rows })
    }

    /// Reads and parses a training set from a CSV file on disk.
    pub fn from_csv_file<P: AsRef<Path>>(path: P) -> Result<Self, PredictorError> {
        let bytes = read_dataset_bytes(path.as_ref())?;
        Self::from_csv_bytes(&bytes)
    }

    pub fn rows(&self) -> &[Observation] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The values of one named column, in row order.
    ///
    /// Panics if `column` is not one of [`REQUIRED_COLUMNS`]; callers pass
    /// the column constants, never user input.
    pub fn column_values(&self, column: &str) -> Vec<&str> {
        self.rows
            .iter()
            .map(|row| match column {
                "day" => row.day.as_str(),
                "outlook" => row.outlook.as_str(),
                "temp" => row.temp.as_str(),
                "humidity" => row.humidity.as_str(),
                "wind" => row.wind.as_str(),
                "play" => row.play.as_str(),
                other => panic!("unknown column '{}'", other),
            })
            .collect()
    }
}

lazy_static! {
    // Process-wide parse cache keyed by content hash. Same bytes, same
    // training set, parsed once.
    static ref DATASET_CACHE: Mutex<HashMap<String, Arc<TrainingSet>>> = Mutex::new(HashMap::new());
}

fn read_dataset_bytes(path: &Path) -> Result<Vec<u8>, PredictorError> {
    fs::read(path).map_err(|e| {
        PredictorError::DataUnavailable(format!("cannot read '{}': {}", path.display(), e))
    })
}

fn content_hash(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    format!("{:x}", hasher.finalize())
}

/// Loads a training set through the process-wide cache.
///
/// The cache key is the SHA-256 of the file content, so editing the file
/// invalidates the entry naturally and two paths with identical content share
/// one parse. Caching never changes the result, only skips the re-parse.
pub fn load_cached<P: AsRef<Path>>(path: P) -> Result<Arc<TrainingSet>, PredictorError> {
    let bytes = read_dataset_bytes(path.as_ref())?;
    let key = content_hash(&bytes);

    let mut cache = DATASET_CACHE
        .lock()
        .unwrap_or_else(|poisoned| poisoned.into_inner());
    if let Some(cached) = cache.get(&key) {
        log::debug!("Dataset cache hit for {}", path.as_ref().display());
        return Ok(Arc::clone(cached));
    }

    let parsed = Arc::new(TrainingSet::from_csv_bytes(&bytes)?);
    cache.insert(key, Arc::clone(&parsed));
    log::info!(
        "Dataset cache miss for {}: parsed and cached {} rows",
        path.as_ref().display(),
        parsed.len()
    );
    Ok(parsed)
}
