use std::collections::BTreeSet;

use ndarray::{Array1, Array2};

use super::error::PredictorError;
use crate::dataset::{TrainingSet, FEATURE_COLUMNS, LABEL_COLUMN};
use crate::WeatherInput;

/// A bijection between one column's category strings and dense integer codes.
///
/// Fitted once, on training data only. Codes are assigned in sorted order of
/// the distinct values, so a refit on the same training set always reproduces
/// the same assignment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryMapping {
    column: String,
    // Sorted; the index of a category is its code.
    categories: Vec<String>,
}

impl CategoryMapping {
    /// Fits a mapping over the distinct values of one column.
    pub fn fit<'a, I>(column: &str, values: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        Self {
            column: column.to_string(),
            categories: distinct.into_iter().map(String::from).collect(),
        }
    }

    /// Looks up the code for a category string.
    pub fn encode(&self, value: &str) -> Result<usize, PredictorError> {
        self.categories
            .iter()
            .position(|c| c == value)
            .ok_or_else(|| PredictorError::UnknownCategory {
                column: self.column.clone(),
                value: value.to_string(),
            })
    }

    /// Recovers the category string for a code.
    pub fn decode(&self, code: usize) -> Result<&str, PredictorError> {
        self.categories
            .get(code)
            .map(String::as_str)
            .ok_or_else(|| PredictorError::InvalidCode {
                column: self.column.clone(),
                code,
                domain: self.categories.len(),
            })
    }

    /// Whether a value belongs to the fitted domain.
    pub fn contains(&self, value: &str) -> bool {
        self.categories.iter().any(|c| c == value)
    }

    pub fn column(&self) -> &str {
        &self.column
    }

    /// The fitted domain, in code order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

/// The five fitted mappings: four feature columns plus the label.
///
/// One set per predictor build; every encode and decode in a session goes
/// through the same instance. Refitting per request would reassign codes and
/// corrupt predictions.
#[derive(Debug, Clone)]
pub struct ColumnEncoders {
    features: [CategoryMapping; 4],
    label: CategoryMapping,
}

impl ColumnEncoders {
    /// Fits all five mappings on a training set.
    pub fn fit(training_set: &TrainingSet) -> Self {
        let features = FEATURE_COLUMNS
            .map(|column| CategoryMapping::fit(column, training_set.column_values(column)));
        let label = CategoryMapping::fit(LABEL_COLUMN, training_set.column_values(LABEL_COLUMN));
        Self { features, label }
    }

    /// Encodes the four predictive fields of one new observation.
    pub fn encode_features(&self, input: &WeatherInput) -> Result<[usize; 4], PredictorError> {
        let values = input.values();
        let mut codes = [0usize; 4];
        for (i, mapping) in self.features.iter().enumerate() {
            codes[i] = mapping.encode(values[i])?;
        }
        Ok(codes)
    }

    /// Encodes the whole training set into a feature matrix and label column
    /// ready for the trainer. The `day` identifier is dropped here.
    pub fn encode_rows(
        &self,
        training_set: &TrainingSet,
    ) -> Result<(Array2<f64>, Array1<usize>), PredictorError> {
        let n = training_set.len();
        let mut features = Array2::<f64>::zeros((n, 4));
        let mut labels = Array1::<usize>::zeros(n);

        for (row_idx, row) in training_set.rows().iter().enumerate() {
            for (col_idx, (mapping, value)) in
                self.features.iter().zip(row.features()).enumerate()
            {
                features[(row_idx, col_idx)] = mapping.encode(value)? as f64;
            }
            labels[row_idx] = self.label.encode(&row.play)?;
        }
        Ok((features, labels))
    }

    /// The mapping for one feature column, in `FEATURE_COLUMNS` order.
    pub fn feature_mappings(&self) -> &[CategoryMapping; 4] {
        &self.features
    }

    pub fn label_mapping(&self) -> &CategoryMapping {
        &self.label
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outlook_mapping() -> CategoryMapping {
        CategoryMapping::fit("outlook", ["Sunny", "Overcast", "Rain", "Sunny"])
    }

    #[test]
    fn test_codes_are_sorted_and_dense() {
        let mapping = outlook_mapping();
        assert_eq!(mapping.categories(), ["Overcast", "Rain", "Sunny"]);
        assert_eq!(mapping.encode("Overcast").unwrap(), 0);
        assert_eq!(mapping.encode("Sunny").unwrap(), 2);
    }

    #[test]
    fn test_encode_decode_round_trip() {
        let mapping = outlook_mapping();
        for value in ["Sunny", "Overcast", "Rain"] {
            let code = mapping.encode(value).unwrap();
            assert_eq!(mapping.decode(code).unwrap(), value);
        }
    }

    #[test]
    fn test_unknown_category() {
        let mapping = outlook_mapping();
        let err = mapping.encode("Cloudy").unwrap_err();
        match err {
            PredictorError::UnknownCategory { column, value } => {
                assert_eq!(column, "outlook");
                assert_eq!(value, "Cloudy");
            }
            other => panic!("expected UnknownCategory, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_code() {
        let mapping = outlook_mapping();
        let err = mapping.decode(3).unwrap_err();
        match err {
            PredictorError::InvalidCode { code, domain, .. } => {
                assert_eq!(code, 3);
                assert_eq!(domain, 3);
            }
            other => panic!("expected InvalidCode, got {:?}", other),
        }
    }

    #[test]
    fn test_refit_reproduces_same_mapping() {
        // First-seen order differs; the fitted mapping must not.
        let a = CategoryMapping::fit("outlook", ["Rain", "Sunny", "Overcast"]);
        let b = CategoryMapping::fit("outlook", ["Sunny", "Overcast", "Rain"]);
        assert_eq!(a, b);
    }

    #[test]
    fn test_encode_rows_shape() {
        let csv = "\
day,outlook,temp,humidity,wind,play
D1,Sunny,Hot,High,Weak,No
D2,Rain,Cool,Normal,Strong,Yes
D3,Overcast,Mild,High,Weak,Yes
";
        let set = TrainingSet::from_csv_bytes(csv.as_bytes()).unwrap();
        let encoders = ColumnEncoders::fit(&set);
        let (features, labels) = encoders.encode_rows(&set).unwrap();
        assert_eq!(features.dim(), (3, 4));
        assert_eq!(labels.len(), 3);
        // Label codes sorted: No = 0, Yes = 1.
        assert_eq!(labels[0], 0);
        assert_eq!(labels[1], 1);
    }
}
