/// Errors surfaced by the prediction pipeline.
///
/// Everything propagates to the caller; nothing is swallowed or retried. The
/// serving layer turns these into user-visible messages.
#[derive(Debug, thiserror::Error)]
pub enum PredictorError {
    /// The dataset file is missing, unreadable, or malformed. Fatal at
    /// startup.
    #[error("dataset unavailable: {0}")]
    DataUnavailable(String),

    /// A submitted value was never seen in training. Recoverable; the caller
    /// rejects the submission.
    #[error("unknown category '{value}' for column '{column}'")]
    UnknownCategory { column: String, value: String },

    /// A label code fell outside the fitted domain. This indicates a
    /// programming error, not bad input.
    #[error("invalid code {code} for column '{column}' (domain size {domain})")]
    InvalidCode {
        column: String,
        code: usize,
        domain: usize,
    },

    /// The decision tree could not be fit.
    #[error("training failed: {0}")]
    Training(String),

    /// Error occurred during the build phase.
    #[error("build error: {0}")]
    Build(String),
}
