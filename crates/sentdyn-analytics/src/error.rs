use sentdyn_core::CoreError;
use thiserror::Error;

/// Failures of a single `analyze` call. None of them are transient, so none
/// are retried.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AnalysisError {
    /// Submitted text was empty or whitespace-only.
    #[error("input text is empty")]
    EmptyInput,

    /// The entity tagger model failed to load at startup.
    #[error("entity model unavailable: {reason}")]
    ModelUnavailable { reason: String },

    /// Engine name outside the two recognized strategies.
    #[error("unsupported sentiment engine: '{0}'")]
    UnsupportedEngine(String),
}

impl From<CoreError> for AnalysisError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnsupportedEngine(name) => AnalysisError::UnsupportedEngine(name),
        }
    }
}

/// Errors raised while loading or compiling an entity tagger model.
#[derive(Debug, Error)]
pub enum ModelError {
    #[error("failed to read model file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse model file: {0}")]
    Parse(#[from] serde_yaml::Error),

    #[error("invalid model: {0}")]
    Validation(String),
}
