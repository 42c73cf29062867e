//! Replay error types.

use thiserror::Error;

pub type ReplayResult<T> = Result<T, ReplayError>;

#[derive(Debug, Error)]
pub enum ReplayError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("Invalid sample on line {line}: {source}")]
    Parse {
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to write event: {0}")]
    Emit(#[source] serde_json::Error),

    #[error("Analyzer error: {0}")]
    Analyzer(#[from] swing_analyzer::AnalyzerError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReplayError {
    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Line number of the offending input, if the error came from parsing.
    pub fn line(&self) -> Option<usize> {
        match self {
            ReplayError::Parse { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Check if the error is caused by bad input data rather than the environment.
    pub fn is_input_error(&self) -> bool {
        matches!(self, ReplayError::Parse { .. })
    }
}
