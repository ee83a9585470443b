//! Error types shared by the classifier, tracker and session layers
//!
//! Only registration, configuration and catalog loading surface errors to the
//! caller. Oracle failures and out-of-vocabulary labels are recovered inside
//! the frame loop and only logged.

use thiserror::Error;

/// Errors produced by the pose tracker core
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TrackerError {
    /// Exercise definition rejected at registration time
    #[error("invalid exercise definition `{name}`: {reason}")]
    InvalidDefinition { name: String, reason: String },

    /// Classifier produced a label the vocabulary does not know
    #[error("label `{0}` is not in the pose vocabulary")]
    OutOfVocabularyLabel(String),

    /// Frame classification call failed
    #[error("frame classifier unavailable: {0}")]
    OracleUnavailable(String),

    /// Configuration value out of range
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// Vocabulary is loaded once per session
    #[error("pose vocabulary already loaded")]
    VocabularyAlreadyLoaded,

    /// Exercises cannot be validated before the vocabulary exists
    #[error("pose vocabulary not loaded")]
    VocabularyNotLoaded,

    /// Catalog or config JSON could not be decoded
    #[error("catalog decode failed: {0}")]
    Catalog(String),
}

impl TrackerError {
    pub(crate) fn invalid_definition(name: &str, reason: impl Into<String>) -> Self {
        TrackerError::InvalidDefinition {
            name: name.to_string(),
            reason: reason.into(),
        }
    }
}

impl From<serde_json::Error> for TrackerError {
    fn from(err: serde_json::Error) -> Self {
        TrackerError::Catalog(err.to_string())
    }
}
