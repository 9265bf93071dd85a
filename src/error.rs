//! Error types for the repeatable quest core

use pyo3::exceptions::{PyKeyError, PyRuntimeError, PyValueError};
use pyo3::PyErr;
use thiserror::Error;

use crate::generator::QuestKind;

/// Main error type for quest generation
///
/// Generators never surface these to their callers directly: the public
/// `generate` entry points log them and return `None`.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QuestGenError {
    #[error("No elimination targets left in quest pool")]
    NoTargets,

    #[error("No locations left for {0}")]
    NoLocations(String),

    #[error("No items available for completion quest at level {0}")]
    NoCompletionItems(u32),

    #[error("No {kind} config tier for level {level}")]
    MissingLevelTier { kind: QuestKind, level: u32 },

    #[error("Trader {0} has no whitelist entry")]
    MissingTraderWhitelist(String),

    #[error("Location id not found: {0}")]
    MissingLocationId(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),

    #[error("Quest template has no {0} condition")]
    MissingConditionSlot(&'static str),

    #[error("Unknown quest type: {0}")]
    UnknownQuestKind(String),

    #[error("Invariant violated: {0}")]
    Invariant(String),
}

impl QuestGenError {
    /// True for the "ran out of candidates" family, which callers handle by
    /// trying a different quest type rather than treating it as a fault.
    pub fn is_exhausted(&self) -> bool {
        matches!(
            self,
            QuestGenError::NoTargets
                | QuestGenError::NoLocations(_)
                | QuestGenError::NoCompletionItems(_)
        )
    }
}

impl From<serde_json::Error> for QuestGenError {
    fn from(err: serde_json::Error) -> Self {
        QuestGenError::DeserializationError(err.to_string())
    }
}

impl From<QuestGenError> for PyErr {
    fn from(err: QuestGenError) -> PyErr {
        match err {
            QuestGenError::MissingTraderWhitelist(_)
            | QuestGenError::MissingLocationId(_) => PyKeyError::new_err(err.to_string()),
            QuestGenError::InvalidConfig(_)
            | QuestGenError::DeserializationError(_)
            | QuestGenError::UnknownQuestKind(_) => PyValueError::new_err(err.to_string()),
            _ => PyRuntimeError::new_err(err.to_string()),
        }
    }
}

/// Result type alias for the repeatable quest core
pub type Result<T> = std::result::Result<T, QuestGenError>;
