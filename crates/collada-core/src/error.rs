//! Error types for collada-rs.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for collada-rs operations.
///
/// Every variant describes invalid data; nothing in this crate is retriable.
#[derive(Error, Debug)]
pub enum ColladaError {
    /// A structurally required element is missing.
    #[error("incomplete data: {0}")]
    Incomplete(String),

    /// A reference does not resolve within the current scope.
    #[error("broken reference: {0}")]
    BrokenRef(String),

    /// Data is present but internally inconsistent.
    #[error("malformed data: {0}")]
    Malformed(String),

    /// A structurally valid feature that is not implemented.
    #[error("unsupported feature: {0}")]
    Unsupported(String),

    /// JSON (de)serialization error for document records and options.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ColladaError {
    /// Returns the class of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Incomplete(_) => ErrorKind::Incomplete,
            Self::BrokenRef(_) => ErrorKind::BrokenRef,
            Self::Malformed(_) | Self::Json(_) => ErrorKind::Malformed,
            Self::Unsupported(_) => ErrorKind::Unsupported,
        }
    }

    pub fn incomplete(msg: impl Into<String>) -> Self {
        Self::Incomplete(msg.into())
    }

    pub fn broken_ref(msg: impl Into<String>) -> Self {
        Self::BrokenRef(msg.into())
    }

    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::Malformed(msg.into())
    }
}

/// Error classes, used by [`crate::LoadOptions`] to name which errors may be skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    Incomplete,
    BrokenRef,
    Malformed,
    Unsupported,
}

/// A specialized Result type for collada-rs operations.
pub type Result<T> = std::result::Result<T, ColladaError>;

/// Sink for errors that are recorded instead of aborting the current operation.
#[derive(Debug, Default)]
pub struct ErrorCollector {
    errors: Vec<ColladaError>,
}

impl ErrorCollector {
    /// Creates an empty collector.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records an error.
    pub fn push(&mut self, error: ColladaError) {
        log::warn!("{error}");
        self.errors.push(error);
    }

    /// Returns all recorded errors, oldest first.
    pub fn errors(&self) -> &[ColladaError] {
        &self.errors
    }

    /// Returns the number of recorded errors of the given class.
    pub fn count_of(&self, kind: ErrorKind) -> usize {
        self.errors.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    /// Removes and returns all recorded errors.
    pub fn take(&mut self) -> Vec<ColladaError> {
        std::mem::take(&mut self.errors)
    }
}
