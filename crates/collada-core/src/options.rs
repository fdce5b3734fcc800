//! Configuration options for loading geometry.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, Result};

/// Options controlling how document records are turned into geometry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoadOptions {
    /// Error classes that are recorded and only skip the offending primitive.
    ///
    /// Errors of any other class abort the whole geometry load.
    pub ignore: Vec<ErrorKind>,

    /// Reject non-numeric tokens in float arrays instead of reading them as zero.
    pub strict_numbers: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            ignore: vec![ErrorKind::Unsupported],
            strict_numbers: false,
        }
    }
}

impl LoadOptions {
    /// Options that record every error class instead of aborting.
    #[must_use]
    pub fn lenient() -> Self {
        Self {
            ignore: vec![
                ErrorKind::Incomplete,
                ErrorKind::BrokenRef,
                ErrorKind::Malformed,
                ErrorKind::Unsupported,
            ],
            strict_numbers: false,
        }
    }

    /// Parses options from a JSON document. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    /// Serializes these options as pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Returns whether errors of `kind` are recorded instead of raised.
    pub fn ignores(&self, kind: ErrorKind) -> bool {
        self.ignore.contains(&kind)
    }
}
