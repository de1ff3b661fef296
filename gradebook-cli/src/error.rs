//! Error types for the roster import pipeline

use std::io;

use thiserror::Error;

/// Failure of a single import call
///
/// Callers usually treat every variant as "import failed"; the split exists so
/// logs can say whether the file could not be read or could not be decoded.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The file handle could not be read
    #[error("failed to read {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: io::Error,
    },

    /// The payload is not a workbook or delimited text we can decode
    #[error("failed to decode {name}: {message}")]
    Decode { name: String, message: String },
}

impl ImportError {
    pub(crate) fn decode(name: impl Into<String>, message: impl ToString) -> Self {
        ImportError::Decode {
            name: name.into(),
            message: message.to_string(),
        }
    }

    /// Whether the failure happened while reading the file
    pub fn is_read(&self) -> bool {
        matches!(self, ImportError::Read { .. })
    }
}

pub type ImportResult<T> = Result<T, ImportError>;
