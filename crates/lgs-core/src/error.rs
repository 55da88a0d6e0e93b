//! Core error types.
//!
//! Validation never fails; these errors cover loading answer sheets from
//! disk and decoding them.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while loading or decoding an answer sheet.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The sheet file could not be read.
    #[error("failed to read answer sheet {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The sheet file is not valid TOML.
    #[error("failed to parse answer sheet: {0}")]
    Parse(#[from] toml::de::Error),

    /// The sheet could not be rendered back to TOML.
    #[error("failed to write answer sheet: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A table names a subject outside the fixed six.
    #[error("unknown subject in answer sheet: {0}")]
    UnknownSubject(String),

    /// A subject table has a key other than `dogru` / `yanlis`.
    #[error("unknown field '{field}' for subject {subject}")]
    UnknownField { subject: String, field: String },

    /// A value is neither an integer nor a string.
    #[error("value for {0} must be an integer or a string")]
    InvalidValue(String),
}
