//! Error types for signing resolution

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for signing operations
pub type Result<T> = std::result::Result<T, SigningError>;

/// Signing-related errors
#[derive(Debug, Error)]
pub enum SigningError {
    /// Secrets file exists but contains a line that is not `key=value`
    #[error("Failed to parse secrets file {path} at line {line}: '{content}'")]
    ConfigParse {
        path: PathBuf,
        line: usize,
        content: String,
    },

    /// Release variant resolved to a fallback identity while signing is required
    #[error(
        "Variant '{variant}' requires a dedicated signing identity, missing secrets: {}",
        missing.join(", ")
    )]
    SigningRequired {
        variant: String,
        missing: Vec<String>,
    },

    /// IO error while reading the secrets file
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
