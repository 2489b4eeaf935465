//! Error types for Hangar

use std::path::PathBuf;

use hangar_signing::SigningError;
use thiserror::Error;

use crate::assembler::VariantState;

/// Result type alias using HangarError
pub type Result<T> = std::result::Result<T, HangarError>;

/// Main error type for Hangar operations
#[derive(Debug, Error)]
pub enum HangarError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Secrets loading errors
    #[error(transparent)]
    Signing(#[from] SigningError),

    /// A variant failed to resolve; the whole run is aborted
    #[error(transparent)]
    Variant(#[from] VariantError),
}

impl HangarError {
    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Config(_) => "invalid-config",
            Self::Signing(e) => signing_kind(e),
            Self::Variant(e) => e.source.kind(),
        }
    }

    /// Variant the error belongs to, if any
    pub fn variant(&self) -> Option<&str> {
        match self {
            Self::Variant(e) => Some(&e.variant),
            _ => None,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors resolving a single variant
#[derive(Debug, Error)]
pub enum ResolveError {
    /// Variant has no row in the policy table
    #[error("Unknown build variant '{0}'")]
    UnknownVariant(String),

    /// Resource shrinking enabled without code shrinking
    #[error("Invalid policy for variant '{variant}': shrink_resources requires minify")]
    InvalidPolicy { variant: String },

    /// Minify enabled but the base rule file does not exist
    #[error(
        "Variant '{variant}' enables minify but the base rule file is missing: {}",
        path.display()
    )]
    MissingRuleFile { variant: String, path: PathBuf },

    /// Signing identity could not be resolved
    #[error(transparent)]
    Signing(#[from] SigningError),
}

impl ResolveError {
    /// Short machine-readable error kind
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UnknownVariant(_) => "unknown-variant",
            Self::InvalidPolicy { .. } => "invalid-policy",
            Self::MissingRuleFile { .. } => "missing-rule-file",
            Self::Signing(e) => signing_kind(e),
        }
    }
}

/// A variant that failed, with the last state it reached
#[derive(Debug, Error)]
#[error("Variant '{variant}' failed after reaching {state}: {source}")]
pub struct VariantError {
    pub variant: String,
    pub state: VariantState,
    #[source]
    pub source: ResolveError,
}

fn signing_kind(error: &SigningError) -> &'static str {
    match error {
        SigningError::ConfigParse { .. } => "config-parse",
        SigningError::SigningRequired { .. } => "signing-required",
        SigningError::Io { .. } => "io",
    }
}
