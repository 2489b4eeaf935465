//! Configuration validation
//!
//! Policy rows are not checked here: unknown variants and inconsistent
//! shrink settings are reported by the resolver against the variant that
//! uses them.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::HangarConfig;

/// Validate configuration
pub fn validate_config(config: &HangarConfig) -> Result<()> {
    debug!("validating configuration");
    validate_variants(config)?;
    validate_secrets(config)?;
    validate_signing(config)?;
    validate_rules(config)?;
    debug!("configuration validation passed");
    Ok(())
}

/// Reject empty, blank and duplicate variant names
pub fn validate_variant_names<S: AsRef<str>>(field: &str, names: &[S]) -> Result<()> {
    for (i, name) in names.iter().enumerate() {
        if name.as_ref().trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("{}[{}]", field, i),
                message: "variant name cannot be empty".to_string(),
            }
            .into());
        }
    }

    validate_unique_variants(field, names)
}

/// Reject variant names listed more than once
pub fn validate_unique_variants<S: AsRef<str>>(field: &str, names: &[S]) -> Result<()> {
    let mut seen = HashSet::new();
    for (i, name) in names.iter().enumerate() {
        let name = name.as_ref();
        if !seen.insert(name) {
            return Err(ConfigError::InvalidValue {
                field: format!("{}[{}]", field, i),
                message: format!("variant '{}' is listed more than once", name),
            }
            .into());
        }
    }
    Ok(())
}

fn validate_variants(config: &HangarConfig) -> Result<()> {
    if config.variants.is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "variants".to_string(),
            message: "at least one variant is required".to_string(),
        }
        .into());
    }

    validate_variant_names("variants", &config.variants)
}

fn validate_secrets(config: &HangarConfig) -> Result<()> {
    if config.secrets_file.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "secrets_file".to_string(),
            message: "secrets file path cannot be empty".to_string(),
        }
        .into());
    }

    Ok(())
}

fn validate_signing(config: &HangarConfig) -> Result<()> {
    for (i, variant) in config.signing.release_variants.iter().enumerate() {
        if variant.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: format!("signing.release_variants[{}]", i),
                message: "variant name cannot be empty".to_string(),
            }
            .into());
        }
    }

    Ok(())
}

fn validate_rules(config: &HangarConfig) -> Result<()> {
    if config.rules.base.as_os_str().is_empty() {
        return Err(ConfigError::InvalidValue {
            field: "rules.base".to_string(),
            message: "base rule file cannot be empty".to_string(),
        }
        .into());
    }

    if !config.rules.override_pattern.contains("{variant}") {
        return Err(ConfigError::InvalidValue {
            field: "rules.override_pattern".to_string(),
            message: "must contain {variant} placeholder".to_string(),
        }
        .into());
    }

    Ok(())
}
