//! Exit codes for the CLI

use hangar_core::HangarError;

use crate::cli::commands::ValidationFailed;

/// Success
pub const SUCCESS: i32 = 0;

/// General error
pub const ERROR: i32 = 1;

/// Configuration error
pub const CONFIG_ERROR: i32 = 2;

/// Validation or resolution error
pub const VALIDATION_ERROR: i32 = 5;

/// Release variant resolved to a fallback signing identity
pub const SIGNING_REQUIRED: i32 = 6;

/// Pick the exit code for a failed command
pub fn for_error(err: &anyhow::Error) -> i32 {
    if err.is::<ValidationFailed>() {
        return VALIDATION_ERROR;
    }

    match err.downcast_ref::<HangarError>() {
        Some(e) => for_hangar_error(e),
        None => ERROR,
    }
}

fn for_hangar_error(err: &HangarError) -> i32 {
    match err.kind() {
        "invalid-config" | "config-parse" => CONFIG_ERROR,
        "signing-required" => SIGNING_REQUIRED,
        "io" => ERROR,
        _ => VALIDATION_ERROR,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::{ConfigError, ResolveError, VariantError, VariantState};
    use hangar_signing::SigningError;

    fn variant_failure(source: ResolveError) -> anyhow::Error {
        HangarError::from(VariantError {
            variant: "release".to_string(),
            state: VariantState::RulesResolved,
            source,
        })
        .into()
    }

    #[test]
    fn test_exit_codes_by_kind() {
        let signing = variant_failure(ResolveError::Signing(SigningError::SigningRequired {
            variant: "release".to_string(),
            missing: vec!["storeFile".to_string()],
        }));
        assert_eq!(for_error(&signing), SIGNING_REQUIRED);

        let unknown = variant_failure(ResolveError::UnknownVariant("staging".to_string()));
        assert_eq!(for_error(&unknown), VALIDATION_ERROR);

        let config: anyhow::Error = HangarError::from(ConfigError::InvalidValue {
            field: "variants".to_string(),
            message: "at least one variant is required".to_string(),
        })
        .into();
        assert_eq!(for_error(&config), CONFIG_ERROR);

        assert_eq!(for_error(&anyhow::anyhow!("boom")), ERROR);
    }

    #[test]
    fn test_failed_validation_exit_code() {
        let err: anyhow::Error = ValidationFailed(2).into();
        assert_eq!(for_error(&err), VALIDATION_ERROR);
        assert_eq!(err.to_string(), "Validation failed with 2 error(s)");
    }
}
