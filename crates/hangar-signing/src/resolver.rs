//! Per-variant signing identity resolution

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::{Result, SigningError};
use crate::identity::SigningIdentity;
use crate::secrets::{Secrets, KEY_ALIAS, KEY_PASSWORD, STORE_FILE, STORE_PASSWORD};

/// Policy gating fallback identities on release variants
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SigningPolicy {
    /// Fail release variants that would be signed with a fallback identity
    pub require_for_release: bool,

    /// Variant names treated as release builds
    pub release_variants: Vec<String>,
}

impl SigningPolicy {
    /// Check whether a variant counts as a release build
    pub fn is_release(&self, variant: &str) -> bool {
        self.release_variants.iter().any(|v| v == variant)
    }
}

impl Default for SigningPolicy {
    fn default() -> Self {
        Self {
            require_for_release: true,
            release_variants: vec!["release".to_string()],
        }
    }
}

/// Resolve the signing identity for one variant.
///
/// All four required secrets yield a dedicated identity with the values copied
/// verbatim. Otherwise a fallback identity is returned, unless the variant is
/// a release variant and the policy requires dedicated signing.
pub fn resolve_signing_identity(
    secrets: &Secrets,
    variant: &str,
    policy: &SigningPolicy,
) -> Result<SigningIdentity> {
    let missing = secrets.missing_required();

    if missing.is_empty() {
        if let (Some(store_file), Some(store_password), Some(key_alias), Some(key_password)) = (
            secrets.get(STORE_FILE),
            secrets.get(STORE_PASSWORD),
            secrets.get(KEY_ALIAS),
            secrets.get(KEY_PASSWORD),
        ) {
            debug!(variant, key_alias, "resolved dedicated signing identity");
            return Ok(SigningIdentity::dedicated(
                store_file,
                store_password,
                key_alias,
                key_password,
            ));
        }
    }

    if policy.require_for_release && policy.is_release(variant) {
        return Err(SigningError::SigningRequired {
            variant: variant.to_string(),
            missing: missing.iter().map(|k| k.to_string()).collect(),
        });
    }

    warn!(
        variant,
        missing = %missing.join(", "),
        "signing secrets incomplete, using fallback identity"
    );
    Ok(SigningIdentity::fallback(missing))
}
