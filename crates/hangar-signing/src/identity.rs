//! Signing identity types

use std::path::{Path, PathBuf};

use serde::{Serialize, Serializer};

const REDACTED: &str = "********";

/// The signing identity a build variant will be signed with.
///
/// A fallback identity means no dedicated keystore was configured; the build
/// executor falls back to its development signing (or leaves the artifact
/// unsigned). Artifacts built with a fallback identity must not be published.
#[derive(Clone, PartialEq, Eq, Serialize)]
pub struct SigningIdentity {
    /// Keystore file, as written in the secrets file
    pub keystore_path: Option<PathBuf>,

    /// Keystore password
    #[serde(serialize_with = "redact")]
    pub store_password: Option<String>,

    /// Key alias inside the keystore
    pub key_alias: Option<String>,

    /// Key password
    #[serde(serialize_with = "redact")]
    pub key_password: Option<String>,

    /// Whether this is a fallback identity
    pub is_fallback: bool,

    /// Required secrets that were absent (empty for dedicated identities)
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub missing_keys: Vec<String>,
}

impl SigningIdentity {
    /// Create a dedicated identity from its four parts
    pub fn dedicated(
        keystore_path: impl Into<PathBuf>,
        store_password: impl Into<String>,
        key_alias: impl Into<String>,
        key_password: impl Into<String>,
    ) -> Self {
        Self {
            keystore_path: Some(keystore_path.into()),
            store_password: Some(store_password.into()),
            key_alias: Some(key_alias.into()),
            key_password: Some(key_password.into()),
            is_fallback: false,
            missing_keys: Vec::new(),
        }
    }

    /// Create a fallback identity, recording which keys were missing
    pub fn fallback<S: Into<String>>(missing_keys: impl IntoIterator<Item = S>) -> Self {
        Self {
            keystore_path: None,
            store_password: None,
            key_alias: None,
            key_password: None,
            is_fallback: true,
            missing_keys: missing_keys.into_iter().map(Into::into).collect(),
        }
    }

    /// Whether an artifact signed with this identity may be published
    pub fn is_publishable(&self) -> bool {
        !self.is_fallback
    }

    /// Keystore path, joined onto `base` when relative
    pub fn keystore_path_in(&self, base: &Path) -> Option<PathBuf> {
        self.keystore_path.as_ref().map(|p| {
            if p.is_absolute() {
                p.clone()
            } else {
                base.join(p)
            }
        })
    }

    /// Short human-readable description
    pub fn display_name(&self) -> String {
        match (&self.key_alias, &self.keystore_path) {
            (Some(alias), Some(path)) if !self.is_fallback => {
                format!("{} ({})", alias, path.display())
            }
            _ => "fallback (development signing)".to_string(),
        }
    }
}

impl std::fmt::Display for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl std::fmt::Debug for SigningIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SigningIdentity")
            .field("keystore_path", &self.keystore_path)
            .field("store_password", &self.store_password.as_ref().map(|_| REDACTED))
            .field("key_alias", &self.key_alias)
            .field("key_password", &self.key_password.as_ref().map(|_| REDACTED))
            .field("is_fallback", &self.is_fallback)
            .field("missing_keys", &self.missing_keys)
            .finish()
    }
}

fn redact<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
    match value {
        Some(_) => serializer.serialize_some(REDACTED),
        None => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dedicated_identity() {
        let identity = SigningIdentity::dedicated("upload.jks", "store", "upload", "key");

        assert!(!identity.is_fallback);
        assert!(identity.is_publishable());
        assert_eq!(identity.display_name(), "upload (upload.jks)");
        assert_eq!(
            identity.keystore_path_in(Path::new("/project")),
            Some(PathBuf::from("/project/upload.jks"))
        );
    }

    #[test]
    fn test_fallback_identity() {
        let identity = SigningIdentity::fallback(["storeFile", "keyAlias"]);

        assert!(identity.is_fallback);
        assert!(!identity.is_publishable());
        assert_eq!(identity.missing_keys, vec!["storeFile", "keyAlias"]);
        assert_eq!(identity.keystore_path_in(Path::new("/project")), None);
        assert_eq!(identity.to_string(), "fallback (development signing)");
    }

    #[test]
    fn test_passwords_are_redacted() {
        let identity = SigningIdentity::dedicated("upload.jks", "hunter2", "upload", "letmein");

        let debug = format!("{:?}", identity);
        assert!(!debug.contains("hunter2"));
        assert!(!debug.contains("letmein"));

        let json = serde_json::to_string(&identity).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(!json.contains("letmein"));
        assert!(json.contains("\"key_alias\":\"upload\""));
    }
}
