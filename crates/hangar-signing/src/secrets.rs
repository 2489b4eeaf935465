//! Signing secrets file (`key.properties`) loading

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{Result, SigningError};

/// Key holding the keystore path
pub const STORE_FILE: &str = "storeFile";

/// Key holding the keystore password
pub const STORE_PASSWORD: &str = "storePassword";

/// Key holding the key alias inside the keystore
pub const KEY_ALIAS: &str = "keyAlias";

/// Key holding the key password
pub const KEY_PASSWORD: &str = "keyPassword";

/// Keys that must all be present for a dedicated signing identity
pub const REQUIRED_KEYS: [&str; 4] = [STORE_FILE, STORE_PASSWORD, KEY_ALIAS, KEY_PASSWORD];

/// Where a set of secrets came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SecretsSource {
    /// Parsed from an existing file
    File(PathBuf),
    /// The file was looked up but does not exist
    Missing(PathBuf),
    /// Built in memory
    Inline,
}

/// Key/value secrets loaded for one resolution pass.
///
/// Values are never printed by the `Debug` impl.
#[derive(Clone, PartialEq, Eq)]
pub struct Secrets {
    values: BTreeMap<String, String>,
    source: SecretsSource,
}

impl Secrets {
    /// Create an empty, in-memory set of secrets
    pub fn new() -> Self {
        Self {
            values: BTreeMap::new(),
            source: SecretsSource::Inline,
        }
    }

    fn missing(path: &Path) -> Self {
        Self {
            values: BTreeMap::new(),
            source: SecretsSource::Missing(path.to_path_buf()),
        }
    }

    /// Get a raw value by key
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    /// Get a value, treating blank values as absent
    pub fn get_non_empty(&self, key: &str) -> Option<&str> {
        self.get(key).filter(|v| !v.trim().is_empty())
    }

    /// Number of keys
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Whether no keys were loaded
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Where these secrets came from
    pub fn source(&self) -> &SecretsSource {
        &self.source
    }

    /// Required keys that are absent or blank
    pub fn missing_required(&self) -> Vec<&'static str> {
        REQUIRED_KEYS
            .iter()
            .copied()
            .filter(|key| self.get_non_empty(key).is_none())
            .collect()
    }
}

impl Default for Secrets {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Secrets {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            values: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
            source: SecretsSource::Inline,
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("keys", &self.values.keys().collect::<Vec<_>>())
            .field("source", &self.source)
            .finish()
    }
}

/// Load secrets from a `key=value` file.
///
/// A missing file is not an error: it yields empty secrets and a warning.
pub fn load_secrets(path: &Path) -> Result<Secrets> {
    let content = match std::fs::read_to_string(path) {
        Ok(content) => content,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!(
                path = %path.display(),
                "secrets file not found, signing will use a fallback identity"
            );
            return Ok(Secrets::missing(path));
        }
        Err(source) => {
            return Err(SigningError::Io {
                path: path.to_path_buf(),
                source,
            })
        }
    };

    let values = parse_secrets(&content, path)?;
    info!(path = %path.display(), keys = values.len(), "loaded signing secrets");

    Ok(Secrets {
        values,
        source: SecretsSource::File(path.to_path_buf()),
    })
}

/// Parse `key=value` lines. `#` and `!` start comment lines.
fn parse_secrets(content: &str, path: &Path) -> Result<BTreeMap<String, String>> {
    let mut values = BTreeMap::new();

    for (index, raw) in content.lines().enumerate() {
        // Trailing whitespace is part of the value
        let line = raw.trim_start();
        if line.is_empty() || line.starts_with('#') || line.starts_with('!') {
            continue;
        }

        let malformed = || SigningError::ConfigParse {
            path: path.to_path_buf(),
            line: index + 1,
            content: line.trim_end().to_string(),
        };

        let (key, value) = line.split_once('=').ok_or_else(malformed)?;
        let key = key.trim();
        if key.is_empty() {
            return Err(malformed());
        }

        if values
            .insert(key.to_string(), value.trim_start().to_string())
            .is_some()
        {
            debug!(key, line = index + 1, "secrets key redefined, keeping last value");
        }
    }

    Ok(values)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_file_yields_empty_secrets() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");

        let secrets = load_secrets(&path).unwrap();
        assert!(secrets.is_empty());
        assert_eq!(secrets.source(), &SecretsSource::Missing(path));
    }

    #[test]
    fn test_load_key_properties() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(
            &path,
            "# release keystore\n\
             storeFile=/keys/upload.jks\n\
             storePassword = s3cret\n\
             \n\
             ! legacy comment\n\
             keyAlias=upload\n\
             keyPassword=k=ey\r\n",
        )
        .unwrap();

        let secrets = load_secrets(&path).unwrap();
        assert_eq!(secrets.len(), 4);
        assert_eq!(secrets.get(STORE_FILE), Some("/keys/upload.jks"));
        assert_eq!(secrets.get(STORE_PASSWORD), Some("s3cret"));
        assert_eq!(secrets.get(KEY_ALIAS), Some("upload"));
        assert_eq!(secrets.get(KEY_PASSWORD), Some("k=ey"));
        assert!(secrets.missing_required().is_empty());
        assert_eq!(secrets.source(), &SecretsSource::File(path));
    }

    #[test]
    fn test_malformed_line_reports_line_number() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(&path, "storeFile=a.jks\nthis line is broken\n").unwrap();

        match load_secrets(&path) {
            Err(SigningError::ConfigParse { line, content, .. }) => {
                assert_eq!(line, 2);
                assert_eq!(content, "this line is broken");
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_key_is_malformed() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(&path, "  = value\n").unwrap();

        assert!(matches!(
            load_secrets(&path),
            Err(SigningError::ConfigParse { line: 1, .. })
        ));
    }

    #[test]
    fn test_last_duplicate_wins() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(&path, "keyAlias=old\nkeyAlias=new\n").unwrap();

        let secrets = load_secrets(&path).unwrap();
        assert_eq!(secrets.get(KEY_ALIAS), Some("new"));
    }

    #[test]
    fn test_trailing_whitespace_is_kept() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("key.properties");
        std::fs::write(&path, "storePassword=pass \n   keyAlias =  upload\t\n").unwrap();

        let secrets = load_secrets(&path).unwrap();
        assert_eq!(secrets.get(STORE_PASSWORD), Some("pass "));
        assert_eq!(secrets.get(KEY_ALIAS), Some("upload\t"));
    }

    #[test]
    fn test_blank_values_count_as_missing() {
        let secrets: Secrets = [(STORE_FILE, "a.jks"), (STORE_PASSWORD, "  ")]
            .into_iter()
            .collect();

        assert_eq!(
            secrets.missing_required(),
            vec![STORE_PASSWORD, KEY_ALIAS, KEY_PASSWORD]
        );
    }

    #[test]
    fn test_debug_hides_values() {
        let secrets: Secrets = [(STORE_PASSWORD, "hunter2")].into_iter().collect();
        let debug = format!("{:?}", secrets);
        assert!(debug.contains(STORE_PASSWORD));
        assert!(!debug.contains("hunter2"));
    }
}
