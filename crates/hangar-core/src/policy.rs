//! Variant shrinking policy

use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::ResolveError;

/// One row of the policy table
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PolicyEntry {
    /// Code shrinking and obfuscation
    pub minify: bool,

    /// Resource shrinking; only valid together with `minify`
    pub shrink_resources: bool,
}

impl PolicyEntry {
    /// Create a policy row
    pub fn new(minify: bool, shrink_resources: bool) -> Self {
        Self {
            minify,
            shrink_resources,
        }
    }
}

/// Policy rows keyed by exact variant name
pub type PolicyTable = BTreeMap<String, PolicyEntry>;

/// Resolved shrinking policy for one variant
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct VariantPolicy {
    pub name: String,
    pub minify: bool,
    pub shrink_resources: bool,
    /// Shrinker rule files, base first
    pub rule_files: Vec<PathBuf>,
}

/// Look up a variant's policy.
///
/// Inconsistent rows are rejected rather than corrected, so a release build
/// never silently changes shape.
pub fn resolve_policy(variant: &str, table: &PolicyTable) -> Result<VariantPolicy, ResolveError> {
    let entry = table
        .get(variant)
        .ok_or_else(|| ResolveError::UnknownVariant(variant.to_string()))?;

    if entry.shrink_resources && !entry.minify {
        return Err(ResolveError::InvalidPolicy {
            variant: variant.to_string(),
        });
    }

    debug!(
        variant,
        minify = entry.minify,
        shrink_resources = entry.shrink_resources,
        "resolved variant policy"
    );

    Ok(VariantPolicy {
        name: variant.to_string(),
        minify: entry.minify,
        shrink_resources: entry.shrink_resources,
        rule_files: Vec::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> PolicyTable {
        let mut table = PolicyTable::new();
        table.insert("debug".to_string(), PolicyEntry::new(false, false));
        table.insert("release".to_string(), PolicyEntry::new(true, true));
        table.insert("profile".to_string(), PolicyEntry::new(true, false));
        table.insert("broken".to_string(), PolicyEntry::new(false, true));
        table
    }

    #[test]
    fn test_resolve_known_variants() {
        let table = table();

        let debug = resolve_policy("debug", &table).unwrap();
        assert_eq!(debug.name, "debug");
        assert!(!debug.minify && !debug.shrink_resources);
        assert!(debug.rule_files.is_empty());

        let release = resolve_policy("release", &table).unwrap();
        assert!(release.minify && release.shrink_resources);

        let profile = resolve_policy("profile", &table).unwrap();
        assert!(profile.minify && !profile.shrink_resources);
    }

    #[test]
    fn test_unknown_variant() {
        let table = table();
        for name in ["staging", "Release", "release ", ""] {
            assert!(matches!(
                resolve_policy(name, &table),
                Err(ResolveError::UnknownVariant(ref v)) if v == name
            ));
        }
    }

    #[test]
    fn test_shrink_without_minify_is_rejected() {
        assert!(matches!(
            resolve_policy("broken", &table()),
            Err(ResolveError::InvalidPolicy { ref variant }) if variant == "broken"
        ));
    }
}
