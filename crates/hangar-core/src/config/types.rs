//! Configuration types

use std::collections::BTreeMap;
use std::path::PathBuf;

use hangar_signing::SigningPolicy;
use serde::{Deserialize, Serialize};

use crate::policy::{PolicyEntry, PolicyTable};

/// Main configuration for Hangar
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct HangarConfig {
    /// Variants to resolve, in resolution order
    pub variants: Vec<String>,

    /// Signing secrets file, relative to the project root
    pub secrets_file: PathBuf,

    /// Signing policy
    pub signing: SigningPolicy,

    /// Shrinker rule file locations
    pub rules: RulesConfig,

    /// Shrinking policy per variant
    pub policy: PolicyTable,

    /// Opaque build properties passed through to the output untouched
    pub properties: BTreeMap<String, String>,
}

impl Default for HangarConfig {
    fn default() -> Self {
        let mut policy = PolicyTable::new();
        policy.insert("debug".to_string(), PolicyEntry::default());
        policy.insert("release".to_string(), PolicyEntry::default());

        Self {
            variants: vec!["debug".to_string(), "release".to_string()],
            secrets_file: PathBuf::from("key.properties"),
            signing: SigningPolicy::default(),
            rules: RulesConfig::default(),
            policy,
            properties: BTreeMap::new(),
        }
    }
}

/// Shrinker rule file configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// Base rule file, required whenever a variant minifies
    pub base: PathBuf,

    /// Optional per-variant override; `{variant}` is replaced by the variant name
    pub override_pattern: String,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            base: PathBuf::from("proguard-rules.pro"),
            override_pattern: "proguard-rules-{variant}.pro".to_string(),
        }
    }
}
