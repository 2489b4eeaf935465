//! Shrinker rule file selection

use std::path::PathBuf;

use tracing::debug;

use crate::config::RulesConfig;
use crate::error::ResolveError;

/// Picks the rule files a minifying variant is built with
#[derive(Debug, Clone)]
pub struct RuleFileSelector {
    root: PathBuf,
    base: PathBuf,
    override_pattern: String,
}

impl RuleFileSelector {
    /// Create a selector resolving relative paths against `root`
    pub fn new(root: impl Into<PathBuf>, rules: &RulesConfig) -> Self {
        Self {
            root: root.into(),
            base: rules.base.clone(),
            override_pattern: rules.override_pattern.clone(),
        }
    }

    /// Base rule file location
    pub fn base_path(&self) -> PathBuf {
        self.root.join(&self.base)
    }

    /// Override rule file location for a variant
    pub fn override_path(&self, variant: &str) -> PathBuf {
        self.root
            .join(self.override_pattern.replace("{variant}", variant))
    }

    /// Select rule files for a variant.
    ///
    /// Non-minified variants get none. Minified variants get the base file
    /// followed by the variant override when it exists. Contents are not read.
    pub fn select(&self, variant: &str, minify: bool) -> Result<Vec<PathBuf>, ResolveError> {
        if !minify {
            return Ok(Vec::new());
        }

        let base = self.base_path();
        if !base.is_file() {
            return Err(ResolveError::MissingRuleFile {
                variant: variant.to_string(),
                path: base,
            });
        }

        let mut files = vec![base];
        let override_path = self.override_path(variant);
        if override_path.is_file() {
            files.push(override_path);
        }

        debug!(variant, count = files.len(), "selected rule files");
        Ok(files)
    }
}
