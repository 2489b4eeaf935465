//! Per-variant configuration assembly
//!
//! Each variant moves through
//! `Unresolved -> PolicyResolved -> RulesResolved -> SigningResolved -> Assembled`.
//! The first failure aborts the whole run; a [`VariantError`] records the last
//! state the failing variant reached. Nothing is retried.

use std::path::{Path, PathBuf};

use hangar_signing::{
    load_secrets, resolve_signing_identity, Secrets, SecretsSource, SigningIdentity,
    SigningPolicy,
};
use serde::Serialize;
use tracing::{debug, error, info, warn};

use crate::config::{validate_unique_variants, HangarConfig, RulesConfig};
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::error::{ResolveError, Result, VariantError};
use crate::policy::{resolve_policy, PolicyTable, VariantPolicy};
use crate::rules::RuleFileSelector;

/// Resolution progress of a single variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum VariantState {
    Unresolved,
    PolicyResolved,
    RulesResolved,
    SigningResolved,
    Assembled,
}

impl std::fmt::Display for VariantState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unresolved => write!(f, "unresolved"),
            Self::PolicyResolved => write!(f, "policy-resolved"),
            Self::RulesResolved => write!(f, "rules-resolved"),
            Self::SigningResolved => write!(f, "signing-resolved"),
            Self::Assembled => write!(f, "assembled"),
        }
    }
}

/// Final configuration of one variant, handed to the build executor
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ResolvedVariantConfig {
    pub variant: VariantPolicy,
    pub signing: SigningIdentity,
}

impl ResolvedVariantConfig {
    /// Variant name
    pub fn name(&self) -> &str {
        &self.variant.name
    }
}

/// Output of a successful run: every variant in input order, plus warnings
#[derive(Debug, Clone, Serialize)]
pub struct Resolution {
    variants: Vec<ResolvedVariantConfig>,
    diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// Look up a variant by name
    pub fn get(&self, name: &str) -> Option<&ResolvedVariantConfig> {
        self.variants.iter().find(|v| v.name() == name)
    }

    /// Iterate over variants in resolution order
    pub fn iter(&self) -> impl Iterator<Item = &ResolvedVariantConfig> {
        self.variants.iter()
    }

    /// Variant names in resolution order
    pub fn names(&self) -> Vec<&str> {
        self.variants.iter().map(ResolvedVariantConfig::name).collect()
    }

    pub fn len(&self) -> usize {
        self.variants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variants.is_empty()
    }

    /// Warnings emitted during the run
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.diagnostics
    }
}

struct Progress<'a> {
    variant: &'a str,
    state: VariantState,
}

impl<'a> Progress<'a> {
    fn new(variant: &'a str) -> Self {
        Self {
            variant,
            state: VariantState::Unresolved,
        }
    }

    fn advance(&mut self, next: VariantState) {
        debug!(variant = self.variant, from = %self.state, to = %next, "variant state transition");
        self.state = next;
    }

    fn fail(&self, source: impl Into<ResolveError>) -> VariantError {
        let source = source.into();
        error!(
            variant = self.variant,
            state = %self.state,
            kind = source.kind(),
            "variant resolution failed"
        );
        VariantError {
            variant: self.variant.to_string(),
            state: self.state,
            source,
        }
    }
}

/// Composes policy, rule files and signing into per-variant configurations
#[derive(Debug, Clone)]
pub struct ConfigurationAssembler {
    project_root: PathBuf,
    policy_table: PolicyTable,
    rules: RuleFileSelector,
    signing: SigningPolicy,
}

impl ConfigurationAssembler {
    /// Create an assembler with default rule locations and signing policy
    pub fn new(project_root: impl Into<PathBuf>, policy_table: PolicyTable) -> Self {
        let project_root = project_root.into();
        Self {
            rules: RuleFileSelector::new(project_root.clone(), &RulesConfig::default()),
            project_root,
            policy_table,
            signing: SigningPolicy::default(),
        }
    }

    /// Create an assembler from a loaded project configuration
    pub fn from_config(config: &HangarConfig, project_root: &Path) -> Self {
        Self::new(project_root, config.policy.clone())
            .with_rules(&config.rules)
            .with_signing_policy(config.signing.clone())
    }

    /// Use custom rule file locations
    pub fn with_rules(mut self, rules: &RulesConfig) -> Self {
        self.rules = RuleFileSelector::new(self.project_root.clone(), rules);
        self
    }

    /// Use a custom signing policy
    pub fn with_signing_policy(mut self, signing: SigningPolicy) -> Self {
        self.signing = signing;
        self
    }

    /// Toggle whether release variants need a dedicated signing identity
    pub fn require_signing_for_release(mut self, required: bool) -> Self {
        self.signing.require_for_release = required;
        self
    }

    /// Resolve every variant in order, stopping at the first failure
    pub fn assemble<S: AsRef<str>>(&self, variants: &[S], secrets: &Secrets) -> Result<Resolution> {
        validate_unique_variants("variants", variants)?;

        let mut diagnostics = Vec::new();
        if let SecretsSource::Missing(path) = secrets.source() {
            diagnostics.push(Diagnostic::global(
                DiagnosticKind::MissingSecretsFile,
                format!("secrets file {} not found", path.display()),
            ));
        }

        let mut resolved = Vec::with_capacity(variants.len());
        for variant in variants {
            resolved.push(self.assemble_variant(variant.as_ref(), secrets, &mut diagnostics)?);
        }

        info!(
            variants = resolved.len(),
            warnings = diagnostics.len(),
            "assembled variant configurations"
        );
        Ok(Resolution {
            variants: resolved,
            diagnostics,
        })
    }

    fn assemble_variant(
        &self,
        variant: &str,
        secrets: &Secrets,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> std::result::Result<ResolvedVariantConfig, VariantError> {
        let mut progress = Progress::new(variant);

        let mut policy = resolve_policy(variant, &self.policy_table).map_err(|e| progress.fail(e))?;
        progress.advance(VariantState::PolicyResolved);

        policy.rule_files = self
            .rules
            .select(variant, policy.minify)
            .map_err(|e| progress.fail(e))?;
        progress.advance(VariantState::RulesResolved);

        let signing = resolve_signing_identity(secrets, variant, &self.signing)
            .map_err(|e| progress.fail(e))?;
        progress.advance(VariantState::SigningResolved);

        if signing.is_fallback {
            diagnostics.push(Diagnostic::for_variant(
                DiagnosticKind::FallbackSigning,
                variant,
                format!(
                    "signed with a fallback identity, missing {}",
                    signing.missing_keys.join(", ")
                ),
            ));
        } else if let Some(keystore) = signing.keystore_path_in(&self.project_root) {
            if !keystore.exists() {
                warn!(variant, keystore = %keystore.display(), "keystore file not found");
                diagnostics.push(Diagnostic::for_variant(
                    DiagnosticKind::MissingKeystore,
                    variant,
                    format!("keystore {} not found", keystore.display()),
                ));
            }
        }

        progress.advance(VariantState::Assembled);
        Ok(ResolvedVariantConfig {
            variant: policy,
            signing,
        })
    }
}

/// Load the project's secrets and resolve every configured variant
pub fn resolve_project(config: &HangarConfig, project_root: &Path) -> Result<Resolution> {
    let secrets = load_secrets(&project_root.join(&config.secrets_file))?;
    ConfigurationAssembler::from_config(config, project_root).assemble(&config.variants, &secrets)
}
