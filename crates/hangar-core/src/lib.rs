//! Hangar Core - Build variant configuration resolution
//!
//! This crate provides the project configuration, per-variant shrinking
//! policy, shrinker rule file selection, and the assembler that combines them
//! with a signing identity into one immutable configuration per variant.

pub mod assembler;
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod policy;
pub mod rules;

pub use assembler::{
    resolve_project, ConfigurationAssembler, Resolution, ResolvedVariantConfig, VariantState,
};
pub use config::{HangarConfig, RulesConfig};
pub use diagnostics::{Diagnostic, DiagnosticKind};
pub use error::{ConfigError, HangarError, ResolveError, Result, VariantError};
pub use policy::{resolve_policy, PolicyEntry, PolicyTable, VariantPolicy};
pub use rules::RuleFileSelector;
