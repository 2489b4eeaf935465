//! Validate command

use clap::Args;
use console::style;
use serde::Serialize;
use thiserror::Error;
use tracing::info;

use hangar_core::{resolve_project, HangarError};

use crate::cli::{Cli, LoadedConfig, OutputFormat};

/// Validate configuration, secrets and rule files
#[derive(Debug, Args)]
pub struct ValidateCommand {
    /// Strict mode - treat warnings as errors
    #[arg(long)]
    pub strict: bool,
}

/// Returned when validation reports at least one error
#[derive(Debug, Error)]
#[error("Validation failed with {0} error(s)")]
pub struct ValidationFailed(pub usize);

/// One reported problem
#[derive(Debug, Clone, Serialize)]
struct Finding {
    kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    variant: Option<String>,
    message: String,
}

impl Finding {
    fn from_error(err: &HangarError) -> Self {
        Self {
            kind: err.kind().to_string(),
            variant: err.variant().map(str::to_string),
            message: err.to_string(),
        }
    }
}

impl std::fmt::Display for Finding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.kind)
    }
}

/// Errors and warnings from one validation run
#[derive(Debug, Default)]
struct Report {
    errors: Vec<Finding>,
    warnings: Vec<Finding>,
}

impl Report {
    fn passed(&self) -> bool {
        self.errors.is_empty()
    }
}

impl ValidateCommand {
    /// Execute the validate command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(strict = self.strict, "executing validate command");
        let cwd = std::env::current_dir()?;

        let loaded = cli.load_config(&cwd);
        let report = self.check(&loaded);
        let passed = report.passed();
        let config_path = loaded.as_ref().ok().and_then(|l| l.path.as_ref());

        match cli.format {
            OutputFormat::Json => {
                let output = serde_json::json!({
                    "valid": passed,
                    "config_path": config_path.map(|p| p.to_string_lossy().to_string()),
                    "errors": report.errors,
                    "warnings": report.warnings
                });
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_text(&report, config_path.map(|p| p.as_path()));
                }
            }
        }

        if !passed {
            return Err(ValidationFailed(report.errors.len()).into());
        }

        Ok(())
    }

    /// Run every check against a loaded (or failed) configuration
    fn check(&self, loaded: &hangar_core::Result<LoadedConfig>) -> Report {
        let mut report = Report::default();

        match loaded {
            Ok(loaded) => {
                if loaded.path.is_none() {
                    report.warnings.push(Finding {
                        kind: "missing-config".to_string(),
                        variant: None,
                        message: "No configuration file found, using defaults".to_string(),
                    });
                }

                match resolve_project(&loaded.config, &loaded.root) {
                    Ok(resolution) => {
                        report
                            .warnings
                            .extend(resolution.diagnostics().iter().map(|d| Finding {
                                kind: d.kind.as_str().to_string(),
                                variant: d.variant.clone(),
                                message: d.message.clone(),
                            }));
                    }
                    Err(e) => report.errors.push(Finding::from_error(&e)),
                }
            }
            Err(e) => report.errors.push(Finding::from_error(e)),
        }

        // If strict, promote warnings to errors
        if self.strict {
            report.errors.append(&mut report.warnings);
        }

        report
    }
}

fn print_text(report: &Report, config_path: Option<&std::path::Path>) {
    println!("{}", style("Validation Results").bold());
    println!();

    if let Some(path) = config_path {
        println!("Config: {}", style(path.display()).cyan());
        println!();
    }

    if !report.errors.is_empty() {
        println!("{}", style("Errors:").red().bold());
        for error in &report.errors {
            println!("  {} {}", style("✗").red(), error);
        }
        println!();
    }

    if !report.warnings.is_empty() {
        println!("{}", style("Warnings:").yellow().bold());
        for warning in &report.warnings {
            println!("  {} {}", style("!").yellow(), warning);
        }
        println!();
    }

    if report.passed() {
        if report.warnings.is_empty() {
            println!("{}", style("✓ All checks passed").green().bold());
        } else {
            println!(
                "{} with {} warning(s)",
                style("✓ Validation passed").green().bold(),
                report.warnings.len()
            );
        }
    }
}
