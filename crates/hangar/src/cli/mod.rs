//! CLI definition and command handling

pub mod commands;
pub mod output;

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use hangar_core::config::{load_config, load_config_or_default, project_root};
use hangar_core::HangarConfig;

use commands::{InitCommand, ResolveCommand, ValidateCommand};

/// Hangar - Build variant configuration resolver
#[derive(Debug, Parser)]
#[command(name = "hangar")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress output except errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Working directory
    #[arg(short = 'C', long, global = true)]
    pub directory: Option<PathBuf>,

    /// Configuration file (skips discovery)
    #[arg(long, global = true, env = "HANGAR_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Output format for CLI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output
    Json,
}

/// Available commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Write a default Hangar configuration
    Init(InitCommand),

    /// Resolve every build variant and print the result
    Resolve(ResolveCommand),

    /// Validate configuration, secrets and rule files
    Validate(ValidateCommand),
}

/// A loaded configuration and where it came from
#[derive(Debug)]
pub struct LoadedConfig {
    pub config: HangarConfig,
    /// Config file, or `None` when running on defaults
    pub path: Option<PathBuf>,
    /// Directory relative paths resolve against
    pub root: PathBuf,
}

impl Cli {
    /// Execute the CLI command
    pub fn execute(self) -> anyhow::Result<()> {
        // Change to specified directory if provided
        if let Some(dir) = &self.directory {
            std::env::set_current_dir(dir)?;
        }

        match self.command {
            Commands::Init(ref cmd) => cmd.execute(&self),
            Commands::Resolve(ref cmd) => cmd.execute(&self),
            Commands::Validate(ref cmd) => cmd.execute(&self),
        }
    }

    /// Load the explicit `--config` file, or discover one from `cwd`
    pub fn load_config(&self, cwd: &Path) -> hangar_core::Result<LoadedConfig> {
        let (config, path) = match &self.config {
            Some(path) => {
                let path = cwd.join(path);
                (load_config(&path)?, Some(path))
            }
            None => load_config_or_default(cwd)?,
        };

        let root = project_root(path.as_deref(), cwd);
        Ok(LoadedConfig { config, path, root })
    }
}
