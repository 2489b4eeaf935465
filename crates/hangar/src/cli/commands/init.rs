//! Init command

use std::path::PathBuf;

use clap::{Args, ValueEnum};
use console::style;
use dialoguer::{Confirm, Select};
use tracing::info;

use hangar_core::config::defaults::{
    default_config_yaml, DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML, DEFAULT_CONFIG_YAML,
};

use crate::cli::output::{path_style, success};
use crate::cli::Cli;

/// Configuration file format
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ConfigFormat {
    Toml,
    Yaml,
}

impl ConfigFormat {
    fn file_name(self) -> &'static str {
        match self {
            Self::Toml => DEFAULT_CONFIG_TOML,
            Self::Yaml => DEFAULT_CONFIG_YAML,
        }
    }

    fn render(self) -> String {
        match self {
            Self::Toml => DEFAULT_CONFIG_TEMPLATE.to_string(),
            Self::Yaml => default_config_yaml(),
        }
    }
}

/// Write a default Hangar configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Use defaults without prompting
    #[arg(short = 'y', long)]
    pub yes: bool,

    /// Configuration format (prompted when omitted)
    #[arg(long = "config-format", value_enum)]
    pub config_format: Option<ConfigFormat>,

    /// Output file path
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, yes = self.yes, "executing init command");
        let cwd = std::env::current_dir()?;

        let format = match self.config_format {
            Some(format) => format,
            None if self.yes => ConfigFormat::Toml,
            None => {
                let formats = [ConfigFormat::Toml, ConfigFormat::Yaml];
                let selection = Select::new()
                    .with_prompt("Configuration format")
                    .items(&["toml", "yaml"])
                    .default(0)
                    .interact()?;
                formats[selection]
            }
        };

        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(format.file_name()));

        if config_path.exists() && !self.force {
            if self.yes {
                anyhow::bail!(
                    "Configuration file already exists at {}. Use --force to overwrite.",
                    config_path.display()
                );
            }

            let overwrite = Confirm::new()
                .with_prompt(format!(
                    "Configuration file already exists at {}. Overwrite?",
                    config_path.display()
                ))
                .default(false)
                .interact()?;

            if !overwrite {
                println!("{}", style("Aborted.").yellow());
                return Ok(());
            }
        }

        std::fs::write(&config_path, format.render())?;
        info!(path = %config_path.display(), "wrote configuration");

        if !cli.quiet {
            success(&format!(
                "Created configuration at {}",
                path_style().apply_to(config_path.display())
            ));
            println!();
            println!("Next steps:");
            println!("  1. Edit {} to set the policy for each variant", config_path.display());
            println!("  2. Add your signing secrets to key.properties");
            println!("  3. Run {} to check your setup", style("hangar validate").cyan());
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hangar_core::config::load_config;
    use hangar_core::HangarConfig;

    #[test]
    fn test_rendered_configs_load_as_defaults() {
        let temp = tempfile::TempDir::new().unwrap();
        for format in [ConfigFormat::Toml, ConfigFormat::Yaml] {
            let path = temp.path().join(format.file_name());
            std::fs::write(&path, format.render()).unwrap();
            assert_eq!(load_config(&path).unwrap(), HangarConfig::default());
        }
    }
}
