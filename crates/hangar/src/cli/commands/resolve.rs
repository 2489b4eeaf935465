//! Resolve command

use clap::Args;
use console::style;
use tracing::info;

use hangar_core::{resolve_project, HangarConfig, Resolution, ResolvedVariantConfig};

use crate::cli::output::{flag, header, key_value, path_style, variant_style, warning};
use crate::cli::{Cli, LoadedConfig, OutputFormat};

/// Resolve every build variant and print the result
#[derive(Debug, Args)]
pub struct ResolveCommand {
    /// Allow release variants to use a fallback signing identity
    #[arg(long)]
    pub allow_unsigned_release: bool,

    /// Only resolve these variants, in this order
    #[arg(long = "variant", value_name = "NAME")]
    pub variants: Vec<String>,
}

impl ResolveCommand {
    /// Execute the resolve command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(
            allow_unsigned_release = self.allow_unsigned_release,
            variants = ?self.variants,
            "executing resolve command"
        );
        let cwd = std::env::current_dir()?;
        let mut loaded = cli.load_config(&cwd)?;

        self.apply_overrides(&mut loaded.config);

        let resolution = resolve_project(&loaded.config, &loaded.root)?;

        match cli.format {
            OutputFormat::Json => {
                let output = render_json(&loaded, &resolution);
                println!("{}", serde_json::to_string_pretty(&output)?);
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    print_text(&resolution, cli.verbose);
                    if cli.verbose && !loaded.config.properties.is_empty() {
                        println!("{}", header("Properties"));
                        for (key, value) in &loaded.config.properties {
                            println!("{}", key_value(key, value));
                        }
                        println!();
                    }
                }
            }
        }

        Ok(())
    }

    /// Apply command-line flags on top of the loaded config
    fn apply_overrides(&self, config: &mut HangarConfig) {
        if self.allow_unsigned_release {
            config.signing.require_for_release = false;
        }
        if !self.variants.is_empty() {
            config.variants = self.variants.clone();
        }
    }
}

fn render_json(loaded: &LoadedConfig, resolution: &Resolution) -> serde_json::Value {
    serde_json::json!({
        "config_path": loaded.path.as_ref().map(|p| p.to_string_lossy().to_string()),
        "project_root": loaded.root.to_string_lossy(),
        "variants": resolution.iter().collect::<Vec<_>>(),
        "diagnostics": resolution.diagnostics(),
        "properties": &loaded.config.properties,
    })
}

fn print_text(resolution: &Resolution, verbose: bool) {
    println!("{}", header("Resolved Variants"));
    println!();

    for config in resolution.iter() {
        print_variant(config, verbose);
    }

    if !resolution.diagnostics().is_empty() {
        println!("{}", style("Warnings:").yellow().bold());
        for diagnostic in resolution.diagnostics() {
            warning(&diagnostic.to_string());
        }
        println!();
    }
}

fn print_variant(config: &ResolvedVariantConfig, verbose: bool) {
    let policy = &config.variant;
    println!("  {}", variant_style().apply_to(&policy.name));
    println!("{}", key_value("minify", &flag(policy.minify)));
    println!("{}", key_value("shrink resources", &flag(policy.shrink_resources)));

    if policy.rule_files.is_empty() {
        println!("{}", key_value("rule files", &style("none").dim().to_string()));
    } else {
        println!("{}", key_value("rule files", ""));
        for path in &policy.rule_files {
            println!("      {}", path_style().apply_to(path.display()));
        }
    }

    let signing = &config.signing;
    let publishable = if signing.is_publishable() {
        style("publishable").green()
    } else {
        style("not publishable").red()
    };
    println!(
        "{}",
        key_value("signing", &format!("{} [{}]", signing, publishable))
    );
    if verbose && !signing.missing_keys.is_empty() {
        println!(
            "{}",
            key_value("missing secrets", &signing.missing_keys.join(", "))
        );
    }
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Commands;
    use clap::Parser;
    use tempfile::TempDir;

    const PROJECT_CONFIG: &str = "variants = [\"debug\", \"release\"]\n\n\
        [policy.debug]\n\n\
        [policy.release]\n\n\
        [properties]\n\
        namespace = \"com.example.focusnoise\"\n\
        \"flutter.versionName\" = \"1.0.0\"\n";

    fn project() -> TempDir {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("hangar.toml"), PROJECT_CONFIG).unwrap();
        temp
    }

    fn run(temp: &TempDir, args: &[&str]) -> hangar_core::Result<serde_json::Value> {
        let cli = Cli::try_parse_from(args).unwrap();
        let cmd = match &cli.command {
            Commands::Resolve(cmd) => cmd,
            other => panic!("expected resolve, got {:?}", other),
        };
        let mut loaded = cli.load_config(temp.path()).unwrap();
        cmd.apply_overrides(&mut loaded.config);
        let resolution = resolve_project(&loaded.config, &loaded.root)?;
        Ok(render_json(&loaded, &resolution))
    }

    #[test]
    fn test_properties_copied_verbatim() {
        let temp = project();
        let output = run(&temp, &["hangar", "resolve", "--allow-unsigned-release"]).unwrap();

        assert_eq!(
            output["properties"],
            serde_json::json!({
                "flutter.versionName": "1.0.0",
                "namespace": "com.example.focusnoise",
            })
        );
        let config_path = temp.path().join("hangar.toml");
        assert_eq!(output["config_path"], config_path.to_string_lossy().as_ref());
    }

    #[test]
    fn test_variant_flag_limits_and_orders_run() {
        let temp = project();
        let args = [
            "hangar",
            "resolve",
            "--allow-unsigned-release",
            "--variant",
            "release",
            "--variant",
            "debug",
        ];
        let output = run(&temp, &args).unwrap();

        let names: Vec<_> = output["variants"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v["variant"]["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["release", "debug"]);

        let only_debug = run(&temp, &["hangar", "resolve", "--variant", "debug"]).unwrap();
        assert_eq!(only_debug["variants"].as_array().unwrap().len(), 1);
    }

    #[test]
    fn test_release_needs_signing_unless_allowed() {
        let temp = project();

        let err = run(&temp, &["hangar", "resolve"]).unwrap_err();
        assert_eq!(err.kind(), "signing-required");
        assert_eq!(err.variant(), Some("release"));

        let output = run(&temp, &["hangar", "resolve", "--allow-unsigned-release"]).unwrap();
        assert_eq!(output["variants"][1]["signing"]["is_fallback"], true);
    }
}
