//! Configuration loading

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::error::{ConfigError, Result};

use super::defaults::config_file_names;
use super::types::HangarConfig;
use super::validation::validate_config;

/// Load configuration from a file
pub fn load_config(path: &Path) -> Result<HangarConfig> {
    let format = if path.extension().is_some_and(|e| e == "toml") {
        "TOML"
    } else {
        "YAML"
    };
    info!(path = %path.display(), format, "loading config");

    let content = std::fs::read_to_string(path).map_err(ConfigError::Io)?;

    let config: HangarConfig = if format == "TOML" {
        toml::from_str(&content).map_err(ConfigError::TomlError)?
    } else {
        serde_yaml::from_str(&content).map_err(ConfigError::YamlError)?
    };

    validate_config(&config)?;
    debug!(path = %path.display(), "config loaded and validated");
    Ok(config)
}

/// Find configuration file in directory or parent directories.
///
/// The first matching name in the nearest directory wins.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    debug!(start_dir = %start_dir.display(), "searching for config file");
    let mut current = start_dir.to_path_buf();

    loop {
        for name in config_file_names() {
            let config_path = current.join(name);
            if config_path.exists() {
                info!(path = %config_path.display(), "found config file");
                return Some(config_path);
            }
        }

        if !current.pop() {
            break;
        }
    }

    debug!("no config file found");
    None
}

/// Load configuration or use defaults.
///
/// Only a missing file falls back to defaults; a broken file is an error.
pub fn load_config_or_default(dir: &Path) -> Result<(HangarConfig, Option<PathBuf>)> {
    match find_config(dir) {
        Some(path) => {
            let config = load_config(&path)?;
            Ok((config, Some(path)))
        }
        None => {
            warn!(dir = %dir.display(), "no config found, using defaults");
            Ok((HangarConfig::default(), None))
        }
    }
}

/// Directory that relative paths in a config file resolve against
pub fn project_root(config_path: Option<&Path>, fallback: &Path) -> PathBuf {
    config_path
        .and_then(Path::parent)
        .map(Path::to_path_buf)
        .unwrap_or_else(|| fallback.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HangarError;
    use tempfile::TempDir;

    #[test]
    fn test_find_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hangar.toml");
        std::fs::write(&config_path, "variants = [\"debug\"]").unwrap();

        let found = find_config(temp.path());
        assert_eq!(found, Some(config_path));
    }

    #[test]
    fn test_find_config_prefers_toml_over_yaml() {
        let temp = TempDir::new().unwrap();
        let toml_path = temp.path().join("hangar.toml");
        let yaml_path = temp.path().join("hangar.yaml");
        std::fs::write(&toml_path, "variants = [\"debug\"]").unwrap();
        std::fs::write(&yaml_path, "variants: [debug]").unwrap();

        let found = find_config(temp.path()).unwrap();
        assert_eq!(found, toml_path);
    }

    #[test]
    fn test_find_config_in_parent_dir() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hangar.toml");
        std::fs::write(&config_path, "variants = [\"debug\"]").unwrap();
        let nested = temp.path().join("android").join("app");
        std::fs::create_dir_all(&nested).unwrap();

        let found = find_config(&nested).unwrap();
        assert_eq!(found, config_path);
    }

    #[test]
    fn test_load_config_toml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hangar.toml");
        std::fs::write(
            &config_path,
            "variants = [\"debug\", \"release\"]\n\
             secrets_file = \"android/key.properties\"\n\n\
             [signing]\nrequire_for_release = false\n\n\
             [policy.release]\nminify = true\nshrink_resources = true\n\n\
             [properties]\nnamespace = \"com.example.focusnoise\"\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.secrets_file, PathBuf::from("android/key.properties"));
        assert!(!config.signing.require_for_release);
        assert_eq!(config.signing.release_variants, vec!["release"]);
        let release = &config.policy["release"];
        assert!(release.minify && release.shrink_resources);
        assert!(!config.policy.contains_key("debug"));
        assert_eq!(
            config.properties.get("namespace").map(String::as_str),
            Some("com.example.focusnoise")
        );
    }

    #[test]
    fn test_load_config_yaml() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hangar.yaml");
        std::fs::write(
            &config_path,
            "variants: [debug, staging]\npolicy:\n  staging:\n    minify: true\n",
        )
        .unwrap();

        let config = load_config(&config_path).unwrap();
        assert_eq!(config.variants, vec!["debug", "staging"]);
        assert!(config.policy["staging"].minify);
        assert!(!config.policy["staging"].shrink_resources);
    }

    #[test]
    fn test_load_config_rejects_invalid_values() {
        let temp = TempDir::new().unwrap();
        let config_path = temp.path().join("hangar.toml");
        std::fs::write(&config_path, "variants = []").unwrap();

        assert!(matches!(
            load_config(&config_path),
            Err(HangarError::Config(ConfigError::InvalidValue { .. }))
        ));
    }

    #[test]
    fn test_default_when_missing() {
        let temp = TempDir::new().unwrap();
        let (config, path) = load_config_or_default(temp.path()).unwrap();
        assert_eq!(config, HangarConfig::default());
        assert!(path.is_none());
    }

    #[test]
    fn test_project_root() {
        let fallback = Path::new("/work");
        assert_eq!(
            project_root(Some(Path::new("/repo/hangar.toml")), fallback),
            PathBuf::from("/repo")
        );
        assert_eq!(project_root(None, fallback), PathBuf::from("/work"));
    }
}
