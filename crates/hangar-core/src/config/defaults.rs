//! Default configuration values

use super::types::HangarConfig;

/// Default configuration file name (TOML)
pub const DEFAULT_CONFIG_TOML: &str = "hangar.toml";

/// Default configuration file name (YAML)
pub const DEFAULT_CONFIG_YAML: &str = "hangar.yaml";

/// Get list of config file names to search for
pub fn config_file_names() -> Vec<&'static str> {
    vec![
        DEFAULT_CONFIG_TOML,
        DEFAULT_CONFIG_YAML,
        ".hangar.toml",
        ".hangar.yaml",
    ]
}

/// Generate default configuration YAML
pub fn default_config_yaml() -> String {
    let config = HangarConfig::default();
    serde_yaml::to_string(&config).unwrap_or_else(|_| DEFAULT_CONFIG_TEMPLATE.to_string())
}

/// Default configuration template
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Hangar Configuration

# Variants are resolved in this order; resolution stops at the first failure.
variants = ["debug", "release"]

# Signing secrets (storeFile, storePassword, keyAlias, keyPassword).
# A missing file is allowed: variants then use a fallback identity.
secrets_file = "key.properties"

[signing]
require_for_release = true
release_variants = ["release"]

[rules]
base = "proguard-rules.pro"
override_pattern = "proguard-rules-{variant}.pro"

[policy.debug]
minify = false
shrink_resources = false

[policy.release]
minify = false
shrink_resources = false

[properties]
"#;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_template_matches_defaults() {
        let parsed: HangarConfig = toml::from_str(DEFAULT_CONFIG_TEMPLATE).unwrap();
        assert_eq!(parsed, HangarConfig::default());
    }

    #[test]
    fn test_default_yaml_round_trips() {
        let parsed: HangarConfig = serde_yaml::from_str(&default_config_yaml()).unwrap();
        assert_eq!(parsed, HangarConfig::default());
    }
}
