//! Configuration management for plugdoc.
//!
//! Parses `plugdoc.toml` with serde and discovers it in the current directory
//! or any parent. CLI values are applied on top via [`CliSettings`].
//!
//! ```toml
//! [site]
//! title = "Cisco Meraki Collection"
//! version = "${COLLECTION_VERSION:-dev}"
//!
//! [build]
//! output_dir = "site"
//! inline_styles = false
//!
//! # Optional. Without it, `<collection>_` is stripped from each plugin name
//! # and the first remaining word becomes the group.
//! [index]
//! strip_prefix = "meraki_"
//! groups = ["appliance", "camera", "switch", "wireless"]
//! ```
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `site.title`
//! - `site.description`
//! - `site.version`
//! - `build.output_dir`

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "plugdoc.toml";

/// Default site title.
const DEFAULT_TITLE: &str = "Ansible Collection Documentation";

/// Default output directory, relative to the config file or working directory.
const DEFAULT_OUTPUT_DIR: &str = "site";

/// CLI settings that override configuration file values.
///
/// Only `Some` values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override site title.
    pub title: Option<String>,
    /// Override collection description.
    pub description: Option<String>,
    /// Override collection version.
    pub version: Option<String>,
    /// Override output directory.
    pub output_dir: Option<PathBuf>,
    /// Override inline styles flag.
    pub inline_styles: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site metadata shown on the index page.
    pub site: SiteConfig,
    /// Build options (paths are relative strings from TOML).
    build: BuildConfigRaw,
    /// Index page grouping.
    pub index: IndexConfig,

    /// Resolved build configuration (set after loading).
    #[serde(skip)]
    pub build_resolved: BuildConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site metadata.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Title of the index page.
    pub title: String,
    /// Collection description shown under the title.
    pub description: Option<String>,
    /// Collection version shown as a badge.
    pub version: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: DEFAULT_TITLE.to_owned(),
            description: None,
            version: None,
        }
    }
}

/// Raw build configuration as parsed from TOML.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct BuildConfigRaw {
    output_dir: Option<String>,
    inline_styles: Option<bool>,
}

/// Resolved build configuration with an absolute output directory.
#[derive(Debug, Default)]
pub struct BuildConfig {
    /// Directory the site is written to.
    pub output_dir: PathBuf,
    /// Embed the stylesheet in every page instead of writing `styles.css`.
    pub inline_styles: bool,
}

/// How plugins are grouped on the index page.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
pub struct IndexConfig {
    /// Prefix removed from the short plugin name before grouping.
    pub strip_prefix: Option<String>,
    /// Known product areas; the first one prefixing the name wins.
    pub groups: Vec<String>,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.version`").
        field: String,
        /// Error message (e.g., "${`COLLECTION_VERSION`} not set").
        message: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `plugdoc.toml` in the current directory and its parents, falling
    /// back to defaults.
    ///
    /// CLI settings are applied last and take precedence over file values.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// an environment variable is missing, or validation fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
            config.validate()?;
        }

        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(title) = &settings.title {
            self.site.title.clone_from(title);
        }
        if let Some(description) = &settings.description {
            self.site.description = Some(description.clone());
        }
        if let Some(version) = &settings.version {
            self.site.version = Some(version.clone());
        }
        if let Some(output_dir) = &settings.output_dir {
            self.build_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(inline_styles) = settings.inline_styles {
            self.build_resolved.inline_styles = inline_styles;
        }
    }

    /// Search for config file in current directory and parents.
    fn discover_config() -> Option<PathBuf> {
        let mut current = std::env::current_dir().ok()?;
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Create default config with paths relative to current working directory.
    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    /// Create default config with paths relative to given base directory.
    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            build: BuildConfigRaw::default(),
            index: IndexConfig::default(),
            build_resolved: BuildConfig {
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                inline_styles: false,
            },
            config_path: None,
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site.title, "site.title")?;
        self.validate_index()?;
        Ok(())
    }

    /// Validate index grouping configuration.
    fn validate_index(&self) -> Result<(), ConfigError> {
        if let Some(prefix) = &self.index.strip_prefix {
            require_non_empty(prefix, "index.strip_prefix")?;
        }
        for group in &self.index.groups {
            require_non_empty(group, "index.groups entry")?;
            if group.contains('.') {
                return Err(ConfigError::Validation(format!(
                    "index.groups entry '{group}' cannot contain '.'"
                )));
            }
        }
        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;

        if let Some(ref description) = self.site.description {
            self.site.description = Some(expand::expand_env(description, "site.description")?);
        }
        if let Some(ref version) = self.site.version {
            self.site.version = Some(expand::expand_env(version, "site.version")?);
        }
        if let Some(ref output_dir) = self.build.output_dir {
            self.build.output_dir = Some(expand::expand_env(output_dir, "build.output_dir")?);
        }

        Ok(())
    }

    /// Resolve the output directory relative to the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.build_resolved = BuildConfig {
            output_dir: config_dir.join(
                self.build
                    .output_dir
                    .as_deref()
                    .unwrap_or(DEFAULT_OUTPUT_DIR),
            ),
            inline_styles: self.build.inline_styles.unwrap_or(false),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site.title, "Ansible Collection Documentation");
        assert!(config.site.description.is_none());
        assert!(config.site.version.is_none());
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/test/site"));
        assert!(!config.build_resolved.inline_styles);
        assert!(config.index.strip_prefix.is_none());
        assert!(config.index.groups.is_empty());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.site.title, "Ansible Collection Documentation");
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
title = "Meraki Collection"
description = "Modules for Cisco Meraki"
version = "2.18.0"

[build]
output_dir = "public"
inline_styles = true

[index]
strip_prefix = "meraki_"
groups = ["appliance", "switch", "wireless"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.title, "Meraki Collection");
        assert_eq!(config.site.description.as_deref(), Some("Modules for Cisco Meraki"));
        assert_eq!(config.site.version.as_deref(), Some("2.18.0"));
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/project/public"));
        assert!(config.build_resolved.inline_styles);
        assert_eq!(config.index.strip_prefix.as_deref(), Some("meraki_"));
        assert_eq!(config.index.groups, vec!["appliance", "switch", "wireless"]);
    }

    #[test]
    fn test_apply_cli_settings_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            title: Some("Custom".to_owned()),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.title, "Custom");
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/test/site")); // Unchanged
    }

    #[test]
    fn test_apply_cli_settings_multiple() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            description: Some("Desc".to_owned()),
            version: Some("1.0.0".to_owned()),
            output_dir: Some(PathBuf::from("/out")),
            inline_styles: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site.description.as_deref(), Some("Desc"));
        assert_eq!(config.site.version.as_deref(), Some("1.0.0"));
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/out"));
        assert!(config.build_resolved.inline_styles);
    }

    #[test]
    fn test_load_rejects_empty_cli_title() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("plugdoc.toml");
        std::fs::write(&path, "[site]\ntitle = \"Meraki\"\n").unwrap();
        let overrides = CliSettings {
            title: Some("  ".to_owned()),
            ..Default::default()
        };

        let result = Config::load(Some(&path), Some(&overrides));

        assert!(matches!(result, Err(ConfigError::Validation(msg)) if msg.contains("site.title")));
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site.title, "Ansible Collection Documentation");
        assert!(!config.build_resolved.inline_styles);
    }

    #[test]
    fn test_expand_env_vars() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("PLUGDOC_CFG_VERSION", "3.0.1");
            std::env::set_var("PLUGDOC_CFG_OUT", "dist");
        }
        let toml = r#"
[site]
version = "${PLUGDOC_CFG_VERSION}"
description = "${PLUGDOC_CFG_DESC:-Collection modules}"

[build]
output_dir = "${PLUGDOC_CFG_OUT}/html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve_paths(Path::new("/project"));

        assert_eq!(config.site.version.as_deref(), Some("3.0.1"));
        assert_eq!(config.site.description.as_deref(), Some("Collection modules"));
        assert_eq!(config.build_resolved.output_dir, PathBuf::from("/project/dist/html"));
        unsafe {
            std::env::remove_var("PLUGDOC_CFG_VERSION");
            std::env::remove_var("PLUGDOC_CFG_OUT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing_required_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("PLUGDOC_CFG_MISSING");
        }
        let toml = r#"
[site]
title = "${PLUGDOC_CFG_MISSING}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(
            matches!(err, ConfigError::EnvVar { ref field, .. } if field == "site.title"),
            "Expected ConfigError::EnvVar, got {err:?}"
        );
    }

    #[test]
    fn test_validate_default_config_passes() {
        Config::default_with_base(Path::new("/test")).validate().unwrap();
    }

    #[test]
    fn test_validate_empty_title() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site.title = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("site.title"));
    }

    #[test]
    fn test_validate_index_groups() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.index.groups = vec!["switch".to_owned(), String::new()];
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.index.groups = vec!["cisco.switch".to_owned()];
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));

        config.index.groups = vec!["switch".to_owned()];
        config.index.strip_prefix = Some(String::new());
        assert!(matches!(config.validate(), Err(ConfigError::Validation(_))));
    }

    #[test]
    fn test_load_explicit_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\ntitle = \"From File\"\n\n[build]\noutput_dir = \"out\"\n",
        )
        .unwrap();

        let overrides = CliSettings {
            inline_styles: Some(true),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&overrides)).unwrap();

        assert_eq!(config.site.title, "From File");
        assert_eq!(config.build_resolved.output_dir, temp_dir.path().join("out"));
        assert!(config.build_resolved.inline_styles);
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("missing.toml");
        let result = Config::load(Some(&path), None);
        assert!(matches!(result, Err(ConfigError::NotFound(_))));
    }

    #[test]
    fn test_load_invalid_toml() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\ntitle = ").unwrap();
        assert!(matches!(
            Config::load(Some(&path), None),
            Err(ConfigError::Parse(_))
        ));
    }
}
