//! Configuration management for Clarion.
//!
//! Parses `clarion.toml` with serde and discovers it in the current
//! directory or its parents. Paths are resolved relative to the config
//! file. CLI settings can be applied during load via [`CliSettings`].
//!
//! ## Environment Variable Expansion
//!
//! String values support `${VAR}` (error if unset) and `${VAR:-default}`.
//!
//! Expanded fields:
//! - `site.name`
//! - `site.source_dir`
//! - `site.output_dir`
//! - `validator.url`

mod expand;

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "clarion.toml";

const DEFAULT_SOURCE_DIR: &str = "docs";
const DEFAULT_OUTPUT_DIR: &str = "site";
const DEFAULT_VALIDATOR_TIMEOUT_SECS: u64 = 10;
const MAX_VALIDATOR_TIMEOUT_SECS: u64 = 300;

/// WCAG levels accepted in `accessibility.wcag_level`.
const WCAG_LEVELS: [&str; 3] = ["A", "AA", "AAA"];

/// CLI settings that override configuration file values.
///
/// Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    pub source_dir: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    /// Override Nu HTML Checker URL.
    pub validator_url: Option<String>,
    pub fail_on_issues: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,
    /// Accessibility enhancement and audit settings.
    pub accessibility: AccessibilityConfig,
    /// Markup validator configuration.
    validator: ValidatorConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Resolved validator configuration (set after loading).
    #[serde(skip)]
    pub validator_resolved: ValidatorConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    name: Option<String>,
    source_dir: Option<String>,
    output_dir: Option<String>,
    language: Option<String>,
    theme: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug)]
pub struct SiteConfig {
    /// Site title shown in page titles and navigation.
    pub name: String,
    /// Directory containing markdown sources.
    pub source_dir: PathBuf,
    /// Directory the generated site is written to.
    pub output_dir: PathBuf,
    /// Page language used when frontmatter does not set one.
    pub language: String,
    /// Theme stylesheet name.
    pub theme: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            name: "Documentation".to_owned(),
            source_dir: PathBuf::from(DEFAULT_SOURCE_DIR),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            language: "en".to_owned(),
            theme: "light".to_owned(),
        }
    }
}

/// Accessibility settings. Every audit check is enabled by default.
#[derive(Debug, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct AccessibilityConfig {
    pub check_wcag: bool,
    pub check_heading_hierarchy: bool,
    pub check_color_contrast: bool,
    pub validate_html: bool,
    pub check_aria: bool,
    pub check_keyboard_accessibility: bool,
    pub check_screen_reader_announcements: bool,
    /// Annotate external links with an "(external link)" label.
    pub indicate_external_links: bool,
    /// Target WCAG level (`A`, `AA` or `AAA`). Reported, not enforced.
    pub wcag_level: String,
    /// Exit with an error status when the audit reports issues.
    pub fail_on_issues: bool,
}

impl Default for AccessibilityConfig {
    fn default() -> Self {
        Self {
            check_wcag: true,
            check_heading_hierarchy: true,
            check_color_contrast: true,
            validate_html: true,
            check_aria: true,
            check_keyboard_accessibility: true,
            check_screen_reader_announcements: true,
            indicate_external_links: true,
            wcag_level: "AA".to_owned(),
            fail_on_issues: false,
        }
    }
}

impl AccessibilityConfig {
    /// Whether any audit check is enabled.
    #[must_use]
    pub fn any_check_enabled(&self) -> bool {
        self.check_wcag
            || self.check_heading_hierarchy
            || self.check_color_contrast
            || self.validate_html
            || self.check_aria
            || self.check_keyboard_accessibility
            || self.check_screen_reader_announcements
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct ValidatorConfigRaw {
    url: Option<String>,
    timeout_secs: Option<u64>,
}

/// Resolved validator configuration.
#[derive(Debug)]
pub struct ValidatorConfig {
    /// Nu HTML Checker URL. The built-in validator is used when unset.
    pub url: Option<String>,
    /// Request timeout.
    pub timeout: Duration,
}

impl Default for ValidatorConfig {
    fn default() -> Self {
        Self {
            url: None,
            timeout: Duration::from_secs(DEFAULT_VALIDATOR_TIMEOUT_SECS),
        }
    }
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
        /// Config field path (e.g., "`validator.url`").
        field: String,
        /// Error message (e.g., "${`NU_VALIDATOR_URL`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

fn require_http_url(url: &str, field: &str) -> Result<(), ConfigError> {
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::Validation(format!(
            "{field} must start with http:// or https://"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `clarion.toml` in the current directory and its parents, falling
    /// back to defaults relative to the current directory.
    ///
    /// CLI settings are applied after loading and path resolution.
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

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.site_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(output_dir) = &settings.output_dir {
            self.site_resolved.output_dir.clone_from(output_dir);
        }
        if let Some(url) = &settings.validator_url {
            self.validator_resolved.url = Some(url.clone());
        }
        if let Some(fail_on_issues) = settings.fail_on_issues {
            self.accessibility.fail_on_issues = fail_on_issues;
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

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfigRaw::default(),
            accessibility: AccessibilityConfig::default(),
            validator: ValidatorConfigRaw::default(),
            site_resolved: SiteConfig {
                source_dir: base.join(DEFAULT_SOURCE_DIR),
                output_dir: base.join(DEFAULT_OUTPUT_DIR),
                ..SiteConfig::default()
            },
            validator_resolved: ValidatorConfig::default(),
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        // Expand environment variables before path resolution
        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve(config_dir);
        config.config_path = Some(path.to_path_buf());

        config.validate()?;

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Called automatically after loading from file.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.site_resolved.name, "site.name")?;
        require_non_empty(&self.site_resolved.language, "site.language")?;

        let level = self.accessibility.wcag_level.trim().to_ascii_uppercase();
        if !WCAG_LEVELS.contains(&level.as_str()) {
            return Err(ConfigError::Validation(format!(
                "accessibility.wcag_level must be one of A, AA, AAA (got \"{}\")",
                self.accessibility.wcag_level
            )));
        }

        if let Some(ref url) = self.validator_resolved.url {
            require_http_url(url, "validator.url")?;
        }

        let timeout = self.validator_resolved.timeout.as_secs();
        if timeout == 0 {
            return Err(ConfigError::Validation(
                "validator.timeout_secs must be greater than 0".to_owned(),
            ));
        }
        if timeout > MAX_VALIDATOR_TIMEOUT_SECS {
            return Err(ConfigError::Validation(format!(
                "validator.timeout_secs cannot exceed {MAX_VALIDATOR_TIMEOUT_SECS}"
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let site = &mut self.site;
        for (value, field) in [
            (&mut site.name, "site.name"),
            (&mut site.source_dir, "site.source_dir"),
            (&mut site.output_dir, "site.output_dir"),
        ] {
            if let Some(raw) = value {
                *raw = expand::expand_env(raw, field)?;
            }
        }

        if let Some(ref url) = self.validator.url {
            self.validator.url = Some(expand::expand_env(url, "validator.url")?);
        }

        Ok(())
    }

    /// Resolve raw values against defaults and the config directory.
    ///
    /// An empty `validator.url` (e.g. `${NU_VALIDATOR_URL:-}`) means unset.
    fn resolve(&mut self, config_dir: &Path) {
        let defaults = SiteConfig::default();
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));

        self.site_resolved = SiteConfig {
            name: self.site.name.clone().unwrap_or(defaults.name),
            source_dir: resolve(self.site.source_dir.as_deref(), DEFAULT_SOURCE_DIR),
            output_dir: resolve(self.site.output_dir.as_deref(), DEFAULT_OUTPUT_DIR),
            language: self.site.language.clone().unwrap_or(defaults.language),
            theme: self.site.theme.clone().unwrap_or(defaults.theme),
        };

        self.validator_resolved = ValidatorConfig {
            url: self
                .validator
                .url
                .as_deref()
                .map(str::trim)
                .filter(|u| !u.is_empty())
                .map(ToOwned::to_owned),
            timeout: Duration::from_secs(
                self.validator
                    .timeout_secs
                    .unwrap_or(DEFAULT_VALIDATOR_TIMEOUT_SECS),
            ),
        };
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/test"));
        assert_eq!(config.site_resolved.name, "Documentation");
        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/test/docs"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/test/site"));
        assert_eq!(config.site_resolved.language, "en");
        assert!(config.accessibility.check_wcag);
        assert!(config.accessibility.indicate_external_links);
        assert!(!config.accessibility.fail_on_issues);
        assert_eq!(config.accessibility.wcag_level, "AA");
        assert!(config.validator_resolved.url.is_none());
        assert_eq!(config.validator_resolved.timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_parse_minimal_config() {
        let mut config: Config = toml::from_str("").unwrap();
        config.resolve(Path::new("/project"));
        assert!(config.accessibility.any_check_enabled());
        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/project/docs"));
        config.validate().unwrap();
    }

    #[test]
    fn test_parse_full_config() {
        let toml = r#"
[site]
name = "Handbook"
source_dir = "content"
output_dir = "public"
language = "de"
theme = "dark"

[accessibility]
check_color_contrast = false
validate_html = false
indicate_external_links = false
wcag_level = "AAA"
fail_on_issues = true

[validator]
url = "http://localhost:8888/"
timeout_secs = 30
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve(Path::new("/project"));

        assert_eq!(config.site_resolved.name, "Handbook");
        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/project/content"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/project/public"));
        assert_eq!(config.site_resolved.language, "de");
        assert_eq!(config.site_resolved.theme, "dark");
        assert!(!config.accessibility.check_color_contrast);
        assert!(!config.accessibility.validate_html);
        assert!(config.accessibility.check_aria);
        assert!(!config.accessibility.indicate_external_links);
        assert!(config.accessibility.fail_on_issues);
        assert_eq!(
            config.validator_resolved.url.as_deref(),
            Some("http://localhost:8888/")
        );
        assert_eq!(config.validator_resolved.timeout, Duration::from_secs(30));
        config.validate().unwrap();
    }

    #[test]
    fn test_all_checks_disabled() {
        let toml = r"
[accessibility]
check_wcag = false
check_heading_hierarchy = false
check_color_contrast = false
validate_html = false
check_aria = false
check_keyboard_accessibility = false
check_screen_reader_announcements = false
";
        let config: Config = toml::from_str(toml).unwrap();
        assert!(!config.accessibility.any_check_enabled());
    }

    #[test]
    fn test_validate_wcag_level() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.accessibility.wcag_level = "aaa".to_owned();
        config.validate().unwrap();

        config.accessibility.wcag_level = "B".to_owned();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("wcag_level"));
    }

    #[test]
    fn test_validate_validator_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.validator_resolved.url = Some("localhost:8888".to_owned());
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("validator.url"));
    }

    #[test]
    fn test_validate_timeout_bounds() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.validator_resolved.timeout = Duration::ZERO;
        assert!(config.validate().is_err());
        config.validator_resolved.timeout = Duration::from_secs(301);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_empty_name() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.site_resolved.name = "  ".to_owned();
        let err = config.validate().unwrap_err();
        assert_eq!(err.to_string(), "Configuration error: site.name cannot be empty");
    }

    #[test]
    fn test_empty_validator_url_means_unset() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CLARION_TEST_NU_URL");
        }
        let toml = r#"
[validator]
url = "${CLARION_TEST_NU_URL:-}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve(Path::new("/project"));
        assert!(config.validator_resolved.url.is_none());
    }

    #[test]
    fn test_expand_env_vars_site() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("CLARION_TEST_OUT", "build/html");
        }
        let toml = r#"
[site]
output_dir = "${CLARION_TEST_OUT}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.expand_env_vars().unwrap();
        config.resolve(Path::new("/project"));
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/project/build/html")
        );
        unsafe {
            std::env::remove_var("CLARION_TEST_OUT");
        }
    }

    #[test]
    fn test_expand_env_vars_missing() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("CLARION_TEST_MISSING_URL");
        }
        let toml = r#"
[validator]
url = "${CLARION_TEST_MISSING_URL}"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        let err = config.expand_env_vars().unwrap_err();
        assert!(matches!(err, ConfigError::EnvVar { ref field, .. } if field == "validator.url"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default_with_base(Path::new("/test"));
        let overrides = CliSettings {
            output_dir: Some(PathBuf::from("/out")),
            fail_on_issues: Some(true),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/out"));
        assert_eq!(config.site_resolved.source_dir, PathBuf::from("/test/docs"));
        assert!(config.accessibility.fail_on_issues);
        assert!(config.validator_resolved.url.is_none());
    }

    #[test]
    fn test_apply_cli_settings_empty() {
        let mut config = Config::default_with_base(Path::new("/test"));
        config.apply_cli_settings(&CliSettings::default());
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/test/site"));
        assert!(!config.accessibility.fail_on_issues);
    }

    #[test]
    fn test_load_explicit_path() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\nname = \"Guide\"\nsource_dir = \"src\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.site_resolved.name, "Guide");
        assert_eq!(config.site_resolved.source_dir, dir.path().join("src"));
        assert_eq!(config.config_path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn test_load_missing_path() {
        let err = Config::load(Some(Path::new("/nonexistent/clarion.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_invalid_toml() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site\nname = 1").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_rejects_invalid_values() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[accessibility]\nwcag_level = \"Z\"\n").unwrap();
        let err = Config::load(Some(&path), None).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
    }
}
