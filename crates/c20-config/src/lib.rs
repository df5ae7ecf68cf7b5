//! Configuration management for the c20 content server.
//!
//! Parses `c20.toml` with serde, discovers the file in parent directories,
//! then layers environment settings ([`EnvSettings`]) and command-line
//! settings ([`CliSettings`]) on top, in that order.
//!
//! The result is frozen into [`BuildOpts`], the read-only options every
//! request handler and the static build share for the process lifetime.
//!
//! ## Environment Variable Expansion
//!
//! `server.host` and `site.base_url` support `${VAR}` and `${VAR:-default}`.
//!
//! ## Environment Overrides
//!
//! - `C20_PORT` - server port
//! - `C20_DEBUG` - debug rendering (any non-empty value)
//! - `C20_NO_THUMBNAILS` - suppress thumbnails (any non-empty value)
//! - `C20_ON_DEMAND` - on-demand rendering mode (any non-empty value)

mod expand;

use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "c20.toml";

/// Language used when the config names none.
const DEFAULT_LANGUAGE: &str = "en";

/// Loose boolean coercion for flag values.
///
/// Any non-empty string is truthy, so `"0"` and `"false"` both enable
/// the flag. Only an absent or empty value disables it.
#[must_use]
pub fn is_truthy(value: Option<&str>) -> bool {
    value.is_some_and(|v| !v.is_empty())
}

/// CLI settings that override configuration file and environment values.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override content source directory.
    pub content_dir: Option<PathBuf>,
    /// Force on-demand mode.
    pub on_demand: Option<bool>,
}

/// Settings read from `C20_*` environment variables.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct EnvSettings {
    /// `C20_PORT`.
    pub port: Option<u16>,
    /// `C20_DEBUG`.
    pub debug: bool,
    /// `C20_NO_THUMBNAILS`.
    pub no_thumbs: bool,
    /// `C20_ON_DEMAND`.
    pub on_demand: bool,
}

impl EnvSettings {
    /// Read settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `C20_PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Read settings through an arbitrary variable lookup.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if `C20_PORT` is not a valid port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("C20_PORT") {
            Some(raw) => Some(raw.trim().parse::<u16>().map_err(|_| {
                ConfigError::Validation(format!("C20_PORT must be a port number, got {raw:?}"))
            })?),
            None => None,
        };

        Ok(Self {
            port,
            debug: is_truthy(lookup("C20_DEBUG").as_deref()),
            no_thumbs: is_truthy(lookup("C20_NO_THUMBNAILS").as_deref()),
            on_demand: is_truthy(lookup("C20_ON_DEMAND").as_deref()),
        })
    }
}

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Server configuration.
    pub server: ServerConfig,
    /// Site configuration (paths are relative strings from TOML).
    site: SiteConfigRaw,

    /// Resolved site configuration (set after loading).
    #[serde(skip)]
    pub site_resolved: SiteConfig,
    /// Render and serve pages per request instead of from the output dir.
    #[serde(skip)]
    pub on_demand: bool,
    /// Render pages with debug output.
    #[serde(skip)]
    pub debug: bool,
    /// Suppress thumbnail generation.
    #[serde(skip)]
    pub no_thumbs: bool,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Server configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_owned(),
            port: 8080,
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct SiteConfigRaw {
    base_url: Option<String>,
    content_dir: Option<String>,
    data_dir: Option<String>,
    output_dir: Option<String>,
    languages: Option<Vec<String>>,
    default_language: Option<String>,
}

/// Resolved site configuration with absolute paths.
#[derive(Debug, Default)]
pub struct SiteConfig {
    /// Base URL pages are published under.
    pub base_url: String,
    /// Root of the markdown content tree.
    pub content_dir: PathBuf,
    /// Directory of structured YAML data shared by all pages.
    pub data_dir: PathBuf,
    /// Build output directory.
    pub output_dir: PathBuf,
    /// Site languages (lower-case codes).
    pub languages: Vec<String>,
    /// Language used for on-demand page rendering.
    pub default_language: String,
}

/// Immutable build options shared by every render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildOpts {
    /// Base URL pages are published under.
    pub base_url: String,
    /// Root of the markdown content tree.
    pub content_dir: PathBuf,
    /// Directory of structured YAML data shared by all pages.
    pub data_dir: PathBuf,
    /// Build output directory.
    pub output_dir: PathBuf,
    /// Suppress thumbnail generation.
    pub no_thumbs: bool,
    /// Site languages (lower-case codes).
    pub languages: Vec<String>,
    /// Language used for on-demand page rendering.
    pub default_language: String,
}

impl BuildOpts {
    /// Options rooted at `base` with default directory names.
    ///
    /// Mostly useful for tests and tools that build a site from a scratch dir.
    #[must_use]
    pub fn with_root(base: &Path) -> Self {
        Config::default_with_base(base).build_opts()
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
        /// Config field path (e.g., "`site.base_url`").
        field: String,
        /// Error message (e.g., "${`C20_HOST`} not set").
        message: String,
    },
}

fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
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

fn require_language_code(code: &str, field: &str) -> Result<(), ConfigError> {
    let valid = code.len() == 2
        && code
            .chars()
            .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_');
    if !valid {
        return Err(ConfigError::Validation(format!(
            "{field} entries must be two lower-case word characters, got {code:?}"
        )));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file, then apply environment and CLI settings.
    ///
    /// If `config_path` is provided, loads from that file. Otherwise searches
    /// for `c20.toml` in the current directory and its parents, falling back
    /// to defaults relative to the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or the final configuration is invalid.
    pub fn load(
        config_path: Option<&Path>,
        env: &EnvSettings,
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

        config.apply_env_settings(env);
        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }
        config.resolve_base_url();
        config.validate()?;

        Ok(config)
    }

    /// Freeze the site part of the configuration into [`BuildOpts`].
    #[must_use]
    pub fn build_opts(&self) -> BuildOpts {
        BuildOpts {
            base_url: self.site_resolved.base_url.clone(),
            content_dir: self.site_resolved.content_dir.clone(),
            data_dir: self.site_resolved.data_dir.clone(),
            output_dir: self.site_resolved.output_dir.clone(),
            no_thumbs: self.no_thumbs,
            languages: self.site_resolved.languages.clone(),
            default_language: self.site_resolved.default_language.clone(),
        }
    }

    fn apply_env_settings(&mut self, env: &EnvSettings) {
        if let Some(port) = env.port {
            self.server.port = port;
        }
        self.debug = env.debug;
        self.no_thumbs = env.no_thumbs;
        self.on_demand = env.on_demand;
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(content_dir) = &settings.content_dir {
            self.site_resolved.content_dir.clone_from(content_dir);
        }
        if let Some(on_demand) = settings.on_demand {
            self.on_demand = on_demand;
        }
    }

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
        let mut config = Self {
            server: ServerConfig::default(),
            site: SiteConfigRaw::default(),
            site_resolved: SiteConfig::default(),
            on_demand: false,
            debug: false,
            no_thumbs: false,
            config_path: None,
        };
        config.resolve_paths(base);
        config.resolve_base_url();
        config
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;

        config.expand_env_vars()?;

        let config_dir = path.parent().unwrap_or(Path::new("."));
        config.resolve_paths(config_dir);
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        let site = &self.site_resolved;
        require_non_empty(&site.base_url, "site.base_url")?;
        require_http_url(&site.base_url, "site.base_url")?;

        if site.languages.is_empty() {
            return Err(ConfigError::Validation(
                "site.languages cannot be empty".to_owned(),
            ));
        }
        for lang in &site.languages {
            require_language_code(lang, "site.languages")?;
        }
        if !site.languages.contains(&site.default_language) {
            return Err(ConfigError::Validation(format!(
                "site.default_language {:?} is not listed in site.languages",
                site.default_language
            )));
        }

        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.server.host = expand::expand_env(&self.server.host, "server.host")?;
        if let Some(ref url) = self.site.base_url {
            self.site.base_url = Some(expand::expand_env(url, "site.base_url")?);
        }
        Ok(())
    }

    /// Fill `site.base_url`, defaulting to localhost on the final port.
    fn resolve_base_url(&mut self) {
        self.site_resolved.base_url = self
            .site
            .base_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.server.port));
    }

    /// Resolve relative paths against the config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        let resolve = |path: Option<&str>, default: &str| config_dir.join(path.unwrap_or(default));
        let site = &self.site;

        let default_language = site
            .default_language
            .as_deref()
            .unwrap_or(DEFAULT_LANGUAGE)
            .to_lowercase();
        let languages = site.languages.as_ref().map_or_else(
            || vec![default_language.clone()],
            |langs| langs.iter().map(|l| l.to_lowercase()).collect(),
        );

        self.site_resolved = SiteConfig {
            base_url: String::new(),
            content_dir: resolve(site.content_dir.as_deref(), "src/content"),
            data_dir: resolve(site.data_dir.as_deref(), "src/data"),
            output_dir: resolve(site.output_dir.as_deref(), "dist"),
            languages,
            default_language,
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let pairs: Vec<(String, String)> = pairs
            .iter()
            .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
            .collect();
        move |key| {
            pairs
                .iter()
                .find(|(k, _)| k == key)
                .map(|(_, v)| v.clone())
        }
    }

    #[test]
    fn test_default_config() {
        let config = Config::default_with_base(Path::new("/site"));
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 8080);
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/site/src/content")
        );
        assert_eq!(config.site_resolved.data_dir, PathBuf::from("/site/src/data"));
        assert_eq!(config.site_resolved.output_dir, PathBuf::from("/site/dist"));
        assert_eq!(config.site_resolved.languages, vec!["en".to_owned()]);
        assert_eq!(config.site_resolved.default_language, "en");
        assert_eq!(config.site_resolved.base_url, "http://localhost:8080");
        assert!(!config.on_demand);
    }

    #[test]
    fn test_is_truthy() {
        assert!(!is_truthy(None));
        assert!(!is_truthy(Some("")));
        assert!(is_truthy(Some("1")));
        assert!(is_truthy(Some("0")));
        assert!(is_truthy(Some("false")));
    }

    #[test]
    fn test_parse_site_config() {
        let toml = r#"
[server]
port = 9000

[site]
base_url = "https://c20.reclaimers.net"
content_dir = "content"
output_dir = "public"
languages = ["EN", "es"]
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/project"));
        config.resolve_base_url();

        assert_eq!(config.server.port, 9000);
        assert_eq!(config.site_resolved.base_url, "https://c20.reclaimers.net");
        assert_eq!(
            config.site_resolved.content_dir,
            PathBuf::from("/project/content")
        );
        assert_eq!(
            config.site_resolved.output_dir,
            PathBuf::from("/project/public")
        );
        assert_eq!(
            config.site_resolved.languages,
            vec!["en".to_owned(), "es".to_owned()]
        );
    }

    #[test]
    fn test_env_settings_from_lookup() {
        let env = EnvSettings::from_lookup(lookup_from(&[
            ("C20_PORT", "9090"),
            ("C20_DEBUG", "yes"),
            ("C20_NO_THUMBNAILS", ""),
            ("C20_ON_DEMAND", "0"),
        ]))
        .unwrap();

        assert_eq!(
            env,
            EnvSettings {
                port: Some(9090),
                debug: true,
                no_thumbs: false,
                on_demand: true,
            }
        );
    }

    #[test]
    fn test_env_settings_invalid_port() {
        let err = EnvSettings::from_lookup(lookup_from(&[("C20_PORT", "http")])).unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("C20_PORT"));
    }

    #[test]
    fn test_cli_settings_override_env() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_env_settings(&EnvSettings {
            port: Some(9090),
            on_demand: true,
            ..Default::default()
        });
        config.apply_cli_settings(&CliSettings {
            port: Some(7000),
            on_demand: Some(false),
            ..Default::default()
        });

        assert_eq!(config.server.port, 7000);
        assert!(!config.on_demand);
    }

    #[test]
    fn test_default_base_url_follows_env_port() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();
        let env = EnvSettings {
            port: Some(9000),
            ..Default::default()
        };

        let config = Config::load(Some(&path), &env, None).unwrap();
        assert_eq!(config.server.port, 9000);
        assert_eq!(config.build_opts().base_url, "http://localhost:9000");
    }

    #[test]
    fn test_default_base_url_follows_cli_port() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[server]\nport = 8080\n").unwrap();
        let cli = CliSettings {
            port: Some(7000),
            ..Default::default()
        };

        let config = Config::load(Some(&path), &EnvSettings::default(), Some(&cli)).unwrap();
        assert_eq!(config.site_resolved.base_url, "http://localhost:7000");
    }

    #[test]
    fn test_explicit_base_url_ignores_port_override() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "[site]\nbase_url = \"https://example.org\"\n").unwrap();
        let cli = CliSettings {
            port: Some(7000),
            ..Default::default()
        };

        let config = Config::load(Some(&path), &EnvSettings::default(), Some(&cli)).unwrap();
        assert_eq!(config.site_resolved.base_url, "https://example.org");
    }

    #[test]
    fn test_build_opts_carries_no_thumbs() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.apply_env_settings(&EnvSettings {
            no_thumbs: true,
            ..Default::default()
        });

        let opts = config.build_opts();
        assert!(opts.no_thumbs);
        assert_eq!(opts.content_dir, PathBuf::from("/site/src/content"));
        assert_eq!(opts.default_language, "en");
    }

    #[test]
    fn test_load_from_file_resolves_relative_to_config() {
        let temp = tempfile::tempdir().unwrap();
        let path = temp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "[site]\nbase_url = \"https://example.org\"\ncontent_dir = \"pages\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), &EnvSettings::default(), None).unwrap();

        assert_eq!(config.site_resolved.content_dir, temp.path().join("pages"));
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(
            Some(Path::new("/nonexistent/c20.toml")),
            &EnvSettings::default(),
            None,
        )
        .unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_validate_default_config_passes() {
        let config = Config::default_with_base(Path::new("/site"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_default_language_must_be_listed() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.site_resolved.default_language = "es".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("default_language"));
    }

    #[test]
    fn test_validate_language_code_shape() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.site_resolved.languages = vec!["en".to_owned(), "eng".to_owned()];
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("eng"));
    }

    #[test]
    fn test_validate_base_url_scheme() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.site_resolved.base_url = "c20.reclaimers.net".to_owned();
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("base_url"));
    }

    #[test]
    fn test_validate_server_port_zero() {
        let mut config = Config::default_with_base(Path::new("/site"));
        config.server.port = 0;
        assert!(config.validate().is_err());
    }
}
