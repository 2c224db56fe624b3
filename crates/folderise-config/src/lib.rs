//! Loading `folderise.toml`.
//!
//! The file is looked up in the working directory and then each parent,
//! unless a path is given explicitly. `folder` and `template` are resolved
//! relative to the file's directory, then [`CliSettings`] overrides apply and
//! the result is validated.
//!
//! ```toml
//! folder = "${HOME}/notes"
//! title = "Notes"
//!
//! [server]
//! port = 7979
//!
//! [[plugins]]
//! name = "text"
//! options = { value = "hello" }
//! ```
//!
//! `folder`, `title`, `template` and `server.host` accept `${VAR}` and
//! `${VAR:-default}` references; an unset variable without a default is an
//! error.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

/// CLI settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// Override the served root folder.
    pub folder: Option<PathBuf>,
    /// Override the site title.
    pub title: Option<String>,
    /// Override server host.
    pub host: Option<String>,
    /// Override server port.
    pub port: Option<u16>,
    /// Override the watch flag.
    pub watch: Option<bool>,
    /// Override the refresh-on-startup flag.
    pub refresh: Option<bool>,
}

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "folderise.toml";

/// Default bound on a single I/O operation in the render path.
const DEFAULT_TIMEOUT_MS: u64 = 10_000;

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Root folder as written in TOML (resolved into `folder`).
    #[serde(rename = "folder")]
    folder_raw: Option<String>,
    /// Template path as written in TOML (resolved into `template`).
    #[serde(rename = "template")]
    template_raw: Option<String>,
    /// Site title substituted into `{{title}}`.
    pub title: String,
    /// Whether to watch the folder and invalidate caches on change.
    pub watch: bool,
    /// Whether to drop every cache artifact at startup.
    pub refresh: bool,
    /// Server configuration.
    pub server: ServerConfig,
    /// Render pipeline configuration.
    pub render: RenderConfig,
    /// Plugins to install, in declaration order.
    pub plugins: Vec<PluginConfig>,

    /// Resolved absolute root folder (set after loading).
    #[serde(skip)]
    pub folder: PathBuf,
    /// Resolved template path (set after loading). `None` selects the built-in skeleton.
    #[serde(skip)]
    pub template: Option<PathBuf>,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            folder_raw: None,
            template_raw: None,
            title: String::new(),
            watch: true,
            refresh: true,
            server: ServerConfig::default(),
            render: RenderConfig::default(),
            plugins: Vec::new(),
            folder: PathBuf::new(),
            template: None,
            config_path: None,
        }
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
            port: 7979,
        }
    }
}

/// Render pipeline configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Upper bound in milliseconds for each oracle, filesystem and plugin call.
    pub timeout_ms: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            timeout_ms: DEFAULT_TIMEOUT_MS,
        }
    }
}

impl RenderConfig {
    /// Timeout as a [`Duration`].
    #[must_use]
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// A plugin entry from `[[plugins]]`.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct PluginConfig {
    /// Plugin name, also the token name used in pages (`{{@name}}`).
    pub name: String,
    /// Plugin-specific options, passed through untouched.
    #[serde(default)]
    pub options: toml::Table,
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
    /// A `${VAR}` reference without a default names an unset variable.
    #[error("Environment variable ${{{var}}} used in {field} is not set")]
    EnvVar {
        /// Config key holding the reference.
        field: &'static str,
        /// Variable name.
        var: String,
    },
}

/// Require a string field to be non-empty.
fn require_non_empty(value: &str, field: &str) -> Result<(), ConfigError> {
    if value.is_empty() {
        return Err(ConfigError::Validation(format!("{field} cannot be empty")));
    }
    Ok(())
}

impl Config {
    /// Load configuration from file with optional CLI settings.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `folderise.toml` in current directory and parents.
    ///
    /// CLI settings are applied after loading and path resolution, allowing CLI
    /// arguments to take precedence over config file values. Validation runs last,
    /// so a `folder` supplied only on the command line satisfies the requirement.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails, or
    /// the merged configuration is invalid.
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
            Self::default()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        config.validate()?;
        Ok(config)
    }

    /// Apply CLI settings to the configuration.
    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(folder) = &settings.folder {
            self.folder.clone_from(folder);
        }
        if let Some(title) = &settings.title {
            self.title.clone_from(title);
        }
        if let Some(host) = &settings.host {
            self.server.host.clone_from(host);
        }
        if let Some(port) = settings.port {
            self.server.port = port;
        }
        if let Some(watch) = settings.watch {
            self.watch = watch;
        }
        if let Some(refresh) = settings.refresh {
            self.refresh = refresh;
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

    /// Load configuration from a specific file.
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
        if self.folder.as_os_str().is_empty() {
            return Err(ConfigError::Validation(
                "folder is required (set `folder` in folderise.toml or pass --folder)".to_owned(),
            ));
        }

        require_non_empty(&self.server.host, "server.host")?;
        if self.server.port == 0 {
            return Err(ConfigError::Validation(
                "server.port cannot be 0".to_owned(),
            ));
        }

        if self.render.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "render.timeout_ms must be greater than 0".to_owned(),
            ));
        }

        for plugin in &self.plugins {
            require_non_empty(&plugin.name, "plugins.name")?;
        }

        Ok(())
    }

    /// Expand environment variable references in configuration strings.
    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        let fields = [
            ("folder", self.folder_raw.as_mut()),
            ("template", self.template_raw.as_mut()),
            ("title", Some(&mut self.title)),
            ("server.host", Some(&mut self.server.host)),
        ];
        for (field, value) in fields {
            let Some(value) = value else { continue };
            // Values without a braced reference are taken literally, `$` included.
            if !value.contains("${") {
                continue;
            }
            let expanded = shellexpand::env_with_context(value.as_str(), |var| {
                std::env::var(var).map(Some)
            })
            .map_err(|e| ConfigError::EnvVar {
                field,
                var: e.var_name,
            })?
            .into_owned();
            *value = expanded;
        }
        Ok(())
    }

    /// Resolve relative paths against the config file's directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        if let Some(folder) = &self.folder_raw {
            self.folder = config_dir.join(folder);
        }
        self.template = self.template_raw.as_deref().map(|t| config_dir.join(t));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.title, "");
        assert!(config.watch);
        assert!(config.refresh);
        assert_eq!(config.server.host, "127.0.0.1");
        assert_eq!(config.server.port, 7979);
        assert_eq!(config.render.timeout(), Duration::from_secs(10));
        assert!(config.plugins.is_empty());
        assert!(config.template.is_none());
    }

    #[test]
    fn test_parse_minimal_config() {
        let config: Config = toml::from_str(r#"folder = "site""#).unwrap();
        assert_eq!(config.folder_raw.as_deref(), Some("site"));
        assert!(config.watch);
        assert!(config.refresh);
    }

    #[test]
    fn test_parse_flags_can_be_disabled() {
        let toml = r#"
folder = "site"
title = "Shared files"
watch = false
refresh = false
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.title, "Shared files");
        assert!(!config.watch);
        assert!(!config.refresh);
    }

    #[test]
    fn test_parse_plugins() {
        let toml = r#"
folder = "site"

[[plugins]]
name = "date"
options = { format = "%Y" }

[[plugins]]
name = "visits"
"#;
        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.plugins.len(), 2);
        assert_eq!(config.plugins[0].name, "date");
        assert_eq!(
            config.plugins[0].options.get("format").and_then(|v| v.as_str()),
            Some("%Y")
        );
        assert_eq!(config.plugins[1].name, "visits");
        assert!(config.plugins[1].options.is_empty());
    }

    #[test]
    fn test_resolve_paths() {
        let toml = r#"
folder = "public"
template = "theme/page.html"
"#;
        let mut config: Config = toml::from_str(toml).unwrap();
        config.resolve_paths(Path::new("/srv"));

        assert_eq!(config.folder, PathBuf::from("/srv/public"));
        assert_eq!(config.template, Some(PathBuf::from("/srv/theme/page.html")));
    }

    #[test]
    fn test_validate_requires_folder() {
        let config = Config::default();
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(_)));
        assert!(err.to_string().contains("folder"));
    }

    #[test]
    fn test_validate_rejects_zero_port() {
        let mut config = Config::default();
        config.folder = PathBuf::from("/srv/public");
        config.server.port = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("server.port"));
    }

    #[test]
    fn test_validate_rejects_zero_timeout() {
        let mut config = Config::default();
        config.folder = PathBuf::from("/srv/public");
        config.render.timeout_ms = 0;
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("timeout_ms"));
    }

    #[test]
    fn test_apply_cli_settings() {
        let mut config = Config::default();
        let overrides = CliSettings {
            folder: Some(PathBuf::from("/data")),
            port: Some(9000),
            watch: Some(false),
            ..Default::default()
        };

        config.apply_cli_settings(&overrides);

        assert_eq!(config.folder, PathBuf::from("/data"));
        assert_eq!(config.server.port, 9000);
        assert!(!config.watch);
        assert!(config.refresh); // Unchanged
        assert_eq!(config.server.host, "127.0.0.1"); // Unchanged
    }

    #[test]
    fn test_load_from_explicit_file() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "folder = \"files\"\ntitle = \"Archive\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.folder, tmp.path().join("files"));
        assert_eq!(config.title, "Archive");
        assert_eq!(config.config_path, Some(path));
    }

    #[test]
    fn test_load_cli_folder_satisfies_requirement() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "title = \"No folder here\"\n").unwrap();

        let settings = CliSettings {
            folder: Some(PathBuf::from("/srv/files")),
            ..Default::default()
        };
        let config = Config::load(Some(&path), Some(&settings)).unwrap();

        assert_eq!(config.folder, PathBuf::from("/srv/files"));
    }

    #[test]
    fn test_load_missing_explicit_file() {
        let err = Config::load(Some(Path::new("/nonexistent/folderise.toml")), None).unwrap_err();
        assert!(matches!(err, ConfigError::NotFound(_)));
    }

    #[test]
    fn test_load_expands_env_references() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::set_var("FOLDERISE_TEST_ROOT", "/srv/shared");
            std::env::remove_var("FOLDERISE_TEST_TITLE");
        }
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "folder = \"${FOLDERISE_TEST_ROOT}/files\"\n\
             title = \"${FOLDERISE_TEST_TITLE:-My Files} (shared)\"\n",
        )
        .unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.folder, PathBuf::from("/srv/shared/files"));
        assert_eq!(config.title, "My Files (shared)");
    }

    #[test]
    fn test_load_unset_env_reference_names_field() {
        // SAFETY: variable names are unique to this test
        unsafe {
            std::env::remove_var("FOLDERISE_TEST_HOST");
        }
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(
            &path,
            "folder = \"files\"\n[server]\nhost = \"${FOLDERISE_TEST_HOST}\"\n",
        )
        .unwrap();

        let err = Config::load(Some(&path), None).unwrap_err();

        assert!(matches!(
            &err,
            ConfigError::EnvVar { field: "server.host", var } if var == "FOLDERISE_TEST_HOST"
        ));
        assert_eq!(
            err.to_string(),
            "Environment variable ${FOLDERISE_TEST_HOST} used in server.host is not set"
        );
    }

    #[test]
    fn test_literal_dollar_is_kept() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join(CONFIG_FILENAME);
        std::fs::write(&path, "folder = \"files\"\ntitle = \"$HOME sweet $HOME\"\n").unwrap();

        let config = Config::load(Some(&path), None).unwrap();

        assert_eq!(config.title, "$HOME sweet $HOME");
    }
}
