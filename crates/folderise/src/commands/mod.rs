//! CLI command implementations.

pub(crate) mod clear_cache;
pub(crate) mod render;
pub(crate) mod serve;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Args;
use folderise_config::{CliSettings, Config};
use folderise_plugins::PluginRegistry;
use folderise_site::Site;

use crate::error::CliError;

pub(crate) use clear_cache::ClearCacheArgs;
pub(crate) use render::RenderArgs;
pub(crate) use serve::ServeArgs;

/// Arguments shared by every command that needs a configured folder.
#[derive(Args)]
pub(crate) struct ConfigArgs {
    /// Path to configuration file (default: auto-discover folderise.toml).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Folder to serve (overrides config).
    #[arg(short, long, env = "FOLDERISE_FOLDER")]
    folder: Option<PathBuf>,

    /// Site title (overrides config).
    #[arg(short, long)]
    title: Option<String>,
}

impl ConfigArgs {
    /// Load configuration, applying these arguments and `settings` on top.
    ///
    /// The folder is canonicalized so watcher paths and request paths agree.
    pub(crate) fn load(&self, mut settings: CliSettings) -> Result<Config, CliError> {
        settings.folder.clone_from(&self.folder);
        settings.title.clone_from(&self.title);

        let mut config = Config::load(self.config.as_deref(), Some(&settings))?;
        config.folder = std::fs::canonicalize(&config.folder).map_err(|source| CliError::Folder {
            path: config.folder.clone(),
            source,
        })?;
        tracing::info!(
            config = ?config.config_path,
            folder = %config.folder.display(),
            "Loaded configuration"
        );
        Ok(config)
    }
}

/// Build the site with its plugins installed.
pub(crate) fn build_site(config: &Config) -> Result<Arc<Site>, CliError> {
    let plugins = PluginRegistry::from_config(&config.plugins)?.with_timeout(config.render.timeout());
    Ok(Arc::new(Site::from_config(config, Arc::new(plugins))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn args(folder: &std::path::Path) -> ConfigArgs {
        ConfigArgs {
            config: None,
            folder: Some(folder.to_path_buf()),
            title: Some("Notes".to_owned()),
        }
    }

    #[test]
    fn test_load_canonicalizes_folder() {
        let tmp = tempfile::tempdir().unwrap();
        let nested = tmp.path().join("site");
        std::fs::create_dir(&nested).unwrap();

        let config = args(&tmp.path().join("site/../site"))
            .load(CliSettings::default())
            .unwrap();

        assert_eq!(config.folder, nested.canonicalize().unwrap());
        assert_eq!(config.title, "Notes");
    }

    #[test]
    fn test_load_missing_folder_fails() {
        let tmp = tempfile::tempdir().unwrap();

        let err = args(&tmp.path().join("missing"))
            .load(CliSettings::default())
            .unwrap_err();

        assert!(matches!(err, CliError::Folder { .. }));
    }

    #[test]
    fn test_build_site_rejects_unknown_plugin() {
        let tmp = tempfile::tempdir().unwrap();
        let mut config = Config::default();
        config.folder = tmp.path().to_path_buf();
        config.plugins.push(folderise_config::PluginConfig {
            name: "nope".to_owned(),
            options: Default::default(),
        });

        assert!(matches!(build_site(&config), Err(CliError::Plugin(_))));
    }
}
