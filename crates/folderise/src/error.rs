//! CLI error types.

use std::path::PathBuf;

use folderise_config::ConfigError;
use folderise_plugins::PluginError;
use folderise_server::ServerError;
use folderise_site::RenderError;

/// CLI error type.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("Cannot open folder {}: {source}", path.display())]
    Folder {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0}")]
    Plugin(#[from] PluginError),

    #[error("{0}")]
    Render(#[from] RenderError),

    #[error("{0}")]
    Server(#[from] ServerError),
}
