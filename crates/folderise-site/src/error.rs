//! Render errors.

use std::future::Future;
use std::path::PathBuf;
use std::time::Duration;

use folderise_renderer::ConvertError;

/// Error returned when a folder page cannot be rendered.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    /// Requested path exists but is not a folder.
    #[error("URL is not a Folder: {}", .0.display())]
    NotADirectory(PathBuf),
    /// Requested folder does not exist.
    #[error("Folder not found: {}", .0.display())]
    NotFound(PathBuf),
    /// Folder listing failed.
    #[error("Cannot list {}: {source}", path.display())]
    Categorization {
        /// Folder being listed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Template skeleton could not be read.
    #[error("Cannot load template {}: {source}", path.display())]
    TemplateLoad {
        /// Template file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// Markdown conversion failed.
    #[error(transparent)]
    Markdown(#[from] ConvertError),
    /// Reading a file failed.
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// An operation exceeded the configured timeout.
    #[error("{operation} timed out after {}ms", timeout.as_millis())]
    Timeout {
        /// What was being done.
        operation: String,
        /// Configured bound.
        timeout: Duration,
    },
    /// Request path escapes the served folder.
    #[error("Invalid path: {0}")]
    InvalidPath(String),
}

impl RenderError {
    /// Whether the requested folder does not exist or is not a folder.
    #[must_use]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::NotADirectory(_))
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

/// Await `future`, failing with [`RenderError::Timeout`] after `timeout`.
pub(crate) async fn bounded<T>(
    timeout: Duration,
    operation: impl FnOnce() -> String,
    future: impl Future<Output = T>,
) -> Result<T, RenderError> {
    tokio::time::timeout(timeout, future)
        .await
        .map_err(|_| RenderError::Timeout {
            operation: operation(),
            timeout,
        })
}
