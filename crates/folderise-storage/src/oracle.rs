//! Mimetype detection.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncReadExt;

/// MIME reported for directories.
pub const DIRECTORY_MIME: &str = "inode/directory";

/// MIME reported for zero-length files.
pub const EMPTY_MIME: &str = "inode/x-empty";

const PLAIN_TEXT_MIME: &str = "text/plain";
const BINARY_MIME: &str = "application/octet-stream";

/// Number of leading bytes inspected when sniffing content.
const SNIFF_LEN: usize = 1024;

/// Error returned when a path cannot be classified.
#[derive(Debug, thiserror::Error)]
#[error("Cannot detect mimetype of {}: {source}", path.display())]
pub struct OracleError {
    /// Path that was being classified.
    pub path: PathBuf,
    /// Underlying I/O error.
    #[source]
    pub source: std::io::Error,
}

/// Classifies a filesystem path into a MIME-type-like string.
#[async_trait]
pub trait MimeOracle: Send + Sync {
    /// Detect the MIME type of `path`.
    async fn detect(&self, path: &Path) -> Result<String, OracleError>;
}

/// Default [`MimeOracle`]: extension guess refined by content sniffing.
///
/// - Directories report [`DIRECTORY_MIME`], empty files [`EMPTY_MIME`].
/// - Non-text extension guesses (`image/*`, `application/*`, ...) are returned as-is.
/// - Text guesses other than plain/markdown (`text/html`, `text/css`) are returned as-is.
/// - Everything else is sniffed: valid UTF-8 without NUL bytes is `text/plain`,
///   anything else `application/octet-stream`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SniffingOracle;

impl SniffingOracle {
    /// Whether a byte sample looks like text.
    fn looks_like_text(sample: &[u8]) -> bool {
        if sample.contains(&0) {
            return false;
        }
        match std::str::from_utf8(sample) {
            Ok(_) => true,
            // Sample may end in the middle of a multi-byte sequence.
            Err(e) => e.error_len().is_none(),
        }
    }

    async fn sniff(path: &Path) -> std::io::Result<bool> {
        let mut file = tokio::fs::File::open(path).await?;
        let mut buf = vec![0u8; SNIFF_LEN];
        let read = file.read(&mut buf).await?;
        Ok(Self::looks_like_text(&buf[..read]))
    }
}

#[async_trait]
impl MimeOracle for SniffingOracle {
    async fn detect(&self, path: &Path) -> Result<String, OracleError> {
        let to_error = |source| OracleError {
            path: path.to_path_buf(),
            source,
        };

        let metadata = tokio::fs::metadata(path).await.map_err(to_error)?;
        if metadata.is_dir() {
            return Ok(DIRECTORY_MIME.to_owned());
        }
        if metadata.len() == 0 {
            return Ok(EMPTY_MIME.to_owned());
        }

        let guess = mime_guess::from_path(path).first();
        if let Some(mime) = &guess {
            if mime.type_().as_str() != "text" {
                return Ok(mime.essence_str().to_owned());
            }
            let subtype = mime.subtype().as_str();
            if !matches!(subtype, "plain" | "markdown" | "x-markdown") {
                return Ok(mime.essence_str().to_owned());
            }
        }

        let is_text = Self::sniff(path).await.map_err(to_error)?;
        Ok(if is_text { PLAIN_TEXT_MIME } else { BINARY_MIME }.to_owned())
    }
}
