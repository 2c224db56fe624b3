//! Folder entry classification.

use std::path::Path;
use std::time::Duration;

use folderise_storage::{MimeOracle, is_hidden_name};
use futures::future::join_all;

use crate::error::bounded;
use crate::{RenderContext, RenderError};

/// What a folder entry contributes to its page.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Category {
    /// Listed as a navigation link.
    Subfolder,
    /// Shown in the image gallery.
    Image,
    /// Listed under resources.
    Download,
    /// Rendered into the page content.
    Markdown,
    /// Not shown.
    Ignored,
}

/// Classify an entry by its MIME type, using the name only to detect markdown.
#[must_use]
pub fn classify(mime: &str, name: &str) -> Category {
    if mime.contains("directory") {
        Category::Subfolder
    } else if mime.starts_with("image/") {
        Category::Image
    } else if mime.starts_with("application/") {
        Category::Download
    } else if mime == "text/plain"
        && Path::new(name).extension().is_some_and(|ext| ext == "md")
    {
        Category::Markdown
    } else {
        Category::Ignored
    }
}

/// Check that `ctx.dir` is a folder and return its visible entry names.
pub(crate) async fn list_folder(
    ctx: &RenderContext,
    timeout: Duration,
) -> Result<Vec<String>, RenderError> {
    let dir = &ctx.dir;
    let describe = || format!("Reading {}", dir.display());

    let metadata = bounded(timeout, describe, tokio::fs::metadata(dir))
        .await?
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => RenderError::NotFound(dir.clone()),
            _ => RenderError::io(dir, e),
        })?;
    if !metadata.is_dir() {
        return Err(RenderError::NotADirectory(dir.clone()));
    }

    let to_error = |source| RenderError::Categorization {
        path: dir.clone(),
        source,
    };
    let listing = async {
        let mut entries = tokio::fs::read_dir(dir).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_hidden_name(&name) {
                names.push(name);
            }
        }
        Ok::<_, std::io::Error>(names)
    };
    bounded(timeout, describe, listing).await?.map_err(to_error)
}

/// Fill the entry lists of `ctx` from its folder listing.
///
/// Entries are classified concurrently. An entry whose MIME type cannot be
/// detected is logged and left out; the rest of the folder still renders.
pub async fn categorize(
    ctx: &mut RenderContext,
    oracle: &dyn MimeOracle,
    timeout: Duration,
) -> Result<(), RenderError> {
    let names = list_folder(ctx, timeout).await?;

    let dir = ctx.dir.clone();
    let detections = names.iter().map(|name| {
        let path = dir.join(name);
        async move { tokio::time::timeout(timeout, oracle.detect(&path)).await }
    });
    let results = join_all(detections).await;

    for (name, result) in names.into_iter().zip(results) {
        let mime = match result {
            Ok(Ok(mime)) => mime,
            Ok(Err(e)) => {
                tracing::warn!(error = %e, "Skipping entry");
                continue;
            }
            Err(_) => {
                tracing::warn!(path = %dir.join(&name).display(), "Mimetype detection timed out");
                continue;
            }
        };

        match classify(&mime, &name) {
            Category::Subfolder => ctx.subfolders.push(name),
            Category::Image => ctx.image_files.push(name),
            Category::Download => ctx.download_files.push(name),
            Category::Markdown => ctx.text_files.push(name),
            Category::Ignored => {}
        }
    }
    Ok(())
}
