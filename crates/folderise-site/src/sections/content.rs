//! Markdown content of a folder.

use std::time::Duration;

use folderise_renderer::MarkdownConverter;
use futures::future::try_join_all;

use crate::error::bounded;
use crate::{RenderContext, RenderError};

/// Convert every markdown file and join the results with a single space.
pub(super) async fn render(
    ctx: &RenderContext,
    converter: &dyn MarkdownConverter,
    timeout: Duration,
) -> Result<String, RenderError> {
    let renders = ctx.text_files.iter().map(|name| async move {
        let path = ctx.dir.join(name);
        let bytes = bounded(timeout, || format!("Reading {}", path.display()), tokio::fs::read(&path))
            .await?
            .map_err(|e| RenderError::io(&path, e))?;
        let html = converter.convert(&String::from_utf8_lossy(&bytes))?;
        Ok::<_, RenderError>(html)
    });

    Ok(try_join_all(renders).await?.join(" "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use folderise_renderer::PulldownConverter;
    use pretty_assertions::assert_eq;
    use std::fs;

    #[tokio::test]
    async fn test_files_joined_in_order() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join("one.md"), "# One").unwrap();
        fs::write(tmp.path().join("two.md"), "two\nlines").unwrap();
        let mut ctx = RenderContext::new(tmp.path(), "/", "").unwrap();
        ctx.text_files = vec!["two.md".to_owned(), "one.md".to_owned()];

        let html = render(&ctx, &PulldownConverter::default(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(html, "<p>two<br />\nlines</p>\n <h1>One</h1>\n");
    }

    #[tokio::test]
    async fn test_no_files_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let ctx = RenderContext::new(tmp.path(), "/", "").unwrap();

        let html = render(&ctx, &PulldownConverter::default(), Duration::from_secs(5))
            .await
            .unwrap();

        assert_eq!(html, "");
    }

    #[tokio::test]
    async fn test_vanished_file_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let mut ctx = RenderContext::new(tmp.path(), "/", "").unwrap();
        ctx.text_files = vec!["gone.md".to_owned()];

        let err = render(&ctx, &PulldownConverter::default(), Duration::from_secs(5))
            .await
            .unwrap_err();

        assert!(matches!(err, RenderError::Io { .. }));
    }
}
