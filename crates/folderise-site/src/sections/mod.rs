//! The four sections of a folder page.
//!
//! Each section is assembled as markdown and converted to HTML on its own.
//! All four are rendered concurrently; the first failure fails the page.

mod content;
mod downloads;
mod images;
mod navigation;

use std::time::Duration;

use folderise_renderer::MarkdownConverter;

use crate::{RenderContext, RenderError};

/// Rendered HTML fragments for one page.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Sections {
    /// Breadcrumb and top-level folder links.
    pub navigation: String,
    /// Concatenated markdown files.
    pub content: String,
    /// Image gallery.
    pub images: String,
    /// Resource links.
    pub downloads: String,
}

/// Render all sections of a categorized context.
pub(crate) async fn render_sections(
    ctx: &RenderContext,
    converter: &dyn MarkdownConverter,
    timeout: Duration,
) -> Result<Sections, RenderError> {
    let (navigation, content, images, downloads) = tokio::try_join!(
        navigation::render(ctx, converter, timeout),
        content::render(ctx, converter, timeout),
        async { images::render(ctx, converter) },
        async { downloads::render(ctx, converter) },
    )?;

    Ok(Sections {
        navigation,
        content,
        images,
        downloads,
    })
}
