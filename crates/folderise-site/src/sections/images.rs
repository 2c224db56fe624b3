//! Image gallery.

use folderise_renderer::{MarkdownConverter, escape_markdown, escape_url, join_url};

use crate::{RenderContext, RenderError};

fn images_markdown(ctx: &RenderContext) -> String {
    if ctx.image_files.is_empty() {
        return String::new();
    }
    let mut md = String::from("### Images \n");
    for file in &ctx.image_files {
        let url = join_url(&ctx.url_base, &escape_url(file));
        md.push_str(&format!("[![{}]({url})]({url})\n", escape_markdown(file)));
    }
    md
}

/// Linked thumbnails for every image. Empty when there are none.
pub(super) fn render(
    ctx: &RenderContext,
    converter: &dyn MarkdownConverter,
) -> Result<String, RenderError> {
    converter
        .convert(&images_markdown(ctx))
        .map_err(RenderError::from)
}
