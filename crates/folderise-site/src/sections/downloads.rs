//! Resource links.

use folderise_renderer::{MarkdownConverter, escape_markdown, escape_url, join_url};

use crate::{RenderContext, RenderError};

fn downloads_markdown(ctx: &RenderContext) -> String {
    if ctx.download_files.is_empty() {
        return String::new();
    }
    let mut md = String::from("### Resources \n");
    for file in &ctx.download_files {
        let url = join_url(&ctx.url_base, &escape_url(file));
        md.push_str(&format!("+ [{}]({url})\n", escape_markdown(file)));
    }
    md
}

/// A bullet list linking every downloadable file. Empty when there are none.
pub(super) fn render(
    ctx: &RenderContext,
    converter: &dyn MarkdownConverter,
) -> Result<String, RenderError> {
    converter
        .convert(&downloads_markdown(ctx))
        .map_err(RenderError::from)
}
