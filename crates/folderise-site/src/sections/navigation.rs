//! Breadcrumb navigation.

use std::path::Path;
use std::time::Duration;

use folderise_renderer::{MarkdownConverter, escape_markdown, escape_url, join_url, make_link};
use folderise_storage::is_hidden_name;
use futures::future::join_all;

use crate::error::bounded;
use crate::{RenderContext, RenderError};

/// Visible top-level folders of `root`, in listing order.
async fn base_folders(root: &Path, timeout: Duration) -> Result<Vec<String>, RenderError> {
    let listing = async {
        let mut entries = tokio::fs::read_dir(root).await?;
        let mut names = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let name = entry.file_name().to_string_lossy().into_owned();
            if !is_hidden_name(&name) {
                names.push(name);
            }
        }
        Ok::<_, std::io::Error>(names)
    };
    let names = bounded(timeout, || format!("Listing {}", root.display()), listing)
        .await?
        .map_err(|source| RenderError::Categorization {
            path: root.to_path_buf(),
            source,
        })?;

    // Follows symlinks, unlike the entry's own file type.
    let stats = join_all(names.iter().map(|name| {
        let path = root.join(name);
        async move {
            bounded(
                timeout,
                || format!("Reading metadata of {}", path.display()),
                tokio::fs::metadata(&path),
            )
            .await
        }
    }))
    .await;

    let mut folders = Vec::new();
    for (name, stat) in names.into_iter().zip(stats) {
        if stat?.is_ok_and(|m| m.is_dir()) {
            folders.push(name);
        }
    }
    Ok(folders)
}

/// Build the navigation markdown for `ctx`.
///
/// `## | home | top | level | folders | ##`, where the folder on the current
/// trail expands into the full breadcrumb and the current page is struck
/// through. Non-root pages with subfolders get an extra line of links.
fn navigation_markdown(ctx: &RenderContext, base_folders: &[String]) -> String {
    let breadcrumb = ctx.breadcrumb();

    let mut nav = String::from("## | ");
    if breadcrumb.is_empty() {
        nav.push_str("~~home~~");
    } else {
        nav.push_str(&make_link("home", "/"));
    }

    for folder in base_folders {
        nav.push_str(" | ");
        if breadcrumb.first() == Some(&folder.as_str()) {
            let mut trail = String::new();
            for (i, segment) in breadcrumb.iter().enumerate() {
                trail = join_url(&trail, &escape_url(segment));
                if i > 0 {
                    nav.push_str(" / ");
                }
                if i + 1 < breadcrumb.len() {
                    nav.push_str(&make_link(&escape_markdown(segment), &trail));
                } else {
                    nav.push_str(&format!("~~{}~~", escape_markdown(segment)));
                }
            }
        } else {
            let url = join_url("/", &escape_url(folder));
            nav.push_str(&make_link(&escape_markdown(folder), &url));
        }
    }
    nav.push_str(" | ##");

    if !ctx.subfolders.is_empty() && !ctx.is_root() {
        let links: Vec<String> = ctx
            .subfolders
            .iter()
            .map(|sub| {
                let url = join_url(&ctx.url_base, &escape_url(sub));
                make_link(&escape_markdown(sub), &url)
            })
            .collect();
        nav.push_str(" \n### extra: ");
        nav.push_str(&links.join(" | "));
    }
    nav
}

pub(super) async fn render(
    ctx: &RenderContext,
    converter: &dyn MarkdownConverter,
    timeout: Duration,
) -> Result<String, RenderError> {
    let folders = base_folders(&ctx.root, timeout).await?;
    converter
        .convert(&navigation_markdown(ctx, &folders))
        .map_err(RenderError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use folderise_renderer::PulldownConverter;
    use pretty_assertions::assert_eq;
    use std::fs;

    fn ctx(path: &str) -> RenderContext {
        RenderContext::new(Path::new("/srv/site"), path, "").unwrap()
    }

    fn folders(names: &[&str]) -> Vec<String> {
        names.iter().map(|n| (*n).to_owned()).collect()
    }

    #[test]
    fn test_root_home_is_struck() {
        let md = navigation_markdown(&ctx("/"), &folders(&["a", "c"]));
        assert_eq!(md, "## | ~~home~~ | [a](/a) | [c](/c) | ##");
    }

    #[test]
    fn test_trail_expands_under_first_segment() {
        let md = navigation_markdown(&ctx("/a/b"), &folders(&["a", "c"]));
        assert_eq!(md, "## | [home](/) | [a](/a) / ~~b~~ | [c](/c) | ##");
    }

    #[test]
    fn test_deep_trail_links_cumulative_paths() {
        let md = navigation_markdown(&ctx("/a/b/c"), &folders(&["a"]));
        assert_eq!(md, "## | [home](/) | [a](/a) / [b](/a/b) / ~~c~~ | ##");
    }

    #[test]
    fn test_extra_links_for_subfolders() {
        let mut page = ctx("/a");
        page.subfolders = folders(&["x", "my notes"]);

        let md = navigation_markdown(&page, &folders(&["a"]));

        assert_eq!(
            md,
            "## | [home](/) | ~~a~~ | ## \n### extra: [x](/a/x) | [my notes](/a/my%20notes)"
        );
    }

    #[test]
    fn test_no_extra_links_on_root() {
        let mut page = ctx("/");
        page.subfolders = folders(&["a"]);

        let md = navigation_markdown(&page, &folders(&["a"]));

        assert!(!md.contains("extra"));
    }

    #[test]
    fn test_names_are_escaped() {
        let md = navigation_markdown(&ctx("/"), &folders(&["[x](y)"]));
        assert_eq!(md, r"## | ~~home~~ | [\[x\]\(y\)](/%5Bx%5D%28y%29) | ##");
    }

    #[tokio::test]
    async fn test_base_folders_keeps_only_visible_directories() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir(tmp.path().join("a")).unwrap();
        fs::create_dir(tmp.path().join(".git")).unwrap();
        fs::write(tmp.path().join("b.md"), "b").unwrap();

        let found = base_folders(tmp.path(), Duration::from_secs(5)).await.unwrap();

        assert_eq!(found, vec!["a".to_owned()]);
    }

    #[tokio::test]
    async fn test_breadcrumb_html() {
        let tmp = tempfile::tempdir().unwrap();
        fs::create_dir_all(tmp.path().join("a/b")).unwrap();
        fs::create_dir(tmp.path().join("_private")).unwrap();
        fs::write(tmp.path().join("readme.md"), "# Hi").unwrap();
        let converter = PulldownConverter::default();
        let timeout = Duration::from_secs(5);

        let root = RenderContext::new(tmp.path(), "/", "").unwrap();
        let html = render(&root, &converter, timeout).await.unwrap();
        assert!(html.contains("<del>home</del>"));
        assert!(html.contains(r#"<a href="/a">a</a>"#));
        assert!(!html.contains("_private"));
        assert!(!html.contains("readme"));

        let nested = RenderContext::new(tmp.path(), "/a/b", "").unwrap();
        let html = render(&nested, &converter, timeout).await.unwrap();
        assert!(html.contains(r#"<a href="/">home</a>"#));
        assert!(html.contains(r#"<a href="/a">a</a>"#));
        assert!(html.contains("<del>b</del>"));
    }
}
