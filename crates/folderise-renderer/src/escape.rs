//! Escaping for filenames embedded in generated markdown.

use percent_encoding::{AsciiSet, NON_ALPHANUMERIC, utf8_percent_encode};

/// Characters left untouched in URL path segments.
///
/// Matches the classic `escape()` safe set: alphanumerics plus `@*_+-./`.
const URL_SEGMENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'@')
    .remove(b'*')
    .remove(b'_')
    .remove(b'+')
    .remove(b'-')
    .remove(b'.')
    .remove(b'/');

/// Escape a filename for use as markdown link text.
///
/// Backslash-escapes markdown punctuation and replaces angle brackets with
/// entities so a filename can never open inline HTML or break out of `[...]`.
///
/// # Examples
///
/// ```
/// use folderise_renderer::escape_markdown;
///
/// assert_eq!(escape_markdown("a_b*c"), r"a\_b\*c");
/// assert_eq!(escape_markdown("<x>"), "&lt;x&gt;");
/// ```
pub fn escape_markdown(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 8);
    for ch in text.chars() {
        match ch {
            '\\' | '`' | '*' | '_' | '[' | ']' | '(' | ')' | '#' | '~' | '!' | '|' => {
                out.push('\\');
                out.push(ch);
            }
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Percent-encode a filename for use inside a link target.
///
/// # Examples
///
/// ```
/// use folderise_renderer::escape_url;
///
/// assert_eq!(escape_url("photo (1).jpg"), "photo%20%281%29.jpg");
/// ```
pub fn escape_url(name: &str) -> String {
    utf8_percent_encode(name, URL_SEGMENT).to_string()
}

/// Join an already-escaped entry name onto a directory URL.
///
/// `dir` is a URL path with a leading slash (`"/"` for the root).
pub fn join_url(dir: &str, name: &str) -> String {
    if dir.ends_with('/') {
        format!("{dir}{name}")
    } else {
        format!("{dir}/{name}")
    }
}

/// Build a markdown inline link.
pub fn make_link(text: &str, url: &str) -> String {
    format!("[{text}]({url})")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_markdown_plain_name_unchanged() {
        assert_eq!(escape_markdown("report-2024.pdf"), "report-2024.pdf");
    }

    #[test]
    fn test_escape_markdown_brackets() {
        assert_eq!(escape_markdown("[draft] (v2)"), r"\[draft\] \(v2\)");
    }

    #[test]
    fn test_escape_markdown_html() {
        assert_eq!(
            escape_markdown("<script>.png"),
            "&lt;script&gt;.png"
        );
    }

    #[test]
    fn test_escape_url_keeps_safe_set() {
        assert_eq!(escape_url("a-b_c.d+e@f*g"), "a-b_c.d+e@f*g");
    }

    #[test]
    fn test_escape_url_encodes_spaces_and_parens() {
        assert_eq!(escape_url("my file (final).zip"), "my%20file%20%28final%29.zip");
    }

    #[test]
    fn test_escape_url_encodes_unicode_as_utf8() {
        assert_eq!(escape_url("é.png"), "%C3%A9.png");
    }

    #[test]
    fn test_join_url_root() {
        assert_eq!(join_url("/", "cat.png"), "/cat.png");
    }

    #[test]
    fn test_join_url_nested() {
        assert_eq!(join_url("/a/b", "cat.png"), "/a/b/cat.png");
    }

    #[test]
    fn test_make_link() {
        assert_eq!(make_link("home", "/"), "[home](/)");
    }
}
