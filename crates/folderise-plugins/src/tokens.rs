//! Plugin token scanning.

use std::sync::LazyLock;

use regex::Regex;

// ASCII word characters only: `{{@café}}` is not a token.
static TOKEN_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{\{@((?-u:\w)+)\}\}").unwrap());

/// A piece of scanned HTML.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Segment<'a> {
    /// Literal text, copied through.
    Text(&'a str),
    /// Unresolved `{{@name}}` token, holding `name`.
    Token(&'a str),
}

/// Split `html` into literal text and plugin tokens, left to right.
#[must_use]
pub fn scan(html: &str) -> Vec<Segment<'_>> {
    let mut segments = Vec::new();
    let mut last = 0;

    for caps in TOKEN_RE.captures_iter(html) {
        let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
            continue;
        };
        if whole.start() > last {
            segments.push(Segment::Text(&html[last..whole.start()]));
        }
        segments.push(Segment::Token(name.as_str()));
        last = whole.end();
    }
    if last < html.len() {
        segments.push(Segment::Text(&html[last..]));
    }
    segments
}
