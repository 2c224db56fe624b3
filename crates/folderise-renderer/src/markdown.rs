//! Markdown to HTML conversion.

use pulldown_cmark::{Event, Options, Parser, html};

/// Error returned when a converter cannot produce HTML.
#[derive(Debug, thiserror::Error)]
#[error("Markdown conversion failed: {message}")]
pub struct ConvertError {
    /// Human-readable cause.
    pub message: String,
}

impl ConvertError {
    /// Create a conversion error with a message.
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Global converter options.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ConvertOptions {
    /// Enable GitHub Flavored Markdown (tables, strikethrough, task lists).
    pub gfm: bool,
    /// Render single newlines inside a paragraph as `<br />`.
    pub breaks: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            gfm: true,
            breaks: true,
        }
    }
}

/// Converts markdown text to an HTML fragment.
///
/// Implementations are shared across concurrent renders, so they must be
/// `Send + Sync` and hold no per-call state.
pub trait MarkdownConverter: Send + Sync {
    /// Convert `text` to HTML.
    fn convert(&self, text: &str) -> Result<String, ConvertError>;
}

/// [`MarkdownConverter`] backed by `pulldown-cmark`.
#[derive(Clone, Debug, Default)]
pub struct PulldownConverter {
    options: ConvertOptions,
}

impl PulldownConverter {
    /// Create a converter with explicit options.
    #[must_use]
    pub fn new(options: ConvertOptions) -> Self {
        Self { options }
    }

    /// Get parser options based on GFM configuration.
    fn parser_options(&self) -> Options {
        if self.options.gfm {
            Options::ENABLE_TABLES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_GFM
        } else {
            Options::empty()
        }
    }
}

impl MarkdownConverter for PulldownConverter {
    fn convert(&self, text: &str) -> Result<String, ConvertError> {
        let breaks = self.options.breaks;
        let parser = Parser::new_ext(text, self.parser_options()).map(|event| match event {
            Event::SoftBreak if breaks => Event::HardBreak,
            other => other,
        });

        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_input_converts_to_empty_string() {
        let converter = PulldownConverter::default();
        assert_eq!(converter.convert("").unwrap(), "");
    }

    #[test]
    fn test_soft_breaks_become_line_breaks() {
        let converter = PulldownConverter::default();
        assert_eq!(
            converter.convert("first\nsecond").unwrap(),
            "<p>first<br />\nsecond</p>\n"
        );
    }

    #[test]
    fn test_soft_breaks_kept_when_disabled() {
        let converter = PulldownConverter::new(ConvertOptions {
            gfm: true,
            breaks: false,
        });
        assert_eq!(
            converter.convert("first\nsecond").unwrap(),
            "<p>first\nsecond</p>\n"
        );
    }

    #[test]
    fn test_strikethrough_enabled_with_gfm() {
        let converter = PulldownConverter::default();
        assert_eq!(
            converter.convert("~~home~~").unwrap(),
            "<p><del>home</del></p>\n"
        );
    }

    #[test]
    fn test_strikethrough_disabled_without_gfm() {
        let converter = PulldownConverter::new(ConvertOptions {
            gfm: false,
            breaks: true,
        });
        assert_eq!(converter.convert("~~home~~").unwrap(), "<p>~~home~~</p>\n");
    }

    #[test]
    fn test_plugin_tokens_pass_through() {
        let converter = PulldownConverter::default();
        assert_eq!(
            converter.convert("Today is {{@date}}.").unwrap(),
            "<p>Today is {{@date}}.</p>\n"
        );
    }
}
