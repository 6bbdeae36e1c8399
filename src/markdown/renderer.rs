//! Markdown to HTML conversion using pulldown-cmark

use pulldown_cmark::{html, Options, Parser};

/// Converts a complete Markdown document into an HTML fragment.
///
/// The playback engine calls this exactly once per completed work stream,
/// with the full accumulated document.
pub trait MarkdownConverter: Send + Sync {
    fn to_html(&self, markdown: &str) -> String;
}

impl<F> MarkdownConverter for F
where
    F: Fn(&str) -> String + Send + Sync,
{
    fn to_html(&self, markdown: &str) -> String {
        self(markdown)
    }
}

/// CommonMark converter with the GitHub-style extensions enabled
#[derive(Debug, Clone, Copy, Default)]
pub struct CmarkConverter;

impl MarkdownConverter for CmarkConverter {
    fn to_html(&self, markdown: &str) -> String {
        markdown_to_html(markdown)
    }
}

/// Convert markdown to an HTML fragment (no `<html>`/`<body>` wrapper)
pub fn markdown_to_html(markdown: &str) -> String {
    let options = Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS;

    let parser = Parser::new_ext(markdown, options);

    let mut html_output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markdown_to_html_basic() {
        let html = markdown_to_html("# Hello\n\nWorld");

        assert!(html.contains("<h1>"));
        assert!(html.contains("Hello"));
        assert!(html.contains("<p>"));
        assert!(html.contains("World"));
        assert!(!html.contains("<body>"));
    }

    #[test]
    fn test_markdown_to_html_links() {
        let html = markdown_to_html("[Click here](https://example.com)");

        assert!(html.contains("<a"));
        assert!(html.contains("href=\"https://example.com\""));
        assert!(html.contains("Click here"));
    }

    #[test]
    fn test_markdown_to_html_tables() {
        let html = markdown_to_html("| A | B |\n|---|---|\n| 1 | 2 |");

        assert!(html.contains("<table>"));
        assert!(html.contains("<th>"));
        assert!(html.contains("<td>"));
    }

    #[test]
    fn test_markdown_to_html_strikethrough() {
        let html = markdown_to_html("~~old~~ new");
        assert!(html.contains("<del>old</del>"));
    }

    #[test]
    fn test_cmark_converter_matches_function() {
        let md = "- one\n- two\n";
        assert_eq!(CmarkConverter.to_html(md), markdown_to_html(md));
    }

    #[test]
    fn test_closure_converter() {
        let upper = |md: &str| md.to_uppercase();
        assert_eq!(upper.to_html("abc"), "ABC");
    }
}
