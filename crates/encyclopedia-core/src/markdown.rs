//! Markdown rendering
//!
//! Entry content is CommonMark with a few common extensions. Raw HTML in the
//! source is passed through unchanged.

use pulldown_cmark::{html, Options, Parser};

/// Render markdown to an HTML fragment
pub fn to_html(markdown: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(markdown, options);
    let mut output = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut output, parser);
    output
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_headings_and_emphasis() {
        let html = to_html("# Git\n\nGit is a **version control** tool.");
        assert!(html.contains("<h1>Git</h1>"));
        assert!(html.contains("<strong>version control</strong>"));
    }

    #[test]
    fn test_links_and_lists() {
        let html = to_html("- [Python](/wiki/Python)\n- Django\n");
        assert!(html.contains("<ul>"));
        assert!(html.contains("<a href=\"/wiki/Python\">Python</a>"));
        assert!(html.contains("<li>Django</li>"));
    }

    #[test]
    fn test_tables() {
        let html = to_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(to_html(""), "");
    }
}
