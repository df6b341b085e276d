//! Markdown to HTML rendering.

use pulldown_cmark::{Options, Parser, html};

/// Parser options: GitHub Flavored Markdown plus footnotes.
#[must_use]
pub fn parser_options() -> Options {
    Options::ENABLE_TABLES
        | Options::ENABLE_FOOTNOTES
        | Options::ENABLE_STRIKETHROUGH
        | Options::ENABLE_TASKLISTS
        | Options::ENABLE_GFM
}

/// Render a markdown body (without frontmatter) to an HTML fragment.
///
/// Fenced code blocks carry a `language-*` class on their `code` element.
#[must_use]
pub fn render_markdown(markdown: &str) -> String {
    let parser = Parser::new_ext(markdown, parser_options());
    let mut out = String::with_capacity(markdown.len() * 3 / 2);
    html::push_html(&mut out, parser);
    out
}
