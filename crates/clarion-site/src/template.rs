//! HTML page shell for generated pages.
//!
//! Wraps the enhanced body content in a full document with the page's
//! language, title, description and theme stylesheet, plus a labeled
//! footer navigation back to the site root.

use std::fmt::Write;

use clarion_dom::{escape_attr, escape_text};

/// All data needed to render a page.
pub struct PageData {
    pub site_name: String,
    pub title: String,
    pub description: Option<String>,
    pub language: String,
    pub theme: String,
    /// Enhanced body content (skip link and main landmark included).
    pub content: String,
    /// Relative path from the page to the site root (`""`, `"../"`, ...).
    pub root: String,
}

/// Render a complete HTML page.
pub fn render_page(page: &PageData) -> String {
    let mut html = String::with_capacity(page.content.len() + 1024);

    let _ = writeln!(
        html,
        "<!DOCTYPE html>\n<html lang=\"{}\">\n<head>",
        escape_attr(&page.language)
    );
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    let _ = writeln!(
        html,
        "<title>{} | {}</title>",
        escape_text(&page.title),
        escape_text(&page.site_name)
    );
    if let Some(description) = &page.description {
        let _ = writeln!(
            html,
            "<meta name=\"description\" content=\"{}\">",
            escape_attr(description)
        );
    }
    let _ = writeln!(
        html,
        "<link rel=\"stylesheet\" href=\"{}assets/themes/{}.css\">",
        escape_attr(&page.root),
        escape_attr(&page.theme)
    );
    let _ = writeln!(
        html,
        "</head>\n<body class=\"theme-{}\">",
        escape_attr(&page.theme)
    );

    html.push_str(&page.content);
    html.push('\n');

    render_footer(&mut html, page);

    html.push_str("</body>\n</html>\n");
    html
}

fn render_footer(html: &mut String, page: &PageData) {
    html.push_str("<footer role=\"contentinfo\">\n");
    html.push_str("<nav aria-label=\"Site navigation\">\n");
    let _ = writeln!(
        html,
        "<a href=\"{}index.html\">{}</a>",
        escape_attr(&page.root),
        escape_text(&page.site_name)
    );
    html.push_str("</nav>\n</footer>\n");
}
