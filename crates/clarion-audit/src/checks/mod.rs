//! Structural checks run by the [`Auditor`](crate::Auditor) after the rule engine.
//!
//! Each check is a pure function of the parsed document that returns its
//! issues in document order.

pub(crate) mod aria;
pub(crate) mod contrast;
pub(crate) mod headings;
pub(crate) mod keyboard;
pub(crate) mod screen_reader;

use scraper::ElementRef;

/// Longest element snippet attached to an issue, in characters.
pub(crate) const SNIPPET_LIMIT: usize = 200;

/// Outer HTML of an element, truncated to [`SNIPPET_LIMIT`] characters.
pub(crate) fn snippet(element: ElementRef<'_>) -> String {
    truncate(&element.html())
}

fn truncate(html: &str) -> String {
    match html.char_indices().nth(SNIPPET_LIMIT) {
        Some((end, _)) => html[..end].to_owned(),
        None => html.to_owned(),
    }
}

/// Trimmed, non-empty attribute value.
pub(crate) fn non_empty_attr<'a>(element: ElementRef<'a>, name: &str) -> Option<&'a str> {
    element
        .value()
        .attr(name)
        .map(str::trim)
        .filter(|v| !v.is_empty())
}

/// Whether the element carries its own accessible name via ARIA or `title`.
pub(crate) fn has_aria_name(element: ElementRef<'_>) -> bool {
    ["aria-label", "aria-labelledby", "title"]
        .iter()
        .any(|attr| non_empty_attr(element, attr).is_some())
}

/// Visible text content, whitespace-trimmed.
pub(crate) fn text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_owned()
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use super::*;

    #[test]
    fn test_snippet_truncated() {
        let long = "x".repeat(500);
        let document = Html::parse_fragment(&format!("<p>{long}</p>"));
        let p = document.select(&Selector::parse("p").unwrap()).next().unwrap();
        let snippet = snippet(p);
        assert_eq!(snippet.chars().count(), SNIPPET_LIMIT);
        assert!(snippet.starts_with("<p>xxx"));
    }

    #[test]
    fn test_truncate_multibyte() {
        let text = "é".repeat(300);
        assert_eq!(truncate(&text).chars().count(), SNIPPET_LIMIT);
        assert_eq!(truncate("short"), "short");
    }
}
