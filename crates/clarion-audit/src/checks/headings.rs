//! Heading hierarchy.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::snippet;
use crate::{Issue, IssueKind};

static HEADINGS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("h1, h2, h3, h4, h5, h6").unwrap());

/// Flag a missing or late `h1` and forward level skips.
///
/// Going back up the hierarchy (h3 after h2) is fine; only jumps of more
/// than one level downward are reported.
pub(crate) fn check_headings(document: &Html) -> Vec<Issue> {
    let headings: Vec<(u8, ElementRef<'_>)> = document
        .select(&HEADINGS)
        .filter_map(|el| level(el.value().name()).map(|l| (l, el)))
        .collect();

    let Some(&(first_level, first)) = headings.first() else {
        return vec![
            Issue::new(IssueKind::Heading, "No headings found on page")
                .with_help("Structure content with headings starting at h1"),
        ];
    };

    let mut issues = Vec::new();

    if !headings.iter().any(|&(l, _)| l == 1) {
        issues.push(Issue::new(IssueKind::Heading, "Page has no h1 heading"));
    }

    if first_level != 1 {
        issues.push(
            Issue::new(
                IssueKind::Heading,
                format!("First heading is h{first_level}, expected h1"),
            )
            .with_element(snippet(first)),
        );
    }

    for pair in headings.windows(2) {
        let (previous, _) = pair[0];
        let (current, el) = pair[1];
        if current > previous + 1 {
            issues.push(
                Issue::new(
                    IssueKind::Heading,
                    format!("Heading level skipped from h{previous} to h{current}"),
                )
                .with_element(snippet(el)),
            );
        }
    }

    issues
}

fn level(name: &str) -> Option<u8> {
    match name {
        "h1" => Some(1),
        "h2" => Some(2),
        "h3" => Some(3),
        "h4" => Some(4),
        "h5" => Some(5),
        "h6" => Some(6),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn messages(html: &str) -> Vec<String> {
        check_headings(&Html::parse_document(html))
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn test_valid_sequence() {
        assert!(messages("<h1>A</h1><h2>B</h2><h3>C</h3>").is_empty());
    }

    #[test]
    fn test_forward_skip() {
        assert_eq!(
            messages("<h1>A</h1><h2>B</h2><h4>C</h4>"),
            vec!["Heading level skipped from h2 to h4"]
        );
    }

    #[test]
    fn test_backward_is_not_a_skip() {
        assert_eq!(
            messages("<h2>A</h2><h1>B</h1>"),
            vec!["First heading is h2, expected h1"]
        );
    }

    #[test]
    fn test_climbing_back_up() {
        assert!(messages("<h1>A</h1><h2>B</h2><h3>C</h3><h2>D</h2><h3>E</h3>").is_empty());
    }

    #[test]
    fn test_no_h1() {
        assert_eq!(
            messages("<h2>A</h2><h3>B</h3>"),
            vec!["Page has no h1 heading", "First heading is h2, expected h1"]
        );
    }

    #[test]
    fn test_no_headings() {
        let issues = check_headings(&Html::parse_document("<p>Text</p>"));
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].message, "No headings found on page");
        assert_eq!(issues[0].kind, IssueKind::Heading);
    }

    #[test]
    fn test_skip_carries_element() {
        let issues = check_headings(&Html::parse_document("<h1>A</h1><h3 id=\"x\">C</h3>"));
        assert_eq!(issues[0].element.as_deref(), Some("<h3 id=\"x\">C</h3>"));
    }
}
