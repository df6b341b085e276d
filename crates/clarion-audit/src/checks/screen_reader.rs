//! Hazards for screen-reader users: image alternatives, hidden controls,
//! duplicate ids and dangling `aria-labelledby` references.

use std::collections::HashSet;
use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

use super::snippet;
use crate::{Issue, IssueKind};

static IMAGES: LazyLock<Selector> = LazyLock::new(|| Selector::parse("img").unwrap());
static HIDDEN_INTERACTIVE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a[aria-hidden="true"], button[aria-hidden="true"], input[aria-hidden="true"]"#)
        .unwrap()
});
static WITH_ID: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[id]").unwrap());
static LABELLED_BY: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[aria-labelledby]").unwrap());

const REDUNDANT_ALT_PHRASES: [&str; 2] = ["image of", "picture of"];

pub(crate) fn check_screen_reader(document: &Html) -> Vec<Issue> {
    let mut issues = Vec::new();
    check_images(document, &mut issues);
    check_hidden_interactive(document, &mut issues);
    check_ids(document, &mut issues);
    issues
}

fn check_images(document: &Html, issues: &mut Vec<Issue>) {
    for img in document.select(&IMAGES) {
        let Some(alt) = img.value().attr("alt") else {
            issues.push(
                Issue::new(IssueKind::ScreenReader, "Image missing alt attribute")
                    .with_element(snippet(img)),
            );
            continue;
        };

        if alt.trim().is_empty() {
            if !is_decorative(img) {
                issues.push(
                    Issue::new(
                        IssueKind::ScreenReader,
                        "Image has empty alt text but is not marked decorative",
                    )
                    .with_element(snippet(img))
                    .with_help("Add class=\"decorative\" or aria-hidden=\"true\" if the image is decorative"),
                );
            }
            continue;
        }

        let lower = alt.to_lowercase();
        if let Some(phrase) = REDUNDANT_ALT_PHRASES.iter().find(|p| lower.contains(*p)) {
            issues.push(
                Issue::new(
                    IssueKind::ScreenReader,
                    format!("Alt text contains redundant phrase \"{phrase}\""),
                )
                .with_element(snippet(img)),
            );
        }
    }
}

/// Decorative: `decorative` class, inside a `figure`, or `aria-hidden="true"`.
fn is_decorative(img: ElementRef<'_>) -> bool {
    img.value().classes().any(|c| c == "decorative")
        || img.value().attr("aria-hidden") == Some("true")
        || img
            .ancestors()
            .filter_map(ElementRef::wrap)
            .any(|a| a.value().name() == "figure")
}

fn check_hidden_interactive(document: &Html, issues: &mut Vec<Issue>) {
    for element in document.select(&HIDDEN_INTERACTIVE) {
        issues.push(
            Issue::new(
                IssueKind::ScreenReader,
                "Interactive element is hidden from screen readers (aria-hidden=\"true\")",
            )
            .with_element(snippet(element)),
        );
    }
}

fn check_ids(document: &Html, issues: &mut Vec<Issue>) {
    let mut seen = HashSet::new();
    for element in document.select(&WITH_ID) {
        let Some(id) = element.value().attr("id") else {
            continue;
        };
        if !seen.insert(id) {
            issues.push(
                Issue::new(IssueKind::ScreenReader, format!("Duplicate id \"{id}\""))
                    .with_element(snippet(element)),
            );
        }
    }

    for element in document.select(&LABELLED_BY) {
        let Some(refs) = element.value().attr("aria-labelledby") else {
            continue;
        };
        for reference in refs.split_ascii_whitespace() {
            if !seen.contains(reference) {
                issues.push(
                    Issue::new(
                        IssueKind::ScreenReader,
                        format!("aria-labelledby references missing id \"{reference}\""),
                    )
                    .with_element(snippet(element)),
                );
            }
        }
    }
}
