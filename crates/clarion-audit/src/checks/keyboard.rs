//! Keyboard reachability.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::snippet;
use crate::{Issue, IssueKind};

static INTERACTIVE: LazyLock<Selector> = LazyLock::new(|| {
    Selector::parse(r#"a, button, input, select, textarea, [role="button"], [role="link"]"#)
        .unwrap()
});
static WITH_TABINDEX: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse("[tabindex]").unwrap());
static DIV_BUTTONS: LazyLock<Selector> =
    LazyLock::new(|| Selector::parse(r#"div[role="button"]"#).unwrap());

pub(crate) fn check_keyboard(document: &Html) -> Vec<Issue> {
    let mut issues = Vec::new();

    for element in document.select(&INTERACTIVE) {
        if tabindex(element.value().attr("tabindex")) == Some(-1) {
            issues.push(
                Issue::new(
                    IssueKind::Keyboard,
                    "Interactive element removed from tab order (tabindex=\"-1\")",
                )
                .with_element(snippet(element)),
            );
        }
    }

    for element in document.select(&WITH_TABINDEX) {
        if let Some(value) = tabindex(element.value().attr("tabindex"))
            && value > 0
        {
            issues.push(
                Issue::new(
                    IssueKind::Keyboard,
                    format!("Positive tabindex ({value}) disrupts the natural tab order"),
                )
                .with_element(snippet(element)),
            );
        }
    }

    for element in document.select(&DIV_BUTTONS) {
        if element.value().attr("tabindex").is_none() {
            issues.push(
                Issue::new(
                    IssueKind::Keyboard,
                    "Element with role=\"button\" is not keyboard focusable (missing tabindex)",
                )
                .with_element(snippet(element)),
            );
        }
    }

    issues
}

fn tabindex(value: Option<&str>) -> Option<i32> {
    value?.trim().parse().ok()
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn messages(html: &str) -> Vec<String> {
        check_keyboard(&Html::parse_document(html))
            .into_iter()
            .map(|i| i.message)
            .collect()
    }

    #[test]
    fn test_removed_from_tab_order() {
        assert_eq!(
            messages(r#"<button tabindex="-1">Go</button>"#),
            vec!["Interactive element removed from tab order (tabindex=\"-1\")"]
        );
    }

    #[test]
    fn test_non_interactive_negative_tabindex_ok() {
        assert!(messages(r#"<h2 tabindex="-1">Title</h2><pre tabindex="0">x</pre>"#).is_empty());
    }

    #[test]
    fn test_positive_tabindex() {
        assert_eq!(
            messages(r#"<a href="/" tabindex="3">Home</a>"#),
            vec!["Positive tabindex (3) disrupts the natural tab order"]
        );
    }

    #[test]
    fn test_div_button_without_tabindex() {
        assert_eq!(messages(r#"<div role="button">Go</div>"#).len(), 1);
        assert!(messages(r#"<div role="button" tabindex="0">Go</div>"#).is_empty());
    }
}
