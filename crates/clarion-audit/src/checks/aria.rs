//! ARIA role validity and required state attributes.

use std::sync::LazyLock;

use scraper::{Html, Selector};

use super::snippet;
use crate::{Issue, IssueKind};

static WITH_ROLE: LazyLock<Selector> = LazyLock::new(|| Selector::parse("[role]").unwrap());

/// WAI-ARIA role tokens accepted in a `role` attribute.
const VALID_ROLES: &[&str] = &[
    "alert", "alertdialog", "application", "article", "banner", "blockquote", "button",
    "caption", "cell", "checkbox", "code", "columnheader", "combobox", "complementary",
    "contentinfo", "definition", "deletion", "dialog", "directory", "document", "emphasis",
    "feed", "figure", "form", "generic", "grid", "gridcell", "group", "heading", "img",
    "insertion", "link", "list", "listbox", "listitem", "log", "main", "marquee", "math",
    "menu", "menubar", "menuitem", "menuitemcheckbox", "menuitemradio", "meter",
    "navigation", "none", "note", "option", "paragraph", "presentation", "progressbar",
    "radio", "radiogroup", "region", "row", "rowgroup", "rowheader", "scrollbar", "search",
    "searchbox", "separator", "slider", "spinbutton", "status", "strong", "subscript",
    "superscript", "switch", "tab", "table", "tablist", "tabpanel", "term", "textbox",
    "time", "timer", "toolbar", "tooltip", "tree", "treegrid", "treeitem",
];

/// Roles that are meaningless without the listed companion attributes.
const REQUIRED_ATTRIBUTES: &[(&str, &[&str])] = &[
    ("checkbox", &["aria-checked"]),
    ("combobox", &["aria-expanded"]),
    ("slider", &["aria-valuemin", "aria-valuemax", "aria-valuenow"]),
    ("progressbar", &["aria-valuemin", "aria-valuemax", "aria-valuenow"]),
    ("scrollbar", &["aria-valuemin", "aria-valuemax", "aria-valuenow"]),
    ("listbox", &["aria-multiselectable"]),
    ("radiogroup", &["aria-required"]),
];

/// Flag unknown role tokens and roles missing their required attributes.
///
/// A `role` value may list several space-separated fallback roles; each token
/// is checked on its own.
pub(crate) fn check_aria(document: &Html) -> Vec<Issue> {
    let mut issues = Vec::new();

    for element in document.select(&WITH_ROLE) {
        let Some(role_attr) = element.value().attr("role") else {
            continue;
        };

        for role in role_attr.split_ascii_whitespace() {
            let role = role.to_ascii_lowercase();
            if !VALID_ROLES.contains(&role.as_str()) {
                issues.push(
                    Issue::new(IssueKind::Aria, format!("Invalid ARIA role \"{role}\""))
                        .with_element(snippet(element)),
                );
                continue;
            }

            let required = REQUIRED_ATTRIBUTES
                .iter()
                .find(|(r, _)| *r == role)
                .map_or(&[][..], |(_, attrs)| *attrs);
            for attr in required {
                if element.value().attr(attr).is_none() {
                    issues.push(
                        Issue::new(
                            IssueKind::Aria,
                            format!("Role \"{role}\" requires attribute {attr}"),
                        )
                        .with_element(snippet(element)),
                    );
                }
            }
        }
    }

    issues
}
