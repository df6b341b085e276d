//! "Skip to main content" link.

use clarion_dom::{Document, NodeId};

use crate::landmarks::DEFAULT_MAIN_ID;

const SKIP_LINK_CLASS: &str = "skip-link";
const SKIP_LINK_TEXT: &str = "Skip to main content";

/// Fragments that already act as a skip link when some anchor points at them.
const KNOWN_TARGETS: [&str; 3] = ["#main", "#main-content", "#content"];

/// Prepend a skip link to `body` unless one already exists.
pub(crate) fn inject_skip_link(doc: &mut Document, main: Option<NodeId>) {
    let Some(body) = doc.body() else {
        return;
    };

    let main_id = main
        .and_then(|m| doc.element(m))
        .and_then(|el| el.non_empty_attr("id"))
        .unwrap_or(DEFAULT_MAIN_ID)
        .to_owned();
    let target = format!("#{main_id}");

    let exists = doc.elements_named(&["a"]).into_iter().any(|a| {
        doc.attr(a, "href")
            .is_some_and(|href| KNOWN_TARGETS.contains(&href) || href == target)
    });
    if exists {
        return;
    }

    let link = doc.create_element("a");
    doc.set_attr(link, "href", target);
    doc.set_attr(link, "class", SKIP_LINK_CLASS);
    let text = doc.create_text(SKIP_LINK_TEXT);
    doc.append_child(link, text);
    doc.prepend_child(body, link);
}
