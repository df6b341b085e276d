//! Landmark roles and labels.

use clarion_dom::{Document, Element, NodeId};

/// Id given to the main landmark when it has none.
pub const DEFAULT_MAIN_ID: &str = "main-content";

const DEFAULT_NAV_LABEL: &str = "Main Navigation";

/// Assign landmark roles and labels. Returns the resolved main landmark.
pub(crate) fn assign_landmarks(doc: &mut Document) -> Option<NodeId> {
    let main = resolve_main(doc);
    if let Some(main) = main
        && doc.element(main).and_then(|el| el.non_empty_attr("id")).is_none()
    {
        doc.set_attr(main, "id", DEFAULT_MAIN_ID);
    }

    for header in doc.elements_named(&["header"]) {
        doc.set_attr(header, "role", "banner");
    }
    for footer in doc.elements_named(&["footer"]) {
        doc.set_attr(footer, "role", "contentinfo");
    }
    for nav in doc.elements_named(&["nav"]) {
        doc.set_attr_if_absent(nav, "aria-label", DEFAULT_NAV_LABEL);
    }
    for (index, aside) in doc.elements_named(&["aside"]).into_iter().enumerate() {
        doc.set_attr(aside, "role", "complementary");
        doc.set_attr_if_absent(aside, "aria-label", format!("Complementary Content {}", index + 1));
    }

    main
}

/// Find the main content container, synthesizing one if needed.
///
/// Priority: an existing `main` element, then the first of `.content`,
/// `#content`, `article`, `.main`, `#main` in document order (which gets
/// `role="main"`), then a new `main` wrapping everything in `body`.
fn resolve_main(doc: &mut Document) -> Option<NodeId> {
    if let Some(&main) = doc.elements_named(&["main"]).first() {
        return Some(main);
    }

    if let Some(candidate) = doc.find_element(is_main_candidate) {
        doc.set_attr(candidate, "role", "main");
        return Some(candidate);
    }

    let body = doc.body()?;
    let main = doc.create_element("main");
    doc.set_attr(main, "role", "main");
    for child in doc.children(body).to_vec() {
        doc.append_child(main, child);
    }
    doc.append_child(body, main);
    tracing::debug!("Synthesized main landmark");
    Some(main)
}

fn is_main_candidate(el: &Element) -> bool {
    let id = el.attr("id");
    el.name() == "article"
        || el.has_class("content")
        || el.has_class("main")
        || id == Some("content")
        || id == Some("main")
}
