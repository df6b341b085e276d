//! Heading ids, focusability and explicit levels.

use clarion_dom::{Document, HEADING_TAGS, heading_level};

use crate::ids::{slugify, unique_id, unique_slug};

pub(crate) fn enhance_headings(doc: &mut Document) {
    for heading in doc.elements_named(&HEADING_TAGS) {
        let Some(el) = doc.element(heading) else {
            continue;
        };
        let level = heading_level(el.name());
        let has_id = el.non_empty_attr("id").is_some();
        let needs_level = el.attr("role") == Some("heading") && !el.has_attr("aria-level");

        if !has_id {
            let slug = slugify(&doc.text_content(heading));
            let id = if slug.is_empty() {
                unique_id(doc, "heading")
            } else {
                unique_slug(doc, &slug, heading)
            };
            doc.set_attr(heading, "id", id);
        }

        // Reachable by fragment jumps, skipped by Tab.
        doc.set_attr(heading, "tabindex", "-1");

        if needs_level && let Some(level) = level {
            doc.set_attr(heading, "aria-level", level.to_string());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_heading_ids_from_text() {
        let mut doc = Document::parse("<h1>Hello, World!  Foo</h1><h2 id=\"keep\">Other</h2>");
        enhance_headings(&mut doc);
        let headings = doc.elements_named(&HEADING_TAGS);
        assert_eq!(doc.attr(headings[0], "id"), Some("hello-world-foo"));
        assert_eq!(doc.attr(headings[1], "id"), Some("keep"));
    }

    #[test]
    fn test_every_heading_gets_tabindex() {
        let mut doc = Document::parse("<h1>A</h1><h3>B</h3><h6>C</h6>");
        enhance_headings(&mut doc);
        for h in doc.elements_named(&HEADING_TAGS) {
            assert_eq!(doc.attr(h, "tabindex"), Some("-1"));
        }
    }

    #[test]
    fn test_duplicate_heading_text() {
        let mut doc = Document::parse("<h2>Usage</h2><h2>Usage</h2>");
        enhance_headings(&mut doc);
        let headings = doc.elements_named(&["h2"]);
        assert_eq!(doc.attr(headings[0], "id"), Some("usage"));
        assert_eq!(doc.attr(headings[1], "id"), Some("usage-2"));
    }

    #[test]
    fn test_empty_heading_gets_generated_id() {
        let mut doc = Document::parse("<h2>!!!</h2>");
        enhance_headings(&mut doc);
        let h2 = doc.elements_named(&["h2"])[0];
        assert!(doc.attr(h2, "id").unwrap().starts_with("heading-"));
    }

    #[test]
    fn test_role_heading_gets_aria_level() {
        let mut doc = Document::parse(
            r#"<h3 role="heading">A</h3><h4 role="heading" aria-level="2">B</h4><h5>C</h5>"#,
        );
        enhance_headings(&mut doc);
        let headings = doc.elements_named(&HEADING_TAGS);
        assert_eq!(doc.attr(headings[0], "aria-level"), Some("3"));
        assert_eq!(doc.attr(headings[1], "aria-level"), Some("2"));
        assert_eq!(doc.attr(headings[2], "aria-level"), None);
    }
}
