//! Table roles, header scopes and labels.

use clarion_dom::{Document, HEADING_TAGS, NodeId};

use crate::ids::ensure_id;

pub(crate) fn enhance_tables(doc: &mut Document) {
    for table in doc.elements_named(&["table"]) {
        doc.set_attr(table, "role", "table");

        let has_caption = doc
            .element_children(table)
            .any(|child| doc.tag_name(child) == Some("caption"));
        if !has_caption {
            label_table(doc, table);
        }

        for th in doc.descendants_named(table, &["th"]) {
            doc.set_attr_if_absent(th, "scope", "col");
        }
        for tr in doc.descendants_named(table, &["tr"]) {
            doc.set_attr(tr, "role", "row");
        }
        for td in doc.descendants_named(table, &["td"]) {
            doc.set_attr(td, "role", "cell");
        }
    }
}

/// Label an uncaptioned table by the heading right before it.
fn label_table(doc: &mut Document, table: NodeId) {
    let preceding_heading = doc
        .previous_element_sibling(table)
        .filter(|&sibling| doc.is_element(sibling, &HEADING_TAGS));

    match preceding_heading {
        Some(heading) => {
            let id = ensure_id(doc, heading, "table-heading");
            doc.set_attr_if_absent(table, "aria-labelledby", id);
        }
        None if !doc.has_attr(table, "aria-label") && !doc.has_attr(table, "aria-labelledby") => {
            doc.set_attr(table, "aria-label", "Table");
        }
        None => {}
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const TABLE: &str = "<table><thead><tr><th>Name</th><th scope=\"row\">Type</th></tr></thead>\
<tbody><tr><td>a</td><td>b</td></tr></tbody></table>";

    #[test]
    fn test_roles_and_scopes() {
        let mut doc = Document::parse(TABLE);
        enhance_tables(&mut doc);

        let table = doc.elements_named(&["table"])[0];
        assert_eq!(doc.attr(table, "role"), Some("table"));
        let ths = doc.elements_named(&["th"]);
        assert_eq!(doc.attr(ths[0], "scope"), Some("col"));
        assert_eq!(doc.attr(ths[1], "scope"), Some("row"));
        assert!(doc.elements_named(&["tr"]).iter().all(|&tr| doc.attr(tr, "role") == Some("row")));
        assert!(doc.elements_named(&["td"]).iter().all(|&td| doc.attr(td, "role") == Some("cell")));
    }

    #[test]
    fn test_labelled_by_preceding_heading() {
        let mut doc = Document::parse(&format!("<h2 id=\"opts\">Options</h2>{TABLE}"));
        enhance_tables(&mut doc);
        let table = doc.elements_named(&["table"])[0];
        assert_eq!(doc.attr(table, "aria-labelledby"), Some("opts"));
        assert!(!doc.has_attr(table, "aria-label"));
    }

    #[test]
    fn test_preceding_heading_gets_generated_id() {
        let mut doc = Document::parse(&format!("<h3>Options</h3>{TABLE}"));
        enhance_tables(&mut doc);
        let heading = doc.elements_named(&["h3"])[0];
        let table = doc.elements_named(&["table"])[0];
        let id = doc.attr(heading, "id").unwrap();
        assert!(id.starts_with("table-heading-"));
        assert_eq!(doc.attr(table, "aria-labelledby"), Some(id));
    }

    #[test]
    fn test_default_label() {
        let mut doc = Document::parse(&format!("<p>Intro</p>{TABLE}"));
        enhance_tables(&mut doc);
        let table = doc.elements_named(&["table"])[0];
        assert_eq!(doc.attr(table, "aria-label"), Some("Table"));
    }

    #[test]
    fn test_existing_label_kept() {
        let mut doc = Document::parse("<table aria-labelledby=\"x\"><tr><td>1</td></tr></table>");
        enhance_tables(&mut doc);
        let table = doc.elements_named(&["table"])[0];
        assert!(!doc.has_attr(table, "aria-label"));
        assert_eq!(doc.attr(table, "aria-labelledby"), Some("x"));
    }

    #[test]
    fn test_caption_suppresses_label() {
        let mut doc =
            Document::parse("<h2>Heading</h2><table><caption>Sizes</caption><tr><td>1</td></tr></table>");
        enhance_tables(&mut doc);
        let table = doc.elements_named(&["table"])[0];
        assert!(!doc.has_attr(table, "aria-label"));
        assert!(!doc.has_attr(table, "aria-labelledby"));
    }
}
