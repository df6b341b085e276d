//! Conversion from html5ever parse trees (via `scraper`) into [`Document`].

use scraper::{Html, Node};

use crate::document::Document;
use crate::node::{Element, NodeData, NodeId};

impl Document {
    /// Parse a full HTML document.
    ///
    /// The HTML5 parser always synthesizes `html`, `head` and `body`, so a
    /// bare fragment such as `<img src="a.png">` ends up inside `body`.
    #[must_use]
    pub fn parse(html: &str) -> Self {
        let parsed = Html::parse_document(html);
        let mut doc = Self::new();
        let root = doc.root();
        for child in parsed.tree.root().children() {
            doc.import(child, root);
        }
        doc
    }

    /// Parse an HTML fragment without synthesizing a root element.
    ///
    /// The nodes end up as direct children of the document root, so
    /// [`document_element`](Self::document_element) returns `None` unless the
    /// fragment itself is an `html` element.
    #[must_use]
    pub fn parse_fragment(html: &str) -> Self {
        let parsed = Html::parse_fragment(html);
        let mut doc = Self::new();
        let root = doc.root();
        // html5ever wraps fragment content in a context `html` element.
        for top in parsed.tree.root().children() {
            match top.value() {
                Node::Element(el) if el.name() == "html" => {
                    for child in top.children() {
                        doc.import(child, root);
                    }
                }
                _ => doc.import(top, root),
            }
        }
        doc
    }

    fn import(&mut self, source: ego_tree::NodeRef<'_, Node>, parent: NodeId) {
        let mut stack = vec![(source, parent)];
        while let Some((node, parent)) = stack.pop() {
            let data = match node.value() {
                Node::Element(el) => {
                    let mut element = Element::new(el.name());
                    for (name, value) in el.attrs() {
                        element.set_attr(name, value);
                    }
                    NodeData::Element(element)
                }
                Node::Text(text) => NodeData::Text((**text).to_owned()),
                Node::Comment(comment) => NodeData::Comment((**comment).to_owned()),
                Node::Doctype(doctype) => NodeData::Doctype(doctype.name().to_owned()),
                // `<template>` contents live in a fragment under the element.
                Node::Fragment => {
                    for child in node.children().rev() {
                        stack.push((child, parent));
                    }
                    continue;
                }
                _ => continue,
            };
            let id = self.push_child(parent, data);
            for child in node.children().rev() {
                stack.push((child, id));
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_synthesizes_structure() {
        let doc = Document::parse(r#"<img src="a.png">"#);
        let body = doc.body().unwrap();
        let img = doc.element_children(body).next().unwrap();
        assert_eq!(doc.tag_name(img), Some("img"));
        assert_eq!(doc.attr(img, "src"), Some("a.png"));
        assert!(doc.head().is_some());
    }

    #[test]
    fn test_parse_fragment_has_no_root_element() {
        let doc = Document::parse_fragment("<p>One</p><p>Two</p>");
        assert!(doc.document_element().is_none());
        assert!(doc.body().is_none());
        assert_eq!(doc.elements_named(&["p"]).len(), 2);
    }

    #[test]
    fn test_parse_keeps_attribute_order() {
        let doc = Document::parse_fragment(r#"<a href="/x" class="c" title="t">x</a>"#);
        let a = doc.elements_named(&["a"])[0];
        let names: Vec<_> = doc.element(a).unwrap().attrs().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["href", "class", "title"]);
    }

    #[test]
    fn test_parse_doctype_and_comment() {
        let doc = Document::parse("<!DOCTYPE html><!-- hi --><html></html>");
        let kinds: Vec<_> = doc
            .children(doc.root())
            .iter()
            .map(|&c| doc.data(c).clone())
            .collect();
        assert_eq!(kinds[0], NodeData::Doctype("html".to_owned()));
        assert_eq!(kinds[1], NodeData::Comment(" hi ".to_owned()));
    }

    #[test]
    fn test_parse_keeps_template_contents() {
        let doc = Document::parse("<body><template><p>kept</p></template></body>");
        let template = doc.elements_named(&["template"])[0];
        let p = doc.element_children(template).next().unwrap();
        assert_eq!(doc.tag_name(p), Some("p"));
        assert_eq!(
            doc.to_html(),
            "<html><head></head><body><template><p>kept</p></template></body></html>"
        );
    }

    #[test]
    fn test_parse_fragment_keeps_template_contents() {
        let doc = Document::parse_fragment("<template><b>x</b></template>");
        assert_eq!(doc.to_html(), "<template><b>x</b></template>");
    }
}
