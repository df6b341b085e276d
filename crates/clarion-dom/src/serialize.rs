//! HTML5 serialization of [`Document`] trees.

use crate::document::Document;
use crate::node::{NodeData, NodeId};

/// Elements that never have an end tag.
const VOID_ELEMENTS: &[&str] = &[
    "area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track",
    "wbr",
];

/// Elements whose text children are written verbatim.
const RAW_TEXT_ELEMENTS: &[&str] = &[
    "script",
    "style",
    "xmp",
    "iframe",
    "noembed",
    "noframes",
    "plaintext",
];

/// Escape text content for HTML output.
#[must_use]
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

/// Escape an attribute value for double-quoted output.
#[must_use]
pub fn escape_attr(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '"' => out.push_str("&quot;"),
            '\u{a0}' => out.push_str("&nbsp;"),
            _ => out.push(c),
        }
    }
    out
}

impl Document {
    /// Serialize the whole document.
    #[must_use]
    pub fn to_html(&self) -> String {
        self.inner_html(self.root())
    }

    /// Serialize a node including its own tags.
    #[must_use]
    pub fn outer_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        self.write_node(id, &mut out);
        out
    }

    /// Serialize the children of a node.
    #[must_use]
    pub fn inner_html(&self, id: NodeId) -> String {
        let mut out = String::new();
        for &child in self.children(id) {
            self.write_node(child, &mut out);
        }
        out
    }

    /// Serialize `id` with an explicit work stack so nesting depth is not
    /// limited by the call stack.
    fn write_node(&self, id: NodeId, out: &mut String) {
        let mut stack = vec![Step::Enter(id)];
        while let Some(step) = stack.pop() {
            let id = match step {
                Step::Enter(id) => id,
                Step::Close(id) => {
                    if let Some(el) = self.element(id) {
                        out.push_str("</");
                        out.push_str(el.name());
                        out.push('>');
                    }
                    continue;
                }
            };

            match self.data(id) {
                NodeData::Document => {}
                NodeData::Doctype(name) => {
                    out.push_str("<!DOCTYPE ");
                    out.push_str(name);
                    out.push('>');
                    continue;
                }
                NodeData::Comment(text) => {
                    out.push_str("<!--");
                    out.push_str(text);
                    out.push_str("-->");
                    continue;
                }
                NodeData::Text(text) => {
                    let raw = self
                        .parent(id)
                        .is_some_and(|p| self.is_element(p, RAW_TEXT_ELEMENTS));
                    if raw {
                        out.push_str(text);
                    } else {
                        out.push_str(&escape_text(text));
                    }
                    continue;
                }
                NodeData::Element(el) => {
                    out.push('<');
                    out.push_str(el.name());
                    for (name, value) in el.attrs() {
                        out.push(' ');
                        out.push_str(name);
                        out.push_str("=\"");
                        out.push_str(&escape_attr(value));
                        out.push('"');
                    }
                    out.push('>');
                    if VOID_ELEMENTS.contains(&el.name()) {
                        continue;
                    }
                    stack.push(Step::Close(id));
                }
            }

            stack.extend(self.children(id).iter().rev().map(|&c| Step::Enter(c)));
        }
    }
}

/// Pending serialization work.
enum Step {
    Enter(NodeId),
    Close(NodeId),
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_round_trip_document() {
        let html = r#"<!DOCTYPE html><html lang="en"><head><title>T</title></head><body><p class="x">a &amp; b</p></body></html>"#;
        assert_eq!(Document::parse(html).to_html(), html);
    }

    #[test]
    fn test_void_elements_have_no_end_tag() {
        let doc = Document::parse_fragment(r#"<img src="a.png"><br>"#);
        assert_eq!(doc.to_html(), r#"<img src="a.png"><br>"#);
    }

    #[test]
    fn test_raw_text_not_escaped() {
        let doc = Document::parse("<head><script>if (a < b && c) {}</script></head>");
        assert!(doc.to_html().contains("<script>if (a < b && c) {}</script>"));
    }

    #[test]
    fn test_attribute_escaping() {
        let mut doc = Document::parse_fragment("<a>x</a>");
        let a = doc.elements_named(&["a"])[0];
        doc.set_attr(a, "title", r#"say "hi" & bye"#);
        assert_eq!(
            doc.outer_html(a),
            r#"<a title="say &quot;hi&quot; &amp; bye">x</a>"#
        );
    }

    #[test]
    fn test_inner_html() {
        let doc = Document::parse("<body><p>1</p><p>2</p></body>");
        assert_eq!(doc.inner_html(doc.body().unwrap()), "<p>1</p><p>2</p>");
    }

    #[test]
    fn test_escape_text() {
        assert_eq!(escape_text("<a> & \u{a0}"), "&lt;a&gt; &amp; &nbsp;");
    }

    #[test]
    fn test_deeply_nested_document() {
        let depth = 20_000;
        let html = format!("{}x{}", "<div>".repeat(depth), "</div>".repeat(depth));
        let out = Document::parse(&html).to_html();
        assert_eq!(out.matches("<div>").count(), depth);
        assert_eq!(out.matches("</div>").count(), depth);
        assert!(out.contains("<div>x</div>"));
    }
}
