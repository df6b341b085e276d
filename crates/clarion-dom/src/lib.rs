//! Mutable HTML document tree for Clarion.
//!
//! Rendered pages are parsed into a [`Document`]: an arena of nodes addressed
//! by [`NodeId`], where every node keeps an ordered list of children and a
//! non-owning back-reference to its parent. The arena makes in-place mutation
//! explicit: a pass collects the ids it wants to touch, then mutates them, so
//! no query result goes stale while the tree changes underneath it.
//!
//! # Example
//!
//! ```
//! use clarion_dom::Document;
//!
//! let mut doc = Document::parse("<h1>Hello</h1>");
//! let heading = doc.elements_named(&["h1"])[0];
//! doc.set_attr(heading, "id", "hello");
//!
//! assert!(doc.to_html().contains(r#"<h1 id="hello">Hello</h1>"#));
//! ```

mod document;
mod node;
mod parse;
mod serialize;

pub use document::{Ancestors, Descendants, Document};
pub use node::{Attribute, Element, NodeData, NodeId};
pub use serialize::{escape_attr, escape_text};

/// Parse the heading level from a tag name (`h1`..`h6`).
///
/// # Examples
///
/// ```
/// assert_eq!(clarion_dom::heading_level("h3"), Some(3));
/// assert_eq!(clarion_dom::heading_level("header"), None);
/// ```
#[must_use]
pub fn heading_level(name: &str) -> Option<u8> {
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

/// Heading tag names in level order.
pub const HEADING_TAGS: [&str; 6] = ["h1", "h2", "h3", "h4", "h5", "h6"];
