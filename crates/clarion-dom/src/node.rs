//! Node payloads stored in the document arena.

/// Index of a node inside a [`Document`](crate::Document).
///
/// Ids are only meaningful for the document that created them.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub(crate) usize);

/// Content of a single tree node.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum NodeData {
    /// The document root. Exactly one per document.
    Document,
    /// `<!DOCTYPE name>`.
    Doctype(String),
    /// `<!-- comment -->`.
    Comment(String),
    /// Character data (unescaped).
    Text(String),
    /// An element with its attributes.
    Element(Element),
}

/// A single `name="value"` pair.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Attribute {
    pub name: String,
    pub value: String,
}

/// An HTML element: tag name plus attributes in insertion order.
///
/// Attribute names are unique; setting an existing attribute replaces its
/// value in place and keeps its position.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Element {
    name: String,
    attrs: Vec<Attribute>,
}

impl Element {
    /// Create an element without attributes. Tag names are lowercased.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_ascii_lowercase(),
            attrs: Vec::new(),
        }
    }

    /// Lowercase tag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|a| a.name == name)
            .map(|a| a.value.as_str())
    }

    /// Whether the attribute is present (with any value, including empty).
    #[must_use]
    pub fn has_attr(&self, name: &str) -> bool {
        self.attrs.iter().any(|a| a.name == name)
    }

    /// Set an attribute. Last write wins.
    pub fn set_attr(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        if let Some(existing) = self.attrs.iter_mut().find(|a| a.name == name) {
            existing.value = value;
        } else {
            self.attrs.push(Attribute {
                name: name.to_owned(),
                value,
            });
        }
    }

    /// Remove an attribute, returning its previous value.
    pub fn remove_attr(&mut self, name: &str) -> Option<String> {
        let pos = self.attrs.iter().position(|a| a.name == name)?;
        Some(self.attrs.remove(pos).value)
    }

    /// Iterate attributes in insertion order.
    pub fn attrs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.attrs
            .iter()
            .map(|a| (a.name.as_str(), a.value.as_str()))
    }

    /// Iterate whitespace-separated class names.
    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.attr("class").unwrap_or_default().split_whitespace()
    }

    #[must_use]
    pub fn has_class(&self, class: &str) -> bool {
        self.classes().any(|c| c == class)
    }

    /// Append a class name unless it is already present.
    pub fn add_class(&mut self, class: &str) {
        if self.has_class(class) {
            return;
        }
        let value = match self.attr("class") {
            Some(existing) if !existing.trim().is_empty() => {
                format!("{} {class}", existing.trim_end())
            }
            _ => class.to_owned(),
        };
        self.set_attr("class", value);
    }

    /// Attribute value, treating empty or whitespace-only values as absent.
    #[must_use]
    pub fn non_empty_attr(&self, name: &str) -> Option<&str> {
        self.attr(name).filter(|v| !v.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_attr_replaces_in_place() {
        let mut el = Element::new("a");
        el.set_attr("href", "/one");
        el.set_attr("class", "x");
        el.set_attr("href", "/two");

        let attrs: Vec<_> = el.attrs().collect();
        assert_eq!(attrs, vec![("href", "/two"), ("class", "x")]);
    }

    #[test]
    fn test_remove_attr() {
        let mut el = Element::new("img");
        el.set_attr("alt", "");
        assert!(el.has_attr("alt"));
        assert_eq!(el.remove_attr("alt"), Some(String::new()));
        assert!(!el.has_attr("alt"));
        assert_eq!(el.remove_attr("alt"), None);
    }

    #[test]
    fn test_add_class_deduplicates() {
        let mut el = Element::new("a");
        el.add_class("warn");
        el.add_class("warn");
        el.add_class("other");
        assert_eq!(el.attr("class"), Some("warn other"));
    }

    #[test]
    fn test_tag_name_lowercased() {
        assert_eq!(Element::new("MAIN").name(), "main");
    }

    #[test]
    fn test_non_empty_attr() {
        let mut el = Element::new("a");
        el.set_attr("aria-label", "  ");
        assert_eq!(el.non_empty_attr("aria-label"), None);
        el.set_attr("aria-label", "Close");
        assert_eq!(el.non_empty_attr("aria-label"), Some("Close"));
    }
}
