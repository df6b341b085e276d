//! Arena-backed document tree with navigation and mutation.

use crate::node::{Element, NodeData, NodeId};

#[derive(Clone, Debug)]
struct Node {
    data: NodeData,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// A parsed HTML document.
///
/// Node `0` is always the [`NodeData::Document`] root. Detached nodes stay in
/// the arena but are unreachable from the root and never serialized.
#[derive(Clone, Debug)]
pub struct Document {
    nodes: Vec<Node>,
}

impl Default for Document {
    fn default() -> Self {
        Self::new()
    }
}

impl Document {
    /// Create an empty document containing only the root node.
    #[must_use]
    pub fn new() -> Self {
        Self {
            nodes: vec![Node {
                data: NodeData::Document,
                parent: None,
                children: Vec::new(),
            }],
        }
    }

    /// The document root.
    #[must_use]
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    /// Node payload.
    #[must_use]
    pub fn data(&self, id: NodeId) -> &NodeData {
        &self.nodes[id.0].data
    }

    /// Element payload, if the node is an element.
    #[must_use]
    pub fn element(&self, id: NodeId) -> Option<&Element> {
        match &self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Mutable element payload, if the node is an element.
    pub fn element_mut(&mut self, id: NodeId) -> Option<&mut Element> {
        match &mut self.nodes[id.0].data {
            NodeData::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Tag name of an element node.
    #[must_use]
    pub fn tag_name(&self, id: NodeId) -> Option<&str> {
        self.element(id).map(Element::name)
    }

    /// Whether the node is an element with one of the given tag names.
    #[must_use]
    pub fn is_element(&self, id: NodeId, names: &[&str]) -> bool {
        self.tag_name(id).is_some_and(|n| names.contains(&n))
    }

    #[must_use]
    pub fn attr(&self, id: NodeId, name: &str) -> Option<&str> {
        self.element(id).and_then(|el| el.attr(name))
    }

    #[must_use]
    pub fn has_attr(&self, id: NodeId, name: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_attr(name))
    }

    /// Set an attribute on an element node. No-op for non-elements.
    pub fn set_attr(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id) {
            el.set_attr(name, value);
        }
    }

    /// Set an attribute only if it is not already present.
    pub fn set_attr_if_absent(&mut self, id: NodeId, name: &str, value: impl Into<String>) {
        if let Some(el) = self.element_mut(id)
            && !el.has_attr(name)
        {
            el.set_attr(name, value);
        }
    }

    pub fn remove_attr(&mut self, id: NodeId, name: &str) -> Option<String> {
        self.element_mut(id).and_then(|el| el.remove_attr(name))
    }

    #[must_use]
    pub fn has_class(&self, id: NodeId, class: &str) -> bool {
        self.element(id).is_some_and(|el| el.has_class(class))
    }

    pub fn add_class(&mut self, id: NodeId, class: &str) {
        if let Some(el) = self.element_mut(id) {
            el.add_class(class);
        }
    }

    #[must_use]
    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    #[must_use]
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Element children of a node, in order.
    pub fn element_children(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.children(id)
            .iter()
            .copied()
            .filter(|&c| self.element(c).is_some())
    }

    /// Ancestors of a node, nearest first (excluding the node itself).
    #[must_use]
    pub fn ancestors(&self, id: NodeId) -> Ancestors<'_> {
        Ancestors {
            doc: self,
            next: self.parent(id),
        }
    }

    /// Nearest element, starting with `id` itself, that satisfies `pred`.
    pub fn closest(&self, id: NodeId, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        std::iter::once(id)
            .chain(self.ancestors(id))
            .find(|&n| self.element(n).is_some_and(&pred))
    }

    /// Descendants of a node in document order (excluding the node itself).
    #[must_use]
    pub fn descendants(&self, id: NodeId) -> Descendants<'_> {
        let mut stack: Vec<NodeId> = self.children(id).to_vec();
        stack.reverse();
        Descendants { doc: self, stack }
    }

    /// All attached elements in document order.
    pub fn elements(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.descendants(self.root())
            .filter(|&n| self.element(n).is_some())
    }

    /// Attached elements with one of the given tag names, in document order.
    ///
    /// The result is collected so callers may mutate the tree while iterating.
    #[must_use]
    pub fn elements_named(&self, names: &[&str]) -> Vec<NodeId> {
        self.elements()
            .filter(|&n| self.is_element(n, names))
            .collect()
    }

    /// Elements below `scope` with one of the given tag names.
    #[must_use]
    pub fn descendants_named(&self, scope: NodeId, names: &[&str]) -> Vec<NodeId> {
        self.descendants(scope)
            .filter(|&n| self.is_element(n, names))
            .collect()
    }

    /// First attached element matching `pred`, in document order.
    pub fn find_element(&self, pred: impl Fn(&Element) -> bool) -> Option<NodeId> {
        self.elements()
            .find(|&n| self.element(n).is_some_and(&pred))
    }

    /// First attached element whose `id` attribute equals `id`.
    #[must_use]
    pub fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.find_element(|el| el.attr("id") == Some(id))
    }

    /// The root `html` element, if the document has one.
    #[must_use]
    pub fn document_element(&self) -> Option<NodeId> {
        self.element_children(self.root())
            .find(|&n| self.is_element(n, &["html"]))
    }

    /// The `head` child of the root element.
    #[must_use]
    pub fn head(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .find(|&n| self.is_element(n, &["head"]))
    }

    /// The `body` child of the root element.
    #[must_use]
    pub fn body(&self) -> Option<NodeId> {
        let html = self.document_element()?;
        self.element_children(html)
            .find(|&n| self.is_element(n, &["body"]))
    }

    /// Closest preceding sibling that is an element.
    #[must_use]
    pub fn previous_element_sibling(&self, id: NodeId) -> Option<NodeId> {
        let parent = self.parent(id)?;
        let siblings = self.children(parent);
        let pos = siblings.iter().position(|&s| s == id)?;
        siblings[..pos]
            .iter()
            .rev()
            .copied()
            .find(|&s| self.element(s).is_some())
    }

    /// Concatenated text of all descendant text nodes.
    #[must_use]
    pub fn text_content(&self, id: NodeId) -> String {
        if let NodeData::Text(text) = self.data(id) {
            return text.clone();
        }
        self.descendants(id)
            .filter_map(|n| match self.data(n) {
                NodeData::Text(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }

    /// Create a detached element.
    pub fn create_element(&mut self, name: &str) -> NodeId {
        self.push(NodeData::Element(Element::new(name)))
    }

    /// Create a detached text node.
    pub fn create_text(&mut self, text: &str) -> NodeId {
        self.push(NodeData::Text(text.to_owned()))
    }

    pub(crate) fn push(&mut self, data: NodeData) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(Node {
            data,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    /// Create a node as the last child of `parent`. A new node cannot be an
    /// ancestor of anything, so no cycle check is needed.
    pub(crate) fn push_child(&mut self, parent: NodeId, data: NodeData) -> NodeId {
        let id = self.push(data);
        self.nodes[id.0].parent = Some(parent);
        self.nodes[parent.0].children.push(id);
        id
    }

    /// Append `child` as the last child of `parent`.
    ///
    /// The child is detached from its current parent first. Returns `false`
    /// and leaves the tree untouched if `child` is `parent` itself or one of
    /// its ancestors.
    pub fn append_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_child(parent, child, None)
    }

    /// Insert `child` as the first child of `parent`. Same rules as
    /// [`append_child`](Self::append_child).
    pub fn prepend_child(&mut self, parent: NodeId, child: NodeId) -> bool {
        self.insert_child(parent, child, Some(0))
    }

    fn insert_child(&mut self, parent: NodeId, child: NodeId, index: Option<usize>) -> bool {
        if child == parent || child == self.root() || self.ancestors(parent).any(|a| a == child)
        {
            return false;
        }
        self.detach(child);
        self.nodes[child.0].parent = Some(parent);
        let children = &mut self.nodes[parent.0].children;
        match index {
            Some(i) => children.insert(i.min(children.len()), child),
            None => children.push(child),
        }
        true
    }

    /// Remove a node (and its subtree) from its parent.
    pub fn detach(&mut self, id: NodeId) {
        if let Some(parent) = self.nodes[id.0].parent.take() {
            self.nodes[parent.0].children.retain(|&c| c != id);
        }
    }
}

/// Iterator over a node's ancestors. See [`Document::ancestors`].
pub struct Ancestors<'a> {
    doc: &'a Document,
    next: Option<NodeId>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.next?;
        self.next = self.doc.parent(current);
        Some(current)
    }
}

/// Pre-order iterator over a subtree. See [`Document::descendants`].
pub struct Descendants<'a> {
    doc: &'a Document,
    stack: Vec<NodeId>,
}

impl Iterator for Descendants<'_> {
    type Item = NodeId;

    fn next(&mut self) -> Option<NodeId> {
        let current = self.stack.pop()?;
        self.stack
            .extend(self.doc.children(current).iter().rev().copied());
        Some(current)
    }
}
