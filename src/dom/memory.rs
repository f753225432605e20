//! In-memory document for native runs and tests.
//!
//! Nodes live in an arena and are addressed by [`NodeId`]. Removed nodes stay
//! in the arena detached, so stale handles keep working the way stale element
//! references do in a browser: writes land on a node nobody can see.
//!
//! Text is modeled as one string per element, rendered before its children in
//! [`Dom::text`]. That is enough for labels and toasts; there are no mixed
//! text/element runs.

#[cfg(test)]
#[path = "memory_test.rs"]
mod memory_test;

use std::cell::RefCell;

use super::{Dom, Selector};

/// Handle to a node in a [`MemoryDom`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

#[derive(Debug, Default)]
struct NodeData {
    tag: String,
    attributes: Vec<(String, String)>,
    classes: Vec<String>,
    styles: Vec<(String, String)>,
    text: String,
    value: String,
    parent: Option<NodeId>,
    children: Vec<NodeId>,
}

/// Arena-backed document with an `<html>` root and a `<body>`.
#[derive(Debug)]
pub struct MemoryDom {
    nodes: RefCell<Vec<NodeData>>,
    root: NodeId,
    body: NodeId,
}

impl Default for MemoryDom {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryDom {
    #[must_use]
    pub fn new() -> Self {
        let root = NodeData { tag: "html".to_owned(), ..NodeData::default() };
        let body = NodeData { tag: "body".to_owned(), parent: Some(NodeId(0)), ..NodeData::default() };
        let mut nodes = vec![root, body];
        nodes[0].children.push(NodeId(1));
        Self { nodes: RefCell::new(nodes), root: NodeId(0), body: NodeId(1) }
    }

    /// The `<body>` element (always present in a memory document).
    #[must_use]
    pub fn body_id(&self) -> NodeId {
        self.body
    }

    /// Start building a new element appended to `parent`.
    pub fn build(&self, parent: NodeId, tag: &str) -> ElementBuilder<'_> {
        let node = self.create(tag);
        self.append_child(&parent, &node);
        ElementBuilder { dom: self, node }
    }

    /// Create a detached element.
    pub fn create(&self, tag: &str) -> NodeId {
        let mut nodes = self.nodes.borrow_mut();
        nodes.push(NodeData { tag: tag.to_ascii_lowercase(), ..NodeData::default() });
        NodeId(nodes.len() - 1)
    }

    /// Simulate user input into a form control.
    pub fn set_value(&self, node: NodeId, value: &str) {
        value.clone_into(&mut self.nodes.borrow_mut()[node.0].value);
    }

    #[must_use]
    pub fn children(&self, node: NodeId) -> Vec<NodeId> {
        self.nodes.borrow()[node.0].children.clone()
    }

    #[must_use]
    pub fn parent(&self, node: NodeId) -> Option<NodeId> {
        self.nodes.borrow()[node.0].parent
    }

    /// Whether `node` is reachable from the document root.
    #[must_use]
    pub fn is_connected(&self, node: NodeId) -> bool {
        self.contains(&self.root, &node)
    }

    fn detach(&self, node: NodeId) {
        let mut nodes = self.nodes.borrow_mut();
        if let Some(parent) = nodes[node.0].parent.take() {
            nodes[parent.0].children.retain(|child| *child != node);
        }
    }

    fn matches(&self, node: NodeId, selector: &Selector) -> bool {
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        let has_attribute =
            |name: &str| (name == "class" && !data.classes.is_empty()) || data.attributes.iter().any(|(k, _)| k == name);
        let has_class = |class: &str| data.classes.iter().any(|c| c == class);
        match selector {
            Selector::Id(id) => data.attributes.iter().any(|(k, v)| k == "id" && v == id),
            Selector::Class(class) => has_class(class),
            Selector::Tag(tag) => data.tag.eq_ignore_ascii_case(tag),
            Selector::Attribute(attribute) => has_attribute(attribute),
            Selector::TagWithAttribute { tag, attribute } => data.tag.eq_ignore_ascii_case(tag) && has_attribute(attribute),
            Selector::ClassWithAttribute { class, attribute } => has_class(class) && has_attribute(attribute),
        }
    }

    fn collect(&self, node: NodeId, selector: &Selector, out: &mut Vec<NodeId>) {
        for child in self.children(node) {
            if self.matches(child, selector) {
                out.push(child);
            }
            self.collect(child, selector, out);
        }
    }
}

/// Fluent construction of test markup; see [`MemoryDom::build`].
pub struct ElementBuilder<'a> {
    dom: &'a MemoryDom,
    node: NodeId,
}

impl ElementBuilder<'_> {
    #[must_use]
    pub fn id(self, id: &str) -> Self {
        self.dom.set_attribute(&self.node, "id", id);
        self
    }

    #[must_use]
    pub fn class(self, class: &str) -> Self {
        self.dom.add_class(&self.node, class);
        self
    }

    #[must_use]
    pub fn attr(self, name: &str, value: &str) -> Self {
        self.dom.set_attribute(&self.node, name, value);
        self
    }

    #[must_use]
    pub fn text(self, text: &str) -> Self {
        self.dom.set_text(&self.node, text);
        self
    }

    #[must_use]
    pub fn value(self, value: &str) -> Self {
        self.dom.set_value(self.node, value);
        self
    }

    pub fn finish(self) -> NodeId {
        self.node
    }
}

impl Dom for MemoryDom {
    type Node = NodeId;

    fn document_element(&self) -> NodeId {
        self.root
    }

    fn body(&self) -> Option<NodeId> {
        Some(self.body)
    }

    fn element_by_id(&self, id: &str) -> Option<NodeId> {
        self.query(None, &Selector::Id(id.to_owned()))
    }

    fn query_all(&self, scope: Option<&NodeId>, selector: &Selector) -> Vec<NodeId> {
        let mut out = Vec::new();
        let start = match scope {
            Some(node) => *node,
            None => {
                if self.matches(self.root, selector) {
                    out.push(self.root);
                }
                self.root
            }
        };
        self.collect(start, selector, &mut out);
        out
    }

    fn attribute(&self, node: &NodeId, name: &str) -> Option<String> {
        let nodes = self.nodes.borrow();
        let data = &nodes[node.0];
        if name == "class" {
            return (!data.classes.is_empty()).then(|| data.classes.join(" "));
        }
        data.attributes.iter().find(|(k, _)| k == name).map(|(_, v)| v.clone())
    }

    fn set_attribute(&self, node: &NodeId, name: &str, value: &str) {
        if name == "class" {
            self.set_class_name(node, value);
            return;
        }
        let mut nodes = self.nodes.borrow_mut();
        let attributes = &mut nodes[node.0].attributes;
        match attributes.iter_mut().find(|(k, _)| k == name) {
            Some((_, v)) => value.clone_into(v),
            None => attributes.push((name.to_owned(), value.to_owned())),
        }
    }

    fn has_class(&self, node: &NodeId, class: &str) -> bool {
        self.nodes.borrow()[node.0].classes.iter().any(|c| c == class)
    }

    fn add_class(&self, node: &NodeId, class: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let classes = &mut nodes[node.0].classes;
        if !classes.iter().any(|c| c == class) {
            classes.push(class.to_owned());
        }
    }

    fn remove_class(&self, node: &NodeId, class: &str) {
        self.nodes.borrow_mut()[node.0].classes.retain(|c| c != class);
    }

    fn set_class_name(&self, node: &NodeId, value: &str) {
        self.nodes.borrow_mut()[node.0].classes = value.split_whitespace().map(str::to_owned).collect();
    }

    fn text(&self, node: &NodeId) -> String {
        let mut out = self.nodes.borrow()[node.0].text.clone();
        for child in self.children(*node) {
            out.push_str(&self.text(&child));
        }
        out
    }

    fn set_text(&self, node: &NodeId, text: &str) {
        for child in self.children(*node) {
            self.detach(child);
        }
        text.clone_into(&mut self.nodes.borrow_mut()[node.0].text);
    }

    fn value(&self, node: &NodeId) -> String {
        self.nodes.borrow()[node.0].value.clone()
    }

    fn style(&self, node: &NodeId, property: &str) -> String {
        self.nodes.borrow()[node.0]
            .styles
            .iter()
            .find(|(k, _)| k == property)
            .map(|(_, v)| v.clone())
            .unwrap_or_default()
    }

    fn set_style(&self, node: &NodeId, property: &str, value: &str) {
        let mut nodes = self.nodes.borrow_mut();
        let styles = &mut nodes[node.0].styles;
        match styles.iter_mut().find(|(k, _)| k == property) {
            Some((_, v)) => value.clone_into(v),
            None => styles.push((property.to_owned(), value.to_owned())),
        }
    }

    fn create_element(&self, tag: &str) -> Option<NodeId> {
        Some(self.create(tag))
    }

    fn append_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.push(*child);
    }

    fn prepend_child(&self, parent: &NodeId, child: &NodeId) {
        self.detach(*child);
        let mut nodes = self.nodes.borrow_mut();
        nodes[child.0].parent = Some(*parent);
        nodes[parent.0].children.insert(0, *child);
    }

    fn insert_after(&self, reference: &NodeId, node: &NodeId) {
        let Some(parent) = self.parent(*reference) else {
            return;
        };
        self.detach(*node);
        let mut nodes = self.nodes.borrow_mut();
        let siblings = &mut nodes[parent.0].children;
        let index = siblings.iter().position(|c| c == reference).map_or(siblings.len(), |i| i + 1);
        siblings.insert(index, *node);
        nodes[node.0].parent = Some(parent);
    }

    fn next_element_sibling(&self, node: &NodeId) -> Option<NodeId> {
        let parent = self.parent(*node)?;
        let nodes = self.nodes.borrow();
        let siblings = &nodes[parent.0].children;
        let index = siblings.iter().position(|c| c == node)?;
        siblings.get(index + 1).copied()
    }

    fn remove(&self, node: &NodeId) {
        self.detach(*node);
    }

    fn contains(&self, ancestor: &NodeId, node: &NodeId) -> bool {
        let mut current = Some(*node);
        while let Some(id) = current {
            if id == *ancestor {
                return true;
            }
            current = self.parent(id);
        }
        false
    }
}
