//! Document abstraction the behaviors run against.
//!
//! SYSTEM CONTEXT
//! ==============
//! Behaviors only ever talk to [`Dom`]. In the browser that is `WebDom`
//! (feature `hydrate`); natively and in tests it is [`memory::MemoryDom`].
//! Operations are infallible from the caller's point of view: a browser
//! implementation logs the rare JS exception instead of surfacing it, since no
//! behavior can do anything useful with a failed class toggle.

pub mod memory;

use std::fmt;

/// The subset of CSS selectors the behaviors need.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selector {
    /// `#id`
    Id(String),
    /// `.class`
    Class(String),
    /// `tag`
    Tag(String),
    /// `[attribute]`
    Attribute(String),
    /// `tag[attribute]`
    TagWithAttribute { tag: String, attribute: String },
    /// `.class[attribute]`
    ClassWithAttribute { class: String, attribute: String },
}

impl Selector {
    /// Render as a CSS selector string for `querySelectorAll`.
    #[must_use]
    pub fn to_css(&self) -> String {
        match self {
            Self::Id(id) => format!("#{id}"),
            Self::Class(class) => format!(".{class}"),
            Self::Tag(tag) => tag.clone(),
            Self::Attribute(attribute) => format!("[{attribute}]"),
            Self::TagWithAttribute { tag, attribute } => format!("{tag}[{attribute}]"),
            Self::ClassWithAttribute { class, attribute } => format!(".{class}[{attribute}]"),
        }
    }
}

impl fmt::Display for Selector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_css())
    }
}

/// Live document operations.
///
/// `Node` is a cheap handle (an element reference or an arena index). All
/// queries return elements in document order.
pub trait Dom {
    type Node: Clone + PartialEq + fmt::Debug + 'static;

    /// The `<html>` element.
    fn document_element(&self) -> Self::Node;
    fn body(&self) -> Option<Self::Node>;
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// All matching elements under `scope` (or the whole document), excluding `scope` itself.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &Selector) -> Vec<Self::Node>;

    fn query(&self, scope: Option<&Self::Node>, selector: &Selector) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn attribute(&self, node: &Self::Node, name: &str) -> Option<String>;
    fn set_attribute(&self, node: &Self::Node, name: &str, value: &str);

    fn has_class(&self, node: &Self::Node, class: &str) -> bool;
    fn add_class(&self, node: &Self::Node, class: &str);
    fn remove_class(&self, node: &Self::Node, class: &str);
    /// Replace the whole class list.
    fn set_class_name(&self, node: &Self::Node, value: &str);

    /// `textContent`.
    fn text(&self, node: &Self::Node) -> String;
    /// Replace all children with a single text node.
    fn set_text(&self, node: &Self::Node, text: &str);

    /// Current value of a form control; empty for anything else.
    fn value(&self, node: &Self::Node) -> String;

    /// Inline style property; empty when unset.
    fn style(&self, node: &Self::Node, property: &str) -> String;
    fn set_style(&self, node: &Self::Node, property: &str, value: &str);

    /// `None` only when the host refuses the tag name.
    fn create_element(&self, tag: &str) -> Option<Self::Node>;
    fn append_child(&self, parent: &Self::Node, child: &Self::Node);
    fn prepend_child(&self, parent: &Self::Node, child: &Self::Node);
    /// Insert `node` as the sibling immediately after `reference`.
    fn insert_after(&self, reference: &Self::Node, node: &Self::Node);
    fn next_element_sibling(&self, node: &Self::Node) -> Option<Self::Node>;
    /// Detach `node` from its parent. No-op when already detached.
    fn remove(&self, node: &Self::Node);

    /// Inclusive descendant check, like `Node.contains`.
    fn contains(&self, ancestor: &Self::Node, node: &Self::Node) -> bool;
}
