//! [`Dom`] over the live browser document.

use wasm_bindgen::JsCast;
use web_sys::{Document, Element, HtmlElement, HtmlInputElement, HtmlSelectElement, HtmlTextAreaElement};

use super::report;
use crate::dom::{Dom, Selector};
use crate::error::PageError;

pub struct WebDom {
    document: Document,
    root: Element,
}

impl WebDom {
    /// Wrap `document`. Fails only for a document without a root element.
    pub fn new(document: Document) -> Result<Self, PageError> {
        let root = document.document_element().ok_or(PageError::MissingDocument)?;
        Ok(Self { document, root })
    }

    fn html_element(node: &Element) -> Option<&HtmlElement> {
        node.dyn_ref::<HtmlElement>()
    }
}

impl Dom for WebDom {
    type Node = Element;

    fn document_element(&self) -> Element {
        self.root.clone()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn element_by_id(&self, id: &str) -> Option<Element> {
        self.document.get_element_by_id(id)
    }

    fn query_all(&self, scope: Option<&Element>, selector: &Selector) -> Vec<Element> {
        let css = selector.to_css();
        let list = match scope {
            Some(element) => element.query_selector_all(&css),
            None => self.document.query_selector_all(&css),
        };
        let list = match list {
            Ok(list) => list,
            Err(error) => {
                log::warn!("querySelectorAll({css}) failed: {error:?}");
                return Vec::new();
            }
        };
        let mut out = Vec::with_capacity(list.length() as usize);
        for index in 0..list.length() {
            if let Some(node) = list.item(index) {
                if let Ok(element) = node.dyn_into::<Element>() {
                    out.push(element);
                }
            }
        }
        out
    }

    fn attribute(&self, node: &Element, name: &str) -> Option<String> {
        node.get_attribute(name)
    }

    fn set_attribute(&self, node: &Element, name: &str, value: &str) {
        report("setAttribute", node.set_attribute(name, value));
    }

    fn has_class(&self, node: &Element, class: &str) -> bool {
        node.class_list().contains(class)
    }

    fn add_class(&self, node: &Element, class: &str) {
        report("classList.add", node.class_list().add_1(class));
    }

    fn remove_class(&self, node: &Element, class: &str) {
        report("classList.remove", node.class_list().remove_1(class));
    }

    fn set_class_name(&self, node: &Element, value: &str) {
        node.set_class_name(value);
    }

    fn text(&self, node: &Element) -> String {
        node.text_content().unwrap_or_default()
    }

    fn set_text(&self, node: &Element, text: &str) {
        node.set_text_content(Some(text));
    }

    fn value(&self, node: &Element) -> String {
        if let Some(input) = node.dyn_ref::<HtmlInputElement>() {
            input.value()
        } else if let Some(area) = node.dyn_ref::<HtmlTextAreaElement>() {
            area.value()
        } else if let Some(select) = node.dyn_ref::<HtmlSelectElement>() {
            select.value()
        } else {
            String::new()
        }
    }

    fn style(&self, node: &Element, property: &str) -> String {
        Self::html_element(node)
            .map(|element| element.style().get_property_value(property).unwrap_or_default())
            .unwrap_or_default()
    }

    fn set_style(&self, node: &Element, property: &str, value: &str) {
        if let Some(element) = Self::html_element(node) {
            report("style.setProperty", element.style().set_property(property, value));
        }
    }

    fn create_element(&self, tag: &str) -> Option<Element> {
        match self.document.create_element(tag) {
            Ok(element) => Some(element),
            Err(error) => {
                log::warn!("createElement({tag}) failed: {error:?}");
                None
            }
        }
    }

    fn append_child(&self, parent: &Element, child: &Element) {
        report("appendChild", parent.append_child(child));
    }

    fn prepend_child(&self, parent: &Element, child: &Element) {
        report("prepend", parent.prepend_with_node_1(child));
    }

    fn insert_after(&self, reference: &Element, node: &Element) {
        report("after", reference.after_with_node_1(node));
    }

    fn next_element_sibling(&self, node: &Element) -> Option<Element> {
        node.next_element_sibling()
    }

    fn remove(&self, node: &Element) {
        node.remove();
    }

    fn contains(&self, ancestor: &Element, node: &Element) -> bool {
        ancestor.contains(Some(node.as_ref()))
    }
}
