use super::*;

fn form_with_inputs(dom: &MemoryDom) -> (NodeId, NodeId, NodeId) {
    let form = dom.build(dom.body_id(), "form").id("login").finish();
    let first = dom.build(form, "input").attr("required", "").finish();
    let second = dom.build(form, "input").class("wide").finish();
    (form, first, second)
}

// =============================================================
// Queries
// =============================================================

#[test]
fn new_document_has_html_and_body() {
    let dom = MemoryDom::new();
    assert_eq!(dom.query_all(None, &Selector::Tag("html".into())), vec![dom.document_element()]);
    assert_eq!(dom.body(), Some(dom.body_id()));
    assert_eq!(dom.parent(dom.body_id()), Some(dom.document_element()));
}

#[test]
fn query_all_returns_document_order() {
    let dom = MemoryDom::new();
    let a = dom.build(dom.body_id(), "div").class("card").finish();
    let wrapper = dom.build(dom.body_id(), "section").finish();
    let b = dom.build(wrapper, "div").class("card").finish();
    let c = dom.build(dom.body_id(), "div").class("card").finish();
    assert_eq!(dom.query_all(None, &Selector::Class("card".into())), vec![a, b, c]);
}

#[test]
fn scoped_query_excludes_scope_and_outside_nodes() {
    let dom = MemoryDom::new();
    let (form, first, _) = form_with_inputs(&dom);
    dom.build(dom.body_id(), "input").attr("required", "").finish();
    let found = dom.query_all(Some(&form), &Selector::Attribute("required".into()));
    assert_eq!(found, vec![first]);
}

#[test]
fn element_by_id_and_compound_selectors() {
    let dom = MemoryDom::new();
    let (form, _, _) = form_with_inputs(&dom);
    assert_eq!(dom.element_by_id("login"), Some(form));
    assert_eq!(dom.element_by_id("missing"), None);

    let stamp = dom.build(dom.body_id(), "span").class("relative-time").attr("data-timestamp", "x").finish();
    dom.build(dom.body_id(), "span").class("relative-time").finish();
    let selector = Selector::ClassWithAttribute { class: "relative-time".into(), attribute: "data-timestamp".into() };
    assert_eq!(dom.query_all(None, &selector), vec![stamp]);
}

#[test]
fn class_selector_is_exact_token_match() {
    let dom = MemoryDom::new();
    dom.build(dom.body_id(), "div").class("alert-heading").finish();
    let alert = dom.build(dom.body_id(), "div").class("alert").class("alert-info").finish();
    assert_eq!(dom.query_all(None, &Selector::Class("alert".into())), vec![alert]);
}

// =============================================================
// Attributes, classes, styles
// =============================================================

#[test]
fn class_attribute_round_trips_through_class_list() {
    let dom = MemoryDom::new();
    let icon = dom.build(dom.body_id(), "i").class("bi").class("bi-moon").finish();
    assert_eq!(dom.attribute(&icon, "class").as_deref(), Some("bi bi-moon"));
    dom.set_class_name(&icon, "bi  bi-sun me-2");
    assert!(dom.has_class(&icon, "bi-sun"));
    assert!(!dom.has_class(&icon, "bi-moon"));
    assert_eq!(dom.attribute(&icon, "class").as_deref(), Some("bi bi-sun me-2"));
}

#[test]
fn add_class_is_idempotent() {
    let dom = MemoryDom::new();
    let node = dom.build(dom.body_id(), "input").finish();
    dom.add_class(&node, "is-invalid");
    dom.add_class(&node, "is-invalid");
    assert_eq!(dom.attribute(&node, "class").as_deref(), Some("is-invalid"));
    dom.remove_class(&node, "is-invalid");
    assert_eq!(dom.attribute(&node, "class"), None);
}

#[test]
fn style_defaults_to_empty() {
    let dom = MemoryDom::new();
    let panel = dom.build(dom.body_id(), "div").finish();
    assert_eq!(dom.style(&panel, "display"), "");
    dom.set_style(&panel, "display", "block");
    dom.set_style(&panel, "display", "none");
    assert_eq!(dom.style(&panel, "display"), "none");
}

// =============================================================
// Tree mutation
// =============================================================

#[test]
fn insert_after_places_node_as_next_sibling() {
    let dom = MemoryDom::new();
    let (form, first, second) = form_with_inputs(&dom);
    let feedback = dom.create("div");
    dom.insert_after(&first, &feedback);
    assert_eq!(dom.children(form), vec![first, feedback, second]);
    assert_eq!(dom.next_element_sibling(&first), Some(feedback));
    assert_eq!(dom.next_element_sibling(&second), None);
}

#[test]
fn insert_after_detached_reference_is_noop() {
    let dom = MemoryDom::new();
    let orphan = dom.create("input");
    let node = dom.create("div");
    dom.insert_after(&orphan, &node);
    assert_eq!(dom.parent(node), None);
}

#[test]
fn remove_detaches_and_is_repeatable() {
    let dom = MemoryDom::new();
    let (form, first, second) = form_with_inputs(&dom);
    dom.remove(&first);
    dom.remove(&first);
    assert!(!dom.is_connected(first));
    assert_eq!(dom.children(form), vec![second]);
}

#[test]
fn set_text_replaces_children_and_prepend_restores_icon() {
    let dom = MemoryDom::new();
    let button = dom.build(dom.body_id(), "button").finish();
    let icon = dom.build(button, "i").finish();
    dom.set_text(&button, "Светлая тема");
    assert!(dom.children(button).is_empty());
    dom.prepend_child(&button, &icon);
    assert_eq!(dom.children(button), vec![icon]);
    assert_eq!(dom.text(&button), "Светлая тема");
}

#[test]
fn contains_is_inclusive() {
    let dom = MemoryDom::new();
    let (form, first, _) = form_with_inputs(&dom);
    assert!(dom.contains(&form, &form));
    assert!(dom.contains(&form, &first));
    assert!(!dom.contains(&first, &form));
}

#[test]
fn value_is_set_by_user_input() {
    let dom = MemoryDom::new();
    let input = dom.build(dom.body_id(), "input").value("  ").finish();
    assert_eq!(dom.value(&input), "  ");
    dom.set_value(input, "admin");
    assert_eq!(dom.value(&input), "admin");
}
