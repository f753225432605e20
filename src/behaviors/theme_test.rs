use super::*;
use crate::config::PageConfig;
use crate::dom::memory::{MemoryDom, NodeId};
use crate::fixture::Fixture;
use crate::host::MemoryStorage;

fn page_with_toggle(theme: Option<&str>) -> (MemoryDom, NodeId, NodeId) {
    let dom = MemoryDom::new();
    if let Some(theme) = theme {
        dom.set_attribute(&dom.document_element(), "data-bs-theme", theme);
    }
    let nav = dom.build(dom.body_id(), "nav").finish();
    let trigger = dom.build(nav, "a").class("dropdown-item").class("theme-toggle").finish();
    let icon = dom.build(trigger, "i").class("bi").class("bi-moon").class("me-2").finish();
    (dom, trigger, icon)
}

fn root_theme(fixture: &Fixture) -> Option<String> {
    let dom = fixture.dom();
    dom.attribute(&dom.document_element(), "data-bs-theme")
}

// =============================================================
// Theme value rules
// =============================================================

#[test]
fn only_literal_dark_is_dark() {
    assert_eq!(Theme::from_attribute(Some("dark")), Theme::Dark);
    assert_eq!(Theme::from_attribute(Some("light")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("Dark")), Theme::Light);
    assert_eq!(Theme::from_attribute(Some("")), Theme::Light);
    assert_eq!(Theme::from_attribute(None), Theme::Light);
}

#[test]
fn toggled_flips_and_round_trips() {
    assert_eq!(Theme::Light.toggled(), Theme::Dark);
    assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
}

#[test]
fn settings_read_and_write_store() {
    let store = Rc::new(MemoryStorage::new().with_entry("theme", "dark"));
    let settings = ThemeSettings::new(store.clone(), "theme");
    assert_eq!(settings.stored(), Some(Theme::Dark));
    settings.persist(Theme::Light).expect("memory store accepts writes");
    assert_eq!(store.get("theme").as_deref(), Some("light"));
}

#[test]
fn settings_without_entry_report_none() {
    let settings = ThemeSettings::new(Rc::new(MemoryStorage::new()), "theme");
    assert_eq!(settings.stored(), None);
}

// =============================================================
// Toggle behavior
// =============================================================

#[test]
fn toggle_flips_root_and_persists() {
    let (dom, trigger, _) = page_with_toggle(None);
    let fixture = Fixture::with(dom).start();
    fixture.page.handle_click(&trigger);
    assert_eq!(root_theme(&fixture).as_deref(), Some("dark"));
    assert_eq!(fixture.storage.get("theme").as_deref(), Some("dark"));
}

#[test]
fn toggling_twice_restores_root_and_storage() {
    let (dom, trigger, _) = page_with_toggle(Some("light"));
    let fixture = Fixture::with(dom).start();
    fixture.page.handle_click(&trigger);
    fixture.page.handle_click(&trigger);
    assert_eq!(root_theme(&fixture).as_deref(), Some("light"));
    assert_eq!(fixture.storage.get("theme").as_deref(), Some("light"));
}

#[test]
fn label_describes_the_next_action() {
    let (dom, trigger, icon) = page_with_toggle(None);
    let fixture = Fixture::with(dom).start();

    assert_eq!(fixture.page.toggle_theme(), Theme::Dark);
    assert_eq!(fixture.dom().text(&trigger), "Светлая тема");
    assert_eq!(fixture.dom().attribute(&icon, "class").as_deref(), Some("bi bi-sun me-2"));

    assert_eq!(fixture.page.toggle_theme(), Theme::Light);
    assert_eq!(fixture.dom().text(&trigger), "Темная тема");
    assert_eq!(fixture.dom().attribute(&icon, "class").as_deref(), Some("bi bi-moon me-2"));
}

#[test]
fn icon_survives_relabeling() {
    let (dom, trigger, icon) = page_with_toggle(None);
    let fixture = Fixture::with(dom).start();
    fixture.page.toggle_theme();
    assert_eq!(fixture.dom().children(trigger), vec![icon]);
}

#[test]
fn click_on_icon_counts_as_trigger_click() {
    let (dom, _, icon) = page_with_toggle(None);
    let fixture = Fixture::with(dom).start();
    assert!(fixture.page.handle_click(&icon).toggle_theme);
    assert_eq!(fixture.page.current_theme(), Theme::Dark);
}

#[test]
fn storage_failure_still_switches_theme() {
    let (dom, trigger, _) = page_with_toggle(None);
    let fixture = Fixture::with(dom).storage(MemoryStorage::read_only()).start();
    fixture.page.handle_click(&trigger);
    assert_eq!(root_theme(&fixture).as_deref(), Some("dark"));
    assert_eq!(fixture.storage.get("theme"), None);
}

// =============================================================
// Load-time labeling
// =============================================================

#[test]
fn dark_root_prelabels_trigger_at_init() {
    let (dom, trigger, icon) = page_with_toggle(Some("dark"));
    let fixture = Fixture::with(dom).start();
    assert_eq!(fixture.dom().text(&trigger), "Светлая тема");
    assert_eq!(fixture.dom().attribute(&icon, "class").as_deref(), Some("bi bi-sun me-2"));
}

#[test]
fn light_root_leaves_server_markup_alone() {
    let (dom, trigger, icon) = page_with_toggle(Some("light"));
    let fixture = Fixture::with(dom).start();
    assert_eq!(fixture.dom().text(&trigger), "");
    assert_eq!(fixture.dom().attribute(&icon, "class").as_deref(), Some("bi bi-moon me-2"));
}

#[test]
fn stored_theme_is_ignored_unless_restore_enabled() {
    let (dom, _, _) = page_with_toggle(Some("light"));
    let storage = MemoryStorage::new().with_entry("theme", "dark");
    let fixture = Fixture::with(dom).storage(storage).start();
    assert_eq!(root_theme(&fixture).as_deref(), Some("light"));
}

#[test]
fn restore_applies_stored_theme_and_labels_trigger() {
    let (dom, trigger, _) = page_with_toggle(Some("light"));
    let storage = MemoryStorage::new().with_entry("theme", "dark");
    let config = PageConfig { restore_stored_theme: true, ..PageConfig::default() };
    let fixture = Fixture::with(dom).storage(storage).config(config).start();
    assert_eq!(root_theme(&fixture).as_deref(), Some("dark"));
    assert_eq!(fixture.dom().text(&trigger), "Светлая тема");
}

#[test]
fn missing_trigger_disables_feature() {
    let dom = MemoryDom::new();
    let elsewhere = dom.build(dom.body_id(), "p").finish();
    let fixture = Fixture::with(dom).start();
    assert!(!fixture.page.handle_click(&elsewhere).toggle_theme);
    assert_eq!(root_theme(&fixture), None);
    assert_eq!(fixture.storage.get("theme"), None);
}
