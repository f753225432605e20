use super::*;
use crate::dom::memory::MemoryDom;
use crate::fixture::Fixture;

// =============================================================
// Scan timing
// =============================================================

#[test]
fn alert_present_at_load_is_gone_after_eight_seconds() {
    let dom = MemoryDom::new();
    let alert = dom.build(dom.body_id(), "div").class("alert").class("alert-success").finish();
    let fixture = Fixture::with(dom).start();

    fixture.advance(7_999);
    assert!(fixture.dom().is_connected(alert));
    fixture.advance(1);
    assert!(!fixture.dom().is_connected(alert));
}

#[test]
fn fading_alert_loses_show_then_detaches_after_fade() {
    let dom = MemoryDom::new();
    let alert = dom.build(dom.body_id(), "div").class("alert").class("fade").class("show").finish();
    let fixture = Fixture::with(dom).start();

    fixture.advance(8_000);
    assert!(!fixture.dom().has_class(&alert, "show"));
    assert!(fixture.dom().is_connected(alert));
    fixture.advance(150);
    assert!(!fixture.dom().is_connected(alert));
}

#[test]
fn alert_inserted_before_scan_is_picked_up() {
    let fixture = Fixture::with(MemoryDom::new()).start();
    fixture.advance(2_000);
    let body = fixture.dom().body_id();
    let alert = fixture.dom().build(body, "div").class("alert").finish();
    fixture.advance(6_000);
    assert!(!fixture.dom().is_connected(alert));
}

#[test]
fn alert_inserted_after_scan_is_never_dismissed() {
    let fixture = Fixture::with(MemoryDom::new()).start();
    fixture.advance(3_000);
    let body = fixture.dom().body_id();
    let late = fixture.dom().build(body, "div").class("alert").finish();
    fixture.advance(600_000);
    assert!(fixture.dom().is_connected(late));
}

#[test]
fn all_alerts_close_together() {
    let dom = MemoryDom::new();
    let first = dom.build(dom.body_id(), "div").class("alert").finish();
    let second = dom.build(dom.body_id(), "div").class("alert").finish();
    let fixture = Fixture::with(dom).start();
    fixture.advance(8_000);
    assert!(!fixture.dom().is_connected(first));
    assert!(!fixture.dom().is_connected(second));
    assert_eq!(fixture.page.active_timers(BehaviorKind::AlertDismiss), 0);
}

// =============================================================
// Controller and teardown
// =============================================================

#[test]
fn alert_removed_by_user_before_close_is_harmless() {
    let dom = MemoryDom::new();
    let alert = dom.build(dom.body_id(), "div").class("alert").finish();
    let fixture = Fixture::with(dom).start();
    fixture.advance(4_000);
    fixture.dom().remove(&alert);
    fixture.advance(10_000);
    assert!(!fixture.dom().is_connected(alert));
}

#[test]
fn teardown_before_scan_keeps_alerts() {
    let dom = MemoryDom::new();
    let alert = dom.build(dom.body_id(), "div").class("alert").finish();
    let fixture = Fixture::with(dom).start();
    assert_eq!(fixture.page.active_timers(BehaviorKind::AlertDismiss), 1);
    fixture.page.teardown(BehaviorKind::AlertDismiss);
    fixture.advance(60_000);
    assert!(fixture.dom().is_connected(alert));
}

#[test]
fn teardown_after_scan_cancels_pending_closes() {
    let dom = MemoryDom::new();
    let alert = dom.build(dom.body_id(), "div").class("alert").finish();
    let fixture = Fixture::with(dom).start();
    fixture.advance(3_000);
    assert_eq!(fixture.page.active_timers(BehaviorKind::AlertDismiss), 1);
    fixture.page.teardown(BehaviorKind::AlertDismiss);
    fixture.advance(60_000);
    assert!(fixture.dom().is_connected(alert));
}

#[test]
fn controller_closes_immediately_without_fade() {
    let dom = MemoryDom::new();
    let alert = dom.build(dom.body_id(), "div").class("alert").class("show").finish();
    let fixture = Fixture::with(dom).build();
    AlertController::new(alert).close(&fixture.page);
    assert!(!fixture.dom().is_connected(alert));
}
