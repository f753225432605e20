//! Notification dropdown open/close.
//!
//! Visibility is the panel's inline `display` value. Clicks are resolved in one
//! place ([`Page::resolve_click`]) so the trigger click and the outside-click
//! close never race each other.

#[cfg(test)]
#[path = "notifications_test.rs"]
mod notifications_test;

use crate::dom::Dom;
use crate::page::Page;

const OPEN: &str = "block";
const CLOSED: &str = "none";

/// What a click does to the notification panel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PanelAction {
    /// Click landed on the trigger.
    Toggle,
    /// Click landed inside the panel.
    Keep,
    /// Click landed anywhere else.
    Close,
    /// Trigger or panel is missing from the page.
    Absent,
}

impl<D: Dom + 'static> Page<D> {
    fn notification_elements(&self) -> Option<(D::Node, D::Node)> {
        let selectors = &self.config.selectors;
        let trigger = self.dom.element_by_id(&selectors.notification_toggle_id)?;
        let panel = self.dom.element_by_id(&selectors.notification_panel_id)?;
        Some((trigger, panel))
    }

    pub(crate) fn init_notifications(&self, trigger: Option<&D::Node>) {
        if trigger.is_none() || self.notification_elements().is_none() {
            log::debug!("notification trigger or panel not present; dropdown disabled");
        }
    }

    /// Whether the panel is currently shown.
    #[must_use]
    pub fn notifications_open(&self) -> bool {
        self.notification_elements().is_some_and(|(_, panel)| self.dom.style(&panel, "display") == OPEN)
    }

    pub(crate) fn resolve_panel_action(&self, target: &D::Node) -> PanelAction {
        let Some((trigger, panel)) = self.notification_elements() else {
            return PanelAction::Absent;
        };
        if self.dom.contains(&trigger, target) {
            PanelAction::Toggle
        } else if self.dom.contains(&panel, target) {
            PanelAction::Keep
        } else {
            PanelAction::Close
        }
    }

    pub(crate) fn apply_panel_action(&self, action: PanelAction) {
        let Some((_, panel)) = self.notification_elements() else {
            return;
        };
        match action {
            PanelAction::Toggle => {
                let next = if self.dom.style(&panel, "display") == OPEN { CLOSED } else { OPEN };
                self.dom.set_style(&panel, "display", next);
            }
            PanelAction::Close => self.dom.set_style(&panel, "display", CLOSED),
            PanelAction::Keep | PanelAction::Absent => {}
        }
    }
}
