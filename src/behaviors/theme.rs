//! Light/dark theme toggle.
//!
//! The root attribute is the source of truth for the active theme; storage
//! only mirrors it for the next page load. The trigger always describes the
//! action a click would take, so in dark mode it offers the light theme.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::rc::Rc;

use crate::dom::{Dom, Selector};
use crate::error::PageError;
use crate::host::KeyValueStore;
use crate::page::{BehaviorKind, Page};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Anything other than the literal `"dark"` counts as light.
    #[must_use]
    pub fn from_attribute(value: Option<&str>) -> Self {
        if value == Some("dark") { Self::Dark } else { Self::Light }
    }

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    /// Icon classes for the trigger while this theme is active.
    #[must_use]
    pub fn trigger_icon(self) -> &'static str {
        match self {
            Self::Dark => "bi bi-sun me-2",
            Self::Light => "bi bi-moon me-2",
        }
    }
}

/// Persisted theme preference over an injected store.
pub struct ThemeSettings {
    store: Rc<dyn KeyValueStore>,
    key: String,
}

impl ThemeSettings {
    pub fn new(store: Rc<dyn KeyValueStore>, key: &str) -> Self {
        Self { store, key: key.to_owned() }
    }

    /// The stored preference, if any was ever written.
    #[must_use]
    pub fn stored(&self) -> Option<Theme> {
        self.store.get(&self.key).map(|value| Theme::from_attribute(Some(&value)))
    }

    /// # Errors
    ///
    /// Propagates the store's refusal to write.
    pub fn persist(&self, theme: Theme) -> Result<(), PageError> {
        self.store.set(&self.key, theme.as_str())
    }
}

impl<D: Dom + 'static> Page<D> {
    /// Theme currently applied to the document root.
    #[must_use]
    pub fn current_theme(&self) -> Theme {
        let root = self.dom.document_element();
        Theme::from_attribute(self.dom.attribute(&root, &self.config.theme_attribute).as_deref())
    }

    pub(crate) fn theme_trigger(&self) -> Option<D::Node> {
        self.dom.query(None, &self.selector(BehaviorKind::ThemeToggle))
    }

    pub(crate) fn init_theme(&self, trigger: Option<&D::Node>) {
        let Some(trigger) = trigger else {
            log::debug!("theme toggle not present; theme switching disabled");
            return;
        };
        if self.config.restore_stored_theme {
            if let Some(stored) = self.theme.stored() {
                if stored != self.current_theme() {
                    self.apply_theme(stored);
                }
            }
        }
        if self.current_theme() == Theme::Dark {
            self.label_theme_trigger(trigger, Theme::Dark);
        }
    }

    /// Flip the theme, persist it, and relabel the trigger. Returns the new theme.
    pub fn toggle_theme(&self) -> Theme {
        let next = self.current_theme().toggled();
        self.apply_theme(next);
        if let Err(error) = self.theme.persist(next) {
            log::warn!("theme preference not saved: {error}");
        }
        if let Some(trigger) = self.theme_trigger() {
            self.label_theme_trigger(&trigger, next);
        }
        log::debug!("theme switched to {}", next.as_str());
        next
    }

    fn apply_theme(&self, theme: Theme) {
        let root = self.dom.document_element();
        self.dom.set_attribute(&root, &self.config.theme_attribute, theme.as_str());
    }

    fn label_theme_trigger(&self, trigger: &D::Node, active: Theme) {
        let icon = self.dom.query(Some(trigger), &Selector::Tag(self.config.selectors.theme_icon_tag.clone()));
        let label = match active {
            Theme::Dark => &self.config.messages.switch_to_light,
            Theme::Light => &self.config.messages.switch_to_dark,
        };
        // Setting the label replaces the trigger's children; put the icon back in front.
        self.dom.set_text(trigger, label);
        if let Some(icon) = icon {
            self.dom.set_class_name(&icon, active.trigger_icon());
            self.dom.prepend_child(trigger, &icon);
        }
    }
}
