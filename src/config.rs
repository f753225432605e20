//! Page behavior configuration.
//!
//! DESIGN
//! ======
//! Every field has a default that matches the markup contract of the portal
//! templates, so an empty JSON object (or no config at all) yields the stock
//! behavior. Partial JSON overrides only what it names.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::page::BehaviorKind;

/// Top-level configuration for [`crate::page::Page`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageConfig {
    /// `localStorage` key holding the theme preference.
    pub theme_storage_key: String,
    /// Attribute on `<html>` that carries the active theme.
    pub theme_attribute: String,
    /// Apply the stored theme to the root at init when it differs.
    pub restore_stored_theme: bool,
    /// Behaviors to skip entirely.
    pub disabled: HashSet<BehaviorKind>,
    /// Maximum `log` level once the browser logger is installed.
    pub log_level: String,
    pub selectors: Selectors,
    pub timings: Timings,
    pub messages: Messages,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            theme_storage_key: "theme".to_owned(),
            theme_attribute: "data-bs-theme".to_owned(),
            restore_stored_theme: false,
            disabled: HashSet::new(),
            log_level: "info".to_owned(),
            selectors: Selectors::default(),
            timings: Timings::default(),
            messages: Messages::default(),
        }
    }
}

impl PageConfig {
    /// Parse configuration from JSON, defaulting every missing field.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when `raw` is not a valid config object.
    pub fn from_json(raw: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(raw)
    }

    #[must_use]
    pub fn is_enabled(&self, kind: BehaviorKind) -> bool {
        !self.disabled.contains(&kind)
    }

    /// Parsed [`Self::log_level`], falling back to `Info` for unknown names.
    #[must_use]
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }
}

/// Class names, ids and attribute names the behaviors look for.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub theme_toggle_class: String,
    pub theme_icon_tag: String,
    pub notification_toggle_id: String,
    pub notification_panel_id: String,
    pub alert_class: String,
    pub card_class: String,
    pub confirm_attribute: String,
    pub required_attribute: String,
    pub relative_time_class: String,
    pub timestamp_attribute: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            theme_toggle_class: "theme-toggle".to_owned(),
            theme_icon_tag: "i".to_owned(),
            notification_toggle_id: "notificationToggle".to_owned(),
            notification_panel_id: "notificationDropdown".to_owned(),
            alert_class: "alert".to_owned(),
            card_class: "card".to_owned(),
            confirm_attribute: "data-confirm".to_owned(),
            required_attribute: "required".to_owned(),
            relative_time_class: "relative-time".to_owned(),
            timestamp_attribute: "data-timestamp".to_owned(),
        }
    }
}

/// Delays and periods, all in milliseconds.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Timings {
    pub alert_scan_delay_ms: u32,
    pub alert_close_delay_ms: u32,
    pub alert_fade_ms: u32,
    pub card_stagger_ms: u32,
    pub toast_lifetime_ms: u32,
    pub shake_duration_ms: u32,
    pub relative_time_refresh_ms: u32,
}

impl Default for Timings {
    fn default() -> Self {
        Self {
            alert_scan_delay_ms: 3_000,
            alert_close_delay_ms: 5_000,
            alert_fade_ms: 150,
            card_stagger_ms: 100,
            toast_lifetime_ms: 2_000,
            shake_duration_ms: 1_000,
            relative_time_refresh_ms: 60_000,
        }
    }
}

/// User-visible strings. Relative-time templates substitute `{n}`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub switch_to_light: String,
    pub switch_to_dark: String,
    pub confirm_default: String,
    pub copy_success_default: String,
    pub copy_failed: String,
    pub required_field: String,
    pub just_now: String,
    pub minutes_ago: String,
    pub hours_ago: String,
    pub days_ago: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            switch_to_light: "Светлая тема".to_owned(),
            switch_to_dark: "Темная тема".to_owned(),
            confirm_default: "Вы уверены?".to_owned(),
            copy_success_default: "Скопировано!".to_owned(),
            copy_failed: "Не удалось скопировать текст".to_owned(),
            required_field: "Это поле обязательно для заполнения".to_owned(),
            just_now: "только что".to_owned(),
            minutes_ago: "{n} мин назад".to_owned(),
            hours_ago: "{n} ч назад".to_owned(),
            days_ago: "{n} дн назад".to_owned(),
        }
    }
}
