//! Page initializer: the behavior table, event dispatch, and timer bookkeeping.
//!
//! ARCHITECTURE
//! ============
//! `Page` owns the document handle, config, and host services. [`Page::init`]
//! walks [`BEHAVIORS`] once at document-ready. After that the host shell feeds
//! it two delegated events (`click`, `submit`) plus the global copy call;
//! everything else is timers registered through [`Page::after`] /
//! [`Page::every`], which remember which behavior owns each handle so
//! [`Page::teardown`] can cancel them.
//!
//! Timer tasks hold a `Weak<Page>`: dropping the last `Rc` stops every pending
//! callback from touching the document.

#[cfg(test)]
#[path = "page_test.rs"]
mod page_test;

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::fmt;
use std::rc::{Rc, Weak};

use serde::{Deserialize, Serialize};

use crate::behaviors::notifications::PanelAction;
use crate::behaviors::theme::ThemeSettings;
use crate::config::{PageConfig, Selectors};
use crate::dom::{Dom, Selector};
use crate::host::{Host, TimerId};

/// The independent behaviors wired at init.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    ThemeToggle,
    Notifications,
    AlertDismiss,
    CardEntrance,
    ConfirmSubmit,
    RequiredFields,
    ClipboardCopy,
    RelativeTime,
}

impl BehaviorKind {
    pub const ALL: [Self; 8] = [
        Self::ThemeToggle,
        Self::Notifications,
        Self::AlertDismiss,
        Self::CardEntrance,
        Self::ConfirmSubmit,
        Self::RequiredFields,
        Self::ClipboardCopy,
        Self::RelativeTime,
    ];
}

impl fmt::Display for BehaviorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::ThemeToggle => "theme_toggle",
            Self::Notifications => "notifications",
            Self::AlertDismiss => "alert_dismiss",
            Self::CardEntrance => "card_entrance",
            Self::ConfirmSubmit => "confirm_submit",
            Self::RequiredFields => "required_fields",
            Self::ClipboardCopy => "clipboard_copy",
            Self::RelativeTime => "relative_time",
        };
        f.write_str(name)
    }
}

/// One row of the behavior table: which elements anchor the behavior.
pub struct BehaviorEntry {
    pub kind: BehaviorKind,
    pub selector: fn(&Selectors) -> Selector,
}

/// Declarative behavior table, processed in order by [`Page::init`].
pub const BEHAVIORS: [BehaviorEntry; 8] = [
    BehaviorEntry { kind: BehaviorKind::ThemeToggle, selector: |s| Selector::Class(s.theme_toggle_class.clone()) },
    BehaviorEntry { kind: BehaviorKind::Notifications, selector: |s| Selector::Id(s.notification_toggle_id.clone()) },
    BehaviorEntry { kind: BehaviorKind::AlertDismiss, selector: |s| Selector::Class(s.alert_class.clone()) },
    BehaviorEntry { kind: BehaviorKind::CardEntrance, selector: |s| Selector::Class(s.card_class.clone()) },
    BehaviorEntry {
        kind: BehaviorKind::ConfirmSubmit,
        selector: |s| Selector::TagWithAttribute { tag: "form".to_owned(), attribute: s.confirm_attribute.clone() },
    },
    BehaviorEntry { kind: BehaviorKind::RequiredFields, selector: |_| Selector::Tag("form".to_owned()) },
    BehaviorEntry { kind: BehaviorKind::ClipboardCopy, selector: |_| Selector::Tag("body".to_owned()) },
    BehaviorEntry {
        kind: BehaviorKind::RelativeTime,
        selector: |s| Selector::ClassWithAttribute {
            class: s.relative_time_class.clone(),
            attribute: s.timestamp_attribute.clone(),
        },
    },
];

/// Resolved meaning of one document click.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ClickIntent {
    pub toggle_theme: bool,
    pub panel: PanelAction,
}

/// What the submit handler decided for one form submission.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubmitOutcome {
    /// `false` when the confirmation prompt was declined.
    pub confirmed: bool,
    /// Required fields that were empty after trimming.
    pub invalid_fields: usize,
}

impl SubmitOutcome {
    /// Whether the browser should carry on with the submission.
    #[must_use]
    pub fn should_submit(&self) -> bool {
        self.confirmed && self.invalid_fields == 0
    }
}

/// The page-behavior initializer and its live state.
pub struct Page<D: Dom> {
    pub(crate) dom: D,
    pub(crate) config: PageConfig,
    pub(crate) host: Host,
    pub(crate) theme: ThemeSettings,
    timers: RefCell<HashMap<TimerId, BehaviorKind>>,
    weak: Weak<Self>,
}

impl<D: Dom + 'static> Page<D> {
    #[must_use]
    pub fn new(dom: D, config: PageConfig, host: Host) -> Rc<Self> {
        let theme = ThemeSettings::new(Rc::clone(&host.storage), &config.theme_storage_key);
        Rc::new_cyclic(|weak| Self { dom, config, host, theme, timers: RefCell::new(HashMap::new()), weak: weak.clone() })
    }

    pub fn dom(&self) -> &D {
        &self.dom
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    pub(crate) fn weak_ref(&self) -> Weak<Self> {
        self.weak.clone()
    }

    /// Wire every enabled behavior. Call once, when the document is ready.
    pub fn init(&self) {
        for entry in &BEHAVIORS {
            if !self.config.is_enabled(entry.kind) {
                log::debug!("{}: disabled by config", entry.kind);
                continue;
            }
            let selector = (entry.selector)(&self.config.selectors);
            let matched = self.dom.query_all(None, &selector);
            log::debug!("{}: {} element(s) match {selector}", entry.kind, matched.len());
            match entry.kind {
                BehaviorKind::ThemeToggle => self.init_theme(matched.first()),
                BehaviorKind::Notifications => self.init_notifications(matched.first()),
                BehaviorKind::AlertDismiss => self.schedule_alert_scan(selector),
                BehaviorKind::CardEntrance => self.animate_cards(&matched),
                BehaviorKind::RelativeTime => self.start_relative_time(selector),
                // Delegated or global; nothing to attach up front.
                BehaviorKind::ConfirmSubmit | BehaviorKind::RequiredFields | BehaviorKind::ClipboardCopy => {}
            }
        }
        log::info!("page behaviors initialized");
    }

    /// The selector a behavior is anchored on, per the behavior table.
    #[must_use]
    pub fn selector(&self, kind: BehaviorKind) -> Selector {
        BEHAVIORS
            .iter()
            .find(|entry| entry.kind == kind)
            .map_or_else(|| Selector::Tag("body".to_owned()), |entry| (entry.selector)(&self.config.selectors))
    }

    // --- Delegated events ---

    /// Decide what a click on `target` means, without side effects.
    #[must_use]
    pub fn resolve_click(&self, target: &D::Node) -> ClickIntent {
        let toggle_theme = self.config.is_enabled(BehaviorKind::ThemeToggle)
            && self.theme_trigger().is_some_and(|trigger| self.dom.contains(&trigger, target));
        let panel = if self.config.is_enabled(BehaviorKind::Notifications) {
            self.resolve_panel_action(target)
        } else {
            PanelAction::Absent
        };
        ClickIntent { toggle_theme, panel }
    }

    /// Single document-level click handler.
    pub fn handle_click(&self, target: &D::Node) -> ClickIntent {
        let intent = self.resolve_click(target);
        if intent.toggle_theme {
            self.toggle_theme();
        }
        self.apply_panel_action(intent.panel);
        intent
    }

    /// Single document-level submit handler. The caller prevents the default
    /// action when [`SubmitOutcome::should_submit`] is `false`.
    pub fn handle_submit(&self, form: &D::Node) -> SubmitOutcome {
        let confirmed = !self.config.is_enabled(BehaviorKind::ConfirmSubmit) || self.confirm_submission(form);
        let invalid_fields =
            if self.config.is_enabled(BehaviorKind::RequiredFields) { self.validate_form(form) } else { 0 };
        SubmitOutcome { confirmed, invalid_fields }
    }

    // --- Timers ---

    /// Run `task` once after `delay_ms`, owned by `kind`.
    pub(crate) fn after(&self, kind: BehaviorKind, delay_ms: u32, task: impl FnOnce(&Self) + 'static) -> TimerId {
        let page = self.weak.clone();
        let own_id: Rc<Cell<Option<TimerId>>> = Rc::new(Cell::new(None));
        let own_id_for_task = Rc::clone(&own_id);
        let id = self.host.scheduler.set_timeout(
            delay_ms,
            Box::new(move || {
                let Some(page) = page.upgrade() else {
                    return;
                };
                if let Some(id) = own_id_for_task.get() {
                    page.timers.borrow_mut().remove(&id);
                }
                task(&page);
            }),
        );
        own_id.set(Some(id));
        self.timers.borrow_mut().insert(id, kind);
        id
    }

    /// Run `task` every `period_ms`, owned by `kind`, until torn down.
    pub(crate) fn every(&self, kind: BehaviorKind, period_ms: u32, task: impl Fn(&Self) + 'static) -> TimerId {
        let page = self.weak.clone();
        let id = self.host.scheduler.set_interval(
            period_ms,
            Box::new(move || {
                if let Some(page) = page.upgrade() {
                    task(&page);
                }
            }),
        );
        self.timers.borrow_mut().insert(id, kind);
        id
    }

    /// Pending timers owned by `kind`.
    #[must_use]
    pub fn active_timers(&self, kind: BehaviorKind) -> usize {
        self.timers.borrow().values().filter(|owner| **owner == kind).count()
    }

    /// Cancel every pending timer owned by `kind`.
    pub fn teardown(&self, kind: BehaviorKind) {
        let ids: Vec<TimerId> =
            self.timers.borrow().iter().filter(|(_, owner)| **owner == kind).map(|(id, _)| *id).collect();
        for id in ids {
            self.host.scheduler.cancel(id);
            self.timers.borrow_mut().remove(&id);
        }
    }

    /// Cancel every pending timer.
    pub fn teardown_all(&self) {
        let ids: Vec<TimerId> = self.timers.borrow_mut().drain().map(|(id, _)| id).collect();
        for id in &ids {
            self.host.scheduler.cancel(*id);
        }
        log::debug!("page torn down, {} timer(s) cancelled", ids.len());
    }
}
