//! Browser implementations of the host services.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use futures::FutureExt;
use futures::future::LocalBoxFuture;
use gloo_timers::callback::{Interval, Timeout};
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Storage, Window};

use super::{js_error_text, report};
use crate::error::{ClipboardError, PageError};
use crate::host::{Clipboard, Clock, Dialogs, Host, KeyValueStore, MemoryStorage, Scheduler, TimerId};

/// Host services backed by `window`.
///
/// Falls back to a process-local store when `localStorage` is blocked, so the
/// theme still toggles for the lifetime of the page.
pub fn browser_host(window: &Window) -> Host {
    let storage: Rc<dyn KeyValueStore> = match window.local_storage() {
        Ok(Some(storage)) => Rc::new(LocalStorage { storage }),
        Ok(None) => {
            log::warn!("localStorage unavailable; theme choice will not persist");
            Rc::new(MemoryStorage::new())
        }
        Err(error) => {
            log::warn!("localStorage blocked: {}; theme choice will not persist", js_error_text(&error));
            Rc::new(MemoryStorage::new())
        }
    };
    Host {
        storage,
        dialogs: Rc::new(WindowDialogs { window: window.clone() }),
        clipboard: Rc::new(NavigatorClipboard { window: window.clone() }),
        scheduler: Rc::new(GlooScheduler::default()),
        clock: Rc::new(BrowserClock),
    }
}

// =============================================================================
// STORAGE
// =============================================================================

pub struct LocalStorage {
    storage: Storage,
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Option<String> {
        match self.storage.get_item(key) {
            Ok(value) => value,
            Err(error) => {
                log::warn!("localStorage read of {key} failed: {}", js_error_text(&error));
                None
            }
        }
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PageError> {
        self.storage
            .set_item(key, value)
            .map_err(|error| PageError::Storage { key: key.to_owned(), reason: js_error_text(&error) })
    }
}

// =============================================================================
// DIALOGS
// =============================================================================

pub struct WindowDialogs {
    window: Window,
}

impl Dialogs for WindowDialogs {
    fn confirm(&self, message: &str) -> bool {
        // A sandboxed frame throws instead of asking; let the submission through.
        match self.window.confirm_with_message(message) {
            Ok(answer) => answer,
            Err(error) => {
                log::warn!("confirm dialog unavailable: {}", js_error_text(&error));
                true
            }
        }
    }

    fn alert(&self, message: &str) {
        report("alert", self.window.alert_with_message(message));
    }
}

// =============================================================================
// CLIPBOARD
// =============================================================================

pub struct NavigatorClipboard {
    window: Window,
}

impl NavigatorClipboard {
    /// `navigator.clipboard`, absent on insecure origins.
    fn clipboard(&self) -> Option<web_sys::Clipboard> {
        let navigator = self.window.navigator();
        let value = js_sys::Reflect::get(&navigator, &JsValue::from_str("clipboard")).unwrap_or(JsValue::UNDEFINED);
        match value.dyn_into::<web_sys::Clipboard>() {
            Ok(clipboard) => Some(clipboard),
            Err(_) => None,
        }
    }
}

impl Clipboard for NavigatorClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let Some(clipboard) = self.clipboard() else {
            return futures::future::ready(Err(ClipboardError::Unavailable)).boxed_local();
        };
        let write = JsFuture::from(clipboard.write_text(text));
        async move {
            write.await.map(drop).map_err(|error| ClipboardError::Rejected(js_error_text(&error)))
        }
        .boxed_local()
    }
}

// =============================================================================
// TIMERS
// =============================================================================

enum Handle {
    Timeout(Timeout),
    Interval(Interval),
}

/// [`Scheduler`] over `gloo_timers` callbacks.
///
/// Dropping a gloo handle cancels it, so handles are retained by id. A
/// one-shot records its id in `fired` after it runs; those handles are dropped
/// on the next scheduler call, never from inside their own callback.
#[derive(Default)]
pub struct GlooScheduler {
    next_id: Cell<u64>,
    handles: RefCell<HashMap<TimerId, Handle>>,
    fired: Rc<RefCell<Vec<TimerId>>>,
}

impl GlooScheduler {
    fn allocate(&self) -> TimerId {
        self.reap();
        let raw = self.next_id.get() + 1;
        self.next_id.set(raw);
        TimerId::from_raw(raw)
    }

    fn reap(&self) {
        let fired: Vec<TimerId> = self.fired.borrow_mut().drain(..).collect();
        let mut handles = self.handles.borrow_mut();
        for id in fired {
            handles.remove(&id);
        }
    }
}

impl Scheduler for GlooScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.allocate();
        let fired = Rc::clone(&self.fired);
        let timeout = Timeout::new(delay_ms, move || {
            task();
            fired.borrow_mut().push(id);
        });
        self.handles.borrow_mut().insert(id, Handle::Timeout(timeout));
        id
    }

    fn set_interval(&self, period_ms: u32, mut task: Box<dyn FnMut()>) -> TimerId {
        let id = self.allocate();
        let interval = Interval::new(period_ms, move || task());
        self.handles.borrow_mut().insert(id, Handle::Interval(interval));
        id
    }

    fn cancel(&self, id: TimerId) {
        self.reap();
        let handle = self.handles.borrow_mut().remove(&id);
        match handle {
            Some(Handle::Timeout(timeout)) => drop(timeout.cancel()),
            Some(Handle::Interval(interval)) => drop(interval.cancel()),
            None => {}
        }
    }
}

// =============================================================================
// CLOCK
// =============================================================================

pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_ms(&self) -> f64 {
        js_sys::Date::now()
    }
}
