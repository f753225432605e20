//! Browser entry point.
//!
//! SYSTEM CONTEXT
//! ==============
//! `start` runs when the WASM module loads. It waits for `DOMContentLoaded`
//! if the document is still parsing, reads the embedded configuration, runs
//! the per-page behaviors, and installs two delegated listeners on `document`
//! (click and submit) plus the `window.copyToClipboard` global the portal's
//! templates call from inline handlers.
//!
//! Everything installed here is owned by one `Runtime` kept in a
//! thread-local; the exported `teardown` removes it again.

pub mod dom;
pub mod host;

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Promise;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, Event, Window};

use crate::behaviors::clipboard::{ScriptValue, copy_arguments};
use crate::config::PageConfig;
use crate::error::PageError;
use crate::page::{BehaviorKind, Page};

pub use dom::WebDom;
pub use host::{BrowserClock, GlooScheduler, LocalStorage, NavigatorClipboard, WindowDialogs, browser_host};

/// `id` of the `<script type="application/json">` carrying [`PageConfig`].
pub const CONFIG_ELEMENT_ID: &str = "page-behaviors-config";

/// Name of the global the templates call: `copyToClipboard(text, message?)`.
pub const COPY_GLOBAL: &str = "copyToClipboard";

type Listener = Closure<dyn FnMut(Event)>;
type CopyFn = Closure<dyn Fn(JsValue, JsValue) -> Promise>;

thread_local! {
    static RUNTIME: RefCell<Option<Runtime>> = const { RefCell::new(None) };
}

/// Module start hook.
///
/// # Errors
///
/// Returns the boot error as a JS string when there is no window or document.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let window = web_sys::window().ok_or_else(|| to_js(&PageError::MissingWindow))?;
    let document = window.document().ok_or_else(|| to_js(&PageError::MissingDocument))?;

    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(move || {
            if let Err(error) = boot() {
                log::error!("page behaviors failed to start: {error}");
            }
        });
        return document
            .add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())
            .map_err(|error| to_js(&PageError::from(error)));
    }
    boot().map_err(|error| to_js(&error))
}

/// Cancel every timer, remove the delegated listeners, and delete
/// `window.copyToClipboard`. Safe to call more than once.
#[wasm_bindgen]
pub fn teardown() {
    let runtime = RUNTIME.with(|slot| slot.borrow_mut().take());
    if let Some(runtime) = runtime {
        runtime.detach();
    }
}

fn boot() -> Result<(), PageError> {
    let window = web_sys::window().ok_or(PageError::MissingWindow)?;
    let document = window.document().ok_or(PageError::MissingDocument)?;

    let (config, config_error) = match load_config(&document) {
        Ok(config) => (config, None),
        Err(error) => (PageConfig::default(), Some(error)),
    };
    install_logger(config.log_level());
    if let Some(error) = config_error {
        log::warn!("{error}; falling back to defaults");
    }

    let copy_enabled = config.is_enabled(BehaviorKind::ClipboardCopy);
    let page = Page::new(WebDom::new(document.clone())?, config, browser_host(&window));
    page.init();

    let mut runtime = Runtime { page, window, document, listeners: Vec::new(), copy_fn: None };
    runtime.listen("click", click_listener(Rc::clone(&runtime.page)))?;
    runtime.listen("submit", submit_listener(Rc::clone(&runtime.page)))?;
    if copy_enabled {
        runtime.install_copy_global()?;
    }

    let previous = RUNTIME.with(|slot| slot.borrow_mut().replace(runtime));
    if let Some(previous) = previous {
        previous.detach();
    }
    Ok(())
}

/// Read the embedded JSON configuration; defaults when the element is absent or empty.
fn load_config(document: &Document) -> Result<PageConfig, PageError> {
    let raw = document.get_element_by_id(CONFIG_ELEMENT_ID).and_then(|element| element.text_content()).unwrap_or_default();
    if raw.trim().is_empty() {
        return Ok(PageConfig::default());
    }
    Ok(PageConfig::from_json(&raw)?)
}

fn install_logger(level: log::Level) {
    if let Err(error) = console_log::init_with_level(level) {
        log::debug!("console logger already installed: {error}");
    }
}

fn click_listener(page: Rc<Page<WebDom>>) -> Listener {
    Closure::new(move |event: Event| {
        if let Some(target) = event_element(&event) {
            page.handle_click(&target);
        }
    })
}

fn submit_listener(page: Rc<Page<WebDom>>) -> Listener {
    Closure::new(move |event: Event| {
        let Some(form) = event_element(&event) else {
            return;
        };
        if !page.handle_submit(&form).should_submit() {
            event.prevent_default();
        }
    })
}

/// Classify a JS argument for `String(value)` conversion.
fn script_value(value: &JsValue) -> ScriptValue {
    if value.is_undefined() {
        ScriptValue::Undefined
    } else if value.is_null() {
        ScriptValue::Null
    } else if let Some(flag) = value.as_bool() {
        ScriptValue::Bool(flag)
    } else if let Some(number) = value.as_f64() {
        ScriptValue::Number(number)
    } else if let Some(text) = value.as_string() {
        ScriptValue::Text(text)
    } else {
        ScriptValue::Object(String::from(value.unchecked_ref::<js_sys::Object>().to_string()))
    }
}

fn event_element(event: &Event) -> Option<Element> {
    match event.target()?.dyn_into::<Element>() {
        Ok(element) => Some(element),
        Err(_) => None,
    }
}

struct Runtime {
    page: Rc<Page<WebDom>>,
    window: Window,
    document: Document,
    listeners: Vec<(&'static str, Listener)>,
    copy_fn: Option<CopyFn>,
}

impl Runtime {
    fn listen(&mut self, kind: &'static str, listener: Listener) -> Result<(), PageError> {
        self.document.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.listeners.push((kind, listener));
        Ok(())
    }

    /// `window.copyToClipboard(text, message?)` resolving to whether the copy succeeded.
    fn install_copy_global(&mut self) -> Result<(), PageError> {
        let page = Rc::clone(&self.page);
        let copy: CopyFn = Closure::new(move |text: JsValue, message: JsValue| {
            let (text, message) = copy_arguments(&script_value(&text), &script_value(&message));
            let write = page.copy_to_clipboard(&text, message.as_deref());
            wasm_bindgen_futures::future_to_promise(async move { Ok(JsValue::from_bool(write.await.is_ok())) })
        });
        js_sys::Reflect::set(&self.window, &JsValue::from_str(COPY_GLOBAL), copy.as_ref())?;
        self.copy_fn = Some(copy);
        Ok(())
    }

    fn detach(self) {
        self.page.teardown_all();
        for (kind, listener) in &self.listeners {
            report(
                "removeEventListener",
                self.document.remove_event_listener_with_callback(kind, listener.as_ref().unchecked_ref()),
            );
        }
        if self.copy_fn.is_some() {
            report("delete copyToClipboard", js_sys::Reflect::delete_property(&self.window, &JsValue::from_str(COPY_GLOBAL)));
        }
        log::info!("page behaviors detached");
    }
}

impl From<JsValue> for PageError {
    fn from(value: JsValue) -> Self {
        Self::Js(js_error_text(&value))
    }
}

fn to_js(error: &PageError) -> JsValue {
    JsValue::from_str(&error.to_string())
}

/// Best-effort message for a thrown JS value.
pub(crate) fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

/// Log a failed DOM call; behaviors carry on regardless.
pub(crate) fn report<T>(operation: &str, result: Result<T, JsValue>) {
    if let Err(error) = result {
        log::warn!("{operation} failed: {}", js_error_text(&error));
    }
}
