//! Copy-to-clipboard with a transient success toast.
//!
//! Failures are logged and reported with a blocking alert. There is no retry
//! and no `execCommand` fallback.

#[cfg(test)]
#[path = "clipboard_test.rs"]
mod clipboard_test;

use futures::FutureExt;
use futures::future::LocalBoxFuture;

use crate::dom::Dom;
use crate::error::ClipboardError;
use crate::page::{BehaviorKind, Page};

pub const TOAST_WRAPPER_CLASS: &str = "position-fixed bottom-0 end-0 p-3";
pub const TOAST_CLASS: &str = "toast show";
pub const TOAST_BODY_CLASS: &str = "toast-body d-flex align-items-center";
pub const TOAST_ICON_CLASS: &str = "bi bi-check-circle-fill text-success me-2";

/// A JavaScript argument to `copyToClipboard`, before string conversion.
#[derive(Clone, Debug, PartialEq)]
pub enum ScriptValue {
    Undefined,
    Null,
    Bool(bool),
    Number(f64),
    Text(String),
    /// Anything else, already rendered through its own `toString`.
    Object(String),
}

impl ScriptValue {
    /// `String(value)`.
    #[must_use]
    pub fn to_js_string(&self) -> String {
        match self {
            Self::Undefined => "undefined".to_owned(),
            Self::Null => "null".to_owned(),
            Self::Bool(value) => value.to_string(),
            Self::Number(value) => js_number_to_string(*value),
            Self::Text(value) | Self::Object(value) => value.clone(),
        }
    }
}

/// Map the global's `(text, successMessage)` arguments. Only a missing
/// message falls back to the default; `null` and friends are stringified.
#[must_use]
pub fn copy_arguments(text: &ScriptValue, message: &ScriptValue) -> (String, Option<String>) {
    let message = match message {
        ScriptValue::Undefined => None,
        other => Some(other.to_js_string()),
    };
    (text.to_js_string(), message)
}

/// `Number.prototype.toString()` for the values a template can pass.
#[must_use]
pub fn js_number_to_string(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_owned();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_owned();
    }
    if value == 0.0 {
        return "0".to_owned();
    }
    let magnitude = value.abs();
    if (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }
    // Exponent form: Rust writes `1e21` / `1.5e-7`, JS writes `1e+21` / `1.5e-7`.
    let rendered = format!("{value:e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => format!("{mantissa}e+{exponent}"),
        _ => rendered,
    }
}

impl<D: Dom + 'static> Page<D> {
    /// Write `text` to the clipboard, then toast `success_message` (or the
    /// configured default). Resolves with the clipboard result after the
    /// toast or alert has been shown.
    pub fn copy_to_clipboard(
        &self,
        text: &str,
        success_message: Option<&str>,
    ) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let message = success_message.map_or_else(|| self.config.messages.copy_success_default.clone(), str::to_owned);
        let write = self.host.clipboard.write_text(text);
        let page = self.weak_ref();
        async move {
            let result = write.await;
            let Some(page) = page.upgrade() else {
                return result;
            };
            match &result {
                Ok(()) => {
                    page.show_toast(&message);
                }
                Err(error) => {
                    log::error!("copy to clipboard failed: {error}");
                    page.host.dialogs.alert(&page.config.messages.copy_failed);
                }
            }
            result
        }
        .boxed_local()
    }

    /// Append a success toast to the body and schedule its removal.
    ///
    /// Returns the wrapper, or `None` when the document refused to create it.
    pub fn show_toast(&self, message: &str) -> Option<D::Node> {
        let dom = &self.dom;
        let wrapper = self.element_with_class("div", TOAST_WRAPPER_CLASS)?;
        let toast = self.element_with_class("div", TOAST_CLASS)?;
        dom.set_attribute(&toast, "role", "alert");

        let body = self.element_with_class("div", TOAST_BODY_CLASS)?;
        // Text first: `set_text` replaces children, so the icon goes in after.
        dom.set_text(&body, message);
        if let Some(icon) = self.element_with_class("i", TOAST_ICON_CLASS) {
            dom.prepend_child(&body, &icon);
        }

        dom.append_child(&toast, &body);
        dom.append_child(&wrapper, &toast);
        let host = dom.body().unwrap_or_else(|| dom.document_element());
        dom.append_child(&host, &wrapper);

        let toast_node = wrapper.clone();
        self.after(BehaviorKind::ClipboardCopy, self.config.timings.toast_lifetime_ms, move |page| {
            page.dom().remove(&toast_node);
        });
        Some(wrapper)
    }

    fn element_with_class(&self, tag: &str, class: &str) -> Option<D::Node> {
        let element = self.dom.create_element(tag);
        match &element {
            Some(node) => self.dom.set_class_name(node, class),
            None => log::warn!("could not create <{tag}> for toast"),
        }
        element
    }
}
