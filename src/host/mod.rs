//! Host services injected into the page.
//!
//! SYSTEM CONTEXT
//! ==============
//! Everything the behaviors need from the browser besides the document itself:
//! persistent storage, blocking dialogs, the async clipboard, timers, and the
//! wall clock. The browser versions live in `crate::web`; the in-memory ones
//! here let the whole page run natively.

pub mod fakes;
pub mod storage;
pub mod timers;

use std::rc::Rc;

use futures::future::LocalBoxFuture;

use crate::error::ClipboardError;

pub use fakes::{ScriptedDialogs, StubClipboard};
pub use storage::{KeyValueStore, MemoryStorage};
pub use timers::{ManualScheduler, Scheduler, TimerId};

/// Blocking `window.confirm` / `window.alert`.
pub trait Dialogs {
    fn confirm(&self, message: &str) -> bool;
    fn alert(&self, message: &str);
}

/// Asynchronous system clipboard.
pub trait Clipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>>;
}

/// Wall clock in Unix milliseconds.
pub trait Clock {
    fn now_ms(&self) -> f64;
}

/// Bundle of host services handed to [`crate::page::Page::new`].
#[derive(Clone)]
pub struct Host {
    pub storage: Rc<dyn KeyValueStore>,
    pub dialogs: Rc<dyn Dialogs>,
    pub clipboard: Rc<dyn Clipboard>,
    pub scheduler: Rc<dyn Scheduler>,
    pub clock: Rc<dyn Clock>,
}
