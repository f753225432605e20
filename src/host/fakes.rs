//! Scriptable dialog and clipboard doubles for native runs and tests.

use std::cell::RefCell;
use std::collections::VecDeque;

use futures::FutureExt;
use futures::future::{self, LocalBoxFuture};

use super::{Clipboard, Dialogs};
use crate::error::ClipboardError;

/// Answers `confirm` from a queue (defaulting to `accept_by_default`) and
/// records every prompt shown.
#[derive(Debug, Default)]
pub struct ScriptedDialogs {
    answers: RefCell<VecDeque<bool>>,
    accept_by_default: bool,
    confirms: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl ScriptedDialogs {
    /// Dialogs that accept every confirmation.
    #[must_use]
    pub fn accepting() -> Self {
        Self { accept_by_default: true, ..Self::default() }
    }

    /// Dialogs that decline every confirmation.
    #[must_use]
    pub fn declining() -> Self {
        Self::default()
    }

    /// Queue a one-off answer for the next `confirm`.
    pub fn answer_next(&self, accept: bool) {
        self.answers.borrow_mut().push_back(accept);
    }

    #[must_use]
    pub fn confirms(&self) -> Vec<String> {
        self.confirms.borrow().clone()
    }

    #[must_use]
    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Dialogs for ScriptedDialogs {
    fn confirm(&self, message: &str) -> bool {
        self.confirms.borrow_mut().push(message.to_owned());
        self.answers.borrow_mut().pop_front().unwrap_or(self.accept_by_default)
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_owned());
    }
}

/// Clipboard that either stores writes or rejects them with a fixed error.
#[derive(Debug, Default)]
pub struct StubClipboard {
    contents: RefCell<Option<String>>,
    failure: Option<ClipboardError>,
}

impl StubClipboard {
    #[must_use]
    pub fn working() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn failing(error: ClipboardError) -> Self {
        Self { contents: RefCell::default(), failure: Some(error) }
    }

    #[must_use]
    pub fn contents(&self) -> Option<String> {
        self.contents.borrow().clone()
    }
}

impl Clipboard for StubClipboard {
    fn write_text(&self, text: &str) -> LocalBoxFuture<'static, Result<(), ClipboardError>> {
        let result = match &self.failure {
            Some(error) => Err(error.clone()),
            None => {
                *self.contents.borrow_mut() = Some(text.to_owned());
                Ok(())
            }
        };
        future::ready(result).boxed_local()
    }
}
