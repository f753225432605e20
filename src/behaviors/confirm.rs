//! Confirm-before-submit guard for forms carrying a prompt attribute.

#[cfg(test)]
#[path = "confirm_test.rs"]
mod confirm_test;

use crate::dom::Dom;
use crate::page::Page;

impl<D: Dom + 'static> Page<D> {
    /// Prompt for forms with the confirm attribute; `true` lets the submission
    /// proceed. Forms without the attribute are never prompted.
    pub(crate) fn confirm_submission(&self, form: &D::Node) -> bool {
        let Some(prompt) = self.dom.attribute(form, &self.config.selectors.confirm_attribute) else {
            return true;
        };
        let message = if prompt.is_empty() { self.config.messages.confirm_default.as_str() } else { prompt.as_str() };
        let accepted = self.host.dialogs.confirm(message);
        if !accepted {
            log::debug!("submission cancelled at confirmation prompt");
        }
        accepted
    }
}
