//! Required-field validation on submit.
//!
//! Presence only: a required control is valid when its trimmed value is
//! non-empty. Each invalid control gets `is-invalid` plus one
//! `invalid-feedback` sibling right after it; fixing the value removes both on
//! the next submit. Invalid controls shake for `shake_duration_ms`, cleared by
//! timer rather than `animationend`, so a fast resubmit can cut a shake short.

#[cfg(test)]
#[path = "validation_test.rs"]
mod validation_test;

use crate::dom::{Dom, Selector};
use crate::page::{BehaviorKind, Page};

pub const INVALID_CLASS: &str = "is-invalid";
pub const FEEDBACK_CLASS: &str = "invalid-feedback";
pub const SHAKE_CLASSES: [&str; 2] = ["animate__animated", "animate__shakeX"];

#[must_use]
pub fn is_filled(value: &str) -> bool {
    !value.trim().is_empty()
}

impl<D: Dom + 'static> Page<D> {
    /// Decorate the form's required controls and return how many are invalid.
    pub(crate) fn validate_form(&self, form: &D::Node) -> usize {
        let required = self.dom.query_all(Some(form), &Selector::Attribute(self.config.selectors.required_attribute.clone()));
        let mut invalid = 0;
        for input in &required {
            if is_filled(&self.dom.value(input)) {
                self.mark_valid(input);
            } else {
                invalid += 1;
                self.mark_invalid(input);
            }
        }
        if invalid > 0 {
            log::debug!("submission blocked: {invalid} required field(s) empty");
            self.shake_invalid(form);
        }
        invalid
    }

    fn adjacent_feedback(&self, input: &D::Node) -> Option<D::Node> {
        self.dom.next_element_sibling(input).filter(|sibling| self.dom.has_class(sibling, FEEDBACK_CLASS))
    }

    fn mark_invalid(&self, input: &D::Node) {
        self.dom.add_class(input, INVALID_CLASS);
        if self.adjacent_feedback(input).is_some() {
            return;
        }
        if let Some(feedback) = self.dom.create_element("div") {
            self.dom.set_class_name(&feedback, FEEDBACK_CLASS);
            self.dom.set_text(&feedback, &self.config.messages.required_field);
            self.dom.insert_after(input, &feedback);
        }
    }

    fn mark_valid(&self, input: &D::Node) {
        self.dom.remove_class(input, INVALID_CLASS);
        if let Some(feedback) = self.adjacent_feedback(input) {
            self.dom.remove(&feedback);
        }
    }

    fn shake_invalid(&self, form: &D::Node) {
        for input in self.dom.query_all(Some(form), &Selector::Class(INVALID_CLASS.to_owned())) {
            for class in SHAKE_CLASSES {
                self.dom.add_class(&input, class);
            }
            self.after(BehaviorKind::RequiredFields, self.config.timings.shake_duration_ms, move |page| {
                for class in SHAKE_CLASSES {
                    page.dom().remove_class(&input, class);
                }
            });
        }
    }
}
