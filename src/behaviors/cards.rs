//! Staggered card entrance animation, applied once at init.

#[cfg(test)]
#[path = "cards_test.rs"]
mod cards_test;

use crate::dom::Dom;
use crate::page::Page;

pub const ENTRANCE_CLASSES: [&str; 2] = ["animate__animated", "animate__fadeInUp"];

/// `animation-delay` for the card at `index`.
#[must_use]
pub fn entrance_delay(index: usize, stagger_ms: u32) -> String {
    format!("{}ms", index.saturating_mul(stagger_ms as usize))
}

impl<D: Dom + 'static> Page<D> {
    pub(crate) fn animate_cards(&self, cards: &[D::Node]) {
        let stagger_ms = self.config.timings.card_stagger_ms;
        for (index, card) in cards.iter().enumerate() {
            self.dom.set_style(card, "animation-delay", &entrance_delay(index, stagger_ms));
            for class in ENTRANCE_CLASSES {
                self.dom.add_class(card, class);
            }
        }
    }
}
