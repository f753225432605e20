//! Alert auto-dismiss.
//!
//! One scan, `alert_scan_delay_ms` after init. Alerts inserted later are left
//! alone. Each alert found is handed to an [`AlertController`] that closes it
//! `alert_close_delay_ms` after the scan.

#[cfg(test)]
#[path = "alerts_test.rs"]
mod alerts_test;

use crate::dom::{Dom, Selector};
use crate::page::{BehaviorKind, Page};

const SHOW_CLASS: &str = "show";
const FADE_CLASS: &str = "fade";

/// Dismissal controller for one alert element.
///
/// Closing drops the `show` class so the CSS fade runs, then detaches the
/// element once the fade is over (immediately when the alert does not fade).
#[derive(Clone, Debug)]
pub struct AlertController<N> {
    element: N,
}

impl<N: Clone + PartialEq + std::fmt::Debug + 'static> AlertController<N> {
    pub fn new(element: N) -> Self {
        Self { element }
    }

    pub fn close<D: Dom<Node = N> + 'static>(&self, page: &Page<D>) {
        let dom = page.dom();
        dom.remove_class(&self.element, SHOW_CLASS);
        if dom.has_class(&self.element, FADE_CLASS) {
            let element = self.element.clone();
            page.after(BehaviorKind::AlertDismiss, page.config().timings.alert_fade_ms, move |page| {
                page.dom().remove(&element);
            });
        } else {
            dom.remove(&self.element);
        }
    }
}

impl<D: Dom + 'static> Page<D> {
    pub(crate) fn schedule_alert_scan(&self, selector: Selector) {
        self.after(BehaviorKind::AlertDismiss, self.config.timings.alert_scan_delay_ms, move |page| {
            page.dismiss_alerts(&selector);
        });
    }

    fn dismiss_alerts(&self, selector: &Selector) {
        let alerts = self.dom.query_all(None, selector);
        log::debug!("scheduling dismissal of {} alert(s)", alerts.len());
        for alert in alerts {
            let controller = AlertController::new(alert);
            self.after(BehaviorKind::AlertDismiss, self.config.timings.alert_close_delay_ms, move |page| {
                controller.close(page);
            });
        }
    }
}
