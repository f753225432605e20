//! "Time ago" labels, refreshed at init and then on an interval.

#[cfg(test)]
#[path = "relative_time_test.rs"]
mod relative_time_test;

use chrono::{DateTime, NaiveDate, NaiveDateTime};

use crate::config::Messages;
use crate::dom::{Dom, Selector};
use crate::page::{BehaviorKind, Page};

const MINUTE: i64 = 60;
const HOUR: i64 = 60 * MINUTE;
const DAY: i64 = 24 * HOUR;

/// Age bucket of a timestamp relative to now.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RelativeAge {
    JustNow,
    Minutes(i64),
    Hours(i64),
    Days(i64),
}

impl RelativeAge {
    /// Bucket whole elapsed seconds. Negative values (future stamps) are "just now".
    #[must_use]
    pub fn from_elapsed_secs(secs: i64) -> Self {
        if secs < MINUTE {
            Self::JustNow
        } else if secs < HOUR {
            Self::Minutes(secs / MINUTE)
        } else if secs < DAY {
            Self::Hours(secs / HOUR)
        } else {
            Self::Days(secs / DAY)
        }
    }

    /// Bucket the gap between two Unix-millisecond instants.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn between(now_ms: f64, then_ms: f64) -> Self {
        Self::from_elapsed_secs(((now_ms - then_ms) / 1000.0).floor() as i64)
    }

    #[must_use]
    pub fn render(self, messages: &Messages) -> String {
        match self {
            Self::JustNow => messages.just_now.clone(),
            Self::Minutes(n) => messages.minutes_ago.replace("{n}", &n.to_string()),
            Self::Hours(n) => messages.hours_ago.replace("{n}", &n.to_string()),
            Self::Days(n) => messages.days_ago.replace("{n}", &n.to_string()),
        }
    }
}

const NAIVE_FORMATS: [&str; 4] = ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"];

/// Parse a `data-timestamp` value into Unix milliseconds.
///
/// Accepts RFC 3339, ISO-8601 without an offset (read as UTC, which is how
/// the server renders them), minute precision with or without seconds, and
/// bare dates (UTC midnight).
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn parse_timestamp(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.timestamp_millis() as f64);
    }
    for format in ["%Y-%m-%dT%H:%M%:z", "%Y-%m-%d %H:%M%:z"] {
        if let Ok(parsed) = DateTime::parse_from_str(raw, format) {
            return Some(parsed.timestamp_millis() as f64);
        }
    }
    // A trailing `Z` is UTC, which is how naive stamps are read anyway.
    let raw = raw.strip_suffix(['Z', 'z']).unwrap_or(raw);
    for format in NAIVE_FORMATS {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(raw, format) {
            return Some(parsed.and_utc().timestamp_millis() as f64);
        }
    }
    match NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        Ok(date) => date.and_hms_opt(0, 0, 0).map(|midnight| midnight.and_utc().timestamp_millis() as f64),
        Err(_) => None,
    }
}

impl<D: Dom + 'static> Page<D> {
    pub(crate) fn start_relative_time(&self, selector: Selector) {
        self.refresh_relative_times_matching(&selector);
        self.every(BehaviorKind::RelativeTime, self.config.timings.relative_time_refresh_ms, move |page| {
            page.refresh_relative_times_matching(&selector);
        });
    }

    /// Re-render every relative-time label now. Returns how many were written.
    pub fn refresh_relative_times(&self) -> usize {
        self.refresh_relative_times_matching(&self.selector(BehaviorKind::RelativeTime))
    }

    fn refresh_relative_times_matching(&self, selector: &Selector) -> usize {
        let now_ms = self.host.clock.now_ms();
        let mut updated = 0;
        for element in self.dom.query_all(None, selector) {
            let Some(raw) = self.dom.attribute(&element, &self.config.selectors.timestamp_attribute) else {
                continue;
            };
            if raw.is_empty() {
                continue;
            }
            match parse_timestamp(&raw) {
                Some(then_ms) => {
                    self.dom.set_text(&element, &RelativeAge::between(now_ms, then_ms).render(&self.config.messages));
                    updated += 1;
                }
                None => log::warn!("unparseable timestamp {raw:?}; label left unchanged"),
            }
        }
        updated
    }
}
