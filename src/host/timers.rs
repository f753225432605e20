//! Timer scheduling with retained handles.
//!
//! Every timeout or interval gets a [`TimerId`] that stays valid until the
//! timer fires (one-shot) or is cancelled. [`ManualScheduler`] runs timers on a
//! virtual clock so tests flush time instead of sleeping.

#[cfg(test)]
#[path = "timers_test.rs"]
mod timers_test;

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use super::Clock;

/// Handle for a scheduled timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u64);

impl TimerId {
    #[cfg(feature = "hydrate")]
    pub(crate) fn from_raw(raw: u64) -> Self {
        Self(raw)
    }
}

pub trait Scheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId;
    fn set_interval(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerId;
    /// Cancel a pending timer. Unknown or already-fired ids are ignored.
    fn cancel(&self, id: TimerId);
}

enum Task {
    Once(Box<dyn FnOnce()>),
    Repeat { period_ms: u64, callback: Rc<RefCell<Box<dyn FnMut()>>> },
}

struct Pending {
    id: TimerId,
    due_ms: u64,
    task: Task,
}

/// Deterministic scheduler driven by [`ManualScheduler::advance`].
///
/// Also a [`Clock`]: `now_ms` is the starting epoch plus virtual elapsed time,
/// so relative-time math and timers agree.
pub struct ManualScheduler {
    epoch_ms: f64,
    elapsed_ms: Cell<u64>,
    next_id: Cell<u64>,
    pending: RefCell<Vec<Pending>>,
}

impl Default for ManualScheduler {
    fn default() -> Self {
        Self::new()
    }
}

impl ManualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(0.0)
    }

    /// Start the virtual clock at a Unix timestamp in milliseconds.
    #[must_use]
    pub fn starting_at(epoch_ms: f64) -> Self {
        Self { epoch_ms, elapsed_ms: Cell::new(0), next_id: Cell::new(1), pending: RefCell::new(Vec::new()) }
    }

    #[must_use]
    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms.get()
    }

    #[must_use]
    pub fn pending_count(&self) -> usize {
        self.pending.borrow().len()
    }

    #[must_use]
    pub fn is_pending(&self, id: TimerId) -> bool {
        self.pending.borrow().iter().any(|p| p.id == id)
    }

    /// Move virtual time forward, running every timer that comes due in
    /// `(due, id)` order. Timers scheduled by running tasks are honored if
    /// they fall inside the window.
    pub fn advance(&self, ms: u64) {
        let target = self.elapsed_ms.get() + ms;
        while let Some(entry) = self.take_next_due(target) {
            self.elapsed_ms.set(entry.due_ms);
            match entry.task {
                Task::Once(task) => task(),
                Task::Repeat { period_ms, callback } => {
                    self.pending.borrow_mut().push(Pending {
                        id: entry.id,
                        due_ms: entry.due_ms + period_ms,
                        task: Task::Repeat { period_ms, callback: Rc::clone(&callback) },
                    });
                    (callback.borrow_mut())();
                }
            }
        }
        self.elapsed_ms.set(target);
    }

    fn take_next_due(&self, target: u64) -> Option<Pending> {
        let mut pending = self.pending.borrow_mut();
        let index = pending
            .iter()
            .enumerate()
            .filter(|(_, p)| p.due_ms <= target)
            .min_by_key(|(_, p)| (p.due_ms, p.id))
            .map(|(i, _)| i)?;
        Some(pending.swap_remove(index))
    }

    fn allocate(&self) -> TimerId {
        let id = self.next_id.get();
        self.next_id.set(id + 1);
        TimerId(id)
    }
}

impl Scheduler for ManualScheduler {
    fn set_timeout(&self, delay_ms: u32, task: Box<dyn FnOnce()>) -> TimerId {
        let id = self.allocate();
        let due_ms = self.elapsed_ms.get() + u64::from(delay_ms);
        self.pending.borrow_mut().push(Pending { id, due_ms, task: Task::Once(task) });
        id
    }

    fn set_interval(&self, period_ms: u32, task: Box<dyn FnMut()>) -> TimerId {
        let id = self.allocate();
        // A zero period would spin forever inside `advance`.
        let period_ms = u64::from(period_ms.max(1));
        let due_ms = self.elapsed_ms.get() + period_ms;
        let callback = Rc::new(RefCell::new(task));
        self.pending.borrow_mut().push(Pending { id, due_ms, task: Task::Repeat { period_ms, callback } });
        id
    }

    fn cancel(&self, id: TimerId) {
        self.pending.borrow_mut().retain(|p| p.id != id);
    }
}

impl Clock for ManualScheduler {
    #[allow(clippy::cast_precision_loss)]
    fn now_ms(&self) -> f64 {
        self.epoch_ms + self.elapsed_ms.get() as f64
    }
}
