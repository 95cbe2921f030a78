//! Deferred work: timer handles, the task vocabulary, and the scheduler seam.
//!
//! DESIGN
//! ======
//! Controllers never hold closures. They arm timers with a [`Task`] value and
//! the host routes each fired task back to the owning controller. That keeps
//! every controller free of browser types and lets tests replace the real
//! timers with [`VirtualScheduler`], which advances a manual clock and fires
//! due tasks in a fixed order.

#[cfg(test)]
#[path = "timer_test.rs"]
mod timer_test;

use std::collections::BTreeMap;

use crate::carousel::CarouselTask;
use crate::theme::ThemeTask;

/// Handle for one armed timer. Clearing it cancels the timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimerId(u64);

impl TimerId {
    #[must_use]
    pub fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    #[must_use]
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Work to run when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Task {
    /// Carousel timers (auto-advance, transition settle, button release).
    Carousel(CarouselTask),
    /// Theme toggle press feedback release.
    Theme(ThemeTask),
    /// Restore the skill bar at this index to its target width.
    RestoreSkillBar(usize),
    /// Fade the page body in after start-up.
    RevealPage,
}

/// Arms and cancels timers on behalf of the controllers.
pub trait Scheduler {
    /// Run `task` once after `delay_ms`.
    fn set_timeout(&mut self, delay_ms: u32, task: Task) -> TimerId;

    /// Run `task` every `period_ms` until cleared.
    fn set_interval(&mut self, period_ms: u32, task: Task) -> TimerId;

    /// Cancel a timer. Unknown or already-fired ids are ignored.
    fn clear(&mut self, id: TimerId);
}

#[derive(Debug, Clone)]
struct Pending {
    due_ms: u64,
    period_ms: Option<u32>,
    task: Task,
}

/// Deterministic scheduler driven by a manual clock.
#[derive(Debug, Default)]
pub struct VirtualScheduler {
    now_ms: u64,
    next_id: u64,
    pending: BTreeMap<TimerId, Pending>,
}

impl VirtualScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current virtual time in milliseconds since construction.
    #[must_use]
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Number of timers currently armed.
    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.pending.len()
    }

    #[must_use]
    pub fn is_active(&self, id: TimerId) -> bool {
        self.pending.contains_key(&id)
    }

    /// Number of armed timers that will run `task`.
    #[must_use]
    pub fn count_of(&self, task: Task) -> usize {
        self.pending.values().filter(|p| p.task == task).count()
    }

    /// Advance the clock by `ms`, handing each due task to `dispatch`.
    ///
    /// Tasks fire in `(due time, id)` order. `dispatch` receives the
    /// scheduler so the task can arm or clear timers; anything it arms that
    /// falls due inside the window fires during this same call.
    pub fn advance<F>(&mut self, ms: u64, mut dispatch: F)
    where
        F: FnMut(&mut Self, Task),
    {
        let until = self.now_ms.saturating_add(ms);
        while let Some((id, due_ms)) = self.next_due(until) {
            self.now_ms = due_ms;
            let Some(entry) = self.pending.get_mut(&id) else {
                break;
            };
            let task = entry.task;
            match entry.period_ms {
                Some(period) => entry.due_ms = due_ms + u64::from(period.max(1)),
                None => {
                    self.pending.remove(&id);
                }
            }
            dispatch(self, task);
        }
        self.now_ms = until;
    }

    fn next_due(&self, until: u64) -> Option<(TimerId, u64)> {
        self.pending
            .iter()
            .filter(|(_, p)| p.due_ms <= until)
            .min_by_key(|(id, p)| (p.due_ms, **id))
            .map(|(id, p)| (*id, p.due_ms))
    }

    fn arm(&mut self, delay_ms: u32, period_ms: Option<u32>, task: Task) -> TimerId {
        self.next_id += 1;
        let id = TimerId(self.next_id);
        let due_ms = self.now_ms + u64::from(delay_ms);
        self.pending.insert(id, Pending { due_ms, period_ms, task });
        id
    }
}

impl Scheduler for VirtualScheduler {
    fn set_timeout(&mut self, delay_ms: u32, task: Task) -> TimerId {
        self.arm(delay_ms, None, task)
    }

    fn set_interval(&mut self, period_ms: u32, task: Task) -> TimerId {
        let period = period_ms.max(1);
        self.arm(period, Some(period), task)
    }

    fn clear(&mut self, id: TimerId) {
        self.pending.remove(&id);
    }
}
