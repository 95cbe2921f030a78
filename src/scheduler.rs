//! `gloo-timers` backed [`Scheduler`].
//!
//! Each armed timer owns its `gloo` handle; dropping the handle cancels it,
//! so clearing a timer is a map removal. When a timer fires, the task is
//! routed back into the [`App`] through a weak reference so a timer can never
//! keep the page state alive on its own.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Weak;

use gloo_timers::callback::{Interval, Timeout};
use widgets::timer::{Scheduler, Task, TimerId};

use crate::app::App;

// Held only so that dropping the entry cancels the timer.
enum Handle {
    Once { _timer: Timeout },
    Every { _timer: Interval },
}

pub struct BrowserScheduler {
    app: Weak<RefCell<App>>,
    next_id: u64,
    timers: HashMap<TimerId, Handle>,
}

impl BrowserScheduler {
    #[must_use]
    pub fn new(app: Weak<RefCell<App>>) -> Self {
        Self { app, next_id: 0, timers: HashMap::new() }
    }

    /// Drop the bookkeeping for a one-shot timer that just fired.
    ///
    /// Intervals stay armed until cleared.
    pub fn mark_fired(&mut self, id: TimerId) {
        if matches!(self.timers.get(&id), Some(Handle::Once { .. })) {
            self.timers.remove(&id);
        }
    }

    #[must_use]
    pub fn active_timers(&self) -> usize {
        self.timers.len()
    }

    fn allocate(&mut self) -> TimerId {
        self.next_id += 1;
        TimerId::from_raw(self.next_id)
    }
}

fn fire(app: &Weak<RefCell<App>>, id: TimerId, task: Task) {
    let Some(app) = app.upgrade() else {
        return;
    };
    match app.try_borrow_mut() {
        Ok(mut app) => app.on_timer(id, task),
        Err(_) => log::warn!("timer {} fired while the page was busy; dropped {task:?}", id.raw()),
    }
}

impl Scheduler for BrowserScheduler {
    fn set_timeout(&mut self, delay_ms: u32, task: Task) -> TimerId {
        let id = self.allocate();
        let app = self.app.clone();
        let handle = Timeout::new(delay_ms, move || fire(&app, id, task));
        self.timers.insert(id, Handle::Once { _timer: handle });
        id
    }

    fn set_interval(&mut self, period_ms: u32, task: Task) -> TimerId {
        let id = self.allocate();
        let app = self.app.clone();
        let handle = Interval::new(period_ms, move || fire(&app, id, task));
        self.timers.insert(id, Handle::Every { _timer: handle });
        id
    }

    fn clear(&mut self, id: TimerId) {
        self.timers.remove(&id);
    }
}
