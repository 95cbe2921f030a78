//! Carousel state machine: slide index, transitions, auto-advance, gestures.
//!
//! STATES
//! ======
//! The carousel rests on one slide index in `[0, total)`. Any accepted
//! navigation enters a transient animating state that lasts `settle_ms`;
//! requests arriving inside that window are dropped rather than queued, so
//! rapid input collapses to at most one transition per window.
//!
//! Every input channel (dots, prev/next buttons, arrow keys, swipes, and the
//! auto-advance timer) funnels into [`Carousel::go_to_slide`]. The carousel
//! owns at most one auto-advance interval; arming always clears the old one.

#[cfg(test)]
#[path = "carousel_test.rs"]
mod carousel_test;

use crate::config::CarouselConfig;
use crate::consts::SLIDE_WIDTH_PERCENT;
use crate::input::Key;
use crate::timer::{Scheduler, Task, TimerId};

/// The two navigation buttons flanking the track.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavButton {
    Prev,
    Next,
}

/// Deferred carousel work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CarouselTask {
    /// Auto-advance tick.
    AutoAdvance,
    /// End of the animating window.
    Settle,
    /// End of a button's press feedback.
    ReleaseButton(NavButton),
}

/// Presentation elements the carousel drives.
pub trait CarouselView {
    /// Replace the dot indicators with `count` fresh dots.
    fn build_dots(&mut self, count: usize);

    /// Translate the track horizontally by `percent` of its width.
    fn set_offset_percent(&mut self, percent: i64);

    fn set_slide_active(&mut self, index: usize, active: bool);

    fn set_dot_active(&mut self, index: usize, active: bool);

    /// Show or clear a button's pressed (scaled-down) state.
    fn set_button_pressed(&mut self, button: NavButton, pressed: bool);
}

/// Wrap any integer into `[0, total)`. `None` when there are no slides.
#[must_use]
pub fn normalize_index(index: i64, total: usize) -> Option<usize> {
    let Ok(n) = i64::try_from(total) else {
        return None;
    };
    if n == 0 {
        return None;
    }
    let Ok(wrapped) = usize::try_from(index.rem_euclid(n)) else {
        return None;
    };
    Some(wrapped)
}

/// Horizontal track translation for a slide index, in percent.
#[must_use]
pub fn track_offset_percent(index: usize) -> i64 {
    i64::try_from(index).map_or(0, |i| -i * SLIDE_WIDTH_PERCENT)
}

pub struct Carousel<V> {
    view: V,
    config: CarouselConfig,
    current: usize,
    total: usize,
    auto_scrolling: bool,
    animating: bool,
    auto_timer: Option<TimerId>,
    touch_start_x: f64,
}

impl<V: CarouselView> Carousel<V> {
    #[must_use]
    pub fn new(view: V, total: usize, config: CarouselConfig) -> Self {
        Self {
            view,
            auto_scrolling: config.auto_advance,
            config,
            current: 0,
            total,
            animating: false,
            auto_timer: None,
            touch_start_x: 0.0,
        }
    }

    /// Build the dots, render slide 0, and start auto-advance.
    pub fn init(&mut self, sched: &mut dyn Scheduler) {
        if self.total == 0 {
            log::warn!("carousel: no slides found, navigation disabled");
        }
        self.view.build_dots(self.total);
        self.render();
        self.start_auto_scroll(sched);
    }

    // --- Navigation ---

    /// Move to `index`, wrapping it into range.
    ///
    /// Returns `false` when the request was dropped (mid-transition or no slides).
    pub fn go_to_slide(&mut self, index: i64, sched: &mut dyn Scheduler) -> bool {
        if self.animating {
            log::debug!("carousel: dropped request for {index} while animating");
            return false;
        }
        let Some(target) = normalize_index(index, self.total) else {
            return false;
        };

        self.animating = true;
        self.current = target;
        self.render();

        self.stop_auto_scroll(sched);
        self.start_auto_scroll(sched);

        // Compares the raw request against the already-updated index.
        let button = if index > self.current_i64() { NavButton::Next } else { NavButton::Prev };
        self.view.set_button_pressed(button, true);
        sched.set_timeout(self.config.press_feedback_ms, Task::Carousel(CarouselTask::ReleaseButton(button)));
        sched.set_timeout(self.config.settle_ms, Task::Carousel(CarouselTask::Settle));

        log::debug!("carousel: slide {target} of {}", self.total);
        true
    }

    pub fn next_slide(&mut self, sched: &mut dyn Scheduler) -> bool {
        self.go_to_slide(self.current_i64() + 1, sched)
    }

    pub fn prev_slide(&mut self, sched: &mut dyn Scheduler) -> bool {
        self.go_to_slide(self.current_i64() - 1, sched)
    }

    // --- Rendering ---

    /// Project the current index onto the view. Safe to call at any time.
    pub fn render(&mut self) {
        self.view.set_offset_percent(track_offset_percent(self.current));
        for i in 0..self.total {
            let active = i == self.current;
            self.view.set_slide_active(i, active);
            self.view.set_dot_active(i, active);
        }
    }

    // --- Auto-advance ---

    /// Re-arm the auto-advance interval, replacing any armed one.
    pub fn start_auto_scroll(&mut self, sched: &mut dyn Scheduler) {
        if !self.auto_scrolling {
            return;
        }
        self.stop_auto_scroll(sched);
        if self.total == 0 {
            return;
        }
        let id = sched.set_interval(self.config.auto_advance_ms, Task::Carousel(CarouselTask::AutoAdvance));
        self.auto_timer = Some(id);
    }

    pub fn stop_auto_scroll(&mut self, sched: &mut dyn Scheduler) {
        if let Some(id) = self.auto_timer.take() {
            sched.clear(id);
        }
    }

    // --- Input channels ---

    pub fn on_dot_click(&mut self, index: usize, sched: &mut dyn Scheduler) -> bool {
        match i64::try_from(index) {
            Ok(i) => self.go_to_slide(i, sched),
            Err(_) => false,
        }
    }

    pub fn on_button_click(&mut self, button: NavButton, sched: &mut dyn Scheduler) -> bool {
        match button {
            NavButton::Prev => self.prev_slide(sched),
            NavButton::Next => self.next_slide(sched),
        }
    }

    /// Document-level arrow key navigation.
    pub fn on_key_down(&mut self, key: &Key, sched: &mut dyn Scheduler) -> bool {
        match key.as_str() {
            "ArrowLeft" => self.prev_slide(sched),
            "ArrowRight" => self.next_slide(sched),
            _ => false,
        }
    }

    pub fn on_touch_start(&mut self, client_x: f64, sched: &mut dyn Scheduler) {
        self.touch_start_x = client_x;
        self.stop_auto_scroll(sched);
    }

    /// Finish a touch gesture. Travel beyond the swipe threshold moves one
    /// slide: leftward travel goes forward, rightward goes back.
    pub fn on_touch_end(&mut self, client_x: f64, sched: &mut dyn Scheduler) -> bool {
        let diff = self.touch_start_x - client_x;
        let moved = if diff.abs() > self.config.swipe_threshold_px {
            if diff > 0.0 { self.next_slide(sched) } else { self.prev_slide(sched) }
        } else {
            false
        };
        self.start_auto_scroll(sched);
        moved
    }

    pub fn on_pointer_enter(&mut self, sched: &mut dyn Scheduler) {
        self.stop_auto_scroll(sched);
    }

    pub fn on_pointer_leave(&mut self, sched: &mut dyn Scheduler) {
        self.start_auto_scroll(sched);
    }

    // --- Timers ---

    pub fn handle_task(&mut self, task: CarouselTask, sched: &mut dyn Scheduler) {
        match task {
            CarouselTask::AutoAdvance => {
                self.next_slide(sched);
            }
            CarouselTask::Settle => self.animating = false,
            CarouselTask::ReleaseButton(button) => self.view.set_button_pressed(button, false),
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn current(&self) -> usize {
        self.current
    }

    #[must_use]
    pub fn total(&self) -> usize {
        self.total
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.animating
    }

    #[must_use]
    pub fn is_auto_scrolling(&self) -> bool {
        self.auto_scrolling
    }

    /// The armed auto-advance timer, if any.
    #[must_use]
    pub fn auto_timer(&self) -> Option<TimerId> {
        self.auto_timer
    }

    #[must_use]
    pub fn view(&self) -> &V {
        &self.view
    }

    fn current_i64(&self) -> i64 {
        i64::try_from(self.current).unwrap_or(i64::MAX)
    }
}
