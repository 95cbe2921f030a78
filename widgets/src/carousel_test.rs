use std::collections::BTreeMap;

use super::*;
use crate::timer::VirtualScheduler;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct RecordingView {
    dot_builds: Vec<usize>,
    offset: Option<i64>,
    slides: BTreeMap<usize, bool>,
    dots: BTreeMap<usize, bool>,
    presses: Vec<(NavButton, bool)>,
    renders: usize,
}

impl RecordingView {
    fn active_slides(&self) -> Vec<usize> {
        self.slides.iter().filter(|(_, a)| **a).map(|(i, _)| *i).collect()
    }

    fn active_dots(&self) -> Vec<usize> {
        self.dots.iter().filter(|(_, a)| **a).map(|(i, _)| *i).collect()
    }

    fn pressed(&self, button: NavButton) -> bool {
        self.presses.iter().rev().find(|(b, _)| *b == button).is_some_and(|(_, p)| *p)
    }
}

impl CarouselView for RecordingView {
    fn build_dots(&mut self, count: usize) {
        self.dot_builds.push(count);
        self.dots.clear();
    }

    fn set_offset_percent(&mut self, percent: i64) {
        self.offset = Some(percent);
        self.renders += 1;
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        self.slides.insert(index, active);
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        self.dots.insert(index, active);
    }

    fn set_button_pressed(&mut self, button: NavButton, pressed: bool) {
        self.presses.push((button, pressed));
    }
}

fn carousel(total: usize) -> (Carousel<RecordingView>, VirtualScheduler) {
    let mut sched = VirtualScheduler::new();
    let mut c = Carousel::new(RecordingView::default(), total, CarouselConfig::default());
    c.init(&mut sched);
    (c, sched)
}

fn run(c: &mut Carousel<RecordingView>, sched: &mut VirtualScheduler, ms: u64) {
    sched.advance(ms, |s, task| {
        if let Task::Carousel(t) = task {
            c.handle_task(t, s);
        }
    });
}

fn settle(c: &mut Carousel<RecordingView>, sched: &mut VirtualScheduler) {
    run(c, sched, 500);
}

fn auto_timers(sched: &VirtualScheduler) -> usize {
    sched.count_of(Task::Carousel(CarouselTask::AutoAdvance))
}

// =============================================================
// normalize_index / track_offset_percent
// =============================================================

#[test]
fn normalize_wraps_negative_and_overflow() {
    assert_eq!(normalize_index(-1, 3), Some(2));
    assert_eq!(normalize_index(-4, 3), Some(2));
    assert_eq!(normalize_index(3, 3), Some(0));
    assert_eq!(normalize_index(7, 3), Some(1));
    assert_eq!(normalize_index(i64::MIN, 3), Some(i64::MIN.rem_euclid(3) as usize));
}

#[test]
fn normalize_empty_is_none() {
    assert_eq!(normalize_index(0, 0), None);
    assert_eq!(normalize_index(5, 0), None);
}

#[test]
fn offset_is_minus_hundred_per_slide() {
    assert_eq!(track_offset_percent(0), 0);
    assert_eq!(track_offset_percent(1), -100);
    assert_eq!(track_offset_percent(4), -400);
}

// =============================================================
// Init and render
// =============================================================

#[test]
fn init_builds_dots_renders_first_slide_and_arms_timer() {
    let (c, sched) = carousel(3);
    assert_eq!(c.view().dot_builds, vec![3]);
    assert_eq!(c.view().offset, Some(0));
    assert_eq!(c.view().active_slides(), vec![0]);
    assert_eq!(c.view().active_dots(), vec![0]);
    assert_eq!(auto_timers(&sched), 1);
    assert!(c.is_auto_scrolling());
    assert!(!c.is_animating());
}

#[test]
fn render_is_idempotent_and_leaves_state_alone() {
    let (mut c, mut sched) = carousel(3);
    c.go_to_slide(2, &mut sched);
    let timer = c.auto_timer();

    c.render();
    c.render();

    assert_eq!(c.current(), 2);
    assert!(c.is_animating());
    assert_eq!(c.auto_timer(), timer);
    assert_eq!(c.view().offset, Some(-200));
    assert_eq!(c.view().active_slides(), vec![2]);
    assert_eq!(c.view().active_dots(), vec![2]);
}

// =============================================================
// go_to_slide
// =============================================================

#[test]
fn go_to_slide_normalizes_any_integer() {
    let n: i64 = 3;
    let (mut c, mut sched) = carousel(3);
    for k in -25..=25 {
        assert!(c.go_to_slide(k, &mut sched), "request {k} should be accepted");
        assert_eq!(c.current() as i64, ((k % n) + n) % n, "request {k}");
        settle(&mut c, &mut sched);
    }
}

#[test]
fn go_to_slide_ignored_while_animating() {
    let (mut c, mut sched) = carousel(4);
    assert!(c.go_to_slide(1, &mut sched));
    assert!(c.is_animating());

    assert!(!c.go_to_slide(3, &mut sched));
    assert!(!c.next_slide(&mut sched));
    assert_eq!(c.current(), 1);
    assert_eq!(c.view().offset, Some(-100));

    run(&mut c, &mut sched, 499);
    assert!(!c.go_to_slide(3, &mut sched));
    assert_eq!(c.current(), 1);

    run(&mut c, &mut sched, 1);
    assert!(!c.is_animating());
    assert!(c.go_to_slide(3, &mut sched));
    assert_eq!(c.current(), 3);
}

#[test]
fn next_slide_n_times_returns_to_start() {
    let (mut c, mut sched) = carousel(5);
    for _ in 0..5 {
        assert!(c.next_slide(&mut sched));
        settle(&mut c, &mut sched);
    }
    assert_eq!(c.current(), 0);
}

#[test]
fn prev_slide_wraps_to_last() {
    let (mut c, mut sched) = carousel(4);
    assert!(c.prev_slide(&mut sched));
    assert_eq!(c.current(), 3);
    settle(&mut c, &mut sched);
    assert!(c.next_slide(&mut sched));
    assert_eq!(c.current(), 0);
}

// =============================================================
// Button feedback (literal direction comparison)
// =============================================================

#[test]
fn next_from_first_presses_prev_button() {
    let (mut c, mut sched) = carousel(3);
    c.next_slide(&mut sched);
    // Raw request 1 is not greater than the updated index 1.
    assert!(c.view().pressed(NavButton::Prev));
    assert!(!c.view().pressed(NavButton::Next));
}

#[test]
fn out_of_range_request_presses_next_button() {
    let (mut c, mut sched) = carousel(3);
    c.go_to_slide(5, &mut sched);
    assert_eq!(c.current(), 2);
    assert!(c.view().pressed(NavButton::Next));
}

#[test]
fn button_press_released_after_feedback_delay() {
    let (mut c, mut sched) = carousel(3);
    c.prev_slide(&mut sched);
    assert!(c.view().pressed(NavButton::Prev));

    run(&mut c, &mut sched, 149);
    assert!(c.view().pressed(NavButton::Prev));
    run(&mut c, &mut sched, 1);
    assert!(!c.view().pressed(NavButton::Prev));
}

// =============================================================
// Auto-advance
// =============================================================

#[test]
fn auto_advance_moves_every_period() {
    let (mut c, mut sched) = carousel(3);
    run(&mut c, &mut sched, 4999);
    assert_eq!(c.current(), 0);
    run(&mut c, &mut sched, 1);
    assert_eq!(c.current(), 1);
    run(&mut c, &mut sched, 5000);
    assert_eq!(c.current(), 2);
    run(&mut c, &mut sched, 5000);
    assert_eq!(c.current(), 0);
}

#[test]
fn start_twice_leaves_one_timer() {
    let (mut c, mut sched) = carousel(3);
    c.start_auto_scroll(&mut sched);
    c.start_auto_scroll(&mut sched);
    assert_eq!(auto_timers(&sched), 1);

    run(&mut c, &mut sched, 5000);
    assert_eq!(c.current(), 1, "a duplicate timer would have advanced twice");
}

#[test]
fn stop_clears_timer_and_handle() {
    let (mut c, mut sched) = carousel(3);
    c.stop_auto_scroll(&mut sched);
    assert_eq!(c.auto_timer(), None);
    assert_eq!(auto_timers(&sched), 0);
    run(&mut c, &mut sched, 20_000);
    assert_eq!(c.current(), 0);
}

#[test]
fn navigation_restarts_auto_timer() {
    let (mut c, mut sched) = carousel(3);
    run(&mut c, &mut sched, 4000);
    c.go_to_slide(2, &mut sched);

    run(&mut c, &mut sched, 4999);
    assert_eq!(c.current(), 2);
    run(&mut c, &mut sched, 1);
    assert_eq!(c.current(), 0);
    assert_eq!(auto_timers(&sched), 1);
}

#[test]
fn disabled_auto_advance_never_arms() {
    let mut sched = VirtualScheduler::new();
    let config = CarouselConfig { auto_advance: false, ..CarouselConfig::default() };
    let mut c = Carousel::new(RecordingView::default(), 3, config);
    c.init(&mut sched);
    c.go_to_slide(1, &mut sched);
    c.on_pointer_leave(&mut sched);

    assert!(!c.is_auto_scrolling());
    assert_eq!(auto_timers(&sched), 0);
}

// =============================================================
// Input channels
// =============================================================

#[test]
fn swipe_scenario_three_slides() {
    let (mut c, mut sched) = carousel(3);

    c.on_touch_start(300.0, &mut sched);
    assert!(c.on_touch_end(200.0, &mut sched));
    assert_eq!(c.current(), 1);
    settle(&mut c, &mut sched);

    c.on_touch_start(100.0, &mut sched);
    assert!(c.on_touch_end(200.0, &mut sched));
    assert_eq!(c.current(), 0);
    settle(&mut c, &mut sched);

    c.on_touch_start(100.0, &mut sched);
    assert!(!c.on_touch_end(130.0, &mut sched));
    assert_eq!(c.current(), 0);
}

#[test]
fn swipe_at_exact_threshold_is_noop() {
    let (mut c, mut sched) = carousel(3);
    c.on_touch_start(150.0, &mut sched);
    assert!(!c.on_touch_end(100.0, &mut sched));
    assert_eq!(c.current(), 0);
}

#[test]
fn touch_pauses_and_resumes_auto_advance() {
    let (mut c, mut sched) = carousel(3);
    c.on_touch_start(10.0, &mut sched);
    assert_eq!(auto_timers(&sched), 0);

    run(&mut c, &mut sched, 10_000);
    assert_eq!(c.current(), 0);

    c.on_touch_end(10.0, &mut sched);
    assert_eq!(auto_timers(&sched), 1);
}

#[test]
fn hover_pauses_and_resumes_auto_advance() {
    let (mut c, mut sched) = carousel(3);
    c.on_pointer_enter(&mut sched);
    run(&mut c, &mut sched, 12_000);
    assert_eq!(c.current(), 0);

    c.on_pointer_leave(&mut sched);
    run(&mut c, &mut sched, 5000);
    assert_eq!(c.current(), 1);
}

#[test]
fn arrow_keys_navigate_other_keys_ignored() {
    let (mut c, mut sched) = carousel(3);
    assert!(c.on_key_down(&Key::new("ArrowRight"), &mut sched));
    assert_eq!(c.current(), 1);
    settle(&mut c, &mut sched);

    assert!(c.on_key_down(&Key::new("ArrowLeft"), &mut sched));
    assert_eq!(c.current(), 0);
    settle(&mut c, &mut sched);

    assert!(!c.on_key_down(&Key::new("Enter"), &mut sched));
    assert!(!c.on_key_down(&Key::new("arrowright"), &mut sched));
    assert_eq!(c.current(), 0);
}

#[test]
fn dot_click_jumps_directly() {
    let (mut c, mut sched) = carousel(5);
    assert!(c.on_dot_click(3, &mut sched));
    assert_eq!(c.current(), 3);
    assert_eq!(c.view().active_dots(), vec![3]);
}

#[test]
fn buttons_map_to_prev_and_next() {
    let (mut c, mut sched) = carousel(3);
    assert!(c.on_button_click(NavButton::Next, &mut sched));
    assert_eq!(c.current(), 1);
    settle(&mut c, &mut sched);
    assert!(c.on_button_click(NavButton::Prev, &mut sched));
    assert_eq!(c.current(), 0);
}

// =============================================================
// Degenerate sizes
// =============================================================

#[test]
fn single_slide_navigation_stays_put() {
    let (mut c, mut sched) = carousel(1);
    assert!(c.next_slide(&mut sched));
    assert_eq!(c.current(), 0);
    settle(&mut c, &mut sched);
    assert!(c.prev_slide(&mut sched));
    assert_eq!(c.current(), 0);
    settle(&mut c, &mut sched);
    assert!(c.on_dot_click(0, &mut sched));
    assert_eq!(c.current(), 0);
    run(&mut c, &mut sched, 10_000);
    assert_eq!(c.current(), 0);
}

#[test]
fn empty_carousel_is_inert() {
    let (mut c, mut sched) = carousel(0);
    assert_eq!(c.view().dot_builds, vec![0]);
    assert_eq!(auto_timers(&sched), 0);
    assert!(!c.next_slide(&mut sched));
    assert!(!c.go_to_slide(4, &mut sched));
    assert!(!c.is_animating());
    assert_eq!(sched.active_timers(), 0);
}
