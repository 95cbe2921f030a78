//! Default timings and thresholds for the page behaviors.

// ── Theme ───────────────────────────────────────────────────────

/// `localStorage` key holding the `"light"` / `"dark"` preference.
pub const THEME_STORAGE_KEY: &str = "theme";

/// How long the theme toggle stays pressed after a click.
pub const THEME_PRESS_MS: u32 = 150;

// ── Carousel ────────────────────────────────────────────────────

/// Period of the auto-advance timer.
pub const AUTO_ADVANCE_MS: u32 = 5000;

/// Navigation requests inside this window after a transition are dropped.
pub const SLIDE_SETTLE_MS: u32 = 500;

/// How long a prev/next button stays pressed after a transition.
pub const NAV_PRESS_MS: u32 = 150;

/// Minimum horizontal touch travel, in CSS pixels, that counts as a swipe.
pub const SWIPE_THRESHOLD_PX: f64 = 50.0;

/// Width of one slide as a percentage of the track.
pub const SLIDE_WIDTH_PERCENT: i64 = 100;

// ── Scroll ──────────────────────────────────────────────────────

/// Height of the fixed header that anchor targets must clear.
pub const HEADER_OFFSET_PX: f64 = 100.0;

// ── Skill bars ──────────────────────────────────────────────────

/// Fraction of a bar that must be visible before it animates.
pub const SKILL_VISIBILITY_THRESHOLD: f64 = 0.5;

/// Delay between collapsing a bar to zero and restoring its target width.
pub const SKILL_FILL_DELAY_MS: u32 = 300;

/// Width a bar collapses to before filling in.
pub const SKILL_COLLAPSED_WIDTH: &str = "0%";

// ── Page ────────────────────────────────────────────────────────

/// Delay before the body fades in after start-up.
pub const PAGE_FADE_IN_MS: u32 = 100;
