//! Light/dark theme resolution, toggling, and persistence.
//!
//! The initial theme comes from the stored preference, then the OS
//! `prefers-color-scheme` signal, then light. Only an explicit toggle writes
//! the preference back; writes are best-effort and a failure only costs
//! persistence across reloads.

#[cfg(test)]
#[path = "theme_test.rs"]
mod theme_test;

use std::fmt;

use crate::config::ThemeConfig;
use crate::timer::{Scheduler, Task};

/// Visual mode applied to the document root.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// Parse a stored value. Anything other than `light` / `dark` is `None`.
    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    /// The theme a toggle switches to.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Deferred theme work.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeTask {
    /// Restore the toggle control after its press feedback.
    ReleaseToggle,
}

#[derive(Debug, thiserror::Error)]
#[error("preference write failed: {0}")]
pub struct StorageError(pub String);

/// Durable key-value storage for the preference.
pub trait PreferenceStore {
    /// Read `key`. Access failures read as absent.
    fn load(&self, key: &str) -> Option<String>;

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Document-level surface the theme is applied to, plus the toggle control.
pub trait ThemeSurface {
    /// Theme currently applied to the document, if any.
    fn applied(&self) -> Option<Theme>;

    fn apply(&mut self, theme: Theme);

    /// Turn on the colour transition used while switching themes.
    fn enable_transition(&mut self);

    /// Show or clear the toggle's pressed (scaled-down) state.
    fn set_toggle_pressed(&mut self, pressed: bool);
}

/// Pick the initial theme: stored preference, then OS signal, then light.
#[must_use]
pub fn resolve_initial(stored: Option<&str>, prefers_dark: bool) -> Theme {
    if let Some(theme) = stored.and_then(Theme::parse) {
        return theme;
    }
    if prefers_dark { Theme::Dark } else { Theme::Light }
}

pub struct ThemeController<S, P> {
    surface: S,
    store: P,
    config: ThemeConfig,
}

impl<S: ThemeSurface, P: PreferenceStore> ThemeController<S, P> {
    #[must_use]
    pub fn new(surface: S, store: P, config: ThemeConfig) -> Self {
        Self { surface, store, config }
    }

    /// Resolve and apply the initial theme.
    pub fn initialize(&mut self, prefers_dark: bool) -> Theme {
        let stored = self.store.load(&self.config.storage_key);
        if let Some(raw) = stored.as_deref() {
            if Theme::parse(raw).is_none() {
                log::warn!("theme: ignoring unrecognised stored value {raw:?}");
            }
        }
        let theme = resolve_initial(stored.as_deref(), prefers_dark);
        self.surface.apply(theme);
        log::debug!("theme: initial {theme} (stored={stored:?}, prefers_dark={prefers_dark})");
        theme
    }

    /// Flip the applied theme, persist it, and play the press feedback.
    pub fn toggle(&mut self, sched: &mut dyn Scheduler) -> Theme {
        // Nothing applied reads as light, so the first toggle goes dark.
        let next = self.surface.applied().map_or(Theme::Dark, Theme::toggled);

        self.surface.enable_transition();
        self.surface.apply(next);
        if let Err(e) = self.store.save(&self.config.storage_key, next.as_str()) {
            log::warn!("theme: {e}");
        }

        self.surface.set_toggle_pressed(true);
        sched.set_timeout(self.config.press_feedback_ms, Task::Theme(ThemeTask::ReleaseToggle));
        log::debug!("theme: toggled to {next}");
        next
    }

    pub fn handle_task(&mut self, task: ThemeTask) {
        match task {
            ThemeTask::ReleaseToggle => self.surface.set_toggle_pressed(false),
        }
    }

    #[must_use]
    pub fn current(&self) -> Option<Theme> {
        self.surface.applied()
    }

    #[must_use]
    pub fn surface(&self) -> &S {
        &self.surface
    }

    #[must_use]
    pub fn store(&self) -> &P {
        &self.store
    }
}
