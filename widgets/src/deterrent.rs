//! Inspection deterrent overlay.
//!
//! Right-clicks and the usual "view source" / dev-tools shortcuts are
//! swallowed and a blocking overlay is shown until its close control is
//! clicked. Cosmetic only: the browser's own menus still open dev tools.

#[cfg(test)]
#[path = "deterrent_test.rs"]
mod deterrent_test;

use crate::input::{Intercept, Key, Modifiers};

/// Letters blocked with Ctrl alone (view source, inspector, save, console).
const CTRL_LETTERS: [&str; 4] = ["u", "i", "s", "j"];

/// Letters blocked with Ctrl+Shift (inspector, console, element picker).
const CTRL_SHIFT_LETTERS: [&str; 3] = ["i", "j", "c"];

/// The overlay element.
pub trait OverlayView {
    fn set_visible(&mut self, visible: bool);
}

/// Whether a key combination is one of the blocked inspection shortcuts.
/// Letters match case-insensitively.
#[must_use]
pub fn is_blocked_shortcut(key: &Key, modifiers: Modifiers) -> bool {
    let key = key.folded();
    let key = key.as_str();
    (modifiers.ctrl && CTRL_LETTERS.contains(&key))
        || (modifiers.ctrl && modifiers.shift && CTRL_SHIFT_LETTERS.contains(&key))
        || key == "f12"
}

pub struct Deterrent<V> {
    overlay: V,
    visible: bool,
}

impl<V: OverlayView> Deterrent<V> {
    #[must_use]
    pub fn new(overlay: V) -> Self {
        Self { overlay, visible: false }
    }

    /// Every context menu is blocked.
    pub fn on_context_menu(&mut self) -> Intercept {
        self.show();
        Intercept::Block
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Intercept {
        if !is_blocked_shortcut(key, modifiers) {
            return Intercept::Allow;
        }
        log::debug!("deterrent: blocked {}", key.as_str());
        self.show();
        Intercept::Block
    }

    /// Close control clicked.
    pub fn close(&mut self) {
        self.visible = false;
        self.overlay.set_visible(false);
    }

    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.visible
    }

    #[must_use]
    pub fn overlay(&self) -> &V {
        &self.overlay
    }

    fn show(&mut self) {
        self.visible = true;
        self.overlay.set_visible(true);
    }
}
