//! Input model: keyboard keys and the modifier keys held with them.
//!
//! The host translates DOM `keydown` events into these types once and hands
//! the same values to every controller that listens at document level (the
//! carousel's arrow navigation and the deterrent's shortcut filter).

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"ArrowLeft"`, `"F12"`, `"I"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The key name exactly as reported.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The key name folded to lowercase, so `"I"` and `"i"` compare equal.
    #[must_use]
    pub fn folded(&self) -> String {
        self.0.to_lowercase()
    }
}

/// Keyboard modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

/// What the host should do with the DOM event after a handler has seen it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intercept {
    /// Leave the event alone.
    Allow,
    /// Call `preventDefault()` on the event.
    Block,
}

impl Intercept {
    #[must_use]
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::Block)
    }
}
