use super::*;

// =============================================================
// Helpers
// =============================================================

#[derive(Default)]
struct Overlay {
    shown: bool,
    calls: usize,
}

impl OverlayView for Overlay {
    fn set_visible(&mut self, visible: bool) {
        self.shown = visible;
        self.calls += 1;
    }
}

fn ctrl() -> Modifiers {
    Modifiers { ctrl: true, ..Default::default() }
}

fn ctrl_shift() -> Modifiers {
    Modifiers { ctrl: true, shift: true, ..Default::default() }
}

fn key(name: &str) -> Key {
    Key::new(name)
}

// =============================================================
// is_blocked_shortcut
// =============================================================

#[test]
fn ctrl_letters_are_blocked() {
    for k in ["u", "i", "s", "j", "U", "I", "S", "J"] {
        assert!(is_blocked_shortcut(&key(k), ctrl()), "Ctrl+{k}");
    }
}

#[test]
fn ctrl_shift_letters_are_blocked() {
    for k in ["I", "J", "C", "i", "j", "c"] {
        assert!(is_blocked_shortcut(&key(k), ctrl_shift()), "Ctrl+Shift+{k}");
    }
}

#[test]
fn f12_blocked_with_or_without_modifiers() {
    assert!(is_blocked_shortcut(&key("F12"), Modifiers::default()));
    assert!(is_blocked_shortcut(&key("F12"), ctrl_shift()));
}

#[test]
fn ordinary_shortcuts_pass() {
    assert!(!is_blocked_shortcut(&key("c"), ctrl()));
    assert!(!is_blocked_shortcut(&key("v"), ctrl()));
    assert!(!is_blocked_shortcut(&key("u"), Modifiers::default()));
    assert!(!is_blocked_shortcut(&key("i"), Modifiers { shift: true, ..Default::default() }));
    assert!(!is_blocked_shortcut(&key("F11"), Modifiers::default()));
    assert!(!is_blocked_shortcut(&key("ArrowLeft"), ctrl()));
}

#[test]
fn meta_alone_is_not_ctrl() {
    let meta = Modifiers { meta: true, ..Default::default() };
    assert!(!is_blocked_shortcut(&key("u"), meta));
}

// =============================================================
// Deterrent
// =============================================================

#[test]
fn starts_hidden() {
    let d = Deterrent::new(Overlay::default());
    assert!(!d.is_visible());
    assert_eq!(d.overlay().calls, 0);
}

#[test]
fn context_menu_always_blocked_and_shows_popup() {
    let mut d = Deterrent::new(Overlay::default());
    assert_eq!(d.on_context_menu(), Intercept::Block);
    assert!(d.is_visible());
    assert!(d.overlay().shown);
}

#[test]
fn ctrl_shift_i_then_close() {
    let mut d = Deterrent::new(Overlay::default());
    let verdict = d.on_key_down(&key("I"), ctrl_shift());
    assert!(verdict.prevents_default());
    assert!(d.overlay().shown);

    d.close();
    assert!(!d.is_visible());
    assert!(!d.overlay().shown);
}

#[test]
fn allowed_key_leaves_overlay_untouched() {
    let mut d = Deterrent::new(Overlay::default());
    assert_eq!(d.on_key_down(&key("ArrowRight"), Modifiers::default()), Intercept::Allow);
    assert!(!d.is_visible());
    assert_eq!(d.overlay().calls, 0);
}

#[test]
fn close_while_hidden_is_harmless() {
    let mut d = Deterrent::new(Overlay::default());
    d.close();
    assert!(!d.is_visible());
}
