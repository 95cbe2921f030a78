//! `web-sys` implementations of the widgets view traits.
//!
//! These are thin: each trait call becomes a class toggle, an inline style
//! write, or an attribute write. DOM call failures are not actionable at this
//! level and are dropped, as with the rest of the best-effort presentation.

#[cfg(test)]
#[path = "views_test.rs"]
mod views_test;

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement, Storage};
use widgets::carousel::{CarouselView, NavButton};
use widgets::deterrent::OverlayView;
use widgets::skills::SkillBarView;
use widgets::theme::{PreferenceStore, StorageError, Theme, ThemeSurface};

use crate::dom::{ACTIVE_CLASS, DOT_CLASS, THEME_ATTRIBUTE};
use crate::error::describe;

pub const THEME_TRANSITION: &str = "background-color 0.3s, color 0.3s";

/// CSS transform for a track offset in percent.
#[must_use]
pub fn translate_x(percent: i64) -> String {
    format!("translateX({percent}%)")
}

/// CSS transform for a control's press feedback.
#[must_use]
pub fn press_scale(pressed: bool) -> &'static str {
    if pressed { "scale(0.9)" } else { "scale(1)" }
}

/// CSS `display` value for the overlay.
#[must_use]
pub fn overlay_display(visible: bool) -> &'static str {
    if visible { "flex" } else { "none" }
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    let _ = element.style().set_property(property, value);
}

fn set_class(element: &HtmlElement, class: &str, on: bool) {
    let _ = element.class_list().toggle_with_force(class, on);
}

// =============================================================
// Carousel
// =============================================================

pub struct DomCarousel {
    document: Document,
    track: HtmlElement,
    slides: Vec<HtmlElement>,
    dot_container: HtmlElement,
    dots: Vec<HtmlElement>,
    prev: HtmlElement,
    next: HtmlElement,
}

impl DomCarousel {
    #[must_use]
    pub fn new(
        document: Document,
        track: HtmlElement,
        slides: Vec<HtmlElement>,
        dot_container: HtmlElement,
        prev: HtmlElement,
        next: HtmlElement,
    ) -> Self {
        Self { document, track, slides, dot_container, dots: Vec::new(), prev, next }
    }

    /// Dots built by the last `build_dots` call.
    #[must_use]
    pub fn dots(&self) -> &[HtmlElement] {
        &self.dots
    }

    fn create_dot(&self, first: bool) -> Option<HtmlElement> {
        let element = match self.document.create_element("div") {
            Ok(element) => element,
            Err(e) => {
                log::warn!("carousel: creating dot failed: {}", describe(&e));
                return None;
            }
        };
        let dot = element.dyn_into::<HtmlElement>().ok()?;
        let _ = dot.class_list().add_1(DOT_CLASS);
        if first {
            let _ = dot.class_list().add_1(ACTIVE_CLASS);
        }
        let _ = self.dot_container.append_child(&dot);
        Some(dot)
    }
}

impl CarouselView for DomCarousel {
    fn build_dots(&mut self, count: usize) {
        self.dot_container.set_inner_html("");
        self.dots = (0..count).filter_map(|i| self.create_dot(i == 0)).collect();
    }

    fn set_offset_percent(&mut self, percent: i64) {
        set_style(&self.track, "transform", &translate_x(percent));
    }

    fn set_slide_active(&mut self, index: usize, active: bool) {
        if let Some(slide) = self.slides.get(index) {
            set_class(slide, ACTIVE_CLASS, active);
        }
    }

    fn set_dot_active(&mut self, index: usize, active: bool) {
        if let Some(dot) = self.dots.get(index) {
            set_class(dot, ACTIVE_CLASS, active);
        }
    }

    fn set_button_pressed(&mut self, button: NavButton, pressed: bool) {
        let element = match button {
            NavButton::Prev => &self.prev,
            NavButton::Next => &self.next,
        };
        set_style(element, "transform", press_scale(pressed));
    }
}

// =============================================================
// Theme
// =============================================================

/// The `<html>` element carrying `data-theme`, plus the toggle control.
pub struct DocumentTheme {
    root: HtmlElement,
    toggle: HtmlElement,
}

impl DocumentTheme {
    #[must_use]
    pub fn new(root: HtmlElement, toggle: HtmlElement) -> Self {
        Self { root, toggle }
    }
}

impl ThemeSurface for DocumentTheme {
    fn applied(&self) -> Option<Theme> {
        self.root.get_attribute(THEME_ATTRIBUTE).as_deref().and_then(Theme::parse)
    }

    fn apply(&mut self, theme: Theme) {
        let _ = self.root.set_attribute(THEME_ATTRIBUTE, theme.as_str());
    }

    fn enable_transition(&mut self) {
        set_style(&self.root, "transition", THEME_TRANSITION);
    }

    fn set_toggle_pressed(&mut self, pressed: bool) {
        set_style(&self.toggle, "transform", press_scale(pressed));
    }
}

/// `window.localStorage`, when the browser grants it.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    #[must_use]
    pub fn new(storage: Option<Storage>) -> Self {
        Self { storage }
    }
}

impl PreferenceStore for LocalStorage {
    fn load(&self, key: &str) -> Option<String> {
        match self.storage.as_ref()?.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                log::debug!("storage: read {key} failed: {}", describe(&e));
                None
            }
        }
    }

    fn save(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or_else(|| StorageError("localStorage unavailable".into()))?;
        storage.set_item(key, value).map_err(|e| StorageError(describe(&e)))
    }
}

// =============================================================
// Skill bars
// =============================================================

pub struct DomSkillBars {
    bars: Vec<HtmlElement>,
}

impl DomSkillBars {
    #[must_use]
    pub fn new(bars: Vec<HtmlElement>) -> Self {
        Self { bars }
    }
}

impl SkillBarView for DomSkillBars {
    fn bar_count(&self) -> usize {
        self.bars.len()
    }

    fn width(&self, index: usize) -> String {
        self.bars
            .get(index)
            .and_then(|bar| bar.style().get_property_value("width").ok())
            .unwrap_or_default()
    }

    fn set_width(&mut self, index: usize, width: &str) {
        if let Some(bar) = self.bars.get(index) {
            set_style(bar, "width", width);
        }
    }
}

// =============================================================
// Overlay
// =============================================================

pub struct DomOverlay {
    popup: HtmlElement,
}

impl DomOverlay {
    #[must_use]
    pub fn new(popup: HtmlElement) -> Self {
        Self { popup }
    }
}

impl OverlayView for DomOverlay {
    fn set_visible(&mut self, visible: bool) {
        set_style(&self.popup, "display", overlay_display(visible));
    }
}
