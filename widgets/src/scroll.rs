//! In-page anchor interception.
//!
//! Links whose `href` is a fragment (other than a bare `#`) are taken over:
//! the default jump is suppressed and the page scrolls smoothly to the
//! target, stopping short by the fixed header's height.

#[cfg(test)]
#[path = "scroll_test.rs"]
mod scroll_test;

use crate::config::ScrollConfig;

/// What to do with a click on an anchor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum AnchorOutcome {
    /// Not an in-page fragment; let the browser handle it.
    PassThrough,
    /// Fragment link whose target does not exist; suppress the jump only.
    Suppress,
    /// Suppress the jump and smooth-scroll to this document offset.
    ScrollTo { top: f64 },
}

impl AnchorOutcome {
    #[must_use]
    pub fn prevents_default(self) -> bool {
        !matches!(self, Self::PassThrough)
    }
}

/// The fragment selector (`"#about"`) an `href` points at, if it is in-page.
#[must_use]
pub fn fragment_selector(href: &str) -> Option<&str> {
    if href.len() > 1 && href.starts_with('#') { Some(href) } else { None }
}

#[derive(Debug, Clone)]
pub struct AnchorScroll {
    header_offset_px: f64,
}

impl AnchorScroll {
    #[must_use]
    pub fn new(config: &ScrollConfig) -> Self {
        Self { header_offset_px: config.header_offset_px }
    }

    /// Document offset to scroll to for a target whose top is at `element_top`.
    #[must_use]
    pub fn destination(&self, element_top: f64) -> f64 {
        element_top - self.header_offset_px
    }

    /// Decide how to handle a click on an anchor with `href`.
    ///
    /// `locate` resolves a fragment selector to the target's document top.
    pub fn on_anchor_click<F>(&self, href: &str, locate: F) -> AnchorOutcome
    where
        F: FnOnce(&str) -> Option<f64>,
    {
        let Some(selector) = fragment_selector(href) else {
            return AnchorOutcome::PassThrough;
        };
        match locate(selector) {
            Some(top) => AnchorOutcome::ScrollTo { top: self.destination(top) },
            None => {
                log::debug!("scroll: no element for {selector}");
                AnchorOutcome::Suppress
            }
        }
    }
}
