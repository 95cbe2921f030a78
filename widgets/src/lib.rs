//! Behavior engine for the portfolio page.
//!
//! This crate holds every piece of page logic that does not need a browser:
//! the carousel state machine, theme resolution and toggling, anchor scroll
//! targeting, the one-shot skill-bar reveal, and the inspection deterrent.
//! Each controller owns a small view trait object instead of reaching for a
//! global document, and defers work through the [`timer::Scheduler`] trait so
//! tests can drive time with [`timer::VirtualScheduler`]. The `folio` crate
//! supplies the `web-sys` implementations and wires DOM events in.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`carousel`] | Slide index state machine, auto-advance, swipe handling |
//! | [`theme`] | Light/dark resolution, toggle, best-effort persistence |
//! | [`scroll`] | In-page anchor interception and header-offset targeting |
//! | [`skills`] | Visibility-triggered, one-shot skill-bar fill animation |
//! | [`deterrent`] | Context-menu and shortcut interception overlay |
//! | [`timer`] | Scheduler trait, timer handles, deferred tasks, virtual clock |
//! | [`input`] | Keyboard key and modifier types shared by handlers |
//! | [`config`] | Typed page configuration with defaults and validation |
//! | [`consts`] | Default timings and thresholds |

pub mod carousel;
pub mod config;
pub mod consts;
pub mod deterrent;
pub mod input;
pub mod scroll;
pub mod skills;
pub mod theme;
pub mod timer;
