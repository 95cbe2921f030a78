//! # folio
//!
//! Browser behaviors for a single-page portfolio, compiled to WASM.
//!
//! The state machines live in the `widgets` crate and never touch the DOM.
//! This crate supplies the `web-sys` views, the `gloo-timers` scheduler, and
//! the event wiring that connects them to the page.
//!
//! | Module      | Role                                                  |
//! |-------------|-------------------------------------------------------|
//! | `app`       | Element lookup, controller assembly, listeners        |
//! | `config`    | Inline JSON config block                              |
//! | `dom`       | Page contract (ids, selectors) and lookup helpers     |
//! | `error`     | Mount failures                                        |
//! | `scheduler` | Timers routed back into the app                       |
//! | `views`     | `web-sys` implementations of the view traits          |

pub mod app;
pub mod config;
pub mod dom;
pub mod error;
pub mod scheduler;
pub mod views;

use wasm_bindgen::prelude::*;
use web_sys::{Document, Window};
use widgets::config::PageConfig;

use crate::error::MountError;

/// WASM entry point, run when the module is instantiated.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let window = web_sys::window().ok_or(MountError::NoWindow)?;
    let document = window.document().ok_or(MountError::NoDocument)?;

    let (config, rejected) = config::resolve(config::read_embedded(&document).as_deref());
    let level = config.log_level_filter().unwrap_or(log::Level::Info);
    if console_log::init_with_level(level).is_err() {
        // A logger is already installed (module instantiated twice).
        log::debug!("logger already initialized");
    }
    if let Some(e) = rejected {
        log::warn!("config: {e}; using defaults");
    }

    if document.ready_state() == "loading" {
        let (win, doc) = (window.clone(), document.clone());
        dom::listen(&document, "DOMContentLoaded", move |_| boot(&win, &doc, &config))?;
    } else {
        boot(&window, &document, &config);
    }
    Ok(())
}

fn boot(window: &Window, document: &Document, config: &PageConfig) {
    match app::mount(window, document, config) {
        // Listeners and timers keep the app alive from here on.
        Ok(_app) => {}
        Err(e) => log::error!("mount failed: {e}"),
    }
}
