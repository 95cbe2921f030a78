//! Loading `PageConfig` from the page's inline JSON block.
//!
//! The block is optional:
//!
//! ```html
//! <script type="application/json" id="folio-config">
//!   { "carousel": { "auto_advance_ms": 8000 } }
//! </script>
//! ```
//!
//! A block that fails to parse or validate is reported and replaced by the
//! defaults, so a typo never takes the page's behaviors down.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use web_sys::Document;
use widgets::config::{ConfigError, PageConfig};

pub const CONFIG_SCRIPT_ID: &str = "folio-config";

/// Text of the inline config block, if the page has one.
#[must_use]
pub fn read_embedded(document: &Document) -> Option<String> {
    document.get_element_by_id(CONFIG_SCRIPT_ID)?.text_content()
}

/// Parse an optional raw block, falling back to defaults.
///
/// The rejection is returned rather than logged because the logger is only
/// installed once the level from this very config is known.
#[must_use]
pub fn resolve(raw: Option<&str>) -> (PageConfig, Option<ConfigError>) {
    let Some(raw) = raw.map(str::trim).filter(|r| !r.is_empty()) else {
        return (PageConfig::default(), None);
    };
    match PageConfig::from_json(raw) {
        Ok(config) => (config, None),
        Err(e) => (PageConfig::default(), Some(e)),
    }
}
