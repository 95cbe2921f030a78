//! Start-up failures.
//!
//! A missing element means the page markup does not match the DOM contract,
//! so mounting stops and the error is logged and returned to JS.

#[cfg(test)]
#[path = "error_test.rs"]
mod error_test;

use wasm_bindgen::JsValue;

#[derive(Debug, thiserror::Error)]
pub enum MountError {
    #[error("browser window unavailable")]
    NoWindow,
    #[error("document unavailable")]
    NoDocument,
    #[error("missing {role} element ({selector})")]
    Missing { role: &'static str, selector: String },
    #[error("{role} element ({selector}) is not an HTML element")]
    NotHtml { role: &'static str, selector: String },
    #[error("{call} failed: {message}")]
    Dom { call: &'static str, message: String },
}

impl MountError {
    /// Wrap a rejected DOM call.
    #[must_use]
    pub fn dom(call: &'static str, err: &JsValue) -> Self {
        Self::Dom { call, message: describe(err) }
    }
}

impl From<MountError> for JsValue {
    fn from(err: MountError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Best-effort text for a thrown JS value.
#[must_use]
pub fn describe(err: &JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}
