//! Error Types
//!
//! Startup failures. Click handling never fails; see `confirm::ClickOutcome`.

use thiserror::Error;
use wasm_bindgen::JsValue;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid JSON config: {0}")]
    Json(#[from] serde_json::Error),

    #[error("invalid config object: {0}")]
    Js(String),

    #[error("trigger selector is empty")]
    EmptySelector,

    #[error("trigger selector `{0}` is malformed")]
    MalformedSelector(String),

    #[error("route for `{0}` has no {{id}} placeholder")]
    MissingPlaceholder(String),
}

impl From<serde_wasm_bindgen::Error> for ConfigError {
    fn from(e: serde_wasm_bindgen::Error) -> Self {
        ConfigError::Js(e.to_string())
    }
}

#[derive(Debug, Error)]
pub enum BindError {
    #[error("no window available")]
    NoWindow,

    #[error("no document available")]
    NoDocument,

    #[error("DOM call failed: {0}")]
    Dom(String),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<JsValue> for BindError {
    fn from(value: JsValue) -> Self {
        BindError::Dom(js_error_text(&value))
    }
}

/// Best-effort text for a thrown JS value
pub fn js_error_text(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{:?}", value))
}
