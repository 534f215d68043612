use std::fmt;

use wasm_bindgen::JsValue;

/// Failures that can reach the host. Nothing on the per-frame path returns one.
#[derive(Debug)]
pub enum ControlsError {
    NoWindow,
    NoDocument,
    NoBody,
    UnknownControl(String),
    /// A value thrown by a DOM or host call, rendered to text.
    Host(String),
    Json(serde_json::Error),
}

impl fmt::Display for ControlsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ControlsError::NoWindow => write!(f, "no global `window` exists"),
            ControlsError::NoDocument => write!(f, "window has no document"),
            ControlsError::NoBody => write!(f, "document has no body"),
            ControlsError::UnknownControl(name) => write!(f, "unknown control '{}'", name),
            ControlsError::Host(msg) => write!(f, "host call failed: {}", msg),
            ControlsError::Json(e) => write!(f, "json: {}", e),
        }
    }
}

impl std::error::Error for ControlsError {}

impl From<JsValue> for ControlsError {
    fn from(value: JsValue) -> Self {
        let msg = value
            .as_string()
            .unwrap_or_else(|| format!("{:?}", value));
        ControlsError::Host(msg)
    }
}

impl From<serde_json::Error> for ControlsError {
    fn from(e: serde_json::Error) -> Self {
        ControlsError::Json(e)
    }
}

impl From<ControlsError> for JsValue {
    fn from(e: ControlsError) -> Self {
        JsValue::from_str(&e.to_string())
    }
}
