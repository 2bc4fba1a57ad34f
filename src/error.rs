//! Frontend Errors

use thiserror::Error;
use wasm_bindgen::{JsCast, JsValue};

#[derive(Debug, Error)]
pub enum AdminError {
    /// Network failure or a reply that could not be read
    #[error("Request failed: {0}")]
    Transport(String),

    /// The server answered with a status other than "ok"
    #[error("Server rejected the request: {message}")]
    Rejected { message: String },

    #[error("Could not encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Could not decode reply: {0}")]
    Decode(#[from] serde_wasm_bindgen::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("DOM error: {0}")]
    Dom(String),
}

impl AdminError {
    pub fn transport(err: JsValue) -> Self {
        AdminError::Transport(js_message(&err))
    }

    pub fn dom(err: JsValue) -> Self {
        AdminError::Dom(js_message(&err))
    }
}

/// Best-effort readable text for a thrown JS value
pub fn js_message(err: &JsValue) -> String {
    if let Some(e) = err.dyn_ref::<js_sys::Error>() {
        return String::from(e.message());
    }
    err.as_string().unwrap_or_else(|| format!("{:?}", err))
}
