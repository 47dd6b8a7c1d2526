//! Web platform error types

use thiserror::Error;
use wasm_bindgen::JsValue;

use stickup_core::StickUpError;

/// Errors raised while binding a sticky menu to the browser
#[derive(Error, Debug)]
pub enum WebError {
    /// No global `window` (not running in a browser main thread)
    #[error("no window available")]
    NoWindow,

    /// The window has no document
    #[error("no document available")]
    NoDocument,

    /// Options could not be decoded
    #[error(transparent)]
    Options(#[from] StickUpError),

    /// A DOM call threw
    #[error("DOM error: {0}")]
    Dom(String),
}

impl WebError {
    pub(crate) fn dom(value: JsValue) -> Self {
        WebError::Dom(format!("{:?}", value))
    }
}

impl From<WebError> for JsValue {
    fn from(err: WebError) -> Self {
        JsValue::from_str(&err.to_string())
    }
}

/// Result type for web platform operations
pub type Result<T> = std::result::Result<T, WebError>;
