//! Structured error types for mathview.
//!
//! Every failure the controller can observe maps to one variant here. Only
//! `Init` (and `Dom` during startup) is fatal; everything else is routed to
//! the on-page error display.

/// All errors that can occur while previewing or exporting a formula.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// The rendering engine failed to load or initialise its font.
    #[error("Engine initialisation failed: {0}")]
    Init(String),

    /// The engine rejected the formula text.
    ///
    /// The message is shown to the user verbatim, so it carries no prefix.
    #[error("{0}")]
    Render(String),

    /// The export format selector held a value we cannot produce.
    #[error("{0} not supported")]
    UnsupportedFormat(String),

    /// Converting the offscreen surface into an image file failed.
    #[error("Image encoding failed: {0}")]
    ExportEncoding(String),

    /// The hosting document reported a failed insertion.
    #[error("Insertion failed: {0}")]
    Host(String),

    /// A required element was missing or a DOM call failed.
    #[error("DOM error: {0}")]
    Dom(String),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, PreviewError>;

impl PreviewError {
    /// Whether the page can keep running after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Init(_))
    }
}

#[cfg(target_arch = "wasm32")]
impl From<PreviewError> for wasm_bindgen::JsValue {
    fn from(e: PreviewError) -> Self {
        wasm_bindgen::JsValue::from_str(&e.to_string())
    }
}

/// Render an arbitrary thrown JS value as a message.
///
/// Engines built with wasm-bindgen throw plain strings; anything else falls
/// back to its debug representation.
#[cfg(target_arch = "wasm32")]
pub(crate) fn js_message(value: &wasm_bindgen::JsValue) -> String {
    use wasm_bindgen::JsCast;

    if let Some(text) = value.as_string() {
        return text;
    }
    if let Some(error) = value.dyn_ref::<js_sys::Error>() {
        return String::from(error.message());
    }
    format!("{value:?}")
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn unsupported_format_names_the_value() {
        let err = PreviewError::UnsupportedFormat("tiff".to_string());
        assert_eq!(err.to_string(), "tiff not supported");
    }

    #[test]
    fn render_message_is_verbatim() {
        let err = PreviewError::Render("Parse Error : unexpected end of input".to_string());
        assert_eq!(err.to_string(), "Parse Error : unexpected end of input");
    }

    #[test]
    fn only_init_is_fatal() {
        assert!(!PreviewError::Init("no font".into()).is_recoverable());
        assert!(PreviewError::Render("x".into()).is_recoverable());
        assert!(PreviewError::ExportEncoding("x".into()).is_recoverable());
        assert!(PreviewError::Dom("x".into()).is_recoverable());
    }
}
