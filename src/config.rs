//! Page configuration.
//!
//! Everything has a default matching the stock `index.html`, so JavaScript
//! only passes the keys it wants to change:
//!
//! ```javascript
//! const preview = await MathPreview.start({ file_stem: "equation" });
//! ```

use serde::Deserialize;

use crate::export::DEFAULT_FILE_STEM;
use crate::layout::SurfaceGeometry;

/// Ids of the page elements the controller drives.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct ElementIds {
    pub canvas: String,
    pub formula: String,
    pub save: String,
    pub save_format: String,
    pub error: String,
    pub settings_form: String,
    pub export_options_link: String,
    pub export_options_dialog: String,
    pub close_dialog: String,
}

impl Default for ElementIds {
    fn default() -> Self {
        Self {
            canvas: "canvas".into(),
            formula: "formula".into(),
            save: "save".into(),
            save_format: "saveFormat".into(),
            error: "error".into(),
            settings_form: "settings_form".into(),
            export_options_link: "export_options_link".into(),
            export_options_dialog: "export_options_dialog".into(),
            close_dialog: "close_dialog".into(),
        }
    }
}

/// Controller configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct PreviewConfig {
    pub elements: ElementIds,
    pub geometry: SurfaceGeometry,
    /// Name of exported files, without extension.
    pub file_stem: String,
    /// Minimum level forwarded to the browser console.
    pub log_level: String,
}

impl Default for PreviewConfig {
    fn default() -> Self {
        Self {
            elements: ElementIds::default(),
            geometry: SurfaceGeometry::default(),
            file_stem: DEFAULT_FILE_STEM.into(),
            log_level: "info".into(),
        }
    }
}

impl PreviewConfig {
    /// Parsed `log_level`, falling back to `Info` for unknown names.
    pub fn log_level(&self) -> log::Level {
        self.log_level.parse().unwrap_or(log::Level::Info)
    }

    /// Decode a configuration object passed from JavaScript.
    ///
    /// `undefined` and `null` select the defaults.
    #[cfg(target_arch = "wasm32")]
    pub fn from_js(value: wasm_bindgen::JsValue) -> crate::error::Result<Self> {
        if value.is_undefined() || value.is_null() {
            return Ok(Self::default());
        }
        serde_wasm_bindgen::from_value(value)
            .map_err(|e| crate::error::PreviewError::Dom(format!("invalid configuration: {e}")))
    }
}
