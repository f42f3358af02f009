//! mathview - live formula preview for the web
//!
//! Drives an external formula engine from the browser via WebAssembly:
//! - Re-renders on every keystroke, falling back to the last formula that
//!   rendered so the canvas is never blank or broken
//! - Keeps the canvas sized to its container (4:3, capped at 90% of the
//!   viewport height)
//! - Exports SVG text or PNG rasterized on an offscreen canvas
//! - Keeps a settings form and the engine's settings in sync
//!
//! # Usage (JavaScript)
//!
//! ```javascript
//! import init, { MathPreview } from 'mathview';
//! await init();
//! const preview = await MathPreview.start({ file_stem: "formula" });
//! ```
//!
//! The controller logic is platform independent and generic over the
//! engine and DOM seams (`RenderEngine`, `CanvasHost`, `ErrorIndicator`,
//! `SettingsForm`, `OffscreenSurface`, `Downloader`), so it can be driven
//! natively in tests.

pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod export;
pub mod host;
pub mod layout;
pub mod render;
pub mod settings;

#[cfg(target_arch = "wasm32")]
pub mod preview;

use wasm_bindgen::prelude::*;

pub use config::PreviewConfig;
pub use controller::Controller;
pub use engine::{EngineSettings, RenderEngine};
pub use error::{PreviewError, Result};

#[cfg(target_arch = "wasm32")]
pub use preview::MathPreview;

/// Get the library version
#[must_use]
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
