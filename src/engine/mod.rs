//! Render engine adapter.
//!
//! The formula engine (parsing, layout, font handling, settings storage) is
//! an external collaborator. This module defines the narrow typed surface
//! the controller talks to: the `RenderEngine` trait plus the settings value
//! it exchanges. The browser implementation is `JsEngine` (wasm32 only),
//! which binds the engine's JavaScript exports.

#[cfg(target_arch = "wasm32")]
mod bindings;

#[cfg(target_arch = "wasm32")]
pub use bindings::JsEngine;

use crate::error::Result;

/// Callback the engine invokes once it knows the natural size of the
/// formula, returning a draw target of at least that size.
pub type SurfaceProvider<T> = Box<dyn FnMut(f64, f64) -> Result<T>>;

/// Canonical rendering configuration held by the engine.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct EngineSettings {
    /// Emit glyphs as text elements in SVG output instead of outlines.
    pub glyph_as_text: bool,
    /// Font size, in the engine's textual form.
    pub font_size: String,
}

/// Typed view of the rendering engine's context handle.
///
/// Exactly one value of an implementing type exists per page. Every
/// operation borrows it; settings change only through `set_settings`.
pub trait RenderEngine {
    /// On-screen draw target (a 2D canvas context in the browser).
    type Target;
    /// Draw target handed back from a `SurfaceProvider`.
    type OffscreenTarget;

    /// Draw `formula` into `target`, clearing it first.
    ///
    /// Fails with `PreviewError::Render` on malformed or unsupported
    /// syntax. The empty formula must always succeed.
    fn render_to_canvas(&self, formula: &str, target: &mut Self::Target) -> Result<()>;

    /// Serialize `formula` as a standalone SVG document.
    fn render_to_svg(&self, formula: &str) -> Result<String>;

    /// Lay out `formula`, ask `provider` for a surface of the resulting
    /// size and draw into it.
    fn render_to_offscreen(
        &self,
        formula: &str,
        provider: SurfaceProvider<Self::OffscreenTarget>,
    ) -> Result<()>;

    /// Read the canonical settings.
    fn settings(&self) -> EngineSettings;

    /// Replace the canonical settings. The engine may normalise or reject
    /// individual values; read them back with `settings`.
    fn set_settings(&mut self, settings: &EngineSettings);
}
