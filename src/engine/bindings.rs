//! JavaScript bindings for the formula engine.
//!
//! The engine ships as its own wasm-bindgen package next to ours. Its exports
//! throw plain strings on failure, which `catch` turns into `Err(JsValue)`.

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, OffscreenCanvasRenderingContext2d};

use super::{EngineSettings, RenderEngine, SurfaceProvider};
use crate::error::{js_message, PreviewError, Result};

#[wasm_bindgen(raw_module = "./maths_preview.js")]
extern "C" {
    /// Engine-side context: parsed font plus current settings.
    #[wasm_bindgen(js_name = Context)]
    type EngineContext;

    /// Module initialiser (the package's default export).
    #[wasm_bindgen(js_name = default, catch)]
    async fn init_engine_module() -> std::result::Result<JsValue, JsValue>;

    #[wasm_bindgen(catch)]
    fn init_font() -> std::result::Result<EngineContext, JsValue>;

    #[wasm_bindgen(catch)]
    fn render_formula_to_canvas_js_err(
        context: &EngineContext,
        formula: &str,
        canvas: &CanvasRenderingContext2d,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(catch)]
    fn render_formula_to_svg(
        context: &EngineContext,
        formula: &str,
    ) -> std::result::Result<String, JsValue>;

    #[wasm_bindgen(catch)]
    fn render_formula_to_offscreen_canvas_js_err(
        context: &EngineContext,
        formula: &str,
        make_new_canvas: &js_sys::Function,
    ) -> std::result::Result<(), JsValue>;

    #[wasm_bindgen(method, getter)]
    fn glyph_as_text(this: &EngineContext) -> bool;

    #[wasm_bindgen(method, getter)]
    fn font_size(this: &EngineContext) -> f64;

    #[wasm_bindgen(method)]
    fn set_settings_from_js(this: &EngineContext, glyph_as_text: bool, font_size: &str);
}

/// Handle to the browser-side engine context.
pub struct JsEngine {
    context: EngineContext,
}

impl JsEngine {
    /// Load the engine module and parse its math font.
    ///
    /// # Errors
    /// `PreviewError::Init` if either step throws; the page cannot continue.
    pub async fn load() -> Result<Self> {
        init_engine_module()
            .await
            .map_err(|e| PreviewError::Init(js_message(&e)))?;
        let context = init_font().map_err(|e| PreviewError::Init(js_message(&e)))?;
        log::info!("math font loaded");
        Ok(Self { context })
    }
}

impl RenderEngine for JsEngine {
    type Target = CanvasRenderingContext2d;
    type OffscreenTarget = OffscreenCanvasRenderingContext2d;

    fn render_to_canvas(&self, formula: &str, target: &mut Self::Target) -> Result<()> {
        match render_formula_to_canvas_js_err(&self.context, formula, target) {
            Ok(()) => Ok(()),
            // Empty input is the fallback of last resort and must always draw.
            Err(e) if formula.is_empty() => {
                log::warn!("engine rejected empty formula: {}", js_message(&e));
                if let Some(canvas) = target.canvas() {
                    target.clear_rect(
                        0.0,
                        0.0,
                        f64::from(canvas.width()),
                        f64::from(canvas.height()),
                    );
                }
                Ok(())
            }
            Err(e) => Err(PreviewError::Render(js_message(&e))),
        }
    }

    fn render_to_svg(&self, formula: &str) -> Result<String> {
        render_formula_to_svg(&self.context, formula)
            .map_err(|e| PreviewError::Render(js_message(&e)))
    }

    fn render_to_offscreen(
        &self,
        formula: &str,
        mut provider: SurfaceProvider<Self::OffscreenTarget>,
    ) -> Result<()> {
        let make_new_canvas = Closure::wrap(Box::new(move |width: f64, height: f64| {
            provider(width, height)
                .map(JsValue::from)
                .map_err(JsValue::from)
        })
            as Box<dyn FnMut(f64, f64) -> std::result::Result<JsValue, JsValue>>);

        // The engine calls back synchronously, so the closure can be dropped
        // as soon as the call returns.
        render_formula_to_offscreen_canvas_js_err(
            &self.context,
            formula,
            make_new_canvas.as_ref().unchecked_ref(),
        )
        .map_err(|e| PreviewError::Render(js_message(&e)))
    }

    fn settings(&self) -> EngineSettings {
        EngineSettings {
            glyph_as_text: self.context.glyph_as_text(),
            font_size: self.context.font_size().to_string(),
        }
    }

    fn set_settings(&mut self, settings: &EngineSettings) {
        self.context
            .set_settings_from_js(settings.glyph_as_text, &settings.font_size);
    }
}
