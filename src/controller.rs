//! The live-preview controller.
//!
//! One `Controller` exists per page. It owns the engine handle, the canvas,
//! the error display and the render/size state, and exposes one method per
//! triggering event. It is platform independent: the browser wiring lives in
//! `crate::preview`.

use crate::engine::{EngineSettings, RenderEngine};
use crate::error::PreviewError;
use crate::export::{self, ExportJob, OffscreenSurface};
use crate::layout::{CanvasHost, CanvasManager, SurfaceGeometry, SurfaceSize};
use crate::render::{report, ErrorIndicator, RenderOutcome, RenderState, ResilientRenderer};
use crate::settings::{self, SettingsForm};

/// Page-wide preview state.
pub struct Controller<E, H, I> {
    engine: E,
    canvas: H,
    errors: I,
    renderer: ResilientRenderer,
    manager: CanvasManager,
    file_stem: String,
}

impl<E, H, I> Controller<E, H, I>
where
    E: RenderEngine,
    H: CanvasHost<Target = E::Target>,
    I: ErrorIndicator,
{
    pub fn new(engine: E, canvas: H, errors: I, geometry: SurfaceGeometry, file_stem: &str) -> Self {
        Self {
            engine,
            canvas,
            errors,
            renderer: ResilientRenderer::new(),
            manager: CanvasManager::new(geometry),
            file_stem: file_stem.to_string(),
        }
    }

    /// Size the canvas and draw the initial formula.
    pub fn start(&mut self, formula: &str) -> RenderOutcome {
        self.resize(formula).1
    }

    /// Re-render after an input change.
    pub fn render(&mut self, formula: &str) -> RenderOutcome {
        self.renderer.render(
            &self.engine,
            formula,
            self.canvas.target(),
            &mut self.errors,
        )
    }

    /// Resize the canvas to its container, then re-render `formula`.
    ///
    /// The current formula is attempted again even when the renderer is
    /// degraded.
    pub fn resize(&mut self, formula: &str) -> (SurfaceSize, RenderOutcome) {
        let size = self.manager.resize(&mut self.canvas);
        (size, self.render(formula))
    }

    /// Start exporting `formula` as `format`.
    ///
    /// Failures are shown on the error display and yield `None`.
    pub fn export<O, F>(&mut self, formula: &str, format: &str, new_surface: F) -> Option<ExportJob<O>>
    where
        O: OffscreenSurface<Draw = E::OffscreenTarget>,
        F: FnOnce() -> crate::error::Result<O>,
    {
        match export::export(&self.engine, formula, format, &self.file_stem, new_surface) {
            Ok(job) => Some(job),
            Err(error) => {
                self.report(&error);
                None
            }
        }
    }

    /// Show `error` on the page.
    pub fn report(&mut self, error: &PreviewError) {
        report(&mut self.errors, error);
    }

    /// Show a progress message in the error area.
    pub fn status(&mut self, message: &str) {
        self.errors.show(message);
    }

    /// Push the form into the engine and read the engine's view back.
    pub fn sync_settings<F: SettingsForm + ?Sized>(&mut self, form: &mut F) -> EngineSettings {
        settings::push_settings(form, &mut self.engine);
        settings::pull_settings(form, &self.engine)
    }

    /// Fill the form from the engine without writing anything.
    pub fn pull_settings<F: SettingsForm + ?Sized>(&self, form: &mut F) -> EngineSettings {
        settings::pull_settings(form, &self.engine)
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn canvas(&self) -> &H {
        &self.canvas
    }

    pub fn errors(&self) -> &I {
        &self.errors
    }

    pub fn errors_mut(&mut self) -> &mut I {
        &mut self.errors
    }

    pub fn last_good(&self) -> &str {
        self.renderer.last_good()
    }

    pub fn render_state(&self) -> RenderState {
        self.renderer.state()
    }

    pub fn canvas_size(&self) -> Option<SurfaceSize> {
        self.manager.size()
    }

    pub fn file_stem(&self) -> &str {
        &self.file_stem
    }
}
