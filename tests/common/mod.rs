//! Common test doubles for the preview controller.
//!
//! `FakeEngine` stands in for the formula engine: it accepts any formula
//! with balanced braces and "draws" by writing the formula text into the
//! target. Like the real engine it clears the canvas before laying out, so
//! a rejected formula leaves the canvas blank until something is redrawn.
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::future::{ready, Future};
use std::rc::Rc;

use mathview::engine::SurfaceProvider;
use mathview::export::{Download, Downloader, OffscreenSurface};
use mathview::layout::{CanvasHost, SurfaceGeometry, SurfaceSize};
use mathview::render::ErrorIndicator;
use mathview::settings::{ControlKind, SettingsForm};
use mathview::{Controller, EngineSettings, PreviewError, RenderEngine, Result};

// ============================================================================
// Engine
// ============================================================================

/// Pixels of a fake raster target: the formula last drawn, if any.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakePixels {
    pub drawn: Option<String>,
    pub size: Option<SurfaceSize>,
}

/// Draw context handed back from an offscreen surface.
#[derive(Debug, Clone)]
pub struct FakeOffscreenDraw(Rc<RefCell<FakePixels>>);

pub struct FakeEngine {
    glyph_as_text: bool,
    font_size: f64,
    pub canvas_renders: Cell<usize>,
    pub svg_renders: Cell<usize>,
}

impl Default for FakeEngine {
    fn default() -> Self {
        Self {
            glyph_as_text: false,
            font_size: 10.0,
            canvas_renders: Cell::new(0),
            svg_renders: Cell::new(0),
        }
    }
}

impl FakeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the engine lays out `formula`: braces must balance.
    pub fn accepts(formula: &str) -> bool {
        let mut depth: i64 = 0;
        for c in formula.chars() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth -= 1;
                    if depth < 0 {
                        return false;
                    }
                }
                _ => {}
            }
        }
        depth == 0
    }

    fn check(formula: &str) -> Result<()> {
        if Self::accepts(formula) {
            Ok(())
        } else {
            Err(PreviewError::Render(format!(
                "Parse Error : unbalanced braces in {formula:?}"
            )))
        }
    }

    /// The SVG the engine produces for an accepted `formula`.
    pub fn svg_for(formula: &str) -> String {
        format!(r#"<svg viewBox="0 0 10 10"><text>{formula}</text></svg>"#)
    }

    /// Natural pixel size of `formula` at export scale.
    pub fn natural_size(formula: &str) -> (f64, f64) {
        (12.5 * formula.chars().count() as f64 + 0.25, 40.5)
    }
}

impl RenderEngine for FakeEngine {
    type Target = FakePixels;
    type OffscreenTarget = FakeOffscreenDraw;

    fn render_to_canvas(&self, formula: &str, target: &mut FakePixels) -> Result<()> {
        self.canvas_renders.set(self.canvas_renders.get() + 1);
        target.drawn = None;
        Self::check(formula)?;
        target.drawn = Some(formula.to_string());
        Ok(())
    }

    fn render_to_svg(&self, formula: &str) -> Result<String> {
        self.svg_renders.set(self.svg_renders.get() + 1);
        Self::check(formula)?;
        Ok(Self::svg_for(formula))
    }

    fn render_to_offscreen(
        &self,
        formula: &str,
        mut provider: SurfaceProvider<FakeOffscreenDraw>,
    ) -> Result<()> {
        Self::check(formula)?;
        let (width, height) = Self::natural_size(formula);
        let draw = provider(width, height)?;
        draw.0.borrow_mut().drawn = Some(formula.to_string());
        Ok(())
    }

    fn settings(&self) -> EngineSettings {
        EngineSettings {
            glyph_as_text: self.glyph_as_text,
            font_size: self.font_size.to_string(),
        }
    }

    /// Unparseable sizes are ignored; parsed ones are clamped to 1..=100.
    fn set_settings(&mut self, settings: &EngineSettings) {
        self.glyph_as_text = settings.glyph_as_text;
        if let Ok(size) = settings.font_size.parse::<f64>() {
            self.font_size = size.clamp(1.0, 100.0);
        }
    }
}

// ============================================================================
// Canvas host and error display
// ============================================================================

pub struct FakeHost {
    pub container_width: f64,
    pub viewport_height: f64,
    pub surface: FakePixels,
    pub resizes: usize,
}

impl FakeHost {
    pub fn new(container_width: f64, viewport_height: f64) -> Self {
        Self {
            container_width,
            viewport_height,
            surface: FakePixels::default(),
            resizes: 0,
        }
    }
}

impl CanvasHost for FakeHost {
    type Target = FakePixels;

    fn container_width(&self) -> f64 {
        self.container_width
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height
    }

    fn set_surface_size(&mut self, size: SurfaceSize) {
        self.resizes += 1;
        // Resizing a canvas wipes it.
        self.surface = FakePixels {
            drawn: None,
            size: Some(size),
        };
    }

    fn target(&mut self) -> &mut FakePixels {
        &mut self.surface
    }
}

#[derive(Debug, Default)]
pub struct FakeErrorBar {
    pub visible: bool,
    pub message: String,
    pub shown: usize,
}

impl ErrorIndicator for FakeErrorBar {
    fn show(&mut self, message: &str) {
        self.visible = true;
        self.message = message.to_string();
        self.shown += 1;
    }

    fn hide(&mut self) {
        self.visible = false;
    }
}

pub type FakeController = Controller<FakeEngine, FakeHost, FakeErrorBar>;

/// A controller on an 800x1000 page (canvas 800x600).
pub fn controller() -> FakeController {
    controller_with_host(FakeHost::new(800.0, 1000.0))
}

pub fn controller_with_host(host: FakeHost) -> FakeController {
    Controller::new(
        FakeEngine::new(),
        host,
        FakeErrorBar::default(),
        SurfaceGeometry::default(),
        "formula",
    )
}

// ============================================================================
// Export
// ============================================================================

#[derive(Debug, Clone, Default)]
pub struct FakeOffscreen {
    pub pixels: Rc<RefCell<FakePixels>>,
    pub resize_calls: Rc<Cell<usize>>,
    pub fail_encode: bool,
}

impl FakeOffscreen {
    pub fn new() -> Self {
        let offscreen = Self::default();
        offscreen.pixels.borrow_mut().size = Some(SurfaceSize {
            width: 1,
            height: 1,
        });
        offscreen
    }

    pub fn failing() -> Self {
        Self {
            fail_encode: true,
            ..Self::new()
        }
    }
}

impl OffscreenSurface for FakeOffscreen {
    type Draw = FakeOffscreenDraw;
    type Encoded = Vec<u8>;

    fn resize(&self, size: SurfaceSize) -> Result<FakeOffscreenDraw> {
        self.resize_calls.set(self.resize_calls.get() + 1);
        *self.pixels.borrow_mut() = FakePixels {
            drawn: None,
            size: Some(size),
        };
        Ok(FakeOffscreenDraw(Rc::clone(&self.pixels)))
    }

    fn encode_png(&self) -> impl Future<Output = Result<Vec<u8>>> {
        let pixels = self.pixels.borrow().clone();
        let result = if self.fail_encode {
            Err(PreviewError::ExportEncoding("canvas is tainted".into()))
        } else {
            let size = pixels.size.unwrap_or(SurfaceSize {
                width: 0,
                height: 0,
            });
            Ok(format!(
                "PNG {}x{} {}",
                size.width,
                size.height,
                pixels.drawn.unwrap_or_default()
            )
            .into_bytes())
        };
        ready(result)
    }
}

#[derive(Debug, Default)]
pub struct FakeDownloader {
    pub delivered: Vec<Download<Vec<u8>>>,
}

impl Downloader for FakeDownloader {
    type Blob = Vec<u8>;

    fn deliver(&mut self, download: Download<Vec<u8>>) -> Result<()> {
        self.delivered.push(download);
        Ok(())
    }
}

// ============================================================================
// Settings form
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FakeControl {
    Checkbox { checked: bool, value: String },
    Radio(Vec<(String, bool)>),
    Value(String),
}

/// Named controls behaving like an HTML form's `FormData`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FakeForm {
    pub controls: BTreeMap<String, FakeControl>,
}

impl FakeForm {
    /// The stock settings form: a `glyph_as_text` checkbox and a
    /// `font_size` number input.
    pub fn standard(glyph_as_text: bool, font_size: &str) -> Self {
        let mut form = Self::default();
        form.controls.insert(
            "glyph_as_text".into(),
            FakeControl::Checkbox {
                checked: glyph_as_text,
                value: "on".into(),
            },
        );
        form.controls
            .insert("font_size".into(), FakeControl::Value(font_size.into()));
        form
    }

    pub fn checked(&self, name: &str) -> bool {
        match self.controls.get(name) {
            Some(FakeControl::Checkbox { checked, .. }) => *checked,
            other => panic!("{name} is not a checkbox: {other:?}"),
        }
    }

    pub fn set_checkbox(&mut self, name: &str, on: bool) {
        match self.controls.get_mut(name) {
            Some(FakeControl::Checkbox { checked, .. }) => *checked = on,
            other => panic!("{name} is not a checkbox: {other:?}"),
        }
    }

    pub fn value(&self, name: &str) -> String {
        self.entry(name).unwrap_or_default()
    }
}

impl SettingsForm for FakeForm {
    fn entry(&self, name: &str) -> Option<String> {
        match self.controls.get(name)? {
            FakeControl::Checkbox { checked, value } => checked.then(|| value.clone()),
            FakeControl::Radio(members) => members
                .iter()
                .find(|(_, checked)| *checked)
                .map(|(value, _)| value.clone()),
            FakeControl::Value(value) => Some(value.clone()),
        }
    }

    fn control_kind(&self, name: &str) -> Option<ControlKind> {
        Some(match self.controls.get(name)? {
            FakeControl::Checkbox { .. } => ControlKind::Checkbox,
            FakeControl::Radio(_) => ControlKind::RadioGroup,
            FakeControl::Value(_) => ControlKind::Value,
        })
    }

    fn set_checked(&mut self, name: &str, on: bool) {
        if let Some(FakeControl::Checkbox { checked, .. }) = self.controls.get_mut(name) {
            *checked = on;
        }
    }

    fn select_radio(&mut self, name: &str, value: &str) -> bool {
        let Some(FakeControl::Radio(members)) = self.controls.get_mut(name) else {
            return false;
        };
        if !members.iter().any(|(v, _)| v == value) {
            return false;
        }
        for (v, checked) in members.iter_mut() {
            *checked = v == value;
        }
        true
    }

    fn set_value(&mut self, name: &str, value: &str) {
        if let Some(FakeControl::Value(current)) = self.controls.get_mut(name) {
            *current = value.to_string();
        }
    }
}
