//! PNG export through an offscreen surface.
//!
//! The engine only knows the formula's pixel size after laying it out, so
//! it asks for a surface through a callback. Drawing is synchronous; the
//! final encode is the one asynchronous step and runs without borrowing the
//! engine.

use std::cell::Cell;
use std::future::Future;
use std::rc::Rc;

use super::download::{Download, Payload};
use super::format::ExportFormat;
use crate::engine::RenderEngine;
use crate::error::Result;
use crate::layout::SurfaceSize;

/// An off-DOM raster target.
///
/// Implementations are cheap handles: clones refer to the same surface.
pub trait OffscreenSurface: Clone + 'static {
    /// Draw context returned to the engine after a resize.
    type Draw;
    /// Encoded image produced by `encode_png`.
    type Encoded;

    /// Resize the surface and return a fresh draw context for it.
    fn resize(&self, size: SurfaceSize) -> Result<Self::Draw>;

    /// Encode the current pixels as PNG.
    ///
    /// Fails with `PreviewError::ExportEncoding`.
    fn encode_png(&self) -> impl Future<Output = Result<Self::Encoded>>;
}

/// Draw `formula` onto `surface` at the size the engine asks for.
///
/// Returns the size the surface ended up with.
pub fn rasterize<E, O>(engine: &E, formula: &str, surface: &O) -> Result<Option<SurfaceSize>>
where
    E: RenderEngine,
    O: OffscreenSurface<Draw = E::OffscreenTarget>,
{
    let requested = Rc::new(Cell::new(None));
    let provider_surface = surface.clone();
    let provider_requested = Rc::clone(&requested);
    engine.render_to_offscreen(
        formula,
        Box::new(move |width, height| {
            log::debug!("offscreen surface requested: {width} x {height}");
            let size = SurfaceSize::from_layout(width, height);
            provider_requested.set(Some(size));
            provider_surface.resize(size)
        }),
    )?;
    Ok(requested.get())
}

/// A rasterized formula whose PNG encode is still outstanding.
#[derive(Debug, Clone)]
pub struct PendingPng<O> {
    surface: O,
    file_name: String,
}

impl<O: OffscreenSurface> PendingPng<O> {
    pub fn new(surface: O, file_name: String) -> Self {
        Self { surface, file_name }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// Encode the surface and package it for download.
    pub async fn finish(self) -> Result<Download<O::Encoded>> {
        let encoded = self.surface.encode_png().await?;
        Ok(Download {
            file_name: self.file_name,
            mime: ExportFormat::Png.mime(),
            payload: Payload::Binary(encoded),
        })
    }
}
