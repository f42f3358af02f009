//! Formula export pipeline.
//!
//! SVG exports are produced synchronously as text. PNG exports rasterize
//! onto an offscreen surface right away and hand back a `PendingPng` whose
//! encode the caller awaits off the event handler.

mod download;
mod format;
mod png;

pub use download::{Download, Downloader, Payload};
pub use format::ExportFormat;
pub use png::{rasterize, OffscreenSurface, PendingPng};

use std::fmt;

use crate::engine::RenderEngine;
use crate::error::Result;

/// File name stem used when none is configured.
pub const DEFAULT_FILE_STEM: &str = "formula";

/// Outcome of starting an export.
pub enum ExportJob<O: OffscreenSurface> {
    /// The file is complete and can be downloaded immediately.
    Ready(Download<O::Encoded>),
    /// The file still has to be encoded.
    Encode(PendingPng<O>),
}

impl<O: OffscreenSurface> fmt::Debug for ExportJob<O> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ready(download) => f.debug_tuple("Ready").field(&download.file_name).finish(),
            Self::Encode(pending) => f.debug_tuple("Encode").field(&pending.file_name()).finish(),
        }
    }
}

/// Start exporting `formula` in the format named by `format`.
///
/// `new_surface` is only called for raster formats and must return a
/// minimal (1x1) surface; the engine resizes it.
///
/// # Errors
/// `UnsupportedFormat` for an unknown `format` (nothing is rendered), or
/// the engine's `Render` error.
pub fn export<E, O, F>(
    engine: &E,
    formula: &str,
    format: &str,
    file_stem: &str,
    new_surface: F,
) -> Result<ExportJob<O>>
where
    E: RenderEngine,
    O: OffscreenSurface<Draw = E::OffscreenTarget>,
    F: FnOnce() -> Result<O>,
{
    let format: ExportFormat = format.parse()?;
    let file_name = format.file_name(file_stem);
    match format {
        ExportFormat::Svg => {
            let svg = engine.render_to_svg(formula)?;
            Ok(ExportJob::Ready(Download {
                file_name,
                mime: format.mime(),
                payload: Payload::Text(svg),
            }))
        }
        ExportFormat::Png => {
            let surface = new_surface()?;
            rasterize(engine, formula, &surface)?;
            Ok(ExportJob::Encode(PendingPng::new(surface, file_name)))
        }
    }
}
