//! Canvas geometry and responsive sizing.
//!
//! This module handles:
//! - Computing raster dimensions from container width and viewport height
//! - Applying those dimensions to the on-screen canvas through `CanvasHost`

mod canvas_manager;
mod surface;

pub use canvas_manager::{CanvasHost, CanvasManager};
pub use surface::{to_pixels, SurfaceGeometry, SurfaceSize};
