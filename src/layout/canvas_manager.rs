//! Responsive sizing of the on-screen canvas.

use super::surface::{SurfaceGeometry, SurfaceSize};

/// The on-screen canvas together with the layout it lives in.
pub trait CanvasHost {
    /// Draw target the engine renders into.
    type Target;

    /// Current layout width of the canvas container, in CSS pixels.
    fn container_width(&self) -> f64;

    /// Current viewport (window) height, in CSS pixels.
    fn viewport_height(&self) -> f64;

    /// Resize the raster buffer. This clears its pixels.
    fn set_surface_size(&mut self, size: SurfaceSize);

    /// The draw target backing the canvas.
    fn target(&mut self) -> &mut Self::Target;
}

/// Keeps the canvas raster size in step with its container.
#[derive(Debug, Clone)]
pub struct CanvasManager {
    geometry: SurfaceGeometry,
    size: Option<SurfaceSize>,
}

impl CanvasManager {
    pub fn new(geometry: SurfaceGeometry) -> Self {
        Self {
            geometry,
            size: None,
        }
    }

    /// Recompute the raster size from the host's layout and apply it.
    ///
    /// The caller must re-render afterwards: resizing wipes the canvas.
    pub fn resize<H: CanvasHost>(&mut self, host: &mut H) -> SurfaceSize {
        let size = self
            .geometry
            .fit(host.container_width(), host.viewport_height());
        if self.size != Some(size) {
            log::debug!("canvas resized to {}x{}", size.width, size.height);
        }
        host.set_surface_size(size);
        self.size = Some(size);
        size
    }

    /// Size applied by the last `resize`, if any.
    pub fn size(&self) -> Option<SurfaceSize> {
        self.size
    }

    pub fn geometry(&self) -> &SurfaceGeometry {
        &self.geometry
    }
}
