//! Raster size computation for the preview canvas.

use serde::Deserialize;

/// Width / height ratio the preview aims for.
pub const DEFAULT_ASPECT_RATIO: f64 = 4.0 / 3.0;

/// Largest share of the viewport height the preview may take.
pub const DEFAULT_VIEWPORT_FRACTION: f64 = 0.9;

/// Device-pixel dimensions of a raster target. Both are always >= 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    /// Build a size from fractional layout values, rounding up.
    pub fn from_layout(width: f64, height: f64) -> Self {
        Self {
            width: to_pixels(width),
            height: to_pixels(height),
        }
    }
}

/// Shape constraints for the preview canvas.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct SurfaceGeometry {
    /// Target width / height ratio.
    pub aspect_ratio: f64,
    /// Cap on the height as a fraction of the viewport height.
    pub viewport_fraction: f64,
}

impl Default for SurfaceGeometry {
    fn default() -> Self {
        Self {
            aspect_ratio: DEFAULT_ASPECT_RATIO,
            viewport_fraction: DEFAULT_VIEWPORT_FRACTION,
        }
    }
}

impl SurfaceGeometry {
    /// Fractional `(width, height)` for a container of `container_width`
    /// inside a viewport of `viewport_height`.
    ///
    /// `height = min(width / aspect_ratio, viewport_fraction * viewport_height)`
    pub fn layout_size(&self, container_width: f64, viewport_height: f64) -> (f64, f64) {
        let natural = container_width / self.aspect_ratio;
        let cap = self.viewport_fraction * viewport_height;
        (container_width, natural.min(cap))
    }

    /// Raster dimensions for the canvas, rounded up to whole pixels.
    pub fn fit(&self, container_width: f64, viewport_height: f64) -> SurfaceSize {
        let (width, height) = self.layout_size(container_width, viewport_height);
        SurfaceSize::from_layout(width, height)
    }
}

/// Round a layout length up to a positive pixel count.
///
/// Non-finite and sub-pixel inputs become 1 so the raster target is never
/// empty.
/// The f64→u32 cast is safe: the value is clamped to `1..=u32::MAX` first.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn to_pixels(length: f64) -> u32 {
    if !length.is_finite() || length <= 1.0 {
        return 1;
    }
    length.ceil().min(f64::from(u32::MAX)) as u32
}
