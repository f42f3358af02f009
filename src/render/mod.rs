//! Live rendering onto the preview canvas.
//!
//! This module provides:
//! - The Clean/Degraded renderer with last-known-good fallback
//! - The error display seam shared with export and settings

mod resilient;
mod status;

pub use resilient::{RenderOutcome, RenderState, ResilientRenderer};
pub use status::{report, ErrorIndicator};
