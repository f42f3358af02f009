//! Fail-soft live rendering.
//!
//! Every render attempt either shows the current formula or falls back to
//! the last formula that rendered, so the canvas is never left blank or
//! half-drawn after a typo.

use super::status::{report, ErrorIndicator};
use crate::engine::RenderEngine;
use crate::error::PreviewError;

/// Whether the canvas currently shows the formula that was asked for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RenderState {
    /// The current formula rendered.
    #[default]
    Clean,
    /// The current formula failed; the canvas shows the last good one.
    Degraded,
}

/// Result of a single render attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderOutcome {
    /// The requested formula is on screen.
    Rendered,
    /// The requested formula failed and `restored` was drawn instead.
    FellBack {
        error: PreviewError,
        restored: String,
    },
}

/// Clean/Degraded state machine over the engine's canvas renderer.
#[derive(Debug, Clone, Default)]
pub struct ResilientRenderer {
    last_good: String,
    state: RenderState,
}

impl ResilientRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Render `formula`, falling back to the last good formula on failure.
    ///
    /// Errors never escape: a failure is shown on `errors` and the previous
    /// image is redrawn.
    pub fn render<E, I>(
        &mut self,
        engine: &E,
        formula: &str,
        target: &mut E::Target,
        errors: &mut I,
    ) -> RenderOutcome
    where
        E: RenderEngine,
        I: ErrorIndicator + ?Sized,
    {
        match engine.render_to_canvas(formula, target) {
            Ok(()) => {
                errors.hide();
                self.state = RenderState::Clean;
                formula.clone_into(&mut self.last_good);
                RenderOutcome::Rendered
            }
            Err(error) => {
                self.state = RenderState::Degraded;
                report(errors, &error);
                // last_good rendered before, so this is expected to succeed.
                if let Err(fallback) = engine.render_to_canvas(&self.last_good, target) {
                    log::error!(
                        "fallback render of {:?} failed: {fallback}",
                        self.last_good
                    );
                }
                RenderOutcome::FellBack {
                    error,
                    restored: self.last_good.clone(),
                }
            }
        }
    }

    /// Most recent formula that rendered without error.
    pub fn last_good(&self) -> &str {
        &self.last_good
    }

    pub fn state(&self) -> RenderState {
        self.state
    }
}
