//! Canvas sizing tests
//!
//! Tests for fitting the canvas to its container and redrawing after a
//! resize.

#![allow(
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::indexing_slicing,
    clippy::float_cmp,
    clippy::panic
)]

mod common;

use common::{controller, controller_with_host, FakeHost};
use mathview::layout::{CanvasManager, SurfaceGeometry, SurfaceSize};
use mathview::render::{RenderOutcome, RenderState};
use test_case::test_case;

// =============================================================================
// SIZE COMPUTATION
// =============================================================================

#[test_case(1600.0, 800.0, 1600, 720 ; "wide container capped by viewport")]
#[test_case(800.0, 1000.0, 800, 600 ; "tall viewport keeps aspect ratio")]
#[test_case(451.0, 2000.0, 451, 339 ; "fractional height rounds up")]
#[test_case(1000.5, 400.0, 1001, 360 ; "fractional width rounds up")]
#[test_case(300.0, 100.0, 300, 90 ; "short viewport")]
#[test_case(0.0, 0.0, 1, 1 ; "collapsed container stays drawable")]
fn test_canvas_fits_container(width: f64, viewport: f64, expected_w: u32, expected_h: u32) {
    let mut preview = controller_with_host(FakeHost::new(width, viewport));
    let (size, _) = preview.resize("");

    assert_eq!(size, SurfaceSize { width: expected_w, height: expected_h });
    assert_eq!(preview.canvas().surface.size, Some(size));
    assert_eq!(preview.canvas_size(), Some(size));
}

#[test]
fn test_custom_geometry() {
    let geometry = SurfaceGeometry {
        aspect_ratio: 2.0,
        viewport_fraction: 0.5,
    };
    let mut host = FakeHost::new(1000.0, 2000.0);
    let mut manager = CanvasManager::new(geometry);

    assert_eq!(manager.resize(&mut host), SurfaceSize { width: 1000, height: 500 });

    host.viewport_height = 600.0;
    assert_eq!(manager.resize(&mut host), SurfaceSize { width: 1000, height: 300 });
}

// =============================================================================
// RESIZE BEHAVIOUR
// =============================================================================

#[test]
fn test_resize_is_idempotent() {
    let mut preview = controller();
    preview.start("x^2");

    let (first, _) = preview.resize("x^2");
    let after_first = preview.canvas().surface.clone();
    let (second, _) = preview.resize("x^2");

    assert_eq!(first, second);
    assert_eq!(preview.canvas().surface, after_first);
    assert_eq!(preview.canvas().surface.drawn.as_deref(), Some("x^2"));
}

#[test]
fn test_resize_redraws_wiped_canvas() {
    let mut preview = controller();
    preview.start("a+b");
    let renders = preview.engine().canvas_renders.get();

    let outcome = preview.resize("a+b").1;

    assert_eq!(outcome, RenderOutcome::Rendered);
    assert_eq!(preview.engine().canvas_renders.get(), renders + 1);
    assert_eq!(preview.canvas().surface.drawn.as_deref(), Some("a+b"));
}

#[test]
fn test_resize_while_degraded_retries_current_formula() {
    let mut preview = controller();
    preview.start("x");
    preview.render("x_{");
    assert_eq!(preview.render_state(), RenderState::Degraded);

    let (_, outcome) = preview.resize("x_{");

    // Still broken, so the last good formula is drawn on the new canvas.
    assert!(matches!(outcome, RenderOutcome::FellBack { ref restored, .. } if restored == "x"));
    assert_eq!(preview.canvas().surface.drawn.as_deref(), Some("x"));
    assert!(preview.errors().visible);
    assert_eq!(preview.render_state(), RenderState::Degraded);
}

#[test]
fn test_resize_recovers_when_formula_now_renders() {
    let mut preview = controller();
    preview.start("x");
    preview.render("x_{");

    let (_, outcome) = preview.resize("x_{1}");

    assert_eq!(outcome, RenderOutcome::Rendered);
    assert_eq!(preview.render_state(), RenderState::Clean);
    assert_eq!(preview.last_good(), "x_{1}");
    assert!(!preview.errors().visible);
}
