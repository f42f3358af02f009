//! The on-page error display shared by every pipeline.

use crate::error::PreviewError;

/// A visible, non-blocking message area.
pub trait ErrorIndicator {
    /// Make the indicator visible with `message` as its only content.
    fn show(&mut self, message: &str);

    /// Hide the indicator. Its text may stay behind, invisible.
    fn hide(&mut self);
}

/// Log `error` and put it on screen.
pub fn report<I: ErrorIndicator + ?Sized>(indicator: &mut I, error: &PreviewError) {
    log::warn!("{error}");
    indicator.show(&error.to_string());
}
