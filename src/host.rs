//! Callbacks for document hosts that insert the formula themselves.
//!
//! An embedding document (an editor add-on sidebar, say) disables its
//! insert button, runs a long insertion on its side and later reports back
//! through one of two slots. Either slot re-enables the button; the failure
//! slot also shows the message.

use crate::error::PreviewError;
use crate::render::{report, ErrorIndicator};

/// The control that triggered an insertion.
pub trait InsertControl {
    fn set_disabled(&mut self, disabled: bool);
}

/// Disable `control` while the host works, clearing any stale message.
pub fn begin_insertion<C, I>(control: &mut C, errors: &mut I)
where
    C: InsertControl + ?Sized,
    I: ErrorIndicator + ?Sized,
{
    control.set_disabled(true);
    errors.hide();
}

/// Success slot: the host finished; `token` is whatever it handed back.
pub fn insertion_succeeded<C: InsertControl + ?Sized>(control: &mut C, token: &str) {
    log::info!("insertion finished: {token}");
    control.set_disabled(false);
}

/// Failure slot: show `message` and give the control back.
pub fn insertion_failed<C, I>(control: &mut C, errors: &mut I, message: &str)
where
    C: InsertControl + ?Sized,
    I: ErrorIndicator + ?Sized,
{
    report(errors, &PreviewError::Host(message.to_string()));
    control.set_disabled(false);
}
