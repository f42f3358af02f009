//! DOM event wiring for `MathPreview`.
//!
//! Handlers take the shared state by `Rc` and borrow it only for the
//! synchronous part of their work; the PNG encode runs in a spawned future
//! with the borrow released.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::spawn_local;
use web_sys::{Event, EventTarget};

use super::dom::{dom_error, PngCanvas};
use super::{MathPreview, SharedState};
use crate::error::{js_message, Result};
use crate::export::{Download, Downloader, ExportJob};

/// An event listener that is removed again when dropped.
pub(crate) struct Listener {
    target: EventTarget,
    event: &'static str,
    closure: Closure<dyn FnMut(Event)>,
}

impl Listener {
    pub(crate) fn attach<F>(target: &EventTarget, event: &'static str, handler: F) -> Result<Self>
    where
        F: FnMut(Event) + 'static,
    {
        let closure = Closure::wrap(Box::new(handler) as Box<dyn FnMut(Event)>);
        target
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(dom_error)?;
        Ok(Self {
            target: target.clone(),
            event,
            closure,
        })
    }
}

impl Drop for Listener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.closure.as_ref().unchecked_ref())
        {
            log::debug!("could not detach {} listener: {}", self.event, js_message(&e));
        }
    }
}

impl MathPreview {
    /// `input` on the formula field.
    pub(crate) fn internal_input(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        let formula = s.formula_input.value();
        s.controller.render(&formula);
    }

    /// Container geometry changed.
    pub(crate) fn internal_resize(state: &Rc<RefCell<SharedState>>) {
        let mut s = state.borrow_mut();
        let formula = s.formula_input.value();
        s.controller.resize(&formula);
    }

    /// `change` on any settings control.
    pub(crate) fn internal_settings_change(state: &Rc<RefCell<SharedState>>) {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        if let Some(form) = s.settings_form.as_mut() {
            s.controller.sync_settings(form);
        }
    }

    /// Save button: export the current formula in the selected format.
    pub(crate) fn internal_export(state: &Rc<RefCell<SharedState>>, format: &str) {
        let job = {
            let mut s = state.borrow_mut();
            let formula = s.formula_input.value();
            s.controller.export(&formula, format, PngCanvas::new)
        };
        match job {
            None => {}
            Some(ExportJob::Ready(download)) => Self::internal_deliver(state, download),
            Some(ExportJob::Encode(pending)) => {
                let state = Rc::clone(state);
                spawn_local(async move {
                    match pending.finish().await {
                        Ok(download) => Self::internal_deliver(&state, download),
                        Err(e) => state.borrow_mut().controller.report(&e),
                    }
                });
            }
        }
    }

    fn internal_deliver(state: &Rc<RefCell<SharedState>>, download: Download<web_sys::Blob>) {
        let mut guard = state.borrow_mut();
        let s = &mut *guard;
        if let Err(e) = s.downloader.deliver(download) {
            s.controller.report(&e);
        }
    }
}
