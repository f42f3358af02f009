//! `MathPreview` - the browser entry point.
//!
//! This module provides the WASM-exported `MathPreview` struct that:
//! - Loads the formula engine and looks up the page elements
//! - Keeps the canvas sized to its container (ResizeObserver)
//! - Re-renders on every keystroke with last-known-good fallback
//! - Exports SVG/PNG from the save button
//! - Keeps the settings form and the engine settings in sync
//!
//! All handlers are registered on construction and removed when the
//! preview is freed - no manual JavaScript wiring required.

mod dom;
mod download;
mod events;

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::{
    Event, HtmlButtonElement, HtmlDialogElement, HtmlElement, HtmlFormElement, HtmlInputElement,
    HtmlSelectElement, ResizeObserver,
};

use crate::config::PreviewConfig;
use crate::controller::Controller;
use crate::engine::JsEngine;
use crate::error::{PreviewError, Result};
use crate::host;
use crate::render::ErrorIndicator;

use dom::{dom_error, element_by_id, optional_element, CanvasSurface, ErrorBar, HtmlSettingsForm};
use download::BrowserDownloader;
use events::Listener;

#[cfg(test)]
wasm_bindgen_test::wasm_bindgen_test_configure!(run_in_browser);

pub(crate) type PageController = Controller<JsEngine, CanvasSurface, ErrorBar>;

/// State reachable from every event handler.
pub(crate) struct SharedState {
    pub(crate) controller: PageController,
    pub(crate) formula_input: HtmlInputElement,
    pub(crate) settings_form: Option<HtmlSettingsForm>,
    pub(crate) downloader: BrowserDownloader,
}

/// The live preview controller exported to JavaScript.
#[wasm_bindgen]
pub struct MathPreview {
    state: Rc<RefCell<SharedState>>,
    #[allow(dead_code)] // Dropping a listener detaches it
    listeners: Vec<Listener>,
    resize_observer: ResizeObserver,
    #[allow(dead_code)] // Kept alive for the observer
    resize_closure: Closure<dyn FnMut(js_sys::Array)>,
}

#[wasm_bindgen]
impl MathPreview {
    /// Load the engine, wire up the page and draw the initial formula.
    ///
    /// `config` is an optional plain object; see `PreviewConfig`.
    ///
    /// # Errors
    /// Fails if the engine cannot be loaded or a required element is
    /// missing. The page is unusable in that case.
    pub async fn start(config: JsValue) -> std::result::Result<MathPreview, JsValue> {
        console_error_panic_hook::set_once();
        let config = PreviewConfig::from_js(config)?;
        // A second preview on the same page keeps the first logger.
        let _ = console_log::init_with_level(config.log_level());

        Ok(Self::build(&config).await?)
    }

    /// Re-render the current formula.
    #[wasm_bindgen]
    pub fn render(&self) {
        Self::internal_input(&self.state);
    }

    /// Re-measure the container, resize the canvas and re-render.
    #[wasm_bindgen]
    pub fn resize(&self) {
        Self::internal_resize(&self.state);
    }

    /// Export the current formula as `format` (`"svg"` or `"png"`).
    #[wasm_bindgen]
    pub fn export(&self, format: &str) {
        Self::internal_export(&self.state, format);
    }

    /// Most recent formula that rendered without error.
    #[wasm_bindgen(getter)]
    pub fn last_good(&self) -> String {
        self.state.borrow().controller.last_good().to_string()
    }

    /// Current canvas size as `[width, height]` in device pixels.
    #[wasm_bindgen(getter)]
    pub fn canvas_size(&self) -> Vec<u32> {
        self.state
            .borrow()
            .controller
            .canvas_size()
            .map(|size| vec![size.width, size.height])
            .unwrap_or_default()
    }

    /// Disable `control` while the host document inserts the formula.
    #[wasm_bindgen]
    pub fn insertion_started(&self, control: HtmlButtonElement) {
        let mut control = control;
        host::begin_insertion(&mut control, self.state.borrow_mut().controller.errors_mut());
    }

    /// Host success slot.
    #[wasm_bindgen]
    pub fn insertion_succeeded(&self, token: JsValue, control: HtmlButtonElement) {
        let mut control = control;
        let token = token.as_string().unwrap_or_else(|| format!("{token:?}"));
        host::insertion_succeeded(&mut control, &token);
    }

    /// Host failure slot.
    #[wasm_bindgen]
    pub fn insertion_failed(&self, message: JsValue, control: HtmlButtonElement) {
        let mut control = control;
        let message = crate::error::js_message(&message);
        host::insertion_failed(
            &mut control,
            self.state.borrow_mut().controller.errors_mut(),
            &message,
        );
    }
}

impl MathPreview {
    async fn build(config: &PreviewConfig) -> Result<MathPreview> {
        let ids = &config.elements;
        let window = web_sys::window().ok_or_else(|| PreviewError::Dom("no window".into()))?;
        let document = window
            .document()
            .ok_or_else(|| PreviewError::Dom("no document".into()))?;

        let mut error_bar = ErrorBar::new(element_by_id(&document, &ids.error)?);
        let canvas = CanvasSurface::new(window.clone(), element_by_id(&document, &ids.canvas)?)?;
        let formula_input: HtmlInputElement = element_by_id(&document, &ids.formula)?;
        let save_button: HtmlElement = element_by_id(&document, &ids.save)?;
        let format_picker: HtmlSelectElement = element_by_id(&document, &ids.save_format)?;
        let settings_form: Option<HtmlFormElement> = optional_element(&document, &ids.settings_form);

        error_bar.show("Loading math font ...");
        let engine = match JsEngine::load().await {
            Ok(engine) => engine,
            Err(e) => {
                error_bar.show(&e.to_string());
                return Err(e);
            }
        };

        let observed = canvas.element().clone();
        let mut controller = Controller::new(
            engine,
            canvas,
            error_bar,
            config.geometry,
            &config.file_stem,
        );
        // Sizes the canvas before the first render.
        controller.start(&formula_input.value());

        let mut settings_form = settings_form.map(HtmlSettingsForm::new);
        if let Some(form) = settings_form.as_mut() {
            controller.pull_settings(form);
        }
        let settings_target = settings_form.as_ref().map(|f| f.element().clone());

        let state = Rc::new(RefCell::new(SharedState {
            controller,
            formula_input: formula_input.clone(),
            settings_form,
            downloader: BrowserDownloader::new(document.clone()),
        }));

        let mut listeners = Vec::new();
        {
            let state = Rc::clone(&state);
            listeners.push(Listener::attach(&formula_input, "input", move |_: Event| {
                Self::internal_input(&state);
            })?);
        }
        {
            let state = Rc::clone(&state);
            listeners.push(Listener::attach(&save_button, "click", move |_: Event| {
                Self::internal_export(&state, &format_picker.value());
            })?);
        }
        if let Some(form) = settings_target {
            let state = Rc::clone(&state);
            listeners.push(Listener::attach(&form, "change", move |_: Event| {
                Self::internal_settings_change(&state);
            })?);
        }
        listeners.extend(Self::attach_dialog(&document, config)?);

        let resize_closure = {
            let state = Rc::clone(&state);
            Closure::wrap(Box::new(move |_entries: js_sys::Array| {
                Self::internal_resize(&state);
            }) as Box<dyn FnMut(js_sys::Array)>)
        };
        let resize_observer =
            ResizeObserver::new(resize_closure.as_ref().unchecked_ref()).map_err(dom_error)?;
        resize_observer.observe(&observed);

        Ok(MathPreview {
            state,
            listeners,
            resize_observer,
            resize_closure,
        })
    }

    /// Open/close handlers for the export options dialog, when present.
    fn attach_dialog(
        document: &web_sys::Document,
        config: &PreviewConfig,
    ) -> Result<Vec<Listener>> {
        let ids = &config.elements;
        let Some(dialog) = optional_element::<HtmlDialogElement>(document, &ids.export_options_dialog)
        else {
            return Ok(Vec::new());
        };
        let mut listeners = Vec::new();
        if let Some(link) = optional_element::<HtmlElement>(document, &ids.export_options_link) {
            let dialog = dialog.clone();
            listeners.push(Listener::attach(&link, "click", move |_: Event| dialog.show())?);
        }
        if let Some(close) = optional_element::<HtmlElement>(document, &ids.close_dialog) {
            listeners.push(Listener::attach(&close, "click", move |_: Event| dialog.close())?);
        }
        Ok(listeners)
    }
}

impl Drop for MathPreview {
    fn drop(&mut self) {
        self.resize_observer.disconnect();
    }
}
