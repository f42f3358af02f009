//! `web-sys` implementations of the controller's seams.

use wasm_bindgen::prelude::*;
use web_sys::{
    Blob, CanvasRenderingContext2d, Document, Element, HtmlButtonElement, HtmlCanvasElement,
    HtmlFormControlsCollection, HtmlFormElement, HtmlInputElement, HtmlSelectElement,
    HtmlTextAreaElement, ImageEncodeOptions, OffscreenCanvas, OffscreenCanvasRenderingContext2d,
    RadioNodeList, Window,
};

use crate::error::{js_message, PreviewError, Result};
use crate::export::OffscreenSurface;
use crate::host::InsertControl;
use crate::layout::{CanvasHost, SurfaceSize};
use crate::render::ErrorIndicator;
use crate::settings::{ControlKind, SettingsForm};

/// CSS class that hides the error bar.
const INVISIBLE: &str = "invisible";

pub(crate) fn dom_error(value: JsValue) -> PreviewError {
    PreviewError::Dom(js_message(&value))
}

/// Look up `id` and cast it to `T`.
pub(crate) fn element_by_id<T: JsCast>(document: &Document, id: &str) -> Result<T> {
    document
        .get_element_by_id(id)
        .ok_or_else(|| PreviewError::Dom(format!("no element with id {id:?}")))?
        .dyn_into::<T>()
        .map_err(|_| PreviewError::Dom(format!("element {id:?} has an unexpected type")))
}

/// Like `element_by_id`, for elements the page may leave out.
pub(crate) fn optional_element<T: JsCast>(document: &Document, id: &str) -> Option<T> {
    match element_by_id(document, id) {
        Ok(element) => Some(element),
        Err(e) => {
            log::debug!("{e}; feature disabled");
            None
        }
    }
}

/// The on-screen canvas and its 2D context.
pub(crate) struct CanvasSurface {
    window: Window,
    canvas: HtmlCanvasElement,
    context: CanvasRenderingContext2d,
}

impl CanvasSurface {
    pub(crate) fn new(window: Window, canvas: HtmlCanvasElement) -> Result<Self> {
        let context = canvas
            .get_context("2d")
            .map_err(dom_error)?
            .ok_or_else(|| PreviewError::Dom("canvas has no 2d context".into()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|context| dom_error(context.into()))?;
        Ok(Self {
            window,
            canvas,
            context,
        })
    }

    pub(crate) fn element(&self) -> &HtmlCanvasElement {
        &self.canvas
    }
}

impl CanvasHost for CanvasSurface {
    type Target = CanvasRenderingContext2d;

    fn container_width(&self) -> f64 {
        f64::from(self.canvas.client_width())
    }

    fn viewport_height(&self) -> f64 {
        match self.window.inner_height().map(|value| value.as_f64()) {
            Ok(Some(height)) => height,
            Ok(None) => {
                log::warn!("window.innerHeight is not a number");
                0.0
            }
            Err(e) => {
                log::warn!("window.innerHeight failed: {}", js_message(&e));
                0.0
            }
        }
    }

    fn set_surface_size(&mut self, size: SurfaceSize) {
        self.canvas.set_width(size.width);
        self.canvas.set_height(size.height);
    }

    fn target(&mut self) -> &mut CanvasRenderingContext2d {
        &mut self.context
    }
}

/// The error `<div>`, hidden with the `invisible` class.
pub(crate) struct ErrorBar(Element);

impl ErrorBar {
    pub(crate) fn new(element: Element) -> Self {
        Self(element)
    }
}

impl ErrorIndicator for ErrorBar {
    fn show(&mut self, message: &str) {
        self.0.set_text_content(Some(message));
        if let Err(e) = self.0.class_list().remove_1(INVISIBLE) {
            log::debug!("could not show error bar: {}", js_message(&e));
        }
    }

    fn hide(&mut self) {
        if let Err(e) = self.0.class_list().add_1(INVISIBLE) {
            log::debug!("could not hide error bar: {}", js_message(&e));
        }
    }
}

/// The settings `<form>`.
pub(crate) struct HtmlSettingsForm(HtmlFormElement);

impl HtmlSettingsForm {
    pub(crate) fn new(form: HtmlFormElement) -> Self {
        Self(form)
    }

    pub(crate) fn element(&self) -> &HtmlFormElement {
        &self.0
    }

    fn named(&self, name: &str) -> Option<js_sys::Object> {
        self.0
            .elements()
            .unchecked_into::<HtmlFormControlsCollection>()
            .named_item(name)
    }

    fn input(&self, name: &str) -> Option<HtmlInputElement> {
        self.named(name)?.dyn_into::<HtmlInputElement>().ok()
    }

    fn radios(&self, name: &str) -> Vec<HtmlInputElement> {
        let Some(item) = self.named(name) else {
            return Vec::new();
        };
        if let Some(list) = item.dyn_ref::<RadioNodeList>() {
            return (0..list.length())
                .filter_map(|i| list.item(i))
                .filter_map(|node| node.dyn_into::<HtmlInputElement>().ok())
                .collect();
        }
        item.dyn_into::<HtmlInputElement>().into_iter().collect()
    }
}

impl SettingsForm for HtmlSettingsForm {
    fn entry(&self, name: &str) -> Option<String> {
        web_sys::FormData::new_with_form(&self.0)
            .ok()?
            .get(name)
            .as_string()
    }

    fn control_kind(&self, name: &str) -> Option<ControlKind> {
        let item = self.named(name)?;
        let input = match item.dyn_ref::<RadioNodeList>() {
            Some(list) => list.item(0).and_then(|n| n.dyn_into::<HtmlInputElement>().ok()),
            None => item.dyn_into::<HtmlInputElement>().ok(),
        };
        let kind = match input.map(|i| i.type_()).as_deref() {
            Some("checkbox") => ControlKind::Checkbox,
            Some("radio") => ControlKind::RadioGroup,
            _ => ControlKind::Value,
        };
        Some(kind)
    }

    fn set_checked(&mut self, name: &str, checked: bool) {
        if let Some(input) = self.input(name) {
            input.set_checked(checked);
        }
    }

    fn select_radio(&mut self, name: &str, value: &str) -> bool {
        match self.radios(name).into_iter().find(|r| r.value() == value) {
            Some(radio) => {
                radio.set_checked(true);
                true
            }
            None => false,
        }
    }

    fn set_value(&mut self, name: &str, value: &str) {
        let Some(item) = self.named(name) else {
            return;
        };
        if let Some(input) = item.dyn_ref::<HtmlInputElement>() {
            input.set_value(value);
        } else if let Some(select) = item.dyn_ref::<HtmlSelectElement>() {
            select.set_value(value);
        } else if let Some(area) = item.dyn_ref::<HtmlTextAreaElement>() {
            area.set_value(value);
        } else {
            if let Err(e) = js_sys::Reflect::set(&item, &"value".into(), &value.into()) {
                log::debug!("could not set {name}: {}", js_message(&e));
            }
        }
    }
}

/// `OffscreenCanvas` used for PNG export.
#[derive(Clone)]
pub(crate) struct PngCanvas(OffscreenCanvas);

impl PngCanvas {
    /// A 1x1 canvas; the engine resizes it once it knows the formula size.
    pub(crate) fn new() -> Result<Self> {
        OffscreenCanvas::new(1, 1).map(Self).map_err(dom_error)
    }
}

impl OffscreenSurface for PngCanvas {
    type Draw = OffscreenCanvasRenderingContext2d;
    type Encoded = Blob;

    fn resize(&self, size: SurfaceSize) -> Result<Self::Draw> {
        self.0.set_width(size.width);
        self.0.set_height(size.height);
        self.0
            .get_context("2d")
            .map_err(dom_error)?
            .ok_or_else(|| PreviewError::Dom("offscreen canvas has no 2d context".into()))?
            .dyn_into::<OffscreenCanvasRenderingContext2d>()
            .map_err(|context| dom_error(context.into()))
    }

    async fn encode_png(&self) -> Result<Blob> {
        let encoding = |e: JsValue| PreviewError::ExportEncoding(js_message(&e));
        let options = ImageEncodeOptions::new();
        options.set_type("image/png");
        let promise = self
            .0
            .convert_to_blob_with_options(&options)
            .map_err(encoding)?;
        wasm_bindgen_futures::JsFuture::from(promise)
            .await
            .map_err(encoding)?
            .dyn_into::<Blob>()
            .map_err(encoding)
    }
}

impl InsertControl for HtmlButtonElement {
    fn set_disabled(&mut self, disabled: bool) {
        HtmlButtonElement::set_disabled(self, disabled);
    }
}
