//! Client-side file downloads.
//!
//! A download is a one-shot object URL clicked through a transient anchor.
//! The anchor and the URL are both gone by the time `deliver` returns.

use wasm_bindgen::prelude::*;
use web_sys::{Blob, BlobPropertyBag, Document, HtmlAnchorElement, Url};

use super::dom::dom_error;
use crate::error::{js_message, PreviewError, Result};
use crate::export::{Download, Downloader, Payload};

pub(crate) struct BrowserDownloader {
    document: Document,
}

impl BrowserDownloader {
    pub(crate) fn new(document: Document) -> Self {
        Self { document }
    }

    fn click_link(&self, url: &str, file_name: &str) -> Result<()> {
        let body = self
            .document
            .body()
            .ok_or_else(|| PreviewError::Dom("document has no body".into()))?;
        let link = self
            .document
            .create_element("a")
            .map_err(dom_error)?
            .dyn_into::<HtmlAnchorElement>()
            .map_err(|_| PreviewError::Dom("<a> is not an anchor element".into()))?;
        link.set_href(url);
        link.set_download(file_name);

        body.append_child(&link).map_err(dom_error)?;
        link.click();
        body.remove_child(&link).map_err(dom_error)?;
        Ok(())
    }
}

/// Wrap `text` in a blob of type `mime`.
fn text_blob(text: &str, mime: &str) -> Result<Blob> {
    let parts = js_sys::Array::of1(&JsValue::from_str(text));
    let options = BlobPropertyBag::new();
    options.set_type(mime);
    Blob::new_with_str_sequence_and_options(&parts, &options).map_err(dom_error)
}

impl Downloader for BrowserDownloader {
    type Blob = Blob;

    fn deliver(&mut self, download: Download<Blob>) -> Result<()> {
        let blob = match download.payload {
            Payload::Binary(blob) => blob,
            Payload::Text(text) => text_blob(&text, download.mime)?,
        };
        let url = Url::create_object_url_with_blob(&blob).map_err(dom_error)?;
        let clicked = self.click_link(&url, &download.file_name);
        // Revoke even when the click failed.
        if let Err(e) = Url::revoke_object_url(&url) {
            log::debug!("could not revoke {url}: {}", js_message(&e));
        }
        if clicked.is_ok() {
            log::info!("downloaded {}", download.file_name);
        }
        clicked
    }
}
