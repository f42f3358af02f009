//! Files handed to the browser for saving.

use crate::error::Result;

/// Content of a file about to be downloaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Payload<B> {
    /// Text that still has to be wrapped in a blob.
    Text(String),
    /// Already-encoded binary data (a `Blob` in the browser).
    Binary(B),
}

/// A finished export waiting to be saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Download<B> {
    pub file_name: String,
    pub mime: &'static str,
    pub payload: Payload<B>,
}

/// Something that can save a `Download` on the user's machine.
pub trait Downloader {
    /// Binary payload type this downloader accepts.
    type Blob;

    /// Start the download. Leaves no DOM or URL artifacts behind.
    fn deliver(&mut self, download: Download<Self::Blob>) -> Result<()>;
}
