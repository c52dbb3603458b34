//! Image fetching, measurement, and scaling
//!
//! Images are fetched over HTTP with a fixed timeout, measured from
//! their encoded header bytes, and scaled to a fixed render width
//! while preserving the intrinsic aspect ratio. Every failure path
//! collapses to `None`; the assembler substitutes placeholder text and
//! the document conversion carries on.

use std::time::Duration;

use markdown::mdast::Image as MdImage;
use md2docx_model::{Alignment, ImageBlock};
use reqwest::blocking::Client;
use thiserror::Error;

/// Fixed render width for embedded images, in twips
pub const RENDER_WIDTH: u32 = 600;

/// Fetch timeout; a slow server fails the image, not the document
pub const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors on the image fetch/decode boundary.
///
/// These never escape the engine: `process_image` logs them and
/// returns `None`.
#[derive(Debug, Error)]
pub enum ImageError {
    /// HTTP transport error, including timeouts
    #[error("fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// Server answered with a non-success status
    #[error("server returned status {0}")]
    Status(u16),

    /// The bytes did not decode to a known image format
    #[error("could not read image dimensions: {0}")]
    Dimensions(String),
}

/// Source of raw image bytes for a URL.
///
/// The conversion engine only ever talks to this trait; the HTTP
/// implementation lives behind it so tests can substitute fixed bytes.
pub trait ImageSource {
    /// Fetch the resource at `url`, returning its raw bytes
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageError>;
}

/// HTTP-backed image source with a fixed request timeout
#[derive(Debug, Clone)]
pub struct HttpImageSource {
    client: Client,
}

impl Default for HttpImageSource {
    fn default() -> Self {
        Self::new()
    }
}

impl HttpImageSource {
    /// Create a source with the default 30 second timeout
    pub fn new() -> Self {
        Self::with_timeout(FETCH_TIMEOUT)
    }

    /// Create a source with a custom timeout
    pub fn with_timeout(timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .expect("Failed to create HTTP client");
        Self { client }
    }
}

impl ImageSource for HttpImageSource {
    fn fetch(&self, url: &str) -> Result<Vec<u8>, ImageError> {
        let response = self.client.get(url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(ImageError::Status(status.as_u16()));
        }
        Ok(response.bytes()?.to_vec())
    }
}

/// Fetch, measure, and scale an image node into an embeddable block.
///
/// Returns `None` on any failure: empty URL, fetch error or timeout,
/// or undecodable dimensions.
pub fn process_image<S: ImageSource + ?Sized>(
    source: &S,
    image: &MdImage,
    render_width: u32,
) -> Option<ImageBlock> {
    if image.url.is_empty() {
        return None;
    }

    let data = match source.fetch(&image.url) {
        Ok(data) => data,
        Err(err) => {
            log::warn!("Failed to fetch image {}: {}", image.url, err);
            return None;
        }
    };

    let (px_width, px_height) = match decode_dimensions(&data) {
        Ok(dims) => dims,
        Err(err) => {
            log::warn!("Failed to measure image {}: {}", image.url, err);
            return None;
        }
    };
    log::debug!(
        "Fetched image {} ({} bytes, {}x{} px)",
        image.url,
        data.len(),
        px_width,
        px_height
    );

    let (width, height) = scaled_dimensions(px_width, px_height, render_width);
    Some(ImageBlock {
        data,
        px_width,
        px_height,
        width,
        height,
        alignment: Alignment::Center,
    })
}

/// Read intrinsic pixel dimensions from encoded image bytes
pub fn decode_dimensions(data: &[u8]) -> Result<(u32, u32), ImageError> {
    let size =
        imagesize::blob_size(data).map_err(|err| ImageError::Dimensions(err.to_string()))?;
    if size.width == 0 || size.height == 0 {
        return Err(ImageError::Dimensions("zero-sized image".to_string()));
    }
    Ok((size.width as u32, size.height as u32))
}

/// Scale to the fixed render width, preserving aspect ratio
pub fn scaled_dimensions(px_width: u32, px_height: u32, render_width: u32) -> (u32, u32) {
    let aspect = px_width as f64 / px_height as f64;
    let height = (render_width as f64 / aspect).round() as u32;
    (render_width, height)
}
