//! Two-tone stencil filter and bitmap codecs.
//!
//! The filter maps every pixel to either the target color or white by
//! thresholding its luminance, keeping alpha. Bitmaps are never modified in
//! place: each pass allocates a fresh [`Bitmap`].

#[cfg(test)]
#[path = "filter_test.rs"]
mod filter_test;

use std::io::Cursor;
use std::sync::Arc;

use base64::Engine as _;
use image::{ImageFormat, Rgba, RgbaImage};

use crate::color::{ColorError, Rgb};
use crate::consts::LUMINANCE_THRESHOLD;
use crate::doc::Bitmap;

/// Error returned by the bitmap codecs.
#[derive(Debug, thiserror::Error)]
pub enum ImageError {
    /// The bytes are not a supported image format.
    #[error("failed to decode image: {0}")]
    Decode(#[source] image::ImageError),
    /// The bitmap could not be written as PNG.
    #[error("failed to encode image: {0}")]
    Encode(#[source] image::ImageError),
    /// A `data:` URL without a base64 payload.
    #[error("malformed data url")]
    MalformedDataUrl,
    /// The base64 payload of a data URL is invalid.
    #[error("invalid base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),
    /// The filter target is not a hex color.
    #[error(transparent)]
    Color(#[from] ColorError),
}

/// Classify one pixel: dark pixels take the target color, light pixels turn white.
#[must_use]
pub fn threshold_pixel(px: Rgba<u8>, target: Rgb) -> Rgba<u8> {
    let [r, g, b, a] = px.0;
    let out = if Rgb::new(r, g, b).luminance() < LUMINANCE_THRESHOLD { target } else { Rgb::WHITE };
    Rgba([out.r, out.g, out.b, a])
}

/// Produce a two-tone copy of `src`.
#[must_use]
pub fn stencil(src: &RgbaImage, target: Rgb) -> RgbaImage {
    let mut out = src.clone();
    for px in out.pixels_mut() {
        *px = threshold_pixel(*px, target);
    }
    out
}

/// Filter a shared bitmap toward the hex color `target`.
///
/// # Errors
///
/// Returns [`ImageError::Color`] when `target` is not a hex color.
pub fn apply(src: &Bitmap, target: &str) -> Result<Bitmap, ImageError> {
    let color = Rgb::parse_hex(target)?;
    Ok(Arc::new(stencil(src, color)))
}

/// Decode PNG or JPEG bytes into an RGBA bitmap.
///
/// # Errors
///
/// Returns [`ImageError::Decode`] when the bytes are not a supported image.
pub fn decode(bytes: &[u8]) -> Result<Bitmap, ImageError> {
    let img = image::load_from_memory(bytes).map_err(ImageError::Decode)?;
    Ok(Arc::new(img.to_rgba8()))
}

/// Encode a bitmap as PNG.
///
/// # Errors
///
/// Returns [`ImageError::Encode`] if the encoder fails.
pub fn encode_png(img: &RgbaImage) -> Result<Vec<u8>, ImageError> {
    let mut buf = Vec::new();
    img.write_to(&mut Cursor::new(&mut buf), ImageFormat::Png)
        .map_err(ImageError::Encode)?;
    Ok(buf)
}

/// Encode a bitmap as a `data:image/png;base64,` URL.
///
/// # Errors
///
/// Returns [`ImageError::Encode`] if the encoder fails.
pub fn to_data_url(img: &RgbaImage) -> Result<String, ImageError> {
    let png = encode_png(img)?;
    Ok(format!("data:image/png;base64,{}", base64::engine::general_purpose::STANDARD.encode(png)))
}

/// Whether `src` is an inline `data:` URL rather than a path.
#[must_use]
pub fn is_data_url(src: &str) -> bool {
    src.starts_with("data:")
}

/// Extract the raw bytes of a base64 `data:` URL.
///
/// # Errors
///
/// Returns [`ImageError::MalformedDataUrl`] when the URL has no base64
/// payload, or [`ImageError::Base64`] when the payload does not decode.
pub fn data_url_bytes(src: &str) -> Result<Vec<u8>, ImageError> {
    let rest = src.strip_prefix("data:").ok_or(ImageError::MalformedDataUrl)?;
    let (meta, payload) = rest.split_once(',').ok_or(ImageError::MalformedDataUrl)?;
    if !meta.ends_with(";base64") {
        return Err(ImageError::MalformedDataUrl);
    }
    Ok(base64::engine::general_purpose::STANDARD.decode(payload.trim())?)
}
