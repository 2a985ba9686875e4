//! Drawing backends for the renderer.
//!
//! [`Surface`] mirrors the handful of 2D-context primitives the renderer
//! needs. Coordinates passed to drawing calls are in the current transform's
//! frame, exactly like a browser canvas: `translate`/`rotate` compose onto the
//! current transform and `save`/`restore` push and pop it.
//!
//! | Backend | Output |
//! |---------|--------|
//! | [`recording::RecordingSurface`] | Display list of resolved draw commands |
//! | [`raster::RasterSurface`] | `tiny-skia` pixmap, PNG encodable |
//! | [`web::WebSurface`] | Browser `CanvasRenderingContext2d` |

pub mod raster;
pub mod recording;
pub mod web;

use crate::doc::Bitmap;
use crate::geom::Point;

/// A rectangle in the current transform's frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x, y, width, height }
    }

    /// A `width` × `height` rectangle centered on the origin.
    #[must_use]
    pub fn centered(width: f64, height: f64) -> Self {
        Self::new(-width / 2.0, -height / 2.0, width, height)
    }
}

/// Stroke parameters for outlines and lines.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StrokeStyle<'a> {
    pub color: &'a str,
    pub width: f64,
    /// Equal on/off dash length, or `None` for a solid stroke.
    pub dash: Option<f64>,
}

impl<'a> StrokeStyle<'a> {
    #[must_use]
    pub fn solid(color: &'a str, width: f64) -> Self {
        Self { color, width, dash: None }
    }

    #[must_use]
    pub fn dashed(color: &'a str, width: f64, dash: f64) -> Self {
        Self { color, width, dash: Some(dash) }
    }
}

/// A 2D drawing target.
pub trait Surface {
    /// Error raised by the underlying drawing API.
    type Error;

    /// Reset the transform and clear `width` × `height` pixels.
    fn clear(&mut self, width: f64, height: f64) -> Result<(), Self::Error>;

    /// Push the current transform.
    fn save(&mut self);

    /// Pop the transform pushed by the matching [`Surface::save`].
    fn restore(&mut self);

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Self::Error>;

    /// Rotate clockwise by `radians`.
    fn rotate(&mut self, radians: f64) -> Result<(), Self::Error>;

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Self::Error>;

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle<'_>) -> Result<(), Self::Error>;

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) -> Result<(), Self::Error>;

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle<'_>) -> Result<(), Self::Error>;

    /// Draw one line of text horizontally centered on `at` with a middle baseline.
    fn fill_text(&mut self, text: &str, at: Point, font: &str, font_size: f64, color: &str) -> Result<(), Self::Error>;

    /// Width of one line of text as this surface would draw it.
    fn text_width(&self, text: &str, font: &str, font_size: f64) -> f64;

    /// Draw `bitmap` scaled into `rect`.
    fn draw_bitmap(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), Self::Error>;
}
