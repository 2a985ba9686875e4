//! Software raster backend built on `tiny-skia`.
//!
//! Text glyphs come from an optional TrueType font loaded through `rusttype`.
//! Without one, text is measured with the fixed-advance rule and no glyphs
//! are drawn.

#[cfg(test)]
#[path = "raster_test.rs"]
mod raster_test;

use std::convert::Infallible;

use image::RgbaImage;
use rusttype::{Font, Scale, point as rt_point};
use tiny_skia::{
    Color, FillRule, FilterQuality, Paint, PathBuilder, Pixmap, PixmapPaint, PremultipliedColorU8, Stroke, StrokeDash,
    Transform,
};

use super::{Rect, StrokeStyle, Surface};
use crate::color::Rgb;
use crate::doc::Bitmap;
use crate::geom::Point;
use crate::text::{FixedAdvance, TextMeasure};

/// Error returned when building or exporting a [`RasterSurface`].
#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    /// Width or height is zero or too large for a pixmap.
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
    /// The font bytes are not a TrueType/OpenType font.
    #[error("font data could not be parsed")]
    InvalidFont,
    /// PNG encoding failed.
    #[error("png encoding failed: {0}")]
    Encode(String),
}

/// A pixel surface the renderer can draw onto.
pub struct RasterSurface {
    pixmap: Pixmap,
    transform: Transform,
    stack: Vec<Transform>,
    background: Color,
    font: Option<Font<'static>>,
    warned_missing_font: bool,
}

impl RasterSurface {
    /// Create a transparent `width` × `height` surface.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidSize`] for a zero or oversized area.
    pub fn new(width: u32, height: u32) -> Result<Self, RasterError> {
        let pixmap = Pixmap::new(width, height).ok_or(RasterError::InvalidSize { width, height })?;
        Ok(Self {
            pixmap,
            transform: Transform::identity(),
            stack: Vec::new(),
            background: Color::TRANSPARENT,
            font: None,
            warned_missing_font: false,
        })
    }

    /// Load a TrueType/OpenType font used for every text object.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::InvalidFont`] if the bytes do not parse.
    pub fn with_font(mut self, bytes: Vec<u8>) -> Result<Self, RasterError> {
        self.font = Some(Font::try_from_vec(bytes).ok_or(RasterError::InvalidFont)?);
        Ok(self)
    }

    /// Color used by [`Surface::clear`]. Transparent by default.
    #[must_use]
    pub fn with_background(mut self, color: Rgb) -> Self {
        self.background = Color::from_rgba8(color.r, color.g, color.b, 255);
        self
    }

    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Straight-alpha color of one pixel, or `None` outside the surface.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        let c = self.pixmap.pixel(x, y)?.demultiply();
        Some([c.red(), c.green(), c.blue(), c.alpha()])
    }

    /// Copy the surface out as a straight-alpha RGBA image.
    #[must_use]
    pub fn to_rgba_image(&self) -> RgbaImage {
        let mut out = RgbaImage::new(self.width(), self.height());
        for (dst, src) in out.pixels_mut().zip(self.pixmap.pixels()) {
            let c = src.demultiply();
            dst.0 = [c.red(), c.green(), c.blue(), c.alpha()];
        }
        out
    }

    /// Encode the surface as PNG.
    ///
    /// # Errors
    ///
    /// Returns [`RasterError::Encode`] if the encoder fails.
    pub fn encode_png(&self) -> Result<Vec<u8>, RasterError> {
        crate::filter::encode_png(&self.to_rgba_image()).map_err(|e| RasterError::Encode(e.to_string()))
    }

    fn paint(color: &str) -> Paint<'static> {
        let rgb = Rgb::parse_hex(color).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "unparseable color; drawing black");
            Rgb::BLACK
        });
        let mut paint = Paint::default();
        paint.set_color_rgba8(rgb.r, rgb.g, rgb.b, 255);
        paint.anti_alias = true;
        paint
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke(style: &StrokeStyle<'_>) -> Stroke {
        let width = style.width as f32;
        Stroke {
            width,
            dash: style.dash.and_then(|d| StrokeDash::new(vec![d as f32, d as f32], 0.0)),
            ..Stroke::default()
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn skia_rect(rect: Rect) -> Option<tiny_skia::Rect> {
        tiny_skia::Rect::from_xywh(rect.x as f32, rect.y as f32, rect.width as f32, rect.height as f32)
    }

    /// Rasterize `text` into a coverage pixmap tinted `rgb`, returning it with
    /// the offset of its top-left corner relative to the anchor point.
    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss, clippy::cast_sign_loss)]
    fn rasterize_text(font: &Font<'static>, text: &str, font_size: f64, rgb: Rgb) -> Option<(Pixmap, f32, f32)> {
        let scale = Scale::uniform(font_size as f32);
        let v = font.v_metrics(scale);
        let width = glyph_run_width(font, text, scale);
        // Middle baseline: the em box is centered on the anchor.
        let origin = rt_point(-width / 2.0, (v.ascent + v.descent) / 2.0);
        let glyphs: Vec<_> = font.layout(text, scale, origin).collect();

        let boxes: Vec<_> = glyphs.iter().filter_map(rusttype::PositionedGlyph::pixel_bounding_box).collect();
        let min_x = boxes.iter().map(|b| b.min.x).min()?;
        let min_y = boxes.iter().map(|b| b.min.y).min()?;
        let max_x = boxes.iter().map(|b| b.max.x).max()?;
        let max_y = boxes.iter().map(|b| b.max.y).max()?;
        let mut out = Pixmap::new((max_x - min_x).max(1) as u32, (max_y - min_y).max(1) as u32)?;
        let stride = out.width();

        let pixels = out.pixels_mut();
        for glyph in &glyphs {
            let Some(bb) = glyph.pixel_bounding_box() else {
                continue;
            };
            glyph.draw(|gx, gy, coverage| {
                let px = (bb.min.x - min_x) as u32 + gx;
                let py = (bb.min.y - min_y) as u32 + gy;
                let idx = (py * stride + px) as usize;
                let alpha = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                let premul = |c: u8| ((u16::from(c) * u16::from(alpha) + 127) / 255) as u8;
                if let (Some(slot), Some(color)) = (
                    pixels.get_mut(idx),
                    PremultipliedColorU8::from_rgba(premul(rgb.r), premul(rgb.g), premul(rgb.b), alpha),
                ) {
                    if color.alpha() > slot.alpha() {
                        *slot = color;
                    }
                }
            });
        }
        Some((out, min_x as f32, min_y as f32))
    }
}

fn glyph_run_width(font: &Font<'static>, text: &str, scale: Scale) -> f32 {
    font.layout(text, scale, rt_point(0.0, 0.0))
        .last()
        .map_or(0.0, |g| g.position().x + g.unpositioned().h_metrics().advance_width)
}

/// Convert a straight-alpha bitmap into a premultiplied pixmap.
#[allow(clippy::cast_possible_truncation)]
fn bitmap_pixmap(bitmap: &Bitmap) -> Option<Pixmap> {
    let (w, h) = bitmap.dimensions();
    let mut pm = Pixmap::new(w, h)?;
    for (dst, src) in pm.pixels_mut().iter_mut().zip(bitmap.pixels()) {
        let [r, g, b, a] = src.0;
        let mul = |c: u8| ((u16::from(c) * u16::from(a) + 127) / 255) as u8;
        if let Some(c) = PremultipliedColorU8::from_rgba(mul(r), mul(g), mul(b), a) {
            *dst = c;
        }
    }
    Some(pm)
}

impl Surface for RasterSurface {
    type Error = Infallible;

    fn clear(&mut self, _width: f64, _height: f64) -> Result<(), Infallible> {
        self.transform = Transform::identity();
        self.stack.clear();
        self.pixmap.fill(self.background);
        Ok(())
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    #[allow(clippy::cast_possible_truncation)]
    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.transform = self.transform.pre_translate(x as f32, y as f32);
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn rotate(&mut self, radians: f64) -> Result<(), Infallible> {
        // tiny-skia takes degrees.
        self.transform = self.transform.pre_rotate(radians.to_degrees() as f32);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Infallible> {
        if let Some(r) = Self::skia_rect(rect) {
            self.pixmap.fill_rect(r, &Self::paint(color), self.transform, None);
        }
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle<'_>) -> Result<(), Infallible> {
        if let Some(r) = Self::skia_rect(rect) {
            let path = PathBuilder::from_rect(r);
            self.pixmap
                .stroke_path(&path, &Self::paint(stroke.color), &Self::stroke(stroke), self.transform, None);
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) -> Result<(), Infallible> {
        if let Some(path) = PathBuilder::from_circle(center.x as f32, center.y as f32, radius as f32) {
            self.pixmap
                .fill_path(&path, &Self::paint(color), FillRule::Winding, self.transform, None);
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle<'_>) -> Result<(), Infallible> {
        let mut pb = PathBuilder::new();
        pb.move_to(from.x as f32, from.y as f32);
        pb.line_to(to.x as f32, to.y as f32);
        if let Some(path) = pb.finish() {
            self.pixmap
                .stroke_path(&path, &Self::paint(stroke.color), &Self::stroke(stroke), self.transform, None);
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn fill_text(&mut self, text: &str, at: Point, _font: &str, font_size: f64, color: &str) -> Result<(), Infallible> {
        let Some(font) = self.font.as_ref() else {
            if !self.warned_missing_font {
                tracing::warn!("no font loaded; text objects render without glyphs");
                self.warned_missing_font = true;
            }
            return Ok(());
        };
        let rgb = Rgb::parse_hex(color).unwrap_or(Rgb::BLACK);
        if let Some((glyphs, dx, dy)) = Self::rasterize_text(font, text, font_size, rgb) {
            let transform = self.transform.pre_translate(at.x as f32 + dx, at.y as f32 + dy);
            self.pixmap
                .draw_pixmap(0, 0, glyphs.as_ref(), &PixmapPaint::default(), transform, None);
        }
        Ok(())
    }

    #[allow(clippy::cast_possible_truncation)]
    fn text_width(&self, text: &str, font: &str, font_size: f64) -> f64 {
        match self.font.as_ref() {
            Some(f) => f64::from(glyph_run_width(f, text, Scale::uniform(font_size as f32))),
            None => FixedAdvance.line_width(text, font, font_size),
        }
    }

    #[allow(clippy::cast_possible_truncation, clippy::cast_precision_loss)]
    fn draw_bitmap(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), Infallible> {
        let Some(pm) = bitmap_pixmap(bitmap) else {
            return Ok(());
        };
        let sx = rect.width / f64::from(pm.width());
        let sy = rect.height / f64::from(pm.height());
        let transform = self
            .transform
            .pre_translate(rect.x as f32, rect.y as f32)
            .pre_scale(sx as f32, sy as f32);
        let paint = PixmapPaint { quality: FilterQuality::Bilinear, ..PixmapPaint::default() };
        self.pixmap.draw_pixmap(0, 0, pm.as_ref(), &paint, transform, None);
        Ok(())
    }
}
