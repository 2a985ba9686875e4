//! Display-list backend: records every draw call with its transform resolved.

#[cfg(test)]
#[path = "recording_test.rs"]
mod recording_test;

use std::convert::Infallible;

use super::{Rect, StrokeStyle, Surface};
use crate::doc::Bitmap;
use crate::geom::Point;
use crate::text::{FixedAdvance, TextMeasure};

/// A 2D affine transform `[a c e; b d f; 0 0 1]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine {
    pub a: f64,
    pub b: f64,
    pub c: f64,
    pub d: f64,
    pub e: f64,
    pub f: f64,
}

impl Affine {
    pub const IDENTITY: Affine = Affine { a: 1.0, b: 0.0, c: 0.0, d: 1.0, e: 0.0, f: 0.0 };

    /// Compose a translation applied before this transform.
    #[must_use]
    pub fn pre_translate(self, x: f64, y: f64) -> Self {
        Self { e: self.a * x + self.c * y + self.e, f: self.b * x + self.d * y + self.f, ..self }
    }

    /// Compose a rotation applied before this transform.
    #[must_use]
    pub fn pre_rotate(self, radians: f64) -> Self {
        let (sin, cos) = radians.sin_cos();
        Self {
            a: self.a * cos + self.c * sin,
            b: self.b * cos + self.d * sin,
            c: self.c * cos - self.a * sin,
            d: self.d * cos - self.b * sin,
            ..self
        }
    }

    /// Map a point into canvas space.
    #[must_use]
    pub fn apply(&self, p: Point) -> Point {
        Point::new(self.a * p.x + self.c * p.y + self.e, self.b * p.x + self.d * p.y + self.f)
    }

    /// Rotation angle of the transform in degrees, in `(-180, 180]`.
    #[cfg(test)]
    #[must_use]
    pub fn rotation_degrees(&self) -> f64 {
        self.b.atan2(self.a).to_degrees()
    }
}

impl Default for Affine {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// One recorded draw call. Geometry is in the local frame given by `transform`.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear { width: f64, height: f64 },
    FillRect { rect: Rect, color: String, transform: Affine },
    StrokeRect { rect: Rect, color: String, width: f64, dash: Option<f64>, transform: Affine },
    FillCircle { center: Point, radius: f64, color: String, transform: Affine },
    StrokeLine { from: Point, to: Point, color: String, width: f64, transform: Affine },
    FillText { text: String, at: Point, font: String, font_size: f64, color: String, transform: Affine },
    DrawBitmap { rect: Rect, size: (u32, u32), transform: Affine },
}

impl DrawCommand {
    /// The transform the command was drawn with.
    #[must_use]
    pub fn transform(&self) -> Affine {
        match self {
            Self::Clear { .. } => Affine::IDENTITY,
            Self::FillRect { transform, .. }
            | Self::StrokeRect { transform, .. }
            | Self::FillCircle { transform, .. }
            | Self::StrokeLine { transform, .. }
            | Self::FillText { transform, .. }
            | Self::DrawBitmap { transform, .. } => *transform,
        }
    }
}

/// Surface that records commands instead of producing pixels.
///
/// Text is measured with [`FixedAdvance`], so layouts are reproducible.
#[derive(Debug, Clone, Default)]
pub struct RecordingSurface {
    commands: Vec<DrawCommand>,
    transform: Affine,
    stack: Vec<Affine>,
}

impl RecordingSurface {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything drawn so far, in call order.
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Consume the surface, returning the display list.
    #[must_use]
    pub fn into_commands(self) -> Vec<DrawCommand> {
        self.commands
    }

    fn push(&mut self, cmd: DrawCommand) -> Result<(), Infallible> {
        self.commands.push(cmd);
        Ok(())
    }
}

impl Surface for RecordingSurface {
    type Error = Infallible;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), Infallible> {
        self.transform = Affine::IDENTITY;
        self.stack.clear();
        self.push(DrawCommand::Clear { width, height })
    }

    fn save(&mut self) {
        self.stack.push(self.transform);
    }

    fn restore(&mut self) {
        if let Some(t) = self.stack.pop() {
            self.transform = t;
        }
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), Infallible> {
        self.transform = self.transform.pre_translate(x, y);
        Ok(())
    }

    fn rotate(&mut self, radians: f64) -> Result<(), Infallible> {
        self.transform = self.transform.pre_rotate(radians);
        Ok(())
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), Infallible> {
        let transform = self.transform;
        self.push(DrawCommand::FillRect { rect, color: color.to_owned(), transform })
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle<'_>) -> Result<(), Infallible> {
        let transform = self.transform;
        self.push(DrawCommand::StrokeRect {
            rect,
            color: stroke.color.to_owned(),
            width: stroke.width,
            dash: stroke.dash,
            transform,
        })
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) -> Result<(), Infallible> {
        let transform = self.transform;
        self.push(DrawCommand::FillCircle { center, radius, color: color.to_owned(), transform })
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle<'_>) -> Result<(), Infallible> {
        let transform = self.transform;
        self.push(DrawCommand::StrokeLine { from, to, color: stroke.color.to_owned(), width: stroke.width, transform })
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &str, font_size: f64, color: &str) -> Result<(), Infallible> {
        let transform = self.transform;
        self.push(DrawCommand::FillText {
            text: text.to_owned(),
            at,
            font: font.to_owned(),
            font_size,
            color: color.to_owned(),
            transform,
        })
    }

    fn text_width(&self, text: &str, font: &str, font_size: f64) -> f64 {
        FixedAdvance.line_width(text, font, font_size)
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), Infallible> {
        let transform = self.transform;
        self.push(DrawCommand::DrawBitmap { rect, size: bitmap.dimensions(), transform })
    }
}
