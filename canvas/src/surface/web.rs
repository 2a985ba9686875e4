//! Browser backend: the only place that touches [`web_sys::CanvasRenderingContext2d`].
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::{Clamped, JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, ImageData};

use super::{Rect, StrokeStyle, Surface};
use crate::doc::Bitmap;
use crate::geom::Point;
use crate::text::font_css;

/// Surface over a browser 2D context.
pub struct WebSurface<'a> {
    ctx: &'a CanvasRenderingContext2d,
}

impl<'a> WebSurface<'a> {
    #[must_use]
    pub fn new(ctx: &'a CanvasRenderingContext2d) -> Self {
        Self { ctx }
    }

    fn apply_stroke(&self, stroke: &StrokeStyle<'_>) -> Result<(), JsValue> {
        self.ctx.set_stroke_style_str(stroke.color);
        self.ctx.set_line_width(stroke.width);
        let dash_array = js_sys::Array::new();
        if let Some(d) = stroke.dash {
            dash_array.push(&d.into());
            dash_array.push(&d.into());
        }
        self.ctx.set_line_dash(&dash_array)
    }
}

/// Copy a bitmap onto a detached canvas element so it can be drawn with transforms.
fn bitmap_canvas(bitmap: &Bitmap) -> Result<HtmlCanvasElement, JsValue> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let canvas: HtmlCanvasElement = document.create_element("canvas")?.dyn_into()?;
    let (w, h) = bitmap.dimensions();
    canvas.set_width(w);
    canvas.set_height(h);
    let ctx: CanvasRenderingContext2d = canvas
        .get_context("2d")?
        .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
        .dyn_into()?;
    let data = ImageData::new_with_u8_clamped_array_and_sh(Clamped(bitmap.as_raw().as_slice()), w, h)?;
    ctx.put_image_data(&data, 0.0, 0.0)?;
    Ok(canvas)
}

impl Surface for WebSurface<'_> {
    type Error = JsValue;

    fn clear(&mut self, width: f64, height: f64) -> Result<(), JsValue> {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0)?;
        self.ctx.clear_rect(0.0, 0.0, width, height);
        Ok(())
    }

    fn save(&mut self) {
        self.ctx.save();
    }

    fn restore(&mut self) {
        self.ctx.restore();
    }

    fn translate(&mut self, x: f64, y: f64) -> Result<(), JsValue> {
        self.ctx.translate(x, y)
    }

    fn rotate(&mut self, radians: f64) -> Result<(), JsValue> {
        self.ctx.rotate(radians)
    }

    fn fill_rect(&mut self, rect: Rect, color: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color);
        self.ctx.fill_rect(rect.x, rect.y, rect.width, rect.height);
        Ok(())
    }

    fn stroke_rect(&mut self, rect: Rect, stroke: &StrokeStyle<'_>) -> Result<(), JsValue> {
        self.ctx.save();
        self.apply_stroke(stroke)?;
        self.ctx.stroke_rect(rect.x, rect.y, rect.width, rect.height);
        self.ctx.restore();
        Ok(())
    }

    fn fill_circle(&mut self, center: Point, radius: f64, color: &str) -> Result<(), JsValue> {
        self.ctx.begin_path();
        self.ctx.arc(center.x, center.y, radius, 0.0, 2.0 * PI)?;
        self.ctx.set_fill_style_str(color);
        self.ctx.fill();
        Ok(())
    }

    fn stroke_line(&mut self, from: Point, to: Point, stroke: &StrokeStyle<'_>) -> Result<(), JsValue> {
        self.ctx.save();
        self.apply_stroke(stroke)?;
        self.ctx.begin_path();
        self.ctx.move_to(from.x, from.y);
        self.ctx.line_to(to.x, to.y);
        self.ctx.stroke();
        self.ctx.restore();
        Ok(())
    }

    fn fill_text(&mut self, text: &str, at: Point, font: &str, font_size: f64, color: &str) -> Result<(), JsValue> {
        self.ctx.set_fill_style_str(color);
        self.ctx.set_font(&font_css(font, font_size));
        self.ctx.set_text_align("center");
        self.ctx.set_text_baseline("middle");
        self.ctx.fill_text(text, at.x, at.y)
    }

    fn text_width(&self, text: &str, font: &str, font_size: f64) -> f64 {
        self.ctx.set_font(&font_css(font, font_size));
        match self.ctx.measure_text(text) {
            Ok(metrics) => metrics.width(),
            Err(_) => f64::INFINITY,
        }
    }

    fn draw_bitmap(&mut self, bitmap: &Bitmap, rect: Rect) -> Result<(), JsValue> {
        let source = bitmap_canvas(bitmap)?;
        self.ctx
            .draw_image_with_html_canvas_element_and_dw_and_dh(&source, rect.x, rect.y, rect.width, rect.height)
    }
}
