//! Rendering: draws the full label scene onto a [`Surface`].
//!
//! The renderer receives read-only views of the scene, selection, and marquee
//! and produces draw calls. It never mutates application state, so calling it
//! after every committed mutation is always safe.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use crate::consts::{
    HANDLE_RADIUS_PX, LINE_STROKE_PX, ROTATE_HANDLE_DRAW_RADIUS_PX, SELECTION_DASH_PX, TEXT_WRAP_INSET_PX,
};
use crate::doc::{CanvasObject, ObjectId, ObjectKind};
use crate::geom::{Point, interaction_half_height};
use crate::hit::{Corner, corner_position, rotate_handle_position};
use crate::input::SelectionBox;
use crate::surface::{Rect, StrokeStyle, Surface};
use crate::text::{line_offsets, wrap_lines};

const SELECTION_COLOR: &str = "#1E90FF";
const HANDLE_FILL: &str = "#ffffff";
const PLACEHOLDER_COLOR: &str = "#cccccc";

/// Everything the renderer reads for one frame.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Objects bottom to top.
    pub objects: &'a [CanvasObject],
    pub width: f64,
    pub height: f64,
    pub selected: Option<ObjectId>,
    pub marquee: Option<SelectionBox>,
}

/// Draw the full scene: objects, selection decoration, then the marquee.
///
/// # Errors
///
/// Returns the surface's error if any drawing call fails.
pub fn draw<S: Surface>(surface: &mut S, frame: &Frame<'_>) -> Result<(), S::Error> {
    surface.clear(frame.width, frame.height)?;

    for obj in frame.objects {
        surface.save();
        translate_and_rotate(surface, obj)?;
        draw_object(surface, obj)?;
        if frame.selected == Some(obj.id) {
            draw_selection(surface, obj)?;
        }
        surface.restore();
    }

    if let Some(marquee) = frame.marquee {
        draw_marquee(surface, marquee)?;
    }
    Ok(())
}

// =============================================================
// Object dispatch
// =============================================================

fn draw_object<S: Surface>(surface: &mut S, obj: &CanvasObject) -> Result<(), S::Error> {
    match obj.kind {
        ObjectKind::Rect | ObjectKind::Square => surface.fill_rect(Rect::centered(obj.width, obj.height), &obj.color),
        ObjectKind::Circle => surface.fill_circle(Point::new(0.0, 0.0), obj.width.min(obj.height) / 2.0, &obj.color),
        ObjectKind::Line => {
            let half = obj.width / 2.0;
            surface.stroke_line(
                Point::new(-half, 0.0),
                Point::new(half, 0.0),
                &StrokeStyle::solid(&obj.color, LINE_STROKE_PX),
            )
        }
        ObjectKind::Text => draw_text(surface, obj),
        ObjectKind::Image => draw_image(surface, obj),
    }
}

fn draw_text<S: Surface>(surface: &mut S, obj: &CanvasObject) -> Result<(), S::Error> {
    let font = obj.font();
    let font_size = obj.font_size();
    let max_width = obj.width - TEXT_WRAP_INSET_PX;
    let lines = wrap_lines(obj.text(), max_width, |s| surface.text_width(s, font, font_size));
    for (line, dy) in lines.iter().zip(line_offsets(lines.len(), font_size)) {
        if line.is_empty() {
            continue;
        }
        surface.fill_text(line, Point::new(0.0, dy), font, font_size, &obj.color)?;
    }
    Ok(())
}

fn draw_image<S: Surface>(surface: &mut S, obj: &CanvasObject) -> Result<(), S::Error> {
    let rect = Rect::centered(obj.width, obj.height);
    match obj.img.as_ref() {
        Some(bitmap) => surface.draw_bitmap(bitmap, rect),
        None => surface.fill_rect(rect, PLACEHOLDER_COLOR),
    }
}

// =============================================================
// Selection UI
// =============================================================

/// Dashed outline, corner squares, and the rotate handle, in the object's rotated frame.
fn draw_selection<S: Surface>(surface: &mut S, obj: &CanvasObject) -> Result<(), S::Error> {
    let half_h = interaction_half_height(obj);
    let outline = Rect::new(-obj.width / 2.0, -half_h, obj.width, half_h * 2.0);
    surface.stroke_rect(outline, &StrokeStyle::dashed(SELECTION_COLOR, 1.0, SELECTION_DASH_PX))?;

    let size = HANDLE_RADIUS_PX;
    let handle_stroke = StrokeStyle::solid(SELECTION_COLOR, 1.0);
    for corner in Corner::ALL {
        let c = corner_position(obj, corner);
        let square = Rect::new(c.x - size / 2.0, c.y - size / 2.0, size, size);
        surface.fill_rect(square, HANDLE_FILL)?;
        surface.stroke_rect(square, &handle_stroke)?;
    }

    let rh = rotate_handle_position(obj);
    surface.stroke_line(Point::new(0.0, -half_h), rh, &handle_stroke)?;
    surface.fill_circle(rh, ROTATE_HANDLE_DRAW_RADIUS_PX, SELECTION_COLOR)
}

fn draw_marquee<S: Surface>(surface: &mut S, marquee: SelectionBox) -> Result<(), S::Error> {
    let b = marquee.normalized();
    let rect = Rect::new(b.min_x, b.min_y, b.width(), b.height());
    surface.stroke_rect(rect, &StrokeStyle::dashed(SELECTION_COLOR, 1.0, SELECTION_DASH_PX))
}

// =============================================================
// Helpers
// =============================================================

/// Translate to the object's center and rotate by its rotation angle.
fn translate_and_rotate<S: Surface>(surface: &mut S, obj: &CanvasObject) -> Result<(), S::Error> {
    surface.translate(obj.x + obj.width / 2.0, obj.y + obj.height / 2.0)?;
    surface.rotate(obj.rotation.to_radians())
}
