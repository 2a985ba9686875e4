//! Drag math: turns a frozen pointer-down snapshot plus the live pointer into
//! an object patch.
//!
//! Every function here reads only the [`DragState`] and the current pointer,
//! so the result after any number of intermediate moves equals jumping
//! straight to the final pointer position.

#[cfg(test)]
#[path = "gesture_test.rs"]
mod gesture_test;

use crate::consts::{LINE_THICKNESS_PX, MAX_FONT_SIZE, MIN_FONT_SIZE, MIN_OBJECT_SIZE_PX};
use crate::doc::{CanvasObject, ObjectKind, ObjectPatch};
use crate::geom::{Point, center, rotation_toward};
use crate::hit::{Corner, Handle};
use crate::input::{DragState, Modifiers};

/// Patch for the dragged object with the pointer at `p`.
#[must_use]
pub fn drag_patch(drag: &DragState, p: Point, modifiers: Modifiers) -> ObjectPatch {
    let dx = p.x - drag.start.x;
    let dy = p.y - drag.start.y;
    match drag.handle {
        Handle::Move => ObjectPatch {
            x: Some((drag.orig.x + dx).round()),
            y: Some((drag.orig.y + dy).round()),
            ..Default::default()
        },
        Handle::Rotate => ObjectPatch { rotation: Some(rotation_toward(center(&drag.orig), p)), ..Default::default() },
        Handle::Corner(corner) => resize(&drag.orig, corner, dx, dy, modifiers.shift),
    }
}

/// Resize `orig` by dragging `corner` by (`dx`, `dy`), anchoring the opposite corner.
///
/// The aspect ratio is locked when `shift` is held or the kind always locks it.
/// Lines only change length. Text rescales its font size with the box.
#[must_use]
pub fn resize(orig: &CanvasObject, corner: Corner, dx: f64, dy: f64, shift: bool) -> ObjectPatch {
    let sign_x = if corner.is_left() { -1.0 } else { 1.0 };
    let sign_y = if corner.is_top() { -1.0 } else { 1.0 };

    if orig.kind == ObjectKind::Line {
        let width = (orig.width + sign_x * dx).max(MIN_OBJECT_SIZE_PX);
        let x = if corner.is_left() { orig.x + orig.width - width } else { orig.x };
        return ObjectPatch {
            x: Some(x.round()),
            width: Some(width.round()),
            height: Some(LINE_THICKNESS_PX),
            ..Default::default()
        };
    }

    let (width, height) = if shift || orig.kind.locks_aspect_ratio() {
        locked_size(orig, sign_x * dx)
    } else {
        (
            (orig.width + sign_x * dx).max(MIN_OBJECT_SIZE_PX),
            (orig.height + sign_y * dy).max(MIN_OBJECT_SIZE_PX),
        )
    };

    let x = if corner.is_left() { orig.x + orig.width - width } else { orig.x };
    let y = if corner.is_top() { orig.y + orig.height - height } else { orig.y };

    let mut patch = ObjectPatch::geometry(x.round(), y.round(), width.round(), height.round());
    if orig.kind == ObjectKind::Text {
        let scale = (width / orig.width).min(height / orig.height);
        patch.font_size = Some((orig.font_size() * scale).clamp(MIN_FONT_SIZE, MAX_FONT_SIZE).round());
    }
    patch
}

/// Ratio-preserving size driven by the horizontal delta, both sides floored.
fn locked_size(orig: &CanvasObject, grow_x: f64) -> (f64, f64) {
    let ratio = if orig.width > 0.0 && orig.height > 0.0 { orig.width / orig.height } else { 1.0 };
    let width = (orig.width + grow_x).max(MIN_OBJECT_SIZE_PX);
    let height = width / ratio;
    if height < MIN_OBJECT_SIZE_PX {
        (MIN_OBJECT_SIZE_PX * ratio, MIN_OBJECT_SIZE_PX)
    } else {
        (width, height)
    }
}
