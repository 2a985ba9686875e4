//! Geometry kernel: points, rotated-frame transforms, and angle normalization.
//!
//! Everything here is a pure function of its arguments. Hit-testing reads the
//! committed object state; drag computations pass in the frozen snapshot taken
//! at pointer-down.

#[cfg(test)]
#[path = "geom_test.rs"]
mod geom_test;

use crate::consts::LINE_HIT_TOLERANCE_PX;
use crate::doc::{CanvasObject, ObjectKind};

/// A point in canvas pixel space, or in an object's local frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Center of the object's untransformed bounding box.
#[must_use]
pub fn center(obj: &CanvasObject) -> Point {
    Point::new(obj.x + obj.width / 2.0, obj.y + obj.height / 2.0)
}

/// Translate a canvas point into the object's local frame: origin at the box
/// center, axes rotated by `-rotation`.
#[must_use]
pub fn to_local(obj: &CanvasObject, p: Point) -> Point {
    let c = center(obj);
    let dx = p.x - c.x;
    let dy = p.y - c.y;
    let (sin, cos) = (-obj.rotation.to_radians()).sin_cos();
    Point::new(dx * cos - dy * sin, dx * sin + dy * cos)
}

/// Half-height of the box used for interaction. Lines use the click tolerance
/// band instead of their nominal thickness.
#[must_use]
pub fn interaction_half_height(obj: &CanvasObject) -> f64 {
    if obj.kind == ObjectKind::Line {
        LINE_HIT_TOLERANCE_PX
    } else {
        obj.height / 2.0
    }
}

/// Whether `p` lies inside the object's rotated bounding box (edges inclusive).
#[must_use]
pub fn point_in_rotated_rect(obj: &CanvasObject, p: Point) -> bool {
    let local = to_local(obj, p);
    let bx = local.x + obj.width / 2.0;
    if bx < 0.0 || bx > obj.width {
        return false;
    }
    if obj.kind == ObjectKind::Line {
        return local.y.abs() <= LINE_HIT_TOLERANCE_PX;
    }
    let by = local.y + obj.height / 2.0;
    (0.0..=obj.height).contains(&by)
}

/// Wrap a degree value into `[0, 360)`.
#[must_use]
pub fn normalize_degrees(deg: f64) -> f64 {
    let wrapped = ((deg % 360.0) + 360.0) % 360.0;
    // `-0.0 % 360 + 360` lands exactly on 360 for tiny negative inputs.
    if wrapped >= 360.0 { 0.0 } else { wrapped }
}

/// Rotation for a rotate-handle drag with the pointer at `p` around `pivot`.
///
/// Zero degrees points straight up, matching the handle's placement above the
/// object. The result is rounded to whole degrees and lies in `[0, 360)`.
#[must_use]
pub fn rotation_toward(pivot: Point, p: Point) -> f64 {
    let deg = (p.y - pivot.y).atan2(p.x - pivot.x).to_degrees() + 90.0;
    normalize_degrees(normalize_degrees(deg).round())
}

/// An axis-aligned rectangle normalized so `min <= max` on both axes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Aabb {
    /// Build from two arbitrary corners.
    #[must_use]
    pub fn from_corners(a: Point, b: Point) -> Self {
        Self {
            min_x: a.x.min(b.x),
            min_y: a.y.min(b.y),
            max_x: a.x.max(b.x),
            max_y: a.y.max(b.y),
        }
    }

    /// Unrotated bounds of an object.
    #[must_use]
    pub fn of_object(obj: &CanvasObject) -> Self {
        Self {
            min_x: obj.x,
            min_y: obj.y,
            max_x: obj.x + obj.width,
            max_y: obj.y + obj.height,
        }
    }

    #[must_use]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    #[must_use]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Strict overlap: boxes that only touch along an edge do not overlap.
    #[must_use]
    pub fn overlaps(&self, other: &Aabb) -> bool {
        self.min_x < other.max_x && self.max_x > other.min_x && self.min_y < other.max_y && self.max_y > other.min_y
    }
}
