#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::consts::{HANDLE_RADIUS_PX, ROTATE_HANDLE_OFFSET_PX};
use crate::doc::{CanvasObject, ObjectId, Scene};
use crate::geom::{Point, interaction_half_height, point_in_rotated_rect, to_local};

/// A corner of the bounding box, numbered clockwise from the top-left.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Corner {
    TopLeft = 0,
    TopRight = 1,
    BottomRight = 2,
    BottomLeft = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [Self::TopLeft, Self::TopRight, Self::BottomRight, Self::BottomLeft];

    /// Whether this corner sits on the left edge, where horizontal drags shrink the box.
    #[must_use]
    pub fn is_left(self) -> bool {
        matches!(self, Self::TopLeft | Self::BottomLeft)
    }

    /// Whether this corner sits on the top edge, where vertical drags shrink the box.
    #[must_use]
    pub fn is_top(self) -> bool {
        matches!(self, Self::TopLeft | Self::TopRight)
    }

    /// Sign of the local-frame offset from the center to this corner.
    fn signs(self) -> (f64, f64) {
        match self {
            Self::TopLeft => (-1.0, -1.0),
            Self::TopRight => (1.0, -1.0),
            Self::BottomRight => (1.0, 1.0),
            Self::BottomLeft => (-1.0, 1.0),
        }
    }
}

/// The part of an object a gesture grabbed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Handle {
    /// The body: the gesture translates the object.
    Move,
    /// The rotate handle above the top edge.
    Rotate,
    /// One of the four corner resize handles.
    Corner(Corner),
}

impl Handle {
    /// CSS cursor hint for hovering this handle.
    #[must_use]
    pub fn cursor(self) -> &'static str {
        match self {
            Self::Move => "move",
            Self::Rotate => "grab",
            Self::Corner(Corner::TopLeft | Corner::BottomRight) => "nwse-resize",
            Self::Corner(Corner::TopRight | Corner::BottomLeft) => "nesw-resize",
        }
    }
}

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Hit {
    pub object_id: ObjectId,
    pub handle: Handle,
}

/// Local-frame position of a corner handle.
#[must_use]
pub fn corner_position(obj: &CanvasObject, corner: Corner) -> Point {
    let (sx, sy) = corner.signs();
    Point::new(sx * obj.width / 2.0, sy * interaction_half_height(obj))
}

/// Local-frame position of the rotate handle center.
#[must_use]
pub fn rotate_handle_position(obj: &CanvasObject) -> Point {
    Point::new(0.0, -(interaction_half_height(obj) + ROTATE_HANDLE_OFFSET_PX))
}

/// Which handle of `obj` (if any) lies under the canvas point `p`.
///
/// The rotate handle is tested before the corners.
#[must_use]
pub fn handle_under_pointer(obj: &CanvasObject, p: Point) -> Option<Handle> {
    let local = to_local(obj, p);

    let rh = rotate_handle_position(obj);
    if (local.x - rh.x).hypot(local.y - rh.y) <= HANDLE_RADIUS_PX {
        return Some(Handle::Rotate);
    }

    Corner::ALL.into_iter().find_map(|corner| {
        let c = corner_position(obj, corner);
        let inside = (local.x - c.x).abs() <= HANDLE_RADIUS_PX && (local.y - c.y).abs() <= HANDLE_RADIUS_PX;
        inside.then_some(Handle::Corner(corner))
    })
}

/// Find what is under `p`: handles of every object topmost first, then bodies
/// topmost first.
#[must_use]
pub fn hit_test(scene: &Scene, p: Point) -> Option<Hit> {
    let handle_hit = scene.topmost_first().find_map(|obj| {
        handle_under_pointer(obj, p).map(|handle| Hit { object_id: obj.id, handle })
    });
    handle_hit.or_else(|| {
        scene
            .topmost_first()
            .find(|obj| point_in_rotated_rect(obj, p))
            .map(|obj| Hit { object_id: obj.id, handle: Handle::Move })
    })
}

/// Topmost object whose body contains `p`, ignoring handles.
#[must_use]
pub fn body_at(scene: &Scene, p: Point) -> Option<&CanvasObject> {
    scene.topmost_first().find(|obj| point_in_rotated_rect(obj, p))
}
