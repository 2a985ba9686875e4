use super::*;
use crate::doc::ObjectKind;

fn scene_of(objects: Vec<CanvasObject>) -> Scene {
    let mut scene = Scene::new();
    scene.load(objects);
    scene
}

fn rect(id: ObjectId, x: f64, y: f64, w: f64, h: f64) -> CanvasObject {
    let mut obj = CanvasObject::with_defaults(id, ObjectKind::Rect);
    obj.x = x;
    obj.y = y;
    obj.width = w;
    obj.height = h;
    obj
}

// =============================================================
// Handle positions
// =============================================================

#[test]
fn corner_positions_are_local() {
    let obj = rect(1, 100.0, 100.0, 120.0, 80.0);
    assert_eq!(corner_position(&obj, Corner::TopLeft), Point::new(-60.0, -40.0));
    assert_eq!(corner_position(&obj, Corner::BottomRight), Point::new(60.0, 40.0));
}

#[test]
fn rotate_handle_sits_above_top_edge() {
    let obj = rect(1, 100.0, 100.0, 120.0, 80.0);
    assert_eq!(rotate_handle_position(&obj), Point::new(0.0, -64.0));
}

#[test]
fn line_handles_use_tolerance_band() {
    let line = CanvasObject::with_defaults(1, ObjectKind::Line);
    assert_eq!(corner_position(&line, Corner::TopRight), Point::new(75.0, -12.0));
    assert_eq!(rotate_handle_position(&line), Point::new(0.0, -36.0));
}

#[test]
fn cursor_hints() {
    assert_eq!(Handle::Move.cursor(), "move");
    assert_eq!(Handle::Rotate.cursor(), "grab");
    assert_eq!(Handle::Corner(Corner::TopLeft).cursor(), "nwse-resize");
    assert_eq!(Handle::Corner(Corner::BottomLeft).cursor(), "nesw-resize");
}

#[test]
fn corner_sides() {
    assert!(Corner::TopLeft.is_left() && Corner::TopLeft.is_top());
    assert!(!Corner::BottomRight.is_left() && !Corner::BottomRight.is_top());
    assert!(Corner::BottomLeft.is_left() && !Corner::BottomLeft.is_top());
}

// =============================================================
// handle_under_pointer
// =============================================================

#[test]
fn finds_corner_within_radius() {
    let obj = rect(1, 100.0, 100.0, 120.0, 80.0);
    assert_eq!(handle_under_pointer(&obj, Point::new(225.0, 185.0)), Some(Handle::Corner(Corner::BottomRight)));
    assert_eq!(handle_under_pointer(&obj, Point::new(92.0, 92.0)), Some(Handle::Corner(Corner::TopLeft)));
    assert_eq!(handle_under_pointer(&obj, Point::new(229.0, 180.0)), None);
}

#[test]
fn finds_rotate_handle() {
    let obj = rect(1, 100.0, 100.0, 120.0, 80.0);
    // Center (160, 140), handle 64 above.
    assert_eq!(handle_under_pointer(&obj, Point::new(160.0, 76.0)), Some(Handle::Rotate));
    assert_eq!(handle_under_pointer(&obj, Point::new(165.0, 80.0)), Some(Handle::Rotate));
}

#[test]
fn handles_follow_rotation() {
    let mut obj = rect(1, 100.0, 100.0, 120.0, 80.0);
    obj.rotation = 90.0;
    // Rotated 90 clockwise, the rotate handle is to the right of the center.
    assert_eq!(handle_under_pointer(&obj, Point::new(224.0, 140.0)), Some(Handle::Rotate));
    assert_eq!(handle_under_pointer(&obj, Point::new(160.0, 76.0)), None);
}

// =============================================================
// hit_test
// =============================================================

#[test]
fn miss_on_empty_canvas() {
    let scene = Scene::new();
    assert_eq!(hit_test(&scene, Point::new(10.0, 10.0)), None);
}

#[test]
fn body_hit_is_move() {
    let scene = scene_of(vec![rect(1, 100.0, 100.0, 120.0, 80.0)]);
    assert_eq!(hit_test(&scene, Point::new(150.0, 150.0)), Some(Hit { object_id: 1, handle: Handle::Move }));
}

#[test]
fn topmost_body_wins() {
    let scene = scene_of(vec![rect(1, 100.0, 100.0, 120.0, 80.0), rect(2, 140.0, 120.0, 120.0, 80.0)]);
    assert_eq!(hit_test(&scene, Point::new(160.0, 150.0)).map(|h| h.object_id), Some(2));
    assert_eq!(hit_test(&scene, Point::new(110.0, 110.0)).map(|h| h.object_id), Some(1));
}

#[test]
fn handles_beat_bodies_of_higher_objects() {
    // Object 2 covers object 1's bottom-right corner handle.
    let scene = scene_of(vec![rect(1, 100.0, 100.0, 120.0, 80.0), rect(2, 200.0, 160.0, 100.0, 100.0)]);
    let hit = hit_test(&scene, Point::new(220.0, 180.0));
    assert_eq!(hit, Some(Hit { object_id: 1, handle: Handle::Corner(Corner::BottomRight) }));
}

#[test]
fn rotated_body_is_hit_in_local_frame() {
    let mut bar = rect(1, 0.0, 90.0, 200.0, 20.0);
    bar.rotation = 90.0;
    let scene = scene_of(vec![bar]);
    assert_eq!(hit_test(&scene, Point::new(100.0, 30.0)).map(|h| h.handle), Some(Handle::Move));
    assert_eq!(hit_test(&scene, Point::new(30.0, 100.0)), None);
}

#[test]
fn body_at_ignores_handles() {
    let scene = scene_of(vec![rect(1, 100.0, 100.0, 120.0, 80.0)]);
    assert!(body_at(&scene, Point::new(160.0, 76.0)).is_none());
    assert_eq!(body_at(&scene, Point::new(160.0, 140.0)).map(|o| o.id), Some(1));
}
