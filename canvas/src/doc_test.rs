#![allow(clippy::float_cmp)]

use std::sync::Arc;

use image::RgbaImage;
use serde_json::json;

use super::*;

fn scene_with(kinds: &[ObjectKind]) -> Scene {
    let mut scene = Scene::new();
    for kind in kinds {
        let id = scene.allocate_id();
        scene.add(CanvasObject::with_defaults(id, *kind));
    }
    scene
}

// =============================================================
// ObjectKind
// =============================================================

#[test]
fn aspect_locked_kinds() {
    assert!(ObjectKind::Circle.locks_aspect_ratio());
    assert!(ObjectKind::Square.locks_aspect_ratio());
    assert!(ObjectKind::Image.locks_aspect_ratio());
    assert!(!ObjectKind::Rect.locks_aspect_ratio());
    assert!(!ObjectKind::Line.locks_aspect_ratio());
    assert!(!ObjectKind::Text.locks_aspect_ratio());
}

#[test]
fn kind_serializes_lowercase() {
    assert_eq!(serde_json::to_value(ObjectKind::Circle).unwrap(), json!("circle"));
}

// =============================================================
// CanvasObject defaults
// =============================================================

#[test]
fn default_geometry_per_kind() {
    let cases = [
        (ObjectKind::Rect, 120.0, 80.0, "#3498db"),
        (ObjectKind::Square, 80.0, 80.0, "#e74c3c"),
        (ObjectKind::Circle, 80.0, 80.0, "#2ecc71"),
        (ObjectKind::Line, 150.0, 4.0, "#34495e"),
        (ObjectKind::Text, 150.0, 40.0, "#2c3e50"),
        (ObjectKind::Image, 150.0, 150.0, "#000000"),
    ];
    for (kind, w, h, color) in cases {
        let obj = CanvasObject::with_defaults(7, kind);
        assert_eq!((obj.x, obj.y), (100.0, 100.0), "{kind:?}");
        assert_eq!((obj.width, obj.height), (w, h), "{kind:?}");
        assert_eq!(obj.color, color, "{kind:?}");
        assert_eq!(obj.rotation, 0.0);
    }
}

#[test]
fn text_defaults() {
    let obj = CanvasObject::with_defaults(1, ObjectKind::Text);
    assert_eq!(obj.text(), "Click to edit");
    assert_eq!(obj.font(), "Arial");
    assert_eq!(obj.font_size(), 18.0);
}

#[test]
fn non_text_has_no_text_fields() {
    let obj = CanvasObject::with_defaults(1, ObjectKind::Rect);
    assert!(obj.text.is_none());
    assert!(obj.font_size.is_none());
    assert_eq!(obj.text(), "");
}

#[test]
fn filter_color_defaults_to_black() {
    let obj = CanvasObject::with_defaults(1, ObjectKind::Image);
    assert_eq!(obj.filter_color(), "#000000");
}

// =============================================================
// Serde
// =============================================================

#[test]
fn serializes_camel_case_with_type_tag() {
    let obj = CanvasObject::with_defaults(3, ObjectKind::Text);
    let v = serde_json::to_value(&obj).unwrap();
    assert_eq!(v["type"], json!("text"));
    assert_eq!(v["fontSize"], json!(18.0));
    assert!(v.get("img").is_none());
    assert!(v.get("filterColor").is_none());
}

#[test]
fn deserializes_saved_template_entry() {
    let v = json!({
        "id": 4, "type": "image", "x": 10.0, "y": 20.0, "width": 50.0, "height": 60.0,
        "color": "#000000", "src": "logo.png", "filterColor": "#ff0000"
    });
    let obj: CanvasObject = serde_json::from_value(v).unwrap();
    assert_eq!(obj.id, 4);
    assert_eq!(obj.kind, ObjectKind::Image);
    assert_eq!(obj.rotation, 0.0);
    assert_eq!(obj.src.as_deref(), Some("logo.png"));
    assert_eq!(obj.filter_color(), "#ff0000");
    assert!(obj.img.is_none());
}

// =============================================================
// ObjectPatch
// =============================================================

#[test]
fn empty_patch() {
    assert!(ObjectPatch::default().is_empty());
    assert!(!ObjectPatch::geometry(0.0, 0.0, 1.0, 1.0).is_empty());
}

#[test]
fn patch_serializes_only_present_fields() {
    let patch = ObjectPatch { font_size: Some(24.0), ..Default::default() };
    assert_eq!(serde_json::to_value(&patch).unwrap(), json!({ "fontSize": 24.0 }));
}

// =============================================================
// Scene: add / get
// =============================================================

#[test]
fn add_appends_and_selects() {
    let scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle]);
    assert_eq!(scene.len(), 2);
    assert_eq!(scene.ids(), vec![1, 2]);
    assert_eq!(scene.selected_id(), Some(2));
    assert_eq!(scene.selected().map(|o| o.kind), Some(ObjectKind::Circle));
}

#[test]
fn add_reassigns_taken_id() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    let id = scene.add(CanvasObject::with_defaults(1, ObjectKind::Square));
    assert_ne!(id, 1);
    assert_eq!(scene.len(), 2);
}

#[test]
fn add_advances_counter_past_explicit_id() {
    let mut scene = Scene::new();
    scene.add(CanvasObject::with_defaults(10, ObjectKind::Rect));
    assert_eq!(scene.allocate_id(), 11);
}

#[test]
fn topmost_first_reverses_draw_order() {
    let scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle, ObjectKind::Line]);
    let ids: Vec<_> = scene.topmost_first().map(|o| o.id).collect();
    assert_eq!(ids, vec![3, 2, 1]);
}

// =============================================================
// Scene: update
// =============================================================

#[test]
fn update_merges_fields() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    assert!(scene.update(1, &ObjectPatch { x: Some(5.0), color: Some("#ff0000".into()), ..Default::default() }));
    let obj = scene.get(1).cloned().unwrap();
    assert_eq!(obj.x, 5.0);
    assert_eq!(obj.y, 100.0);
    assert_eq!(obj.color, "#ff0000");
}

#[test]
fn update_unknown_id_is_noop() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    assert!(!scene.update(99, &ObjectPatch { x: Some(5.0), ..Default::default() }));
    assert_eq!(scene.get(1).map(|o| o.x), Some(100.0));
}

#[test]
fn update_ignores_non_positive_sizes() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    scene.update(1, &ObjectPatch { width: Some(0.0), height: Some(-5.0), ..Default::default() });
    assert_eq!(scene.get(1).map(|o| (o.width, o.height)), Some((120.0, 80.0)));
}

#[test]
fn update_normalizes_rotation() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    scene.update(1, &ObjectPatch { rotation: Some(-30.0), ..Default::default() });
    assert_eq!(scene.get(1).map(|o| o.rotation), Some(330.0));
}

#[test]
fn line_height_stays_fixed() {
    let mut scene = scene_with(&[ObjectKind::Line]);
    scene.update(1, &ObjectPatch { height: Some(40.0), ..Default::default() });
    assert_eq!(scene.get(1).map(|o| o.height), Some(4.0));
}

#[test]
fn update_replaces_entry_without_touching_snapshots() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    let before = scene.get(1).cloned();
    scene.update(1, &ObjectPatch { x: Some(0.0), ..Default::default() });
    assert_eq!(before.map(|o| o.x), Some(100.0));
    assert_eq!(scene.len(), 1);
}

#[test]
fn update_shares_bitmaps() {
    let mut scene = scene_with(&[ObjectKind::Image]);
    let bmp: Bitmap = Arc::new(RgbaImage::new(2, 2));
    scene.update(1, &ObjectPatch { img: Some(Arc::clone(&bmp)), ..Default::default() });
    let stored = scene.get(1).and_then(|o| o.img.clone());
    assert!(stored.is_some_and(|s| Arc::ptr_eq(&s, &bmp)));
}

// =============================================================
// Scene: remove / select
// =============================================================

#[test]
fn remove_clears_selection() {
    let mut scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle]);
    assert!(scene.remove(2).is_some());
    assert_eq!(scene.selected_id(), None);
    assert_eq!(scene.ids(), vec![1]);
}

#[test]
fn remove_other_keeps_selection() {
    let mut scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle]);
    scene.remove(1);
    assert_eq!(scene.selected_id(), Some(2));
}

#[test]
fn remove_unknown_is_none() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    assert!(scene.remove(42).is_none());
    assert_eq!(scene.len(), 1);
}

#[test]
fn select_unknown_is_rejected() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    assert!(!scene.select(Some(42)));
    assert_eq!(scene.selected_id(), Some(1));
    assert!(scene.select(None));
    assert_eq!(scene.selected_id(), None);
}

// =============================================================
// Scene: reorder
// =============================================================

#[test]
fn reorder_forward_swaps_with_next() {
    let mut scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle, ObjectKind::Line]);
    assert!(scene.reorder(1, ZDirection::Forward));
    assert_eq!(scene.ids(), vec![2, 1, 3]);
}

#[test]
fn reorder_backward_swaps_with_previous() {
    let mut scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle, ObjectKind::Line]);
    assert!(scene.reorder(3, ZDirection::Backward));
    assert_eq!(scene.ids(), vec![1, 3, 2]);
}

#[test]
fn reorder_at_boundaries_is_noop() {
    let mut scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle]);
    assert!(!scene.reorder(2, ZDirection::Forward));
    assert!(!scene.reorder(1, ZDirection::Backward));
    assert_eq!(scene.ids(), vec![1, 2]);
}

#[test]
fn reorder_preserves_id_set() {
    let mut scene = scene_with(&[ObjectKind::Rect, ObjectKind::Circle, ObjectKind::Line]);
    scene.reorder(2, ZDirection::Forward);
    scene.reorder(1, ZDirection::Forward);
    let mut ids = scene.ids();
    ids.sort_unstable();
    assert_eq!(ids, vec![1, 2, 3]);
}

// =============================================================
// Scene: duplicate
// =============================================================

#[test]
fn duplicate_offsets_and_selects_copy() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    let copy = scene.duplicate(1);
    assert_eq!(copy, Some(2));
    assert_eq!(scene.selected_id(), Some(2));
    assert_eq!(scene.get(2).map(|o| (o.x, o.y)), Some((120.0, 120.0)));
    assert_eq!(scene.get(1).map(|o| (o.x, o.y)), Some((100.0, 100.0)));
}

#[test]
fn duplicate_is_independent() {
    let mut scene = scene_with(&[ObjectKind::Text]);
    scene.duplicate(1);
    scene.update(2, &ObjectPatch { text: Some("copy".into()), ..Default::default() });
    assert_eq!(scene.get(1).map(CanvasObject::text), Some("Click to edit"));
    assert_eq!(scene.get(2).map(CanvasObject::text), Some("copy"));
}

#[test]
fn duplicate_unknown_is_none() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    assert_eq!(scene.duplicate(9), None);
    assert_eq!(scene.len(), 1);
}

// =============================================================
// Scene: load
// =============================================================

#[test]
fn load_replaces_and_clears_selection() {
    let mut scene = scene_with(&[ObjectKind::Rect]);
    scene.load(vec![CanvasObject::with_defaults(5, ObjectKind::Circle), CanvasObject::with_defaults(8, ObjectKind::Line)]);
    assert_eq!(scene.ids(), vec![5, 8]);
    assert_eq!(scene.selected_id(), None);
    assert_eq!(scene.allocate_id(), 9);
}

#[test]
fn load_reassigns_duplicate_ids() {
    let mut scene = Scene::new();
    scene.load(vec![CanvasObject::with_defaults(3, ObjectKind::Rect), CanvasObject::with_defaults(3, ObjectKind::Circle)]);
    assert_eq!(scene.ids(), vec![3, 4]);
}

#[test]
fn load_clamps_degenerate_sizes() {
    let v = json!([
        {"id": 1, "type": "square", "x": 100.0, "y": 100.0, "width": 0.0, "height": 0.0, "color": "#000000"},
        {"id": 2, "type": "rect", "x": 0.0, "y": 0.0, "width": -30.0, "height": 15.0, "color": "#000000"}
    ]);
    let objects: Vec<CanvasObject> = serde_json::from_value(v).unwrap();
    let mut scene = Scene::new();
    scene.load(objects);
    assert_eq!(scene.get(1).map(|o| (o.width, o.height)), Some((20.0, 20.0)));
    assert_eq!(scene.get(2).map(|o| (o.width, o.height)), Some((20.0, 15.0)));
}

#[test]
fn add_replaces_non_finite_geometry() {
    let mut obj = CanvasObject::with_defaults(1, ObjectKind::Rect);
    obj.x = f64::NAN;
    obj.rotation = f64::INFINITY;
    obj.height = f64::NAN;
    let mut scene = Scene::new();
    scene.add(obj);
    let stored = scene.get(1).unwrap();
    assert_eq!((stored.x, stored.rotation, stored.height), (0.0, 0.0, 20.0));
}

#[test]
fn load_normalizes_entries() {
    let mut line = CanvasObject::with_defaults(1, ObjectKind::Line);
    line.height = 30.0;
    line.rotation = 370.0;
    let mut scene = Scene::new();
    scene.load(vec![line]);
    assert_eq!(scene.get(1).map(|o| (o.height, o.rotation)), Some((4.0, 10.0)));
}
