//! Document model: label objects, sparse patches, and the ordered scene store.
//!
//! This module defines what is on the label (`CanvasObject`, `ObjectKind`),
//! a sparse-update type for incremental edits (`ObjectPatch`), and the runtime
//! store that owns all live objects in z-order (`Scene`).
//!
//! List order is draw order: index 0 is drawn first (bottom) and the last
//! index is drawn last (top). Every mutation replaces the affected entry with
//! a merged copy, so the scene never holds two live versions of one object.
//! Operations addressing an unknown id are silent no-ops.

#[cfg(test)]
#[path = "doc_test.rs"]
mod doc_test;

use std::sync::Arc;

use image::RgbaImage;
use serde::{Deserialize, Serialize};

use crate::consts::{DUPLICATE_OFFSET_PX, LINE_THICKNESS_PX, MIN_OBJECT_SIZE_PX};
use crate::geom::normalize_degrees;

/// Unique identifier for a label object. Allocated from a monotonic counter.
pub type ObjectId = u64;

/// A decoded bitmap. Never mutated once created; recoloring produces a new one.
pub type Bitmap = Arc<RgbaImage>;

/// The kind of a label object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    /// Filled rectangle, free aspect ratio.
    Rect,
    /// Filled rectangle whose aspect ratio is locked during resize.
    Square,
    /// Filled circle inscribed in the bounding box.
    Circle,
    /// Horizontal stroke along the box's local x-axis.
    Line,
    /// Word-wrapped text block.
    Text,
    /// Two-tone filtered bitmap.
    Image,
}

impl ObjectKind {
    /// Whether corner resizes keep the original aspect ratio regardless of modifiers.
    #[must_use]
    pub fn locks_aspect_ratio(self) -> bool {
        matches!(self, Self::Circle | Self::Square | Self::Image)
    }
}

/// A label object as stored in the scene and in saved templates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanvasObject {
    /// Unique identifier for this object.
    pub id: ObjectId,
    /// Shape type.
    #[serde(rename = "type")]
    pub kind: ObjectKind,
    /// Left edge of the untransformed bounding box.
    pub x: f64,
    /// Top edge of the untransformed bounding box.
    pub y: f64,
    /// Width of the bounding box. Always positive.
    pub width: f64,
    /// Height of the bounding box. Always positive; fixed for lines.
    pub height: f64,
    /// Clockwise rotation in degrees around the box center, in `[0, 360)`.
    #[serde(default)]
    pub rotation: f64,
    /// Fill color (stroke color for lines) as a hex string.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    /// Currently displayed filtered bitmap. `None` renders a placeholder.
    #[serde(skip)]
    pub img: Option<Bitmap>,
    /// Unfiltered source bitmap the filter is re-applied to.
    #[serde(skip)]
    pub original_img: Option<Bitmap>,
    /// Last loaded image payload: a data URL or a path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    /// Target color of the last filter pass.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filter_color: Option<String>,
}

pub const DEFAULT_TEXT: &str = "Click to edit";
pub const DEFAULT_FONT: &str = "Arial";
pub const DEFAULT_FONT_SIZE: f64 = 18.0;
pub const DEFAULT_FILTER_COLOR: &str = "#000000";

impl CanvasObject {
    /// Create an object of `kind` with the default geometry and color for that kind.
    #[must_use]
    pub fn with_defaults(id: ObjectId, kind: ObjectKind) -> Self {
        let (width, height, color) = match kind {
            ObjectKind::Rect => (120.0, 80.0, "#3498db"),
            ObjectKind::Square => (80.0, 80.0, "#e74c3c"),
            ObjectKind::Circle => (80.0, 80.0, "#2ecc71"),
            ObjectKind::Line => (150.0, LINE_THICKNESS_PX, "#34495e"),
            ObjectKind::Text => (150.0, 40.0, "#2c3e50"),
            ObjectKind::Image => (150.0, 150.0, DEFAULT_FILTER_COLOR),
        };
        let is_text = kind == ObjectKind::Text;
        Self {
            id,
            kind,
            x: 100.0,
            y: 100.0,
            width,
            height,
            rotation: 0.0,
            color: color.to_owned(),
            text: is_text.then(|| DEFAULT_TEXT.to_owned()),
            font: is_text.then(|| DEFAULT_FONT.to_owned()),
            font_size: is_text.then_some(DEFAULT_FONT_SIZE),
            img: None,
            original_img: None,
            src: None,
            filter_color: None,
        }
    }

    /// Text content. Empty string when absent.
    #[must_use]
    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or("")
    }

    /// Font family. Defaults to `"Arial"` when absent.
    #[must_use]
    pub fn font(&self) -> &str {
        self.font.as_deref().unwrap_or(DEFAULT_FONT)
    }

    /// Font size in pixels. Defaults to `18` when absent.
    #[must_use]
    pub fn font_size(&self) -> f64 {
        self.font_size.unwrap_or(DEFAULT_FONT_SIZE)
    }

    /// Filter target color. Defaults to black when no filter has run yet.
    #[must_use]
    pub fn filter_color(&self) -> &str {
        self.filter_color.as_deref().unwrap_or(DEFAULT_FILTER_COLOR)
    }

    /// Bring fields back inside the model invariants after an external edit.
    ///
    /// Non-finite positions become 0 and degenerate sizes are clamped to the
    /// minimum object size.
    fn normalize(&mut self) {
        for coord in [&mut self.x, &mut self.y, &mut self.rotation] {
            if !coord.is_finite() {
                *coord = 0.0;
            }
        }
        self.rotation = normalize_degrees(self.rotation);
        self.width = degenerate_to_min(self.width);
        self.height = if self.kind == ObjectKind::Line { LINE_THICKNESS_PX } else { degenerate_to_min(self.height) };
    }
}

fn degenerate_to_min(size: f64) -> f64 {
    if size.is_finite() && size > 0.0 { size } else { MIN_OBJECT_SIZE_PX }
}

/// Sparse update for a label object. Only present fields are applied.
#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    /// Ignored unless positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub width: Option<f64>,
    /// Ignored unless positive; lines keep their fixed thickness.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub height: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotation: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font: Option<String>,
    /// Ignored unless positive.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
    #[serde(skip)]
    pub img: Option<Bitmap>,
    #[serde(skip)]
    pub original_img: Option<Bitmap>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub src: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter_color: Option<String>,
}

impl ObjectPatch {
    /// Patch that moves and resizes an object.
    #[must_use]
    pub fn geometry(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self { x: Some(x), y: Some(y), width: Some(width), height: Some(height), ..Default::default() }
    }

    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.x.is_none()
            && self.y.is_none()
            && self.width.is_none()
            && self.height.is_none()
            && self.rotation.is_none()
            && self.color.is_none()
            && self.text.is_none()
            && self.font.is_none()
            && self.font_size.is_none()
            && self.img.is_none()
            && self.original_img.is_none()
            && self.src.is_none()
            && self.filter_color.is_none()
    }

    /// Merge this patch into `obj`.
    fn apply_to(&self, obj: &mut CanvasObject) {
        if let Some(x) = self.x {
            obj.x = x;
        }
        if let Some(y) = self.y {
            obj.y = y;
        }
        if let Some(w) = self.width.filter(|w| *w > 0.0) {
            obj.width = w;
        }
        if let Some(h) = self.height.filter(|h| *h > 0.0) {
            obj.height = h;
        }
        if let Some(r) = self.rotation {
            obj.rotation = r;
        }
        if let Some(ref color) = self.color {
            obj.color.clone_from(color);
        }
        if let Some(ref text) = self.text {
            obj.text = Some(text.clone());
        }
        if let Some(ref font) = self.font {
            obj.font = Some(font.clone());
        }
        if let Some(size) = self.font_size.filter(|s| *s > 0.0) {
            obj.font_size = Some(size);
        }
        if let Some(ref img) = self.img {
            obj.img = Some(Arc::clone(img));
        }
        if let Some(ref img) = self.original_img {
            obj.original_img = Some(Arc::clone(img));
        }
        if let Some(ref src) = self.src {
            obj.src = Some(src.clone());
        }
        if let Some(ref color) = self.filter_color {
            obj.filter_color = Some(color.clone());
        }
        obj.normalize();
    }
}

/// Direction for a single z-order step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZDirection {
    /// Toward the top (end of the list).
    Forward,
    /// Toward the bottom (start of the list).
    Backward,
}

/// Ordered store of label objects plus the current selection.
#[derive(Debug, Clone)]
pub struct Scene {
    objects: Vec<CanvasObject>,
    selected: Option<ObjectId>,
    next_id: ObjectId,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self { objects: Vec::new(), selected: None, next_id: 1 }
    }

    /// Replace all objects with a saved list. Selection is cleared.
    ///
    /// Later entries whose id repeats an earlier one are given fresh ids.
    pub fn load(&mut self, objects: Vec<CanvasObject>) {
        self.objects.clear();
        self.selected = None;
        self.next_id = objects.iter().map(|o| o.id).max().map_or(1, |max| max.saturating_add(1));
        for mut obj in objects {
            if self.contains(obj.id) {
                obj.id = self.allocate_id();
            }
            obj.normalize();
            self.objects.push(obj);
        }
    }

    /// Reserve a fresh id. Ids are never reused within a scene.
    pub fn allocate_id(&mut self) -> ObjectId {
        let id = self.next_id;
        self.next_id = self.next_id.saturating_add(1);
        id
    }

    /// Append an object at the top of the z-order and select it.
    ///
    /// If the object's id is already taken it is given a fresh one. Returns the
    /// id under which the object was stored.
    pub fn add(&mut self, mut obj: CanvasObject) -> ObjectId {
        if self.contains(obj.id) {
            obj.id = self.allocate_id();
        } else if obj.id >= self.next_id {
            self.next_id = obj.id.saturating_add(1);
        }
        obj.normalize();
        let id = obj.id;
        self.objects.push(obj);
        self.selected = Some(id);
        id
    }

    /// Replace the object with a merged copy. Returns false if `id` is unknown.
    pub fn update(&mut self, id: ObjectId, patch: &ObjectPatch) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let mut merged = self.objects[idx].clone();
        patch.apply_to(&mut merged);
        self.objects[idx] = merged;
        true
    }

    /// Remove an object, clearing the selection if it was selected.
    pub fn remove(&mut self, id: ObjectId) -> Option<CanvasObject> {
        let idx = self.index_of(id)?;
        if self.selected == Some(id) {
            self.selected = None;
        }
        Some(self.objects.remove(idx))
    }

    /// Swap the object with its neighbor in `direction`.
    ///
    /// Returns false for unknown ids and at either end of the list.
    pub fn reorder(&mut self, id: ObjectId, direction: ZDirection) -> bool {
        let Some(idx) = self.index_of(id) else {
            return false;
        };
        let target = match direction {
            ZDirection::Forward if idx + 1 < self.objects.len() => idx + 1,
            ZDirection::Backward if idx > 0 => idx - 1,
            _ => return false,
        };
        self.objects.swap(idx, target);
        true
    }

    /// Copy an object under a fresh id, offset by (+20, +20), and select the copy.
    ///
    /// Bitmaps are shared with the source; every other field is an owned copy.
    pub fn duplicate(&mut self, id: ObjectId) -> Option<ObjectId> {
        let mut copy = self.get(id)?.clone();
        copy.id = self.allocate_id();
        copy.x += DUPLICATE_OFFSET_PX;
        copy.y += DUPLICATE_OFFSET_PX;
        Some(self.add(copy))
    }

    /// Select an object, or clear the selection with `None`.
    ///
    /// Selecting an unknown id leaves the selection unchanged and returns false.
    pub fn select(&mut self, id: Option<ObjectId>) -> bool {
        match id {
            Some(id) if !self.contains(id) => false,
            _ => {
                self.selected = id;
                true
            }
        }
    }

    /// The selected object's id, if any.
    #[must_use]
    pub fn selected_id(&self) -> Option<ObjectId> {
        self.selected
    }

    /// The selected object, if any.
    #[must_use]
    pub fn selected(&self) -> Option<&CanvasObject> {
        self.selected.and_then(|id| self.get(id))
    }

    /// Look up an object by id.
    #[must_use]
    pub fn get(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    /// Position of an object in draw order.
    #[must_use]
    pub fn index_of(&self, id: ObjectId) -> Option<usize> {
        self.objects.iter().position(|o| o.id == id)
    }

    #[must_use]
    pub fn contains(&self, id: ObjectId) -> bool {
        self.index_of(id).is_some()
    }

    /// All objects bottom to top.
    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        &self.objects
    }

    /// All objects top to bottom, the order hit-testing walks.
    pub fn topmost_first(&self) -> impl Iterator<Item = &CanvasObject> {
        self.objects.iter().rev()
    }

    /// Ids bottom to top.
    #[must_use]
    pub fn ids(&self) -> Vec<ObjectId> {
        self.objects.iter().map(|o| o.id).collect()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new()
    }
}
