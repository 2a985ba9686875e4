use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::consts::{
    DEFAULT_CANVAS_HEIGHT, DEFAULT_CANVAS_WIDTH, MAX_FONT_SIZE, MIN_FONT_SIZE, TEXT_MIN_HEIGHT_PX, TEXT_MIN_WIDTH_PX,
    TEXT_OVERLAY_MARGIN_PX, TEXT_PAD_X_PX, TEXT_PAD_Y_PX,
};
use crate::doc::{CanvasObject, ObjectId, ObjectKind, ObjectPatch, Scene, ZDirection};
use crate::filter;
use crate::geom::{Aabb, Point};
use crate::gesture;
use crate::hit;
use crate::input::{Button, DragState, InputState, Key, Modifiers, SelectionBox};
use crate::render::{self, Frame};
use crate::surface::Surface;
use crate::surface::web::WebSurface;
use crate::text::{FixedAdvance, TextMeasure};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone)]
pub enum Action {
    ObjectCreated(CanvasObject),
    ObjectUpdated { id: ObjectId, patch: ObjectPatch },
    ObjectDeleted { id: ObjectId },
    /// Z-order changed; `order` lists ids bottom to top.
    ObjectsReordered { order: Vec<ObjectId> },
    SelectionChanged(Option<ObjectId>),
    /// Open the text-edit overlay at canvas position (`x`, `y`).
    EditTextRequested { id: ObjectId, text: String, x: f64, y: f64 },
    /// The text-edit overlay should close.
    TextEditCommitted { id: ObjectId },
    /// The host should load `src` and hand the bytes to [`EngineCore::image_loaded`].
    FetchImage { id: ObjectId, src: String },
    SetCursor(String),
    RenderNeeded,
}

/// How a font size edit was entered in the property panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontSizeInput {
    /// A continuous control; the value is clamped to the supported range.
    Slider,
    /// A typed number; stored as given.
    Typed,
}

/// Image bytes waiting for the next [`EngineCore::poll_images`] turn.
#[derive(Debug, Clone)]
struct ImageJob {
    id: ObjectId,
    bytes: Vec<u8>,
    src: JobSource,
}

/// What a decoded job records as the object's `src`.
#[derive(Debug, Clone)]
enum JobSource {
    /// The object already carries the source the bytes came from.
    Keep,
    /// Uploaded bytes with no reference; the decoded original is stored inline.
    Inline,
    /// A new reference supplied with the bytes.
    Given(String),
}

/// Core engine state: all logic that does not depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
pub struct EngineCore {
    pub scene: Scene,
    pub input: InputState,
    pub width: f64,
    pub height: f64,
    measure: Box<dyn TextMeasure>,
    pending_images: Vec<ImageJob>,
}

impl Default for EngineCore {
    fn default() -> Self {
        Self::with_size(DEFAULT_CANVAS_WIDTH, DEFAULT_CANVAS_HEIGHT)
    }
}

impl EngineCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty engine for a `width` × `height` pixel canvas.
    #[must_use]
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            scene: Scene::new(),
            input: InputState::Idle,
            width: f64::from(width),
            height: f64::from(height),
            measure: Box::new(FixedAdvance),
            pending_images: Vec::new(),
        }
    }

    /// Replace the measurer used to re-box text on commit.
    #[must_use]
    pub fn with_measure(mut self, measure: Box<dyn TextMeasure>) -> Self {
        self.measure = measure;
        self
    }

    // --- Data inputs ---

    /// Hydrate the scene from a saved object list.
    ///
    /// Image objects whose `src` is a data URL are queued for decoding; other
    /// image sources are returned as [`Action::FetchImage`] requests.
    pub fn load(&mut self, objects: Vec<CanvasObject>) -> Vec<Action> {
        self.input = InputState::Idle;
        self.pending_images.clear();
        self.scene.load(objects);
        let sources: Vec<(ObjectId, String)> = self
            .scene
            .objects()
            .iter()
            .filter(|o| o.kind == ObjectKind::Image && o.img.is_none())
            .filter_map(|o| o.src.clone().map(|src| (o.id, src)))
            .collect();
        let mut actions = Vec::new();
        for (id, src) in sources {
            actions.extend(self.request_source(id, src));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    // --- Creation ---

    /// Add a shape with the default geometry for `kind`. Text objects open the
    /// text editor right away.
    pub fn add_shape(&mut self, kind: ObjectKind) -> Vec<Action> {
        let mut actions = self.finish_text_edit();
        let id = self.scene.allocate_id();
        let id = self.scene.add(CanvasObject::with_defaults(id, kind));
        tracing::debug!(id, ?kind, "object added");
        if let Some(obj) = self.scene.get(id) {
            actions.push(Action::ObjectCreated(obj.clone()));
        }
        actions.push(Action::SelectionChanged(Some(id)));
        if kind == ObjectKind::Text {
            actions.extend(self.begin_text_edit(id));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Add an image object from uploaded file bytes. The object renders as a
    /// placeholder until the next [`EngineCore::poll_images`].
    pub fn add_image(&mut self, bytes: Vec<u8>) -> Vec<Action> {
        let mut actions = self.add_shape(ObjectKind::Image);
        if let Some(id) = self.scene.selected_id() {
            self.pending_images.push(ImageJob { id, bytes, src: JobSource::Inline });
        }
        actions.retain(|a| !matches!(a, Action::RenderNeeded));
        actions.push(Action::RenderNeeded);
        actions
    }

    /// Add an image object from a data URL or a path the host resolves.
    pub fn add_image_from_src(&mut self, src: &str) -> Vec<Action> {
        let mut actions = self.add_shape(ObjectKind::Image);
        if let Some(id) = self.scene.selected_id() {
            self.scene.update(id, &ObjectPatch { src: Some(src.to_owned()), ..Default::default() });
            actions.extend(self.request_source(id, src.to_owned()));
        }
        actions
    }

    /// Queue decoding of a data URL, or ask the host to fetch anything else.
    fn request_source(&mut self, id: ObjectId, src: String) -> Vec<Action> {
        if !filter::is_data_url(&src) {
            return vec![Action::FetchImage { id, src }];
        }
        match filter::data_url_bytes(&src) {
            Ok(bytes) => self.pending_images.push(ImageJob { id, bytes, src: JobSource::Keep }),
            Err(e) => tracing::warn!(id, error = %e, "image source unreadable; keeping placeholder"),
        }
        Vec::new()
    }

    /// Hand over bytes fetched for an [`Action::FetchImage`] request.
    pub fn image_loaded(&mut self, id: ObjectId, bytes: Vec<u8>) {
        self.pending_images.push(ImageJob { id, bytes, src: JobSource::Keep });
    }

    /// Replace the bitmap of an existing image object with a new upload.
    ///
    /// The object's last filter color is re-applied once decoded. Without a
    /// `src` the new original is recorded as an inline data URL.
    pub fn replace_image(&mut self, id: ObjectId, bytes: Vec<u8>, src: Option<String>) -> bool {
        if self.scene.get(id).is_none_or(|o| o.kind != ObjectKind::Image) {
            return false;
        }
        let src = src.map_or(JobSource::Inline, JobSource::Given);
        self.pending_images.push(ImageJob { id, bytes, src });
        true
    }

    /// Number of image jobs waiting to be decoded.
    #[must_use]
    pub fn pending_image_count(&self) -> usize {
        self.pending_images.len()
    }

    /// Decode and filter every queued image, applying each result through the
    /// same update path as user edits.
    ///
    /// Failures are logged and leave the object on its placeholder.
    pub fn poll_images(&mut self) -> Vec<Action> {
        let jobs = std::mem::take(&mut self.pending_images);
        let mut actions = Vec::new();
        for job in jobs {
            let Some(obj) = self.scene.get(job.id).filter(|o| o.kind == ObjectKind::Image) else {
                tracing::debug!(id = job.id, "image job for missing object dropped");
                continue;
            };
            let color = obj.filter_color().to_owned();
            let original = match filter::decode(&job.bytes) {
                Ok(bitmap) => bitmap,
                Err(e) => {
                    tracing::warn!(id = job.id, error = %e, "image decode failed; keeping placeholder");
                    continue;
                }
            };
            let src = match job.src {
                JobSource::Keep => None,
                JobSource::Given(src) => Some(src),
                JobSource::Inline => match filter::to_data_url(&original) {
                    Ok(url) => Some(url),
                    Err(e) => {
                        tracing::warn!(id = job.id, error = %e, "upload could not be stored inline");
                        None
                    }
                },
            };
            let mut patch = ObjectPatch { original_img: Some(original.clone()), src, ..Default::default() };
            match filter::apply(&original, &color) {
                Ok(filtered) => {
                    patch.img = Some(filtered);
                    patch.filter_color = Some(color);
                }
                Err(e) => tracing::warn!(id = job.id, error = %e, "image filter failed; keeping placeholder"),
            }
            actions.extend(self.apply_patch(job.id, patch));
        }
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    // --- Property panel ---

    /// Apply a property-panel patch.
    pub fn update_object(&mut self, id: ObjectId, patch: ObjectPatch) -> Vec<Action> {
        let mut actions = self.apply_patch(id, patch);
        if !actions.is_empty() {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    /// Set the primary color. Image objects are re-filtered toward the color instead.
    pub fn set_color(&mut self, id: ObjectId, color: &str) -> Vec<Action> {
        match self.scene.get(id).map(|o| o.kind) {
            Some(ObjectKind::Image) => self.recolor_image(id, color),
            Some(_) => self.update_object(id, ObjectPatch { color: Some(color.to_owned()), ..Default::default() }),
            None => Vec::new(),
        }
    }

    /// Set a text object's font size.
    pub fn set_font_size(&mut self, id: ObjectId, size: f64, input: FontSizeInput) -> Vec<Action> {
        let size = match input {
            FontSizeInput::Slider => size.clamp(MIN_FONT_SIZE, MAX_FONT_SIZE),
            FontSizeInput::Typed => size,
        };
        if self.scene.get(id).is_none_or(|o| o.kind != ObjectKind::Text) {
            return Vec::new();
        }
        self.update_object(id, ObjectPatch { font_size: Some(size), ..Default::default() })
    }

    /// Re-filter an image object's original bitmap toward `color`.
    ///
    /// Before the original has loaded only the color is recorded; it is
    /// applied when decoding completes.
    pub fn recolor_image(&mut self, id: ObjectId, color: &str) -> Vec<Action> {
        let Some(obj) = self.scene.get(id).filter(|o| o.kind == ObjectKind::Image) else {
            return Vec::new();
        };
        let mut patch = ObjectPatch { filter_color: Some(color.to_owned()), ..Default::default() };
        if let Some(original) = obj.original_img.as_ref() {
            match filter::apply(original, color) {
                Ok(filtered) => patch.img = Some(filtered),
                Err(e) => {
                    tracing::warn!(id, error = %e, "recolor rejected");
                    return Vec::new();
                }
            }
        }
        self.update_object(id, patch)
    }

    // --- Toolbar / scene commands ---

    /// Select an object, or clear the selection.
    pub fn select(&mut self, id: Option<ObjectId>) -> Vec<Action> {
        if self.scene.selected_id() == id || !self.scene.select(id) {
            return Vec::new();
        }
        vec![Action::SelectionChanged(id), Action::RenderNeeded]
    }

    /// Delete an object by id.
    pub fn delete_object(&mut self, id: ObjectId) -> Vec<Action> {
        let was_selected = self.scene.selected_id() == Some(id);
        if self.scene.remove(id).is_none() {
            return Vec::new();
        }
        tracing::debug!(id, "object deleted");
        let mut actions = Vec::new();
        if self.active_object() == Some(id) {
            if self.input.is_editing_text() {
                actions.push(Action::TextEditCommitted { id });
            }
            self.input = InputState::Idle;
        }
        actions.push(Action::ObjectDeleted { id });
        if was_selected {
            actions.push(Action::SelectionChanged(None));
        }
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn delete_selected(&mut self) -> Vec<Action> {
        self.scene.selected_id().map_or_else(Vec::new, |id| self.delete_object(id))
    }

    /// Duplicate the selected object; the copy becomes selected.
    pub fn duplicate_selected(&mut self) -> Vec<Action> {
        let Some(id) = self.scene.selected_id() else {
            return Vec::new();
        };
        let Some(copy_id) = self.scene.duplicate(id) else {
            return Vec::new();
        };
        tracing::debug!(source = id, id = copy_id, "object duplicated");
        let mut actions = Vec::new();
        if let Some(copy) = self.scene.get(copy_id) {
            actions.push(Action::ObjectCreated(copy.clone()));
        }
        actions.push(Action::SelectionChanged(Some(copy_id)));
        actions.push(Action::RenderNeeded);
        actions
    }

    pub fn bring_forward(&mut self) -> Vec<Action> {
        self.reorder_selected(ZDirection::Forward)
    }

    pub fn send_backward(&mut self) -> Vec<Action> {
        self.reorder_selected(ZDirection::Backward)
    }

    fn reorder_selected(&mut self, direction: ZDirection) -> Vec<Action> {
        let Some(id) = self.scene.selected_id() else {
            return Vec::new();
        };
        if !self.scene.reorder(id, direction) {
            return Vec::new();
        }
        tracing::debug!(id, ?direction, "object reordered");
        vec![Action::ObjectsReordered { order: self.scene.ids() }, Action::RenderNeeded]
    }

    // --- Text edit sub-mode ---

    /// Open the text editor over a text object.
    ///
    /// Any edit already in progress on another object is committed first.
    pub fn begin_text_edit(&mut self, id: ObjectId) -> Vec<Action> {
        let mut actions = Vec::new();
        if let InputState::EditingText { id: current, .. } = self.input {
            if current == id {
                return actions;
            }
            actions.extend(self.commit_text_edit());
        }
        let Some(obj) = self.scene.get(id).filter(|o| o.kind == ObjectKind::Text) else {
            return actions;
        };
        let text = obj.text().to_owned();
        let (x, y) = (obj.x + TEXT_OVERLAY_MARGIN_PX, obj.y + TEXT_OVERLAY_MARGIN_PX);
        if self.scene.selected_id() != Some(id) {
            self.scene.select(Some(id));
            actions.push(Action::SelectionChanged(Some(id)));
        }
        self.input = InputState::EditingText { id, draft: text.clone() };
        actions.push(Action::EditTextRequested { id, text, x, y });
        actions
    }

    /// Replace the overlay draft. Ignored unless the editor is open.
    pub fn set_draft(&mut self, text: &str) {
        if let InputState::EditingText { draft, .. } = &mut self.input {
            text.clone_into(draft);
        }
    }

    /// Current overlay draft, if the editor is open.
    #[must_use]
    pub fn draft(&self) -> Option<&str> {
        match &self.input {
            InputState::EditingText { draft, .. } => Some(draft),
            _ => None,
        }
    }

    /// Write the draft back and re-box the text object around it.
    ///
    /// The new box is the measured text plus padding, floored at 50 × 30.
    pub fn commit_text_edit(&mut self) -> Vec<Action> {
        if !self.input.is_editing_text() {
            return Vec::new();
        }
        let InputState::EditingText { id, draft } = std::mem::take(&mut self.input) else {
            return Vec::new();
        };
        let Some(obj) = self.scene.get(id) else {
            return Vec::new();
        };
        let extent = self.measure.measure(&draft, obj.font(), obj.font_size());
        let width = (extent.width + TEXT_PAD_X_PX).round().max(TEXT_MIN_WIDTH_PX);
        let height = (extent.height + TEXT_PAD_Y_PX).round().max(TEXT_MIN_HEIGHT_PX);
        tracing::debug!(id, width, height, "text edit committed");
        let patch = ObjectPatch { text: Some(draft), width: Some(width), height: Some(height), ..Default::default() };
        let mut actions = self.apply_patch(id, patch);
        actions.push(Action::TextEditCommitted { id });
        actions.push(Action::RenderNeeded);
        actions
    }

    /// The overlay lost focus.
    pub fn on_blur(&mut self) -> Vec<Action> {
        self.commit_text_edit()
    }

    // --- Pointer input ---

    /// Pick a handle or body under the pointer and start a drag, or start a marquee.
    ///
    /// While the text editor is open the event only commits the edit.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button, _modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_editing_text() {
            return self.commit_text_edit();
        }
        if button != Button::Primary {
            return Vec::new();
        }

        let mut actions = Vec::new();
        match hit::hit_test(&self.scene, pt) {
            Some(found) => {
                let Some(orig) = self.scene.get(found.object_id).cloned() else {
                    return actions;
                };
                actions.extend(self.select(Some(found.object_id)));
                tracing::debug!(id = found.object_id, handle = ?found.handle, "drag started");
                self.input = InputState::Dragging(DragState { obj_id: found.object_id, handle: found.handle, start: pt, orig });
            }
            None => {
                actions.extend(self.select(None));
                self.input = InputState::Marqueeing(SelectionBox::at(pt));
            }
        }
        if !actions.iter().any(|a| matches!(a, Action::RenderNeeded)) {
            actions.push(Action::RenderNeeded);
        }
        actions
    }

    pub fn on_pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        match &mut self.input {
            InputState::Marqueeing(selection) => {
                selection.end = pt;
                vec![Action::RenderNeeded]
            }
            InputState::Dragging(drag) => {
                let id = drag.obj_id;
                let patch = gesture::drag_patch(drag, pt, modifiers);
                self.update_object(id, patch)
            }
            InputState::Idle => {
                let cursor = hit::hit_test(&self.scene, pt).map_or("default", |h| h.handle.cursor());
                vec![Action::SetCursor(cursor.to_owned())]
            }
            InputState::EditingText { .. } => Vec::new(),
        }
    }

    /// End the active gesture. A marquee selects the topmost object whose
    /// unrotated bounds overlap it.
    pub fn on_pointer_up(&mut self, _pt: Point, _button: Button, _modifiers: Modifiers) -> Vec<Action> {
        match std::mem::take(&mut self.input) {
            InputState::Marqueeing(selection) => {
                let area = selection.normalized();
                let picked = self
                    .scene
                    .topmost_first()
                    .find(|o| Aabb::of_object(o).overlaps(&area))
                    .map(|o| o.id);
                let mut actions = self.select(picked);
                actions.push(Action::RenderNeeded);
                actions
            }
            InputState::Dragging(drag) => {
                tracing::debug!(id = drag.obj_id, "drag ended");
                vec![Action::RenderNeeded]
            }
            editing @ InputState::EditingText { .. } => {
                self.input = editing;
                Vec::new()
            }
            InputState::Idle => Vec::new(),
        }
    }

    /// The pointer left the canvas; treated exactly like pointer-up.
    pub fn on_pointer_leave(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.on_pointer_up(pt, Button::Primary, modifiers)
    }

    /// Double-activation opens the text editor on a text object under the pointer.
    pub fn on_double_click(&mut self, pt: Point) -> Vec<Action> {
        if !self.input.is_idle() {
            return Vec::new();
        }
        match hit::body_at(&self.scene, pt) {
            Some(obj) if obj.kind == ObjectKind::Text => {
                let id = obj.id;
                self.begin_text_edit(id)
            }
            _ => Vec::new(),
        }
    }

    // --- Keyboard input ---

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        if self.input.is_editing_text() {
            if key.is("Enter") && !modifiers.shift {
                return self.commit_text_edit();
            }
            return Vec::new();
        }
        if key.is("Delete") {
            if self.input.is_idle() {
                return self.delete_selected();
            }
            return Vec::new();
        }
        if modifiers.command() && key.is("]") {
            return self.bring_forward();
        }
        if modifiers.command() && key.is("[") {
            return self.send_backward();
        }
        Vec::new()
    }

    // --- Render ---

    /// Read-only view of everything the renderer needs.
    #[must_use]
    pub fn frame(&self) -> Frame<'_> {
        Frame {
            objects: self.scene.objects(),
            width: self.width,
            height: self.height,
            selected: self.scene.selected_id(),
            marquee: self.input.marquee(),
        }
    }

    /// Draw the current state onto `surface`.
    ///
    /// # Errors
    ///
    /// Returns the surface's error if a drawing call fails.
    pub fn render_into<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        render::draw(surface, &self.frame())
    }

    // --- Queries ---

    /// The currently selected object, if any.
    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.scene.selected_id()
    }

    /// Look up an object by ID.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.scene.get(id)
    }

    /// All objects bottom to top, for persistence.
    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        self.scene.objects()
    }

    // --- Internals ---

    fn apply_patch(&mut self, id: ObjectId, patch: ObjectPatch) -> Vec<Action> {
        if patch.is_empty() || !self.scene.update(id, &patch) {
            return Vec::new();
        }
        vec![Action::ObjectUpdated { id, patch }]
    }

    fn finish_text_edit(&mut self) -> Vec<Action> {
        let mut actions = self.commit_text_edit();
        actions.retain(|a| !matches!(a, Action::RenderNeeded));
        actions
    }

    /// Object addressed by the active gesture or edit.
    fn active_object(&self) -> Option<ObjectId> {
        match &self.input {
            InputState::Dragging(drag) => Some(drag.obj_id),
            InputState::EditingText { id, .. } => Some(*id),
            InputState::Idle | InputState::Marqueeing(_) => None,
        }
    }
}

/// The full canvas engine. Wraps `EngineCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    pub core: EngineCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element, sized to it.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        let core = EngineCore::with_size(canvas.width(), canvas.height());
        Self { canvas, core }
    }

    // --- Delegated data inputs ---

    pub fn load(&mut self, objects: Vec<CanvasObject>) -> Vec<Action> {
        self.core.load(objects)
    }

    pub fn add_shape(&mut self, kind: ObjectKind) -> Vec<Action> {
        self.core.add_shape(kind)
    }

    pub fn add_image(&mut self, bytes: Vec<u8>) -> Vec<Action> {
        self.core.add_image(bytes)
    }

    pub fn image_loaded(&mut self, id: ObjectId, bytes: Vec<u8>) {
        self.core.image_loaded(id, bytes);
    }

    pub fn poll_images(&mut self) -> Vec<Action> {
        self.core.poll_images()
    }

    pub fn set_draft(&mut self, text: &str) {
        self.core.set_draft(text);
    }

    pub fn on_blur(&mut self) -> Vec<Action> {
        self.core.on_blur()
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_down(pt, button, modifiers)
    }

    pub fn on_pointer_move(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_move(pt, modifiers)
    }

    pub fn on_pointer_up(&mut self, pt: Point, button: Button, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_up(pt, button, modifiers)
    }

    pub fn on_pointer_leave(&mut self, pt: Point, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_pointer_leave(pt, modifiers)
    }

    pub fn on_double_click(&mut self, pt: Point) -> Vec<Action> {
        self.core.on_double_click(pt)
    }

    pub fn on_key_down(&mut self, key: &Key, modifiers: Modifiers) -> Vec<Action> {
        self.core.on_key_down(key, modifiers)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let ctx: CanvasRenderingContext2d = self
            .canvas
            .get_context("2d")?
            .ok_or_else(|| JsValue::from_str("2d context unavailable"))?
            .dyn_into()?;
        self.core.render_into(&mut WebSurface::new(&ctx))
    }

    // --- Delegated queries ---

    #[must_use]
    pub fn selection(&self) -> Option<ObjectId> {
        self.core.selection()
    }

    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&CanvasObject> {
        self.core.object(id)
    }

    #[must_use]
    pub fn objects(&self) -> &[CanvasObject] {
        self.core.objects()
    }
}
