//! Input model: modifier keys, mouse buttons, keys, and the gesture state machine.
//!
//! `Modifiers` travels with every pointer event so the resize computation never
//! reads ambient keyboard state. `InputState` is the active gesture tracked
//! between pointer-down and pointer-up, or the text-edit mode, carrying all
//! context needed to compute updates from the frozen pointer-down snapshot.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::doc::{CanvasObject, ObjectId};
use crate::geom::{Aabb, Point};
use crate::hit::Handle;

/// Keyboard/mouse modifier keys held during an event.
#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Modifiers {
    /// Shift key is held.
    pub shift: bool,
    /// Ctrl key is held.
    pub ctrl: bool,
    /// Alt / Option key is held.
    pub alt: bool,
    /// Meta / Command key is held.
    pub meta: bool,
}

impl Modifiers {
    /// Ctrl on most platforms, Cmd on macOS.
    #[must_use]
    pub fn command(self) -> bool {
        self.ctrl || self.meta
    }
}

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// A keyboard key.
///
/// The inner string holds the key name as reported by the browser (e.g. `"Delete"`, `"]"`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Key(pub String);

impl Key {
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self(name.to_owned())
    }

    #[must_use]
    pub fn is(&self, name: &str) -> bool {
        self.0 == name
    }
}

/// Context for one drag gesture.
///
/// All updates are computed from `orig` plus the live pointer, never from the
/// partially updated object, so intermediate moves do not compound.
#[derive(Debug, Clone)]
pub struct DragState {
    /// Id of the object being dragged.
    pub obj_id: ObjectId,
    /// Which part of the object was grabbed.
    pub handle: Handle,
    /// Pointer position at pointer-down.
    pub start: Point,
    /// Full snapshot of the object at pointer-down.
    pub orig: CanvasObject,
}

/// The in-progress marquee rectangle. Never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectionBox {
    pub start: Point,
    pub end: Point,
}

impl SelectionBox {
    /// A zero-size box at `p`.
    #[must_use]
    pub fn at(p: Point) -> Self {
        Self { start: p, end: p }
    }

    /// The box with min/max corners regardless of drag direction.
    #[must_use]
    pub fn normalized(&self) -> Aabb {
        Aabb::from_corners(self.start, self.end)
    }
}

/// Internal state for the input state machine.
#[derive(Debug, Clone, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// The user is moving, resizing, or rotating an object.
    Dragging(DragState),
    /// The user is dragging out a selection rectangle on empty space.
    Marqueeing(SelectionBox),
    /// The text-edit overlay is open over a text object.
    EditingText {
        /// Id of the text object being edited.
        id: ObjectId,
        /// Overlay contents; not reflected in the rendered scene until commit.
        draft: String,
    },
}

impl InputState {
    /// The marquee box, if one is being dragged out.
    #[must_use]
    pub fn marquee(&self) -> Option<SelectionBox> {
        match self {
            Self::Marqueeing(b) => Some(*b),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_editing_text(&self) -> bool {
        matches!(self, Self::EditingText { .. })
    }

    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}
