//! Canvas engine for the label/template designer.
//!
//! This crate owns the interactive core of the designer: a small ordered scene
//! of label objects, the gesture state machine that turns pointer and keyboard
//! input into scene mutations, hit-testing against rotated boxes, the
//! renderer, and the two-tone image filter used for e-ink style labels. The
//! host page is responsible only for wiring DOM events to the engine, hosting
//! the text-edit overlay, fetching remote images, and persisting the resulting
//! object list.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level engine and testable [`engine::EngineCore`] |
//! | [`doc`] | Label objects and the ordered [`doc::Scene`] store |
//! | [`geom`] | Points and rotated-frame transforms |
//! | [`gesture`] | Move, resize, and rotate math for drags |
//! | [`hit`] | Handle and body hit-testing |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`render`] | Scene rendering onto any [`surface::Surface`] |
//! | [`surface`] | Drawing backends (display list, raster, browser 2D context) |
//! | [`text`] | Word wrapping and text measurement |
//! | [`filter`] | Threshold stencil filter and bitmap codecs |
//! | [`color`] | Hex color parsing |
//! | [`consts`] | Shared numeric constants (handle sizes, minimum sizes, etc.) |

pub mod color;
pub mod consts;
pub mod doc;
pub mod engine;
pub mod filter;
pub mod geom;
pub mod gesture;
pub mod hit;
pub mod input;
pub mod render;
pub mod surface;
pub mod text;
