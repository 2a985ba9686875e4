//! Shared numeric constants for the canvas crate.

// ── Hit-testing ─────────────────────────────────────────────────

/// Half-size of a corner handle hit zone, and radius of the rotate handle hit zone.
pub const HANDLE_RADIUS_PX: f64 = 8.0;

/// Distance from the top edge of the box to the rotate handle center.
pub const ROTATE_HANDLE_OFFSET_PX: f64 = 24.0;

/// Vertical click tolerance on either side of a line's centerline.
pub const LINE_HIT_TOLERANCE_PX: f64 = 12.0;

// ── Geometry ────────────────────────────────────────────────────

/// Smallest width or height a resize may produce.
pub const MIN_OBJECT_SIZE_PX: f64 = 20.0;

/// Nominal height of a line object. Lines are only resized along their length.
pub const LINE_THICKNESS_PX: f64 = 4.0;

/// Positional offset applied to duplicated objects.
pub const DUPLICATE_OFFSET_PX: f64 = 20.0;

// ── Text ────────────────────────────────────────────────────────

/// Font size bounds for continuous controls and resize rescaling.
pub const MIN_FONT_SIZE: f64 = 8.0;
pub const MAX_FONT_SIZE: f64 = 72.0;

/// Line spacing as a multiple of font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.2;

/// Horizontal inset subtracted from the box width before wrapping.
pub const TEXT_WRAP_INSET_PX: f64 = 10.0;

/// Padding added around measured text when a text edit is committed.
pub const TEXT_PAD_X_PX: f64 = 20.0;
pub const TEXT_PAD_Y_PX: f64 = 10.0;

/// Smallest box a committed text edit may produce.
pub const TEXT_MIN_WIDTH_PX: f64 = 50.0;
pub const TEXT_MIN_HEIGHT_PX: f64 = 30.0;

/// Offset of the text-edit overlay from the object's top-left corner.
pub const TEXT_OVERLAY_MARGIN_PX: f64 = 5.0;

/// Per-character advance (as a multiple of font size) for fixed-advance measurement.
pub const FIXED_ADVANCE_FACTOR: f64 = 0.6;

// ── Rendering ───────────────────────────────────────────────────

/// Stroke width used for line objects.
pub const LINE_STROKE_PX: f64 = 3.0;

/// Selection dash segment length.
pub const SELECTION_DASH_PX: f64 = 4.0;

/// Drawn radius of the rotate handle.
pub const ROTATE_HANDLE_DRAW_RADIUS_PX: f64 = 6.0;

/// Default canvas size when the host does not provide one.
pub const DEFAULT_CANVAS_WIDTH: u32 = 800;
pub const DEFAULT_CANVAS_HEIGHT: u32 = 600;

// ── Image filter ────────────────────────────────────────────────

/// Pixels with luminance strictly below this become the target color.
pub const LUMINANCE_THRESHOLD: f64 = 128.0;
