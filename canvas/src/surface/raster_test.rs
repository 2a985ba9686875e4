use std::sync::Arc;

use image::{Rgba, RgbaImage};

use super::*;
use crate::doc::{CanvasObject, ObjectKind};
use crate::render::{Frame, draw};

// =============================================================
// Construction
// =============================================================

#[test]
fn rejects_zero_size() {
    assert!(matches!(RasterSurface::new(0, 10), Err(RasterError::InvalidSize { width: 0, height: 10 })));
}

#[test]
fn new_surface_is_transparent() {
    let s = RasterSurface::new(4, 4).unwrap();
    assert_eq!((s.width(), s.height()), (4, 4));
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
    assert_eq!(s.pixel(4, 0), None);
}

#[test]
fn rejects_garbage_font() {
    let s = RasterSurface::new(4, 4).unwrap();
    assert!(matches!(s.with_font(vec![1, 2, 3]), Err(RasterError::InvalidFont)));
}

#[test]
fn clear_fills_background() {
    let mut s = RasterSurface::new(4, 4).unwrap().with_background(Rgb::WHITE);
    s.clear(4.0, 4.0).unwrap();
    assert_eq!(s.pixel(2, 2), Some([255, 255, 255, 255]));
}

// =============================================================
// Drawing
// =============================================================

#[test]
fn fill_rect_paints_pixels() {
    let mut s = RasterSurface::new(20, 20).unwrap();
    s.fill_rect(Rect::new(5.0, 5.0, 10.0, 10.0), "#ff0000").unwrap();
    assert_eq!(s.pixel(10, 10), Some([255, 0, 0, 255]));
    assert_eq!(s.pixel(1, 1), Some([0, 0, 0, 0]));
}

#[test]
fn transform_moves_drawing() {
    let mut s = RasterSurface::new(40, 40).unwrap();
    s.save();
    s.translate(30.0, 30.0).unwrap();
    s.fill_rect(Rect::centered(6.0, 6.0), "#00ff00").unwrap();
    s.restore();
    assert_eq!(s.pixel(30, 30), Some([0, 255, 0, 255]));
    assert_eq!(s.pixel(3, 3), Some([0, 0, 0, 0]));
}

#[test]
fn unparseable_color_paints_black() {
    let mut s = RasterSurface::new(10, 10).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 10.0, 10.0), "tomato").unwrap();
    assert_eq!(s.pixel(5, 5), Some([0, 0, 0, 255]));
}

#[test]
fn text_without_font_draws_nothing() {
    let mut s = RasterSurface::new(40, 40).unwrap();
    s.fill_text("Hello", Point::new(20.0, 20.0), "Arial", 18.0, "#000000").unwrap();
    assert!(s.to_rgba_image().pixels().all(|p| p.0[3] == 0));
    assert!((s.text_width("Hello", "Arial", 10.0) - 30.0).abs() < 1e-9);
}

#[test]
fn bitmap_scales_into_rect() {
    let mut s = RasterSurface::new(20, 20).unwrap();
    let bmp: Bitmap = Arc::new(RgbaImage::from_pixel(2, 2, Rgba([0, 0, 255, 255])));
    s.draw_bitmap(&bmp, Rect::new(0.0, 0.0, 10.0, 10.0)).unwrap();
    assert_eq!(s.pixel(5, 5), Some([0, 0, 255, 255]));
    assert_eq!(s.pixel(15, 15), Some([0, 0, 0, 0]));
}

// =============================================================
// Full frame
// =============================================================

#[test]
fn renders_scene_to_pixels() {
    let mut s = RasterSurface::new(300, 300).unwrap().with_background(Rgb::WHITE);
    let rect = CanvasObject::with_defaults(1, ObjectKind::Rect);
    let objects = [rect];
    let frame = Frame { objects: &objects, width: 300.0, height: 300.0, selected: None, marquee: None };
    draw(&mut s, &frame).unwrap();
    assert_eq!(s.pixel(160, 140), Some([0x34, 0x98, 0xdb, 255]));
    assert_eq!(s.pixel(20, 20), Some([255, 255, 255, 255]));
}

#[test]
fn exports_png() {
    let s = RasterSurface::new(8, 8).unwrap();
    let png = s.encode_png().unwrap();
    assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    assert_eq!(s.to_rgba_image().dimensions(), (8, 8));
}

#[test]
fn exported_png_keeps_straight_alpha_pixels() {
    let mut s = RasterSurface::new(4, 4).unwrap();
    s.fill_rect(Rect::new(0.0, 0.0, 4.0, 4.0), "#ff0000").unwrap();
    let decoded = crate::filter::decode(&s.encode_png().unwrap()).unwrap();
    assert_eq!(decoded.get_pixel(1, 1).0, [255, 0, 0, 255]);
}
