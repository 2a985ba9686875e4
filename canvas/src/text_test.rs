#![allow(clippy::float_cmp)]

use super::*;

fn width(s: &str) -> f64 {
    FixedAdvance.line_width(s, "Arial", 10.0)
}

// =============================================================
// FixedAdvance
// =============================================================

#[test]
fn fixed_advance_counts_characters() {
    assert_eq!(FixedAdvance.line_width("abcd", "Arial", 10.0), 24.0);
    assert_eq!(FixedAdvance.line_width("", "Arial", 10.0), 0.0);
}

#[test]
fn fixed_advance_counts_chars_not_bytes() {
    assert_eq!(FixedAdvance.line_width("éé", "Arial", 10.0), 12.0);
}

#[test]
fn measure_single_line_height_is_font_size() {
    let ext = FixedAdvance.measure("Hello", "Arial", 18.0);
    assert_eq!(ext.height, 18.0);
    assert!((ext.width - 54.0).abs() < 1e-9);
}

#[test]
fn measure_multi_line_uses_widest_line() {
    let ext = FixedAdvance.measure("ab\nabcdef\nabc", "Arial", 10.0);
    assert!((ext.width - 36.0).abs() < 1e-9);
    assert!((ext.height - (10.0 + 2.0 * 12.0)).abs() < 1e-9);
}

#[test]
fn font_css_formats_size_then_family() {
    assert_eq!(font_css("Arial", 18.0), "18px Arial");
}

// =============================================================
// wrap_lines
// =============================================================

#[test]
fn short_text_stays_on_one_line() {
    assert_eq!(wrap_lines("Hello World", 200.0, width), vec!["Hello World"]);
}

#[test]
fn overflowing_word_starts_next_line() {
    // "aaa bbb" is 42px wide at 6px per char.
    assert_eq!(wrap_lines("aaa bbb ccc", 40.0, width), vec!["aaa", "bbb", "ccc"]);
    assert_eq!(wrap_lines("aaa bbb ccc", 42.0, width), vec!["aaa bbb", "ccc"]);
}

#[test]
fn overlong_word_gets_its_own_line() {
    assert_eq!(wrap_lines("a enormousword b", 30.0, width), vec!["a", "enormousword", "b"]);
}

#[test]
fn empty_text_has_no_lines() {
    assert!(wrap_lines("   ", 100.0, width).is_empty());
}

#[test]
fn repeated_spaces_collapse() {
    assert_eq!(wrap_lines("a    b", 100.0, width), vec!["a b"]);
}

#[test]
fn newlines_always_break() {
    assert_eq!(wrap_lines("ab\ncd ef", 200.0, width), vec!["ab", "cd ef"]);
}

#[test]
fn blank_line_between_paragraphs_is_kept() {
    assert_eq!(wrap_lines("ab\n\ncd", 200.0, width), vec!["ab", "", "cd"]);
}

#[test]
fn wrapped_line_count_matches_measured_height() {
    let text = "one\ntwo\nthree";
    let lines = wrap_lines(text, 200.0, width);
    let ext = FixedAdvance.measure(text, "Arial", 10.0);
    assert_eq!(ext.height, block_height(u32::try_from(lines.len()).unwrap(), 10.0));
}

// =============================================================
// line_offsets
// =============================================================

#[test]
fn offsets_center_the_block() {
    assert_eq!(line_offsets(1, 10.0), vec![0.0]);
    let two = line_offsets(2, 10.0);
    assert!((two[0] + 6.0).abs() < 1e-9);
    assert!((two[1] - 6.0).abs() < 1e-9);
    let three = line_offsets(3, 10.0);
    assert!((three[0] + 12.0).abs() < 1e-9);
    assert!(three[1].abs() < 1e-9);
}
