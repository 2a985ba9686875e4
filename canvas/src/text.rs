//! Text layout: greedy word wrapping and text measurement.

#[cfg(test)]
#[path = "text_test.rs"]
mod text_test;

use crate::consts::{FIXED_ADVANCE_FACTOR, LINE_HEIGHT_FACTOR};

/// Measured size of a (possibly multi-line) string.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextExtent {
    pub width: f64,
    pub height: f64,
}

/// Something that can measure text in a given font.
pub trait TextMeasure {
    /// Width of a single line of `text`.
    fn line_width(&self, text: &str, font: &str, font_size: f64) -> f64;

    /// Extent of `text`, where explicit newlines start new lines.
    fn measure(&self, text: &str, font: &str, font_size: f64) -> TextExtent {
        let mut width: f64 = 0.0;
        let mut lines = 0_u32;
        for line in text.split('\n') {
            width = width.max(self.line_width(line, font, font_size));
            lines += 1;
        }
        TextExtent { width, height: block_height(lines.max(1), font_size) }
    }
}

/// Fixed-advance measurement: every character is `0.6 * font_size` wide.
///
/// Deterministic regardless of installed fonts.
#[derive(Debug, Clone, Copy, Default)]
pub struct FixedAdvance;

impl TextMeasure for FixedAdvance {
    #[allow(clippy::cast_precision_loss)]
    fn line_width(&self, text: &str, _font: &str, font_size: f64) -> f64 {
        text.chars().count() as f64 * font_size * FIXED_ADVANCE_FACTOR
    }
}

/// Height of `lines` stacked lines: one font size plus one line step per extra line.
#[must_use]
pub fn block_height(lines: u32, font_size: f64) -> f64 {
    font_size + f64::from(lines.saturating_sub(1)) * font_size * LINE_HEIGHT_FACTOR
}

/// CSS font shorthand for a family and pixel size.
#[must_use]
pub fn font_css(font: &str, font_size: f64) -> String {
    format!("{font_size}px {font}")
}

/// Greedy word wrap.
///
/// Words accumulate onto the current line while `current + " " + word` fits
/// within `max_width`; on overflow the current line is committed and the
/// overflowing word starts the next one. A single word wider than
/// `max_width` still gets its own line. Explicit newlines always break, and
/// blank lines between paragraphs are kept, matching [`TextMeasure::measure`].
pub fn wrap_lines<F>(text: &str, max_width: f64, mut width_of: F) -> Vec<String>
where
    F: FnMut(&str) -> f64,
{
    if text.trim().is_empty() {
        return Vec::new();
    }
    let mut lines = Vec::new();
    for paragraph in text.split('\n') {
        let mut current = String::new();
        for word in paragraph.split_whitespace() {
            if current.is_empty() {
                current.push_str(word);
                continue;
            }
            let candidate = format!("{current} {word}");
            if width_of(&candidate) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_owned()));
            }
        }
        lines.push(current);
    }
    lines
}

/// Vertical offsets (relative to the block center) of each line's middle baseline.
#[must_use]
#[allow(clippy::cast_precision_loss)]
pub fn line_offsets(count: usize, font_size: f64) -> Vec<f64> {
    let step = font_size * LINE_HEIGHT_FACTOR;
    let start = -(count.saturating_sub(1) as f64) * step / 2.0;
    (0..count).map(|i| start + i as f64 * step).collect()
}
