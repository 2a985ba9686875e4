//! Hex color parsing shared by the raster backend and the image filter.

#[cfg(test)]
#[path = "color_test.rs"]
mod color_test;

/// Error returned by [`Rgb::parse_hex`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ColorError {
    /// The string does not start with `#`.
    #[error("color must start with '#': {0}")]
    MissingHash(String),
    /// The digits are not 3 or 6 hex characters.
    #[error("invalid hex color: {0}")]
    InvalidHex(String),
}

/// An opaque 8-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const BLACK: Rgb = Rgb { r: 0, g: 0, b: 0 };
    pub const WHITE: Rgb = Rgb { r: 255, g: 255, b: 255 };

    #[must_use]
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Parse `#rrggbb` or the `#rgb` shorthand, case-insensitive.
    ///
    /// # Errors
    ///
    /// Returns [`ColorError`] when the string is not a hex color.
    pub fn parse_hex(s: &str) -> Result<Self, ColorError> {
        let trimmed = s.trim();
        let Some(digits) = trimmed.strip_prefix('#') else {
            return Err(ColorError::MissingHash(s.to_owned()));
        };
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(ColorError::InvalidHex(s.to_owned()));
        }
        let channel = |hex: &str| u8::from_str_radix(hex, 16).map_err(|_| ColorError::InvalidHex(s.to_owned()));
        match digits.len() {
            6 => Ok(Self::new(channel(&digits[0..2])?, channel(&digits[2..4])?, channel(&digits[4..6])?)),
            3 => {
                let expand = |i: usize| channel(&digits[i..=i]).map(|v| v * 17);
                Ok(Self::new(expand(0)?, expand(1)?, expand(2)?))
            }
            _ => Err(ColorError::InvalidHex(s.to_owned())),
        }
    }

    /// Format as lowercase `#rrggbb`.
    #[must_use]
    pub fn to_hex(self) -> String {
        format!("#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }

    /// Perceived luminance: `0.299 R + 0.587 G + 0.114 B`.
    #[must_use]
    pub fn luminance(self) -> f64 {
        // Integer weights keep grays exact: gray `n` has luminance exactly `n`.
        let weighted = 299 * u32::from(self.r) + 587 * u32::from(self.g) + 114 * u32::from(self.b);
        f64::from(weighted) / 1000.0
    }
}
