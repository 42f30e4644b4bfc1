//! Coverage-to-color mapping and packed RGB helpers.
//!
//! Colors are packed as `0xRRGGBB` in a `u32`; the top byte is always zero.
//! Backgrounds are written as `"#rrggbb"` hex strings in scene files.

use crate::error::SquaresError;

const RGB_MASK: u32 = 0x00ff_ffff;

/// Parses a hex color string like "#ff00aa" or "ff00aa" (case insensitive)
/// into a packed `0xRRGGBB` value.
///
/// Returns `SquaresError::InvalidColor` if the input is not a valid 6-digit hex color.
pub fn parse_hex(hex: &str) -> Result<u32, SquaresError> {
    let digits = hex.strip_prefix('#').unwrap_or(hex);
    if digits.len() != 6 {
        return Err(SquaresError::InvalidColor(format!(
            "expected 6 hex digits, got {}",
            digits.len()
        )));
    }
    if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(SquaresError::InvalidColor(format!(
            "invalid hex color '{hex}'"
        )));
    }
    u32::from_str_radix(digits, 16)
        .map_err(|e| SquaresError::InvalidColor(format!("invalid hex color '{hex}': {e}")))
}

/// Formats a packed color as `"#rrggbb"`.
pub fn to_hex(rgb: u32) -> String {
    format!("#{:06x}", rgb & RGB_MASK)
}

/// Splits a packed color into `[r, g, b]` bytes.
pub fn unpack(rgb: u32) -> [u8; 3] {
    [(rgb >> 16) as u8, (rgb >> 8) as u8, rgb as u8]
}

/// Maps coverage in [0, 1] to a packed color over a fixed background.
///
/// Each channel of the inverted background is scaled by `1 - coverage`
/// (truncating) and the result is inverted back, so coverage 0 yields the
/// background and coverage 1 yields white.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ColorMapper {
    background: u32,
}

impl ColorMapper {
    pub fn new(background: u32) -> Self {
        Self {
            background: background & RGB_MASK,
        }
    }

    /// Builds a mapper from a `"#rrggbb"` background.
    pub fn from_hex(hex: &str) -> Result<Self, SquaresError> {
        parse_hex(hex).map(Self::new)
    }

    pub fn background(&self) -> u32 {
        self.background
    }

    /// Packed `0xRRGGBB` color for `coverage`. NaN is treated as 0.
    pub fn map(&self, coverage: f64) -> u32 {
        let c = if coverage.is_nan() {
            0.0
        } else {
            coverage.clamp(0.0, 1.0)
        };
        let inverse = !self.background;
        let channel = |shift: u32| {
            let base = ((inverse >> shift) & 0xff) as f64;
            (((1.0 - c) * base) as u32) & 0xff
        };
        let scaled = (channel(16) << 16) | (channel(8) << 8) | channel(0);
        !scaled & RGB_MASK
    }

    /// `[r, g, b]` bytes for `coverage`.
    pub fn map_rgb(&self, coverage: f64) -> [u8; 3] {
        unpack(self.map(coverage))
    }
}
