//! Pixel buffer conversion from [`CoverageField`] + [`ColorMapper`].
//!
//! Always available (no feature gate) so callers without the `png` feature
//! can still get at raw frame bytes.

use spinning_squares_core::color::ColorMapper;
use spinning_squares_core::coverage::CoverageField;

/// Maps coverage values through the color mapper to an RGB8 buffer.
///
/// Pixels are written row-major as three bytes each, so the buffer length is
/// `width * height * 3`.
pub fn coverage_to_rgb(field: &CoverageField, mapper: &ColorMapper) -> Vec<u8> {
    field
        .data()
        .iter()
        .flat_map(|&c| mapper.map_rgb(c))
        .collect()
}
