//! PNG output of a single coverage field.
//!
//! Feature-gated behind `png` (default on). The pixel conversion itself lives
//! in [`crate::pixel`].

use std::path::Path;

use spinning_squares_core::color::ColorMapper;
use spinning_squares_core::coverage::CoverageField;
use spinning_squares_core::error::SquaresError;

use crate::pixel::coverage_to_rgb;

/// Writes a coverage field as an RGB PNG, mapping values through `mapper`.
///
/// Returns `SquaresError::InvalidDimensions` if the field dimensions overflow
/// `u32`, or `SquaresError::Io` on write failure.
pub fn write_png(
    field: &CoverageField,
    mapper: &ColorMapper,
    path: &Path,
) -> Result<(), SquaresError> {
    let rgb = coverage_to_rgb(field, mapper);
    let w = u32::try_from(field.width()).map_err(|_| SquaresError::InvalidDimensions)?;
    let h = u32::try_from(field.height()).map_err(|_| SquaresError::InvalidDimensions)?;
    let img = image::RgbImage::from_raw(w, h, rgb)
        .ok_or_else(|| SquaresError::Io("RGB buffer size mismatch".into()))?;
    img.save_with_format(path, image::ImageFormat::Png)
        .map_err(|e| SquaresError::Io(format!("{}: {e}", path.display())))
}
