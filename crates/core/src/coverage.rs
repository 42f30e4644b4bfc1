//! Per-pixel coverage accumulator.
//!
//! A `CoverageField` stores `width * height` f64 values in row-major order,
//! one per output pixel, addressed in pixel coordinates (origin top-left).
//! Contributions are folded in with the absolute difference, so coverage from
//! overlapping squares cancels instead of saturating.

use crate::error::SquaresError;

/// Folds a new contribution into an accumulated value: `|acc - overlap|`.
///
/// Order-dependent once three or more contributions meet in a cell, so
/// callers must feed contributions in a fixed order for reproducible output.
pub fn fold_difference(acc: f64, overlap: f64) -> f64 {
    (acc - overlap).abs()
}

/// A dense 2D grid of coverage values, zeroed at the start of every frame.
#[derive(Debug, Clone)]
pub struct CoverageField {
    width: usize,
    height: usize,
    data: Vec<f64>,
}

impl CoverageField {
    /// Creates a zero-filled field of the given dimensions.
    ///
    /// Returns `SquaresError::InvalidDimensions` if either dimension is zero
    /// or if `width * height` overflows `usize`.
    pub fn new(width: usize, height: usize) -> Result<Self, SquaresError> {
        let len = checked_len(width, height)?;
        Ok(Self {
            width,
            height,
            data: vec![0.0; len],
        })
    }

    /// Creates a field from a pre-built row-major buffer.
    ///
    /// Values are stored as given; the caller keeps them in [0, 1].
    pub fn from_data(width: usize, height: usize, data: Vec<f64>) -> Result<Self, SquaresError> {
        let expected = checked_len(width, height)?;
        if data.len() != expected {
            return Err(SquaresError::DimensionMismatch {
                width,
                height,
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            width,
            height,
            data,
        })
    }

    /// Field width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Field height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Read-only access to the underlying row-major data.
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Zeroes every cell.
    pub fn reset(&mut self) {
        self.data.fill(0.0);
    }

    fn index(&self, x: i64, y: i64) -> Option<usize> {
        let xi = usize::try_from(x).ok().filter(|&v| v < self.width)?;
        let yi = usize::try_from(y).ok().filter(|&v| v < self.height)?;
        Some(yi * self.width + xi)
    }

    /// Value at pixel `(x, y)`, or `None` outside the field.
    pub fn get(&self, x: i64, y: i64) -> Option<f64> {
        self.index(x, y).map(|i| self.data[i])
    }

    /// Folds `overlap` into pixel `(x, y)` with [`fold_difference`].
    ///
    /// Coordinates outside the field are ignored, since bounding boxes may
    /// reach past the canvas edges.
    pub fn combine(&mut self, x: i64, y: i64, overlap: f64) {
        if let Some(i) = self.index(x, y) {
            self.data[i] = fold_difference(self.data[i], overlap);
        }
    }

    /// Iterates over all cells yielding `(x, y, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        self.data.iter().enumerate().map(|(i, &v)| {
            let x = i % self.width;
            let y = i / self.width;
            (x, y, v)
        })
    }
}

fn checked_len(width: usize, height: usize) -> Result<usize, SquaresError> {
    if width == 0 || height == 0 {
        return Err(SquaresError::InvalidDimensions);
    }
    width
        .checked_mul(height)
        .ok_or(SquaresError::InvalidDimensions)
}
