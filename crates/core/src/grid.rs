//! Owned row-major grid of squares covering the canvas.

use crate::error::SquaresError;
use crate::geometry::{Point, RotatedRect};

/// Upper bound on lattice size; tiny squares over a large canvas hit this.
const MAX_SQUARES: usize = 1 << 24;

/// Squares laid out on a regular lattice, stored row-major.
///
/// Rows run along y and columns along x; `squares[row * cols + col]`. The
/// rasterizer walks squares in exactly this order.
#[derive(Debug, Clone)]
pub struct SquareGrid {
    rows: usize,
    cols: usize,
    squares: Vec<RotatedRect>,
}

impl SquareGrid {
    /// Lays out unrotated squares of side `square_size` over a canvas.
    ///
    /// The lattice is symmetric about the canvas center (a square sits on the
    /// origin) and extends one and a half squares past every edge, so that
    /// squares which grow or turn still reach the border. With `n =
    /// ceil(extent / square_size / 2 + 1.5)` per axis there are `2n - 1`
    /// squares along that axis.
    pub fn covering(
        canvas_width: usize,
        canvas_height: usize,
        square_size: f64,
    ) -> Result<Self, SquaresError> {
        if canvas_width == 0 || canvas_height == 0 {
            return Err(SquaresError::InvalidDimensions);
        }
        if !(square_size.is_finite() && square_size > 0.0) {
            return Err(SquaresError::InvalidGeometry(format!(
                "square size {square_size} must be positive and finite"
            )));
        }

        let half_count = |extent: usize| (extent as f64 / square_size / 2.0 + 1.5).ceil() as usize;
        let half_cols = half_count(canvas_width);
        let half_rows = half_count(canvas_height);
        let span = |half: usize| half.checked_mul(2).and_then(|n| n.checked_sub(1));
        let cols = span(half_cols).ok_or(SquaresError::InvalidDimensions)?;
        let rows = span(half_rows).ok_or(SquaresError::InvalidDimensions)?;
        let len = rows
            .checked_mul(cols)
            .filter(|&n| n <= MAX_SQUARES)
            .ok_or(SquaresError::InvalidDimensions)?;

        let mut squares = Vec::with_capacity(len);
        for row in 0..rows {
            for col in 0..cols {
                let x = (col as f64 - (half_cols - 1) as f64) * square_size;
                let y = (row as f64 - (half_rows - 1) as f64) * square_size;
                squares.push(RotatedRect::square(Point::new(x, y), square_size)?);
            }
        }
        Ok(Self {
            rows,
            cols,
            squares,
        })
    }

    /// Wraps pre-built squares in row-major order.
    pub fn from_squares(
        rows: usize,
        cols: usize,
        squares: Vec<RotatedRect>,
    ) -> Result<Self, SquaresError> {
        let expected = rows.checked_mul(cols).ok_or(SquaresError::InvalidDimensions)?;
        if rows == 0 || cols == 0 || squares.len() != expected {
            return Err(SquaresError::DimensionMismatch {
                width: cols,
                height: rows,
                expected,
                got: squares.len(),
            });
        }
        Ok(Self {
            rows,
            cols,
            squares,
        })
    }

    /// A 1×1 grid holding `square`.
    pub fn single(square: RotatedRect) -> Self {
        Self {
            rows: 1,
            cols: 1,
            squares: vec![square],
        }
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn len(&self) -> usize {
        self.squares.len()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.is_empty()
    }

    pub fn get(&self, row: usize, col: usize) -> Option<&RotatedRect> {
        if row < self.rows && col < self.cols {
            self.squares.get(row * self.cols + col)
        } else {
            None
        }
    }

    /// `(row, col, square)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, &RotatedRect)> + '_ {
        let cols = self.cols;
        self.squares
            .iter()
            .enumerate()
            .map(move |(i, sq)| (i / cols, i % cols, sq))
    }

    /// `(row, col, square)` in row-major order, mutably.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, usize, &mut RotatedRect)> + '_ {
        let cols = self.cols;
        self.squares
            .iter_mut()
            .enumerate()
            .map(move |(i, sq)| (i / cols, i % cols, sq))
    }
}
