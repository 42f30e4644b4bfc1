//! Per-frame rasterization of a square grid into a coverage field.
//!
//! Squares live in centered canvas coordinates; pixel `(px, py)` of the
//! output corresponds to the unit cell at `(px - width / 2, py - height / 2)`
//! (integer division), so the origin sits at the canvas center. Each square
//! only visits the cells of its bounding box clipped to the canvas.

use tracing::{debug, warn};

use crate::animation::{AnimationField, FieldSample, SquareView};
use crate::coverage::CoverageField;
use crate::error::SquaresError;
use crate::geometry::{PixelBounds, RotatedRect};
use crate::grid::SquareGrid;
use crate::overlap::{overlap, unit_cell};

/// Counters gathered while rasterizing.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    /// Squares drawn.
    pub squares: usize,
    /// Candidate pixel cells visited (bounding boxes clipped to the canvas).
    pub pixels: usize,
    /// Overlaps whose raw area was non-physical and got clamped.
    pub degenerate: usize,
}

impl FrameStats {
    fn absorb(&mut self, other: FrameStats) {
        self.squares += other.squares;
        self.pixels += other.pixels;
        self.degenerate += other.degenerate;
    }
}

/// Owns the coverage field for a fixed canvas and fills it frame by frame.
#[derive(Debug, Clone)]
pub struct FrameRasterizer {
    coverage: CoverageField,
    origin_x: i64,
    origin_y: i64,
}

impl FrameRasterizer {
    /// Creates a rasterizer for a `width` × `height` pixel canvas.
    ///
    /// Returns `SquaresError::InvalidDimensions` for zero or oversized canvases.
    pub fn new(width: usize, height: usize) -> Result<Self, SquaresError> {
        let coverage = CoverageField::new(width, height)?;
        let origin_x = i64::try_from(width / 2).map_err(|_| SquaresError::InvalidDimensions)?;
        let origin_y = i64::try_from(height / 2).map_err(|_| SquaresError::InvalidDimensions)?;
        Ok(Self {
            coverage,
            origin_x,
            origin_y,
        })
    }

    /// The field filled by the most recent frame.
    pub fn coverage(&self) -> &CoverageField {
        &self.coverage
    }

    /// The canvas as a box of cells in centered coordinates.
    pub fn canvas_bounds(&self) -> PixelBounds {
        PixelBounds {
            min_x: -self.origin_x,
            min_y: -self.origin_y,
            max_x: self.coverage.width() as i64 - self.origin_x,
            max_y: self.coverage.height() as i64 - self.origin_y,
        }
    }

    /// Renders one frame at time `t`.
    ///
    /// Samples the field for every square first. Then it clears the coverage
    /// and, in row-major grid order, applies each sample (size first, then
    /// rotation) and folds the square's exact per-pixel overlap into the
    /// coverage. Squares are mutated in place and keep their new state for the
    /// next frame.
    ///
    /// Returns `SquaresError::InvalidGeometry` if any sample has a
    /// non-finite rotation or a non-positive or non-finite size. In that case
    /// neither the grid nor the coverage is touched, so both still hold the
    /// previous frame.
    pub fn rasterize(
        &mut self,
        grid: &mut SquareGrid,
        t: f64,
        field: &dyn AnimationField,
    ) -> Result<FrameStats, SquaresError> {
        let samples = grid
            .iter()
            .map(|(row, col, square)| {
                let sample = field.sample(t, &SquareView::of(row, col, square));
                sample.validate().map(|()| sample)
            })
            .collect::<Result<Vec<FieldSample>, SquaresError>>()?;

        self.coverage.reset();
        let mut stats = FrameStats::default();
        for ((_, _, square), sample) in grid.iter_mut().zip(samples) {
            if let Some((width, height)) = sample.size {
                square.set_size(width, height)?;
            }
            square.set_rotation(sample.rotation)?;
            stats.absorb(self.accumulate(square));
        }

        debug!(
            t,
            squares = stats.squares,
            pixels = stats.pixels,
            degenerate = stats.degenerate,
            "frame rasterized"
        );
        if stats.degenerate > 0 {
            warn!(
                t,
                degenerate = stats.degenerate,
                "clamped non-physical overlap areas"
            );
        }
        Ok(stats)
    }

    /// Folds a single square into the current field without clearing it.
    pub fn draw(&mut self, square: &RotatedRect) -> FrameStats {
        self.accumulate(square)
    }

    fn accumulate(&mut self, square: &RotatedRect) -> FrameStats {
        let mut stats = FrameStats {
            squares: 1,
            ..FrameStats::default()
        };
        let Some(bounds) = square.bounding_box().intersect(self.canvas_bounds()) else {
            return stats;
        };

        let corners = square.corners();
        for (x, y) in bounds.cells() {
            let result = overlap(&corners, &unit_cell(x, y));
            if result.degenerate {
                stats.degenerate += 1;
            }
            self.coverage
                .combine(x + self.origin_x, y + self.origin_y, result.area);
            stats.pixels += 1;
        }
        stats
    }
}
