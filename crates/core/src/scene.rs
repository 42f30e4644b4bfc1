//! Reproducible description of an animation.
//!
//! A [`Scene`] captures everything needed to re-render a sequence: canvas
//! size, frame count and rate, square size, animation field name and
//! parameters, and background color. Rendering is deterministic, so two equal
//! scenes produce bit-identical frames.

use serde::{Deserialize, Serialize};

use crate::color::ColorMapper;
use crate::error::SquaresError;
use crate::grid::SquareGrid;
use crate::raster::FrameRasterizer;

/// Everything needed to reproduce an animation.
///
/// Missing keys in a JSON scene file take the [`Default`] values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Scene {
    pub width: usize,
    pub height: usize,
    pub frames: usize,
    pub fps: f64,
    pub square_size: f64,
    pub field: String,
    pub params: serde_json::Value,
    pub background: String,
}

impl Default for Scene {
    fn default() -> Self {
        Self {
            width: 1920,
            height: 1080,
            frames: 70,
            fps: 30.0,
            square_size: 100.0,
            field: "pulse".to_string(),
            params: serde_json::Value::Object(serde_json::Map::new()),
            background: "#000000".to_string(),
        }
    }
}

impl Scene {
    /// Creates a scene with default timing, field and background.
    pub fn new(width: usize, height: usize, square_size: f64) -> Self {
        Self {
            width,
            height,
            square_size,
            ..Self::default()
        }
    }

    /// Checks dimensions, timing, square size and background.
    pub fn validate(&self) -> Result<(), SquaresError> {
        if self.width == 0 || self.height == 0 {
            return Err(SquaresError::InvalidDimensions);
        }
        self.width
            .checked_mul(self.height)
            .ok_or(SquaresError::InvalidDimensions)?;
        if self.frames == 0 {
            return Err(SquaresError::InvalidScene(
                "frame count must be at least 1".into(),
            ));
        }
        if !(self.fps.is_finite() && self.fps > 0.0) {
            return Err(SquaresError::InvalidScene(format!(
                "fps must be positive and finite, got {}",
                self.fps
            )));
        }
        if !(self.square_size.is_finite() && self.square_size > 0.0) {
            return Err(SquaresError::InvalidScene(format!(
                "square size must be positive and finite, got {}",
                self.square_size
            )));
        }
        if !self.params.is_object() {
            return Err(SquaresError::InvalidScene(
                "params must be a JSON object".into(),
            ));
        }
        self.color_mapper()?;
        Ok(())
    }

    /// Simulation time of frame `index`, in seconds.
    pub fn time_at(&self, index: usize) -> f64 {
        index as f64 / self.fps
    }

    /// The initial square lattice for this canvas.
    pub fn grid(&self) -> Result<SquareGrid, SquaresError> {
        SquareGrid::covering(self.width, self.height, self.square_size)
    }

    /// A rasterizer sized to the canvas.
    pub fn rasterizer(&self) -> Result<FrameRasterizer, SquaresError> {
        FrameRasterizer::new(self.width, self.height)
    }

    /// Color mapper for the scene background.
    pub fn color_mapper(&self) -> Result<ColorMapper, SquaresError> {
        ColorMapper::from_hex(&self.background)
    }
}
