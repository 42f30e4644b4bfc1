#![deny(unsafe_code)]
//! Core geometry and rasterization for the spinning-squares renderer.
//!
//! Provides the `RotatedRect` model with cached corners and pixel bounds,
//! exact convex polygon overlap (`overlap`), the `CoverageField`
//! accumulator, the `ColorMapper`, the `AnimationField` trait with its
//! built-in fields, the `SquareGrid` lattice, the `FrameRasterizer`, and the
//! serializable `Scene` description.

pub mod animation;
pub mod color;
pub mod coverage;
pub mod error;
pub mod geometry;
pub mod grid;
pub mod overlap;
pub mod params;
pub mod raster;
pub mod scene;

pub use animation::{AnimationField, FieldSample, PulseField, SpinField, SquareView, StillField};
pub use color::ColorMapper;
pub use coverage::CoverageField;
pub use error::SquaresError;
pub use geometry::{PixelBounds, Point, RotatedRect};
pub use grid::SquareGrid;
pub use overlap::Overlap;
pub use raster::{FrameRasterizer, FrameStats};
pub use scene::Scene;
