#![deny(unsafe_code)]
//! Field registry and frame output for the spinning-squares renderer.
//!
//! Maps animation field names to implementations, converts coverage fields
//! to RGB pixels, and (behind the default `png` feature) writes frames and
//! whole sequences to disk. The CLI depends on this crate so name dispatch
//! lives in one place.

pub mod pixel;

#[cfg(feature = "png")]
pub mod sequence;
#[cfg(feature = "png")]
pub mod snapshot;

use serde_json::Value;
use spinning_squares_core::animation::{
    AnimationField, FieldSample, PulseField, SpinField, SquareView, StillField,
};
use spinning_squares_core::error::SquaresError;

/// All available field names.
const FIELD_NAMES: &[&str] = &["pulse", "spin", "still"];

/// Enumeration of the built-in animation fields.
///
/// Use [`FieldKind::from_name`] for string-based construction from a scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldKind {
    /// Squares swell and shrink as the wave passes.
    Pulse(PulseField),
    /// Squares turn a quarter as the wave passes.
    Spin(SpinField),
    /// Squares stay put.
    Still(StillField),
}

impl FieldKind {
    /// Constructs a field by name.
    ///
    /// `square_size` seeds size-dependent defaults. Returns
    /// `SquaresError::UnknownField` if the name is not recognized.
    pub fn from_name(name: &str, square_size: f64, params: &Value) -> Result<Self, SquaresError> {
        match name {
            "pulse" => Ok(FieldKind::Pulse(PulseField::from_json(square_size, params))),
            "spin" => Ok(FieldKind::Spin(SpinField::from_json(params))),
            "still" => Ok(FieldKind::Still(StillField)),
            _ => Err(SquaresError::UnknownField(name.to_string())),
        }
    }

    /// Returns a slice of all recognized field names.
    pub fn list_fields() -> &'static [&'static str] {
        FIELD_NAMES
    }

    pub fn name(&self) -> &'static str {
        match self {
            FieldKind::Pulse(_) => "pulse",
            FieldKind::Spin(_) => "spin",
            FieldKind::Still(_) => "still",
        }
    }
}

impl AnimationField for FieldKind {
    fn sample(&self, t: f64, square: &SquareView) -> FieldSample {
        match self {
            FieldKind::Pulse(f) => f.sample(t, square),
            FieldKind::Spin(f) => f.sample(t, square),
            FieldKind::Still(f) => f.sample(t, square),
        }
    }

    fn params(&self) -> Value {
        match self {
            FieldKind::Pulse(f) => f.params(),
            FieldKind::Spin(f) => f.params(),
            FieldKind::Still(f) => f.params(),
        }
    }

    fn param_schema(&self) -> Value {
        match self {
            FieldKind::Pulse(f) => f.param_schema(),
            FieldKind::Spin(f) => f.param_schema(),
            FieldKind::Still(f) => f.param_schema(),
        }
    }
}
