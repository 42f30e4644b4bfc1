//! Animation fields: pure functions from time and square to rotation and size.
//!
//! A field sees each square through a [`SquareView`] and answers with a
//! [`FieldSample`]. Fields hold their constants as plain struct fields and
//! have no interior state, so the same `(t, square)` always yields the same
//! sample.
//!
//! The built-in fields share a [`Ramp`]: a wave that leaves the canvas
//! center and eases each square from 0 to `angle` over `duration` seconds,
//! starting `delay` seconds per pixel of distance from the center.

use std::f64::consts::{FRAC_PI_2, SQRT_2};

use serde_json::{json, Value};

use crate::error::SquaresError;
use crate::geometry::{validate_extent, validate_rotation, Point, RotatedRect};
use crate::params::param_f64;

/// Default wave delay in seconds per pixel of distance from the center.
const DEFAULT_DELAY: f64 = 0.001;
/// Default time for one square to complete its ramp.
const DEFAULT_DURATION: f64 = 1.0;
/// Default final ramp angle (a quarter turn).
const DEFAULT_ANGLE: f64 = FRAC_PI_2;

/// Read-only description of a square handed to an [`AnimationField`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SquareView {
    pub row: usize,
    pub col: usize,
    pub center: Point,
    pub width: f64,
    pub height: f64,
    pub rotation: f64,
}

impl SquareView {
    /// Snapshot of `rect` at grid position `(row, col)`.
    pub fn of(row: usize, col: usize, rect: &RotatedRect) -> Self {
        Self {
            row,
            col,
            center: rect.center(),
            width: rect.width(),
            height: rect.height(),
            rotation: rect.rotation(),
        }
    }

    /// Distance of the square's center from the canvas center.
    pub fn distance_from_origin(&self) -> f64 {
        self.center.length()
    }
}

/// What a field asks of one square for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSample {
    /// Rotation in radians (any range).
    pub rotation: f64,
    /// New `(width, height)`, or `None` to keep the current size.
    pub size: Option<(f64, f64)>,
}

impl FieldSample {
    pub fn rotation(rotation: f64) -> Self {
        Self {
            rotation,
            size: None,
        }
    }

    pub fn with_size(mut self, width: f64, height: f64) -> Self {
        self.size = Some((width, height));
        self
    }

    /// Fails with `InvalidGeometry` if applying this sample would be rejected
    /// by [`RotatedRect::set_size`] or [`RotatedRect::set_rotation`].
    pub fn validate(&self) -> Result<(), SquaresError> {
        validate_rotation(self.rotation)?;
        if let Some((width, height)) = self.size {
            validate_extent(width, height)?;
        }
        Ok(())
    }
}

/// A pure `(time, square) -> sample` function driving the animation.
///
/// This trait is object-safe so the rasterizer can take `&dyn AnimationField`.
pub trait AnimationField {
    /// Sample the field for `square` at simulation time `t` (seconds).
    fn sample(&self, t: f64, square: &SquareView) -> FieldSample;

    /// Current parameter values as a JSON object.
    fn params(&self) -> Value;

    /// Schema describing the parameters, their types, ranges, and defaults.
    fn param_schema(&self) -> Value;
}

/// Eased wave shared by the built-in fields.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ramp {
    /// Seconds of delay per pixel of distance from the canvas center.
    pub delay: f64,
    /// Seconds one square takes to go from 0 to `angle`. Non-positive means instant.
    pub duration: f64,
    /// Final angle in radians.
    pub angle: f64,
}

impl Default for Ramp {
    fn default() -> Self {
        Self {
            delay: DEFAULT_DELAY,
            duration: DEFAULT_DURATION,
            angle: DEFAULT_ANGLE,
        }
    }
}

impl Ramp {
    /// Extracts ramp parameters from a JSON object, falling back to defaults.
    pub fn from_json(params: &Value) -> Self {
        Self {
            delay: param_f64(params, "delay", DEFAULT_DELAY),
            duration: param_f64(params, "duration", DEFAULT_DURATION),
            angle: param_f64(params, "angle", DEFAULT_ANGLE),
        }
    }

    /// Eased progress in [0, 1] for a square `distance` away at time `t`.
    pub fn phase(&self, t: f64, distance: f64) -> f64 {
        let elapsed = t - distance * self.delay;
        let linear = if self.duration > 0.0 {
            (elapsed / self.duration).clamp(0.0, 1.0)
        } else if elapsed > 0.0 {
            1.0
        } else {
            0.0
        };
        (linear * FRAC_PI_2).sin()
    }

    /// Ramp angle for a square `distance` away at time `t`.
    pub fn angle_at(&self, t: f64, distance: f64) -> f64 {
        self.phase(t, distance) * self.angle
    }

    fn to_json(self) -> Value {
        json!({
            "delay": self.delay,
            "duration": self.duration,
            "angle": self.angle,
        })
    }

    fn schema() -> Value {
        json!({
            "delay": {
                "type": "number",
                "default": DEFAULT_DELAY,
                "min": 0.0,
                "max": 0.1,
                "description": "Wave delay in seconds per pixel of distance from the center"
            },
            "duration": {
                "type": "number",
                "default": DEFAULT_DURATION,
                "min": 0.0,
                "max": 10.0,
                "description": "Seconds each square takes to finish its ramp"
            },
            "angle": {
                "type": "number",
                "default": DEFAULT_ANGLE,
                "min": 0.0,
                "max": 6.283185307179586,
                "description": "Final ramp angle in radians"
            }
        })
    }
}

/// Rotates each square along the ramp; sizes are left alone.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct SpinField {
    pub ramp: Ramp,
}

impl SpinField {
    pub fn from_json(params: &Value) -> Self {
        Self {
            ramp: Ramp::from_json(params),
        }
    }
}

impl AnimationField for SpinField {
    fn sample(&self, t: f64, square: &SquareView) -> FieldSample {
        FieldSample::rotation(self.ramp.angle_at(t, square.distance_from_origin()))
    }

    fn params(&self) -> Value {
        self.ramp.to_json()
    }

    fn param_schema(&self) -> Value {
        Ramp::schema()
    }
}

/// Keeps squares axis-aligned and swells them while the ramp passes.
///
/// Side length is `base_size * (sin(2θ) / (2√2) + 1)` where θ is the ramp
/// angle, so with the default quarter-turn ramp a square grows by about 35%
/// at mid-ramp and returns to `base_size` when the wave has passed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PulseField {
    pub ramp: Ramp,
    pub base_size: f64,
}

impl PulseField {
    pub fn new(base_size: f64) -> Self {
        Self {
            ramp: Ramp::default(),
            base_size,
        }
    }

    /// `base_size` defaults to the scene's square size when absent from `params`.
    pub fn from_json(square_size: f64, params: &Value) -> Self {
        Self {
            ramp: Ramp::from_json(params),
            base_size: param_f64(params, "base_size", square_size),
        }
    }

    /// Side length at ramp angle `theta`.
    pub fn side_at(&self, theta: f64) -> f64 {
        self.base_size * ((2.0 * theta).sin() / (2.0 * SQRT_2) + 1.0)
    }
}

impl AnimationField for PulseField {
    fn sample(&self, t: f64, square: &SquareView) -> FieldSample {
        let side = self.side_at(self.ramp.angle_at(t, square.distance_from_origin()));
        FieldSample::rotation(0.0).with_size(side, side)
    }

    fn params(&self) -> Value {
        let mut params = self.ramp.to_json();
        params["base_size"] = json!(self.base_size);
        params
    }

    fn param_schema(&self) -> Value {
        let mut schema = Ramp::schema();
        schema["base_size"] = json!({
            "type": "number",
            "default": "scene square size",
            "min": 0.0,
            "description": "Side length before and after the wave passes"
        });
        schema
    }
}

/// Holds every square unrotated at its current size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct StillField;

impl AnimationField for StillField {
    fn sample(&self, _t: f64, _square: &SquareView) -> FieldSample {
        FieldSample::rotation(0.0)
    }

    fn params(&self) -> Value {
        json!({})
    }

    fn param_schema(&self) -> Value {
        json!({})
    }
}
