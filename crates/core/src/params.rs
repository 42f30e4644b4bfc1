//! Lenient lookup of numeric field parameters in a JSON object.
//!
//! Scene files carry field parameters as free-form JSON. A missing key, a
//! non-numeric value or a non-object `params` all fall back to the field's
//! default rather than failing the render.

use serde_json::Value;

/// Reads `params[name]` as an `f64`, or `default` when absent or not a number.
///
/// Integer JSON values are widened, so `{"angle": 1}` reads as `1.0`.
pub fn param_f64(params: &Value, name: &str, default: f64) -> f64 {
    params.get(name).and_then(Value::as_f64).unwrap_or(default)
}
