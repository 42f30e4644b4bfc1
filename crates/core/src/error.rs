//! Error types for the spinning-squares core.

use thiserror::Error;

/// Errors produced by geometry, coverage and scene operations.
#[derive(Debug, Error)]
pub enum SquaresError {
    /// A rectangle was given a non-positive or non-finite extent, or a
    /// non-finite center or rotation.
    #[error("invalid geometry: {0}")]
    InvalidGeometry(String),

    /// Width or height was zero (or overflowed) when creating a field or canvas.
    #[error("invalid dimensions: width and height must be non-zero")]
    InvalidDimensions,

    /// A data buffer did not match the declared field dimensions.
    #[error("dimension mismatch: ({width}, {height}) needs {expected} values, got {got}")]
    DimensionMismatch {
        width: usize,
        height: usize,
        expected: usize,
        got: usize,
    },

    /// A scene description failed validation.
    #[error("invalid scene: {0}")]
    InvalidScene(String),

    /// A color string could not be parsed.
    #[error("invalid color: {0}")]
    InvalidColor(String),

    /// The requested animation field is not registered.
    #[error("unknown animation field: {0}")]
    UnknownField(String),

    /// Writing frames or preparing the output directory failed.
    #[error("i/o error: {0}")]
    Io(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_geometry_includes_reason() {
        let err = SquaresError::InvalidGeometry("rotation NaN must be finite".into());
        let msg = format!("{err}");
        assert!(msg.starts_with("invalid geometry"), "{msg}");
        assert!(msg.contains("rotation NaN"), "missing reason in: {msg}");
    }

    #[test]
    fn invalid_dimensions_displays_readable_message() {
        let msg = format!("{}", SquaresError::InvalidDimensions);
        assert!(
            msg.contains("width") && msg.contains("height"),
            "expected message mentioning width and height, got: {msg}"
        );
    }

    #[test]
    fn dimension_mismatch_includes_counts() {
        let err = SquaresError::DimensionMismatch {
            width: 3,
            height: 2,
            expected: 6,
            got: 5,
        };
        let msg = format!("{err}");
        assert!(msg.contains('6'), "missing expected count in: {msg}");
        assert!(msg.contains('5'), "missing actual count in: {msg}");
    }

    #[test]
    fn unknown_field_includes_name() {
        let msg = format!("{}", SquaresError::UnknownField("wobble".into()));
        assert!(msg.contains("wobble"), "missing name in: {msg}");
    }

    #[test]
    fn invalid_scene_and_color_include_message() {
        let scene = format!("{}", SquaresError::InvalidScene("fps must be positive".into()));
        assert!(scene.contains("fps must be positive"));
        let color = format!("{}", SquaresError::InvalidColor("bad hex".into()));
        assert!(color.contains("bad hex"));
    }

    #[test]
    fn squares_error_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<SquaresError>();
    }

    #[test]
    fn squares_error_implements_std_error() {
        fn assert_std_error<T: std::error::Error>() {}
        assert_std_error::<SquaresError>();
    }
}
