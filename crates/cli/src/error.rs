//! Failures of the `spinning-squares` binary and the exit code each maps to.
//!
//! Clap exits with 2 on argument errors before any of this runs. Everything
//! after parsing ends up here:
//!
//! | code | variant         | raised when                                             |
//! |------|-----------------|---------------------------------------------------------|
//! | 10   | `Render`        | the scene fails validation, names an unknown field, asks for an out-of-range frame, or a field produces bad geometry |
//! | 11   | `Io`            | the scene file cannot be read, or the output directory or a PNG cannot be written |
//! | 12   | `Input`         | `--params` or the scene file is not valid JSON for a scene |
//! | 13   | `Serialization` | a `--json` summary cannot be encoded                    |

use std::fmt;

use spinning_squares_core::SquaresError;

/// Why a subcommand stopped.
#[derive(Debug)]
pub enum CliError {
    /// The scene was read but could not be rendered. Carries the core error
    /// so `--json` output and logs keep its variant.
    Render(SquaresError),
    /// Reading the scene file, preparing the output directory, or writing a
    /// frame failed. The message names the path involved.
    Io(String),
    /// The user handed over JSON that does not describe a scene: a malformed
    /// `--params` string or a scene file with bad syntax or wrongly typed keys.
    Input(String),
    /// Encoding a `--json` summary failed.
    Serialization(String),
}

impl CliError {
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Render(_) => 10,
            CliError::Io(_) => 11,
            CliError::Input(_) => 12,
            CliError::Serialization(_) => 13,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CliError::Render(e) => write!(f, "{e}"),
            CliError::Io(msg) | CliError::Input(msg) | CliError::Serialization(msg) => {
                f.write_str(msg)
            }
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Render(e) => Some(e),
            _ => None,
        }
    }
}

/// Core I/O failures keep exit code 11; every other core error is a render
/// failure.
impl From<SquaresError> for CliError {
    fn from(e: SquaresError) -> Self {
        match e {
            SquaresError::Io(msg) => CliError::Io(msg),
            other => CliError::Render(other),
        }
    }
}

/// Only used for encoding output. Parse failures on user JSON are mapped to
/// [`CliError::Input`] where they happen.
impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Serialization(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_error_exit_code_is_10() {
        let err = CliError::Render(SquaresError::UnknownField("wobble".into()));
        assert_eq!(err.exit_code(), 10);
    }

    #[test]
    fn io_error_exit_code_is_11() {
        assert_eq!(CliError::Io("write failed".into()).exit_code(), 11);
    }

    #[test]
    fn input_error_exit_code_is_12() {
        assert_eq!(CliError::Input("bad params".into()).exit_code(), 12);
    }

    #[test]
    fn serialization_error_exit_code_is_13() {
        assert_eq!(CliError::Serialization("json fail".into()).exit_code(), 13);
    }

    #[test]
    fn from_squares_error_io_routes_to_cli_io() {
        let cli_err = CliError::from(SquaresError::Io("disk full".into()));
        assert_eq!(cli_err.exit_code(), 11);
        assert!(cli_err.to_string().contains("disk full"));
    }

    #[test]
    fn from_squares_error_geometry_routes_to_render() {
        let cli_err = CliError::from(SquaresError::InvalidGeometry(
            "width -1 and height 2 must be positive and finite".into(),
        ));
        assert_eq!(cli_err.exit_code(), 10);
        assert!(cli_err.to_string().contains("-1"));
    }

    #[test]
    fn render_error_exposes_core_error_as_source() {
        use std::error::Error;
        let err = CliError::from(SquaresError::UnknownField("wobble".into()));
        assert!(err.source().is_some());
        assert!(err.to_string().contains("wobble"));
        assert!(CliError::Input("bad".into()).source().is_none());
    }

    #[test]
    fn from_serde_json_error_routes_to_serialization() {
        let bad_json = serde_json::from_str::<serde_json::Value>("{invalid");
        let cli_err = CliError::from(bad_json.unwrap_err());
        assert_eq!(cli_err.exit_code(), 13);
    }
}
