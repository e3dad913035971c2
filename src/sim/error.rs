//! Error types for the few fallible operations around the simulation.
//!
//! The tick itself never fails; constructors clamp their inputs instead.
//! Errors only come from building polygons out of caller-provided vertex
//! lists and from loading settings files.

use std::fmt;

/// Top-level error enum for rocksplit.
#[derive(Debug)]
pub enum SimError {
    /// A polygon was built from too few vertices to enclose any area.
    InsufficientVertices {
        /// Actual vertex count provided.
        got: usize,
        /// Minimum required.
        required: usize,
    },

    /// Reading or writing a settings file failed.
    Io(std::io::Error),

    /// A settings file was not valid JSON for [`crate::Settings`].
    Parse(serde_json::Error),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::InsufficientVertices { got, required } => write!(
                f,
                "polygon vertex count too low: got {}, need at least {}",
                got, required
            ),
            SimError::Io(e) => write!(f, "settings i/o failed: {}", e),
            SimError::Parse(e) => write!(f, "settings parse failed: {}", e),
        }
    }
}

impl std::error::Error for SimError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            SimError::InsufficientVertices { .. } => None,
            SimError::Io(e) => Some(e),
            SimError::Parse(e) => Some(e),
        }
    }
}

impl From<std::io::Error> for SimError {
    fn from(e: std::io::Error) -> Self {
        SimError::Io(e)
    }
}

impl From<serde_json::Error> for SimError {
    fn from(e: serde_json::Error) -> Self {
        SimError::Parse(e)
    }
}

/// Convenience alias: a `Result` using `SimError` as the error type.
pub type SimResult<T> = Result<T, SimError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_insufficient_vertices() {
        let e = SimError::InsufficientVertices {
            got: 2,
            required: 3,
        };
        assert_eq!(
            e.to_string(),
            "polygon vertex count too low: got 2, need at least 3"
        );
    }

    #[test]
    fn test_from_parse_error() {
        let err = serde_json::from_str::<u32>("not json").unwrap_err();
        let e: SimError = err.into();
        assert!(matches!(e, SimError::Parse(_)));
        assert!(std::error::Error::source(&e).is_some());
    }
}
