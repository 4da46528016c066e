//! # Geometry Errors
//!
//! Error types for shape description construction, packing and tessellation.
//!
//! ## Error Policy
//!
//! - Missing or malformed parameters fail at construction, never defaulted
//! - Degenerate shapes are not errors: creation returns `Ok(None)`
//! - Errors carry the offending parameter name for debugging

use thiserror::Error;

/// Errors that can occur while describing, packing or tessellating a shape.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// A parameter is missing, non-finite or out of range.
    #[error("Invalid argument `{parameter}`: {message}")]
    InvalidArgument {
        /// Name of the offending parameter
        parameter: &'static str,
        /// What is wrong with it
        message: String,
    },

    /// No shape kind is registered under this module name.
    #[error("Unknown shape module: {0}")]
    UnknownModule(String),
}

impl GeometryError {
    /// Creates an invalid argument error.
    pub fn invalid_argument(parameter: &'static str, message: impl Into<String>) -> Self {
        Self::InvalidArgument {
            parameter,
            message: message.into(),
        }
    }

    /// Creates the error reported when a mandatory parameter is absent.
    pub fn missing(parameter: &'static str) -> Self {
        Self::invalid_argument(parameter, "is required")
    }
}

/// Result type alias for shape geometry operations.
pub type Result<T> = std::result::Result<T, GeometryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = GeometryError::missing("radius");
        assert_eq!(err.to_string(), "Invalid argument `radius`: is required");

        let err = GeometryError::UnknownModule("torus".to_string());
        assert!(err.to_string().contains("torus"));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + 'static>() {}
        assert_send_sync::<GeometryError>();
    }
}
