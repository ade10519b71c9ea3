//! Error handling for layerpath
//!
//! The toolpath pipeline itself never fails. Errors only arise at the edges:
//! reading contour files and decoding points that came from outside.
//!
//! All error types use `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Geometry input error type
///
/// Raised while turning external coordinate data into [`crate::Point`]s.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum GeometryError {
    /// A coordinate array had the wrong number of components
    #[error("Point must have 2 or 3 components, got {count}")]
    InvalidDimension {
        /// The number of components found.
        count: usize,
    },

    /// A coordinate was NaN or infinite
    #[error("Point component {index} is not finite: {value}")]
    NonFinite {
        /// Position of the offending component.
        index: usize,
        /// The offending value.
        value: f64,
    },
}

/// Main error type for layerpath
///
/// A [`GeometryError`] met while decoding a contour file surfaces through
/// the `Json` variant.
#[derive(Error, Debug)]
pub enum Error {
    /// Standard I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Contour file could not be decoded
    #[error("Invalid contour data: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type using Error
pub type Result<T> = std::result::Result<T, Error>;
