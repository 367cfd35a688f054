//! Error types with diagnostics using miette
//!
//! Every failure in the sketch core is surfaced to the caller as a
//! [`SketchError`]. Nothing in the core catches or recovers from these.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Result alias used throughout the crate
pub type Result<T, E = SketchError> = std::result::Result<T, E>;

/// Errors raised while building, transforming or rendering a sketch
#[derive(Error, Diagnostic, Debug)]
pub enum SketchError {
    /// Degenerate geometry rejected at construction time
    #[error("invalid {shape}: {reason}")]
    #[diagnostic(code(sketchru::invalid_construction))]
    InvalidConstruction { shape: &'static str, reason: String },

    #[error("coordinate lists differ in length: {xs} x values, {ys} y values")]
    #[diagnostic(
        code(sketchru::length_mismatch),
        help("pass one y coordinate for every x coordinate")
    )]
    LengthMismatch { xs: usize, ys: usize },

    /// Evaluation outside the domain a shape is defined on
    #[error("{what} is undefined for {value} (limit {limit})")]
    #[diagnostic(code(sketchru::domain_range))]
    DomainRange {
        what: &'static str,
        value: f64,
        limit: f64,
    },

    #[error("composition does not contain key {key:?}")]
    #[diagnostic(code(sketchru::key_not_found))]
    KeyNotFound { key: String },

    #[error("{operation} is not supported by {target}")]
    #[diagnostic(code(sketchru::unsupported))]
    Unsupported {
        operation: &'static str,
        target: &'static str,
    },

    #[error("vector ({x}, {y}) has no direction")]
    #[diagnostic(
        code(sketchru::degenerate_vector),
        help("the vector magnitude is too close to zero to normalize")
    )]
    DegenerateVector { x: f64, y: f64 },

    #[error("failed to write {}", .path.display())]
    #[diagnostic(code(sketchru::io))]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl SketchError {
    pub(crate) fn invalid(shape: &'static str, reason: impl Into<String>) -> Self {
        SketchError::InvalidConstruction {
            shape,
            reason: reason.into(),
        }
    }

    pub(crate) fn unsupported(operation: &'static str, target: &'static str) -> Self {
        SketchError::Unsupported { operation, target }
    }
}
