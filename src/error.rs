//! # Error Types
//!
//! This module defines error types used throughout the easel library.

use thiserror::Error;

use crate::formula::FormulaError;

/// Main error type for canvas operations
#[derive(Debug, Error)]
pub enum CanvasError {
    /// A configuration entry used a tag that is not a known shape
    #[error("Unknown shape type: {0}")]
    UnknownShape(String),

    /// Image loading or encoding error
    #[error("Image error: {0}")]
    Image(String),

    /// Formula parse or evaluation error
    #[error("Formula error: {0}")]
    Formula(#[from] FormulaError),

    /// Malformed configuration document
    #[error("Config error: {0}")]
    Config(String),

    /// I/O error wrapper
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
