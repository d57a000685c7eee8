//! Editor errors.

use crate::elements::ElementKind;
use crate::validation::ValidationErrors;
use thiserror::Error;

/// Errors surfaced by editor operations.
///
/// None of these are fatal; every variant describes input the user or caller
/// can correct.
#[derive(Debug, Error)]
pub enum EditorError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),
    #[error("Patch for {found} cannot be applied to {expected} element")]
    KindMismatch {
        expected: ElementKind,
        found: ElementKind,
    },
    #[error("Element {0} is not an image")]
    NotAnImage(String),
    #[error("Unsupported image data: {0}")]
    UnsupportedImage(String),
    #[error("Invalid data URL: {0}")]
    InvalidDataUrl(String),
    #[error("Invalid configuration: {0}")]
    Config(String),
    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Result type for editor operations.
pub type EditorResult<T> = Result<T, EditorError>;
