//! Error types shared by every screen-flow procedure.

use std::path::PathBuf;

use thiserror::Error;

/// Every error a screen-flow procedure can hand back to the calling script.
///
/// None of these end the process; the caller decides whether to abort.
#[derive(Debug, Error)]
pub enum FlowError {
    /// Instruction image requested but not present on disk.
    #[error("image file not found: {}", .0.display())]
    MissingImage(PathBuf),
    /// Instruction text requested but empty or missing.
    #[error("invalid or missing instruction text")]
    InvalidInstructionText,
    /// The operator dismissed the subject intake form.
    #[error("subject intake cancelled by operator")]
    IntakeCancelled,
    /// The dialog service returned something the form could not have produced.
    #[error("malformed form submission: {0}")]
    MalformedSubmission(String),
    /// The operator pressed Ctrl+C.
    #[error("interrupted by operator")]
    Interrupted,
    /// Drawing or polling after the surface was released.
    #[error("display surface already closed")]
    SurfaceClosed,
    /// Configuration value that parses but makes no sense.
    #[error("configuration error: {0}")]
    Config(String),
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Convenience Result type with FlowError
pub type Result<T> = std::result::Result<T, FlowError>;

/// Recoverable validation failure of one intake field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum InvalidInput {
    #[error("subject ID should be a 3-digit integer between 101 and 199")]
    SubjectId,
    #[error("age must be a 2-digit integer (>= 18)")]
    Age,
}
