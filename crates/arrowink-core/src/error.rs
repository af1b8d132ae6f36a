//! Error types for stage and export operations.

use crate::shapes::ShapeId;
use thiserror::Error;

/// Stage errors.
#[derive(Debug, Error)]
pub enum StageError {
    #[error("Unknown shape: {0}")]
    UnknownShape(ShapeId),
}

/// Export errors.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Shape not mounted: {0}")]
    NotMounted(ShapeId),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for stage operations.
pub type StageResult<T> = Result<T, StageError>;

/// Result type for export operations.
pub type ExportResult<T> = Result<T, ExportError>;
