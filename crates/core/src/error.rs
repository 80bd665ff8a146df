//! Error types for the engine.

use thiserror::Error;

/// Errors raised while building a well or a shape matrix.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    #[error("invalid well dimensions {width}x{height}: both must be positive")]
    InvalidDimensions { width: usize, height: usize },

    #[error("row {row} has {len} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        len: usize,
        expected: usize,
    },

    #[error("cell value {value} at ({x}, {y}) is outside 0..=7")]
    InvalidCellValue { value: u8, x: usize, y: usize },
}

/// Failure reported by a render sink.
///
/// The session treats any of these as a fault for the current frame and
/// recovers by resetting.
#[derive(Debug, Error)]
pub enum SinkError {
    #[error("render surface unavailable: {0}")]
    Unavailable(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("render backend failed: {0}")]
    Backend(#[source] Box<dyn std::error::Error + Send + Sync>),
}
