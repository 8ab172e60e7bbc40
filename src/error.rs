use thiserror::Error;

use crate::geometry::Rect;

/// Interactions a piece refused. None of these are fatal: callers log them
/// and carry on with the next input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PieceError {
    #[error("turn log is full ({capacity} turns)")]
    CapacityExceeded { capacity: usize },

    #[error("selection is {w}x{h}, nothing to capture")]
    DegenerateSelection { w: i32, h: i32 },

    #[error("destination {dest:?} misses the canvas")]
    OffscreenCommit { dest: Rect },

    #[error("selection was put back where it started")]
    Unmoved,

    #[error("turn value {value} does not fit a colour channel")]
    OutOfEncodingRange { value: i32 },
}

/// Result type for piece operations
pub type PieceResult<T> = Result<T, PieceError>;

/// Errors reading or writing plot drawings
#[derive(Debug, Error)]
pub enum PlotError {
    #[error("Invalid drawing data: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to access drawing file: {0}")]
    Io(#[from] std::io::Error),
}
