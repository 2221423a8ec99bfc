use thiserror::Error;

/// Result alias used across the crate.
pub type Result<T> = std::result::Result<T, MazeError>;

/// Which end of a search a bad position belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Endpoint {
    Start,
    End,
}

impl std::fmt::Display for Endpoint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Endpoint::Start => f.write_str("start"),
            Endpoint::End => f.write_str("end"),
        }
    }
}

#[derive(Debug, Error)]
pub enum MazeError {
    #[error("invalid maze size {height}x{width}: both sides must be positive")]
    InvalidDimension { height: usize, width: usize },
    #[error("position ({row}, {col}) is outside the grid")]
    OutOfBounds { row: usize, col: usize },
    #[error("invalid {endpoint} position ({row}, {col}): {reason}")]
    InvalidPosition {
        endpoint: Endpoint,
        row: i64,
        col: i64,
        reason: &'static str,
    },
    #[error("outer wall is open at ({row}, {col})")]
    BoundaryViolation { row: usize, col: usize },
    #[error("passage at ({row}, {col}) is walled in on all four sides")]
    EnclosedCell { row: usize, col: usize },
    #[error("unsupported file format: {0}")]
    UnsupportedFormat(String),
    #[error("malformed maze data: {0}")]
    MalformedInput(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Image(#[from] image::ImageError),
}
