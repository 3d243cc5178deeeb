use thiserror::Error;

/// Structural errors raised while building a [`Frame`](crate::Frame).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("column name cannot be empty")]
    EmptyColumnName,
    #[error("duplicate column '{name}'")]
    DuplicateColumn { name: String },
    #[error("row has {actual} cells, expected {expected}")]
    RowArityMismatch { expected: usize, actual: usize },
}
