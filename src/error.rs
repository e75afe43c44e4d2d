//! Error types.
//!
//! Typing a bad character into a cell is not an error: the cell corrects
//! itself. These variants cover host mistakes and I/O.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PinError {
    #[error("cell count must be between 1 and {max}, got {count}")]
    InvalidCellCount { count: usize, max: usize },

    #[error("{digits} digits do not fit in {capacity} cells")]
    CapacityExceeded { digits: usize, capacity: usize },

    #[error("not a digit string: {0:?}")]
    InvalidDigits(String),

    #[error("cell {index} out of range (field has {count} cells)")]
    NoSuchCell { index: usize, count: usize },

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("layout failed: {0}")]
    Layout(String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, PinError>;
