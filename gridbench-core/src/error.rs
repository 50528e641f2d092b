//! Error types for the evaluation core

use std::io;
use thiserror::Error;

/// Result type for evaluation core operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error type for evaluation core operations
#[derive(Error, Debug)]
pub enum Error {
    /// IO error during predictor state operations
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Grid rows are ragged, empty, or contain out-of-range cells
    #[error("Invalid grid: {0}")]
    InvalidGrid(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Task has no test examples, so there is nothing to evaluate
    #[error("Task '{0}' has no test examples")]
    EmptyTestSet(String),
}
