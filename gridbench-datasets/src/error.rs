//! Error types for dataset storage and loading

use thiserror::Error;

/// Error type for dataset storage and loading
#[derive(Error, Debug)]
pub enum Error {
    /// Core library error
    #[error("Core error: {0}")]
    Core(#[from] gridbench_core::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested split does not exist in the backing store
    #[error("Split '{split}' not found: {detail}")]
    SplitNotFound {
        /// The requested split name
        split: String,
        /// What the store looked for
        detail: String,
    },

    /// Requested task identifier is not in the discovered set
    #[error("Task '{task_id}' not found in split '{split}'")]
    NotFound {
        /// The requested task identifier
        task_id: String,
        /// The split that was searched
        split: String,
    },

    /// Task record cannot be parsed into the minimal task shape
    #[error("Malformed record for task '{task_id}': {detail}")]
    MalformedRecord {
        /// The task whose record failed to parse
        task_id: String,
        /// Parser diagnostic
        detail: String,
    },

    /// Dataset kind has no registered factory
    #[error("Unknown dataset kind: {0}")]
    UnknownKind(String),
}

/// Result type for dataset storage and loading
pub type Result<T> = std::result::Result<T, Error>;
