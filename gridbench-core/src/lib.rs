//! Core task model, predictor capability, and metric computation for
//! grid-puzzle evaluation
//!
//! This crate provides the in-memory data model for grid-based reasoning
//! puzzles (panels, examples, tasks), the capability interface a prediction
//! component must satisfy, and the evaluator that scores predictions against
//! expected outputs. It performs no I/O; serialized task records and
//! prediction results are supplied by collaborators.

#![warn(missing_docs)]

pub mod error;
pub mod evaluate;
pub mod grid;
pub mod metrics;
pub mod prediction;
pub mod predictor;
pub mod task;

// Re-export key types for convenience
pub use error::{Error, Result};
pub use evaluate::{accuracy, loss, Evaluator, MetricHook, MAX_LOSS};
pub use grid::{Grid, PALETTE_SIZE};
pub use metrics::{MetricValue, MetricsReport};
pub use prediction::{NumericArray, PredictionValue};
pub use predictor::{IdentityPredictor, Persistable, Predictor, Trainable};
pub use task::{Example, Task, TaskRecord};
