//! Task storage, lazy dataset loading, and benchmark running for
//! grid-puzzle evaluation
//!
//! This crate supplies the storage-facing collaborators around
//! `gridbench-core`: split-addressed task stores, the lazy [`TaskDataset`],
//! the dataset-kind registry, and a runner that scores a predictor over an
//! entire dataset.

#![warn(missing_docs)]

pub mod dataset;
pub mod directory;
pub mod error;
pub mod registry;
pub mod runner;
pub mod store;

// Re-export key types for convenience
pub use dataset::{TaskDataset, TaskIter};
pub use directory::DirectoryStore;
pub use error::{Error, Result};
pub use registry::{DatasetKind, DatasetRegistry, StoreFactory};
pub use runner::{BenchmarkRunner, RunSummary};
pub use store::{MemoryStore, Split, TaskStore};
