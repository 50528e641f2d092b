//! Task storage seam
//!
//! Storage is split into two phases so callers and tests can substitute an
//! in-memory identifier list without touching the filesystem: `discover`
//! yields the ordered identifiers for a split, `load_record` materializes
//! one record on demand.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use gridbench_core::TaskRecord;

use crate::error::{Error, Result};

/// Named partition of a dataset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Split {
    /// The training partition
    Training,

    /// The held-out evaluation partition
    Evaluation,
}

impl Split {
    /// The storage-level name of this split
    pub fn as_str(self) -> &'static str {
        match self {
            Split::Training => "training",
            Split::Evaluation => "evaluation",
        }
    }
}

impl fmt::Display for Split {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Split {
    type Err = Error;

    fn from_str(name: &str) -> Result<Self> {
        match name {
            "training" => Ok(Split::Training),
            "evaluation" => Ok(Split::Evaluation),
            other => Err(Error::SplitNotFound {
                split: other.to_string(),
                detail: "expected 'training' or 'evaluation'".to_string(),
            }),
        }
    }
}

/// A source of serialized task records, addressed by split and identifier
pub trait TaskStore: Send + Sync {
    /// Ordered task identifiers available in `split`
    ///
    /// Fails with [`Error::SplitNotFound`] when the partition does not
    /// exist. The order is deterministic and repeatable across calls.
    fn discover(&self, split: Split) -> Result<Vec<String>>;

    /// Load the serialized record for one task
    ///
    /// Fails with [`Error::NotFound`] when the identifier is absent and
    /// [`Error::MalformedRecord`] when the record cannot be parsed.
    fn load_record(&self, split: Split, task_id: &str) -> Result<TaskRecord>;
}

/// Task records held in memory
///
/// Insertion order per split becomes the discovery order. Records are kept
/// as raw JSON values so malformed entries surface through `load_record`
/// the same way they would from durable storage.
#[derive(Debug, Default)]
pub struct MemoryStore {
    splits: HashMap<Split, Vec<(String, serde_json::Value)>>,
}

impl MemoryStore {
    /// Create a store with no splits
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an empty split
    pub fn add_split(&mut self, split: Split) {
        self.splits.entry(split).or_default();
    }

    /// Insert a raw record under `split`, creating the split if needed
    pub fn insert(&mut self, split: Split, task_id: impl Into<String>, record: serde_json::Value) {
        self.splits
            .entry(split)
            .or_default()
            .push((task_id.into(), record));
    }

    /// Insert an already-validated record under `split`
    pub fn insert_record(
        &mut self,
        split: Split,
        task_id: impl Into<String>,
        record: &TaskRecord,
    ) -> Result<()> {
        let task_id = task_id.into();
        let value = serde_json::to_value(record).map_err(|error| Error::MalformedRecord {
            task_id: task_id.clone(),
            detail: error.to_string(),
        })?;
        self.insert(split, task_id, value);
        Ok(())
    }
}

impl TaskStore for MemoryStore {
    fn discover(&self, split: Split) -> Result<Vec<String>> {
        let entries = self.splits.get(&split).ok_or_else(|| Error::SplitNotFound {
            split: split.to_string(),
            detail: "split is not present in the memory store".to_string(),
        })?;
        Ok(entries.iter().map(|(task_id, _)| task_id.clone()).collect())
    }

    fn load_record(&self, split: Split, task_id: &str) -> Result<TaskRecord> {
        let entries = self.splits.get(&split).ok_or_else(|| Error::SplitNotFound {
            split: split.to_string(),
            detail: "split is not present in the memory store".to_string(),
        })?;
        let value = entries
            .iter()
            .find(|(candidate, _)| candidate == task_id)
            .map(|(_, value)| value)
            .ok_or_else(|| Error::NotFound {
                task_id: task_id.to_string(),
                split: split.to_string(),
            })?;
        serde_json::from_value(value.clone()).map_err(|error| Error::MalformedRecord {
            task_id: task_id.to_string(),
            detail: error.to_string(),
        })
    }
}
