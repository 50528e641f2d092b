//! Lazy task dataset
//!
//! Discovery runs once at construction and fixes an ordered, de-duplicated
//! identifier list; tasks are materialized on access, so iterating a large
//! corpus holds one task in memory at a time.

use std::collections::HashSet;
use std::sync::Arc;

use gridbench_core::Task;

use crate::error::{Error, Result};
use crate::store::{Split, TaskStore};

/// An ordered collection of tasks, loaded on demand from a store
pub struct TaskDataset {
    store: Arc<dyn TaskStore>,
    split: Split,
    task_ids: Vec<String>,
}

impl TaskDataset {
    /// Open a dataset over `store`, discovering the identifiers in `split`
    ///
    /// Duplicate identifiers collapse to their first occurrence. Fails with
    /// [`Error::SplitNotFound`] when the partition does not exist.
    pub fn open(store: Arc<dyn TaskStore>, split: Split) -> Result<Self> {
        let discovered = store.discover(split)?;

        let mut task_ids = Vec::with_capacity(discovered.len());
        let mut seen = HashSet::new();
        for task_id in discovered {
            if seen.insert(task_id.clone()) {
                task_ids.push(task_id);
            }
        }

        Ok(Self {
            store,
            split,
            task_ids,
        })
    }

    /// The split this dataset was opened on
    pub fn split(&self) -> Split {
        self.split
    }

    /// Number of distinct task identifiers discovered at construction
    pub fn len(&self) -> usize {
        self.task_ids.len()
    }

    /// Whether discovery found no tasks
    pub fn is_empty(&self) -> bool {
        self.task_ids.is_empty()
    }

    /// The discovered identifiers, in iteration order
    pub fn task_ids(&self) -> &[String] {
        &self.task_ids
    }

    /// Whether `task_id` was discovered at construction
    pub fn contains(&self, task_id: &str) -> bool {
        self.task_ids.iter().any(|candidate| candidate == task_id)
    }

    /// Load one task by identifier
    ///
    /// Fails with [`Error::NotFound`] for identifiers outside the
    /// discovered set; parse failures propagate as
    /// [`Error::MalformedRecord`].
    pub fn get_task(&self, task_id: &str) -> Result<Task> {
        if !self.contains(task_id) {
            return Err(Error::NotFound {
                task_id: task_id.to_string(),
                split: self.split.to_string(),
            });
        }
        let record = self.store.load_record(self.split, task_id)?;
        Ok(Task::from_record(task_id, record))
    }

    /// Iterate over all tasks, loading each on demand
    ///
    /// Each call starts a fresh pass over the identifier list; nothing is
    /// cached between iterations.
    pub fn iter(&self) -> TaskIter<'_> {
        TaskIter {
            dataset: self,
            index: 0,
        }
    }
}

/// Lazy iterator over a dataset's tasks
pub struct TaskIter<'a> {
    dataset: &'a TaskDataset,
    index: usize,
}

impl Iterator for TaskIter<'_> {
    type Item = Result<Task>;

    fn next(&mut self) -> Option<Self::Item> {
        let task_id = self.dataset.task_ids.get(self.index)?;
        self.index += 1;
        Some(self.dataset.get_task(task_id))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.dataset.task_ids.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<'a> IntoIterator for &'a TaskDataset {
    type Item = Result<Task>;
    type IntoIter = TaskIter<'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;
    use serde_json::json;

    fn sample_store() -> Arc<dyn TaskStore> {
        let mut store = MemoryStore::new();
        store.insert(
            Split::Training,
            "first",
            json!({"test": [{"input": [[1]], "output": [[1]]}]}),
        );
        store.insert(
            Split::Training,
            "second",
            json!({"test": [{"input": [[2]], "output": [[2]]}]}),
        );
        Arc::new(store)
    }

    #[test]
    fn len_matches_discovery() {
        let dataset = TaskDataset::open(sample_store(), Split::Training).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.task_ids(), &["first", "second"]);
    }

    #[test]
    fn duplicate_identifiers_collapse_to_first() {
        let mut store = MemoryStore::new();
        store.insert(Split::Training, "dup", json!({"test": [{"input": [[1]]}]}));
        store.insert(Split::Training, "dup", json!({"test": [{"input": [[2]]}]}));

        let dataset = TaskDataset::open(Arc::new(store), Split::Training).unwrap();
        assert_eq!(dataset.len(), 1);

        // The first inserted record wins on load as well.
        let task = dataset.get_task("dup").unwrap();
        assert_eq!(task.test()[0].input.cells(), &[1]);
    }

    #[test]
    fn get_task_rejects_undiscovered_identifiers() {
        let dataset = TaskDataset::open(sample_store(), Split::Training).unwrap();
        assert!(matches!(
            dataset.get_task("ghost"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn iteration_is_ordered_and_restartable() {
        let dataset = TaskDataset::open(sample_store(), Split::Training).unwrap();

        let collect_ids = || -> Vec<String> {
            dataset
                .iter()
                .map(|task| task.unwrap().task_id().to_string())
                .collect()
        };

        let first_pass = collect_ids();
        let second_pass = collect_ids();
        assert_eq!(first_pass, vec!["first", "second"]);
        assert_eq!(first_pass, second_pass);
    }

    #[test]
    fn iteration_surfaces_malformed_records() {
        let mut store = MemoryStore::new();
        store.insert(Split::Training, "good", json!({"test": [{"input": [[1]]}]}));
        store.insert(Split::Training, "bad", json!({"train": "nope"}));

        let dataset = TaskDataset::open(Arc::new(store), Split::Training).unwrap();
        let results: Vec<Result<Task>> = dataset.iter().collect();
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(Error::MalformedRecord { .. })));
    }

    #[test]
    fn missing_split_fails_open() {
        let result = TaskDataset::open(sample_store(), Split::Evaluation);
        assert!(matches!(result, Err(Error::SplitNotFound { .. })));
    }
}
