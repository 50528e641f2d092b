//! Directory-backed task storage
//!
//! Expects one subdirectory per split under the root, with one
//! `<task_id>.json` file per task:
//!
//! ```text
//! data/arc_agi/
//! ├── training/
//! │   ├── 0a1b2c3d.json
//! │   └── 4e5f6a7b.json
//! └── evaluation/
//!     └── 8c9d0e1f.json
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use tracing::debug;

use gridbench_core::TaskRecord;

use crate::error::{Error, Result};
use crate::store::{Split, TaskStore};

/// A task store reading one JSON record per task from split subdirectories
#[derive(Debug, Clone)]
pub struct DirectoryStore {
    root: PathBuf,
}

impl DirectoryStore {
    /// Create a store rooted at `root`
    ///
    /// The root is not validated here; a missing split surfaces as
    /// [`Error::SplitNotFound`] on discovery.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// The root directory of this store
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn split_dir(&self, split: Split) -> PathBuf {
        self.root.join(split.as_str())
    }
}

impl TaskStore for DirectoryStore {
    fn discover(&self, split: Split) -> Result<Vec<String>> {
        let dir = self.split_dir(split);
        if !dir.is_dir() {
            return Err(Error::SplitNotFound {
                split: split.to_string(),
                detail: format!("no directory at {}", dir.display()),
            });
        }

        let mut task_ids = Vec::new();
        for entry in fs::read_dir(&dir)? {
            let path = entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some("json") {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                task_ids.push(stem.to_string());
            }
        }

        // Directory read order is platform-dependent; sort for a
        // deterministic, repeatable discovery order.
        task_ids.sort();
        debug!(split = %split, count = task_ids.len(), "discovered task files");
        Ok(task_ids)
    }

    fn load_record(&self, split: Split, task_id: &str) -> Result<TaskRecord> {
        let path = self.split_dir(split).join(format!("{task_id}.json"));
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(error) if error.kind() == io::ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    task_id: task_id.to_string(),
                    split: split.to_string(),
                });
            }
            Err(error) => return Err(error.into()),
        };

        serde_json::from_str(&raw).map_err(|error| Error::MalformedRecord {
            task_id: task_id.to_string(),
            detail: error.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_task(dir: &Path, task_id: &str, body: &str) {
        fs::write(dir.join(format!("{task_id}.json")), body).unwrap();
    }

    fn store_with_training(tasks: &[(&str, &str)]) -> (tempfile::TempDir, DirectoryStore) {
        let root = tempfile::tempdir().unwrap();
        let training = root.path().join("training");
        fs::create_dir(&training).unwrap();
        for (task_id, body) in tasks {
            write_task(&training, task_id, body);
        }
        let store = DirectoryStore::new(root.path());
        (root, store)
    }

    #[test]
    fn discovery_sorts_identifiers() {
        let (_root, store) = store_with_training(&[
            ("zz", "{}"),
            ("aa", "{}"),
            ("mm", "{}"),
        ]);

        let ids = store.discover(Split::Training).unwrap();
        assert_eq!(ids, vec!["aa", "mm", "zz"]);
    }

    #[test]
    fn discovery_ignores_non_json_files() {
        let (root, store) = store_with_training(&[("task", "{}")]);
        fs::write(root.path().join("training/notes.txt"), "ignored").unwrap();

        let ids = store.discover(Split::Training).unwrap();
        assert_eq!(ids, vec!["task"]);
    }

    #[test]
    fn missing_split_fails_discovery() {
        let (_root, store) = store_with_training(&[]);
        assert!(matches!(
            store.discover(Split::Evaluation),
            Err(Error::SplitNotFound { .. })
        ));
    }

    #[test]
    fn loads_and_validates_records() {
        let (_root, store) = store_with_training(&[(
            "ok",
            r#"{"train": [{"input": [[1]], "output": [[1]]}], "test": [{"input": [[2]]}]}"#,
        )]);

        let record = store.load_record(Split::Training, "ok").unwrap();
        assert_eq!(record.train.len(), 1);
        assert_eq!(record.test.len(), 1);
    }

    #[test]
    fn missing_task_file_is_not_found() {
        let (_root, store) = store_with_training(&[]);
        assert!(matches!(
            store.load_record(Split::Training, "ghost"),
            Err(Error::NotFound { .. })
        ));
    }

    #[test]
    fn unparseable_record_is_malformed() {
        let (_root, store) = store_with_training(&[("bad", "not json")]);
        assert!(matches!(
            store.load_record(Split::Training, "bad"),
            Err(Error::MalformedRecord { .. })
        ));
    }

    #[test]
    fn ragged_grid_in_record_is_malformed() {
        let (_root, store) =
            store_with_training(&[("ragged", r#"{"test": [{"input": [[1, 2], [3]]}]}"#)]);
        assert!(matches!(
            store.load_record(Split::Training, "ragged"),
            Err(Error::MalformedRecord { .. })
        ));
    }
}
