//! Task and example data model

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::grid::Grid;

/// One input/output panel pair within a task
///
/// Test examples may legitimately lack an output (held-out ground truth);
/// that state is distinct from any grid value, since empty grids cannot be
/// constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Example {
    /// The puzzle input panel
    pub input: Grid,

    /// The expected output panel, absent for held-out test examples
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub output: Option<Grid>,
}

impl Example {
    /// Create an example without an expected output
    pub fn new(input: Grid) -> Self {
        Self {
            input,
            output: None,
        }
    }

    /// Create an example with an expected output
    pub fn with_output(input: Grid, output: Grid) -> Self {
        Self {
            input,
            output: Some(output),
        }
    }

    /// Whether this example carries an expected output
    pub fn has_output(&self) -> bool {
        self.output.is_some()
    }
}

/// A serialized task record, as supplied by dataset collaborators
///
/// Missing `train`/`test` keys are tolerated as empty sequences; extra keys
/// are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskRecord {
    /// Training examples, in record order
    #[serde(default)]
    pub train: Vec<Example>,

    /// Test examples, in record order
    #[serde(default)]
    pub test: Vec<Example>,
}

impl TaskRecord {
    /// Total number of examples across both sequences
    pub fn example_count(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

/// One puzzle instance: an identifier plus train and test example sequences
///
/// Built from a [`TaskRecord`] at load time and immutable thereafter. A task
/// with an empty test sequence loads successfully but cannot be evaluated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Task {
    task_id: String,
    train: Vec<Example>,
    test: Vec<Example>,
}

impl Task {
    /// Build a task from its identifier and serialized record
    pub fn from_record(task_id: impl Into<String>, record: TaskRecord) -> Self {
        Self {
            task_id: task_id.into(),
            train: record.train,
            test: record.test,
        }
    }

    /// The identifier of this task, unique within its dataset
    pub fn task_id(&self) -> &str {
        &self.task_id
    }

    /// Training examples, in record order
    pub fn train(&self) -> &[Example] {
        &self.train
    }

    /// Test examples, in record order
    pub fn test(&self) -> &[Example] {
        &self.test
    }

    /// Total number of examples across both sequences
    pub fn example_count(&self) -> usize {
        self.train.len() + self.test.len()
    }
}

impl fmt::Display for Task {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Task(id={}, train={}, test={})",
            self.task_id,
            self.train.len(),
            self.test.len()
        )
    }
}
