//! Whole-dataset benchmark runs

use std::fmt;

use tracing::debug;

use gridbench_core::{metrics, Evaluator, MetricsReport, Predictor};

use crate::dataset::TaskDataset;
use crate::error::Result;
use crate::store::Split;

/// Evaluates a predictor over every task in a dataset
#[derive(Default)]
pub struct BenchmarkRunner {
    evaluator: Evaluator,
}

impl BenchmarkRunner {
    /// Create a runner with a plain accuracy/loss evaluator
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a runner around a configured evaluator
    pub fn with_evaluator(evaluator: Evaluator) -> Self {
        Self { evaluator }
    }

    /// Evaluate `predictor` on every task in `dataset`, in dataset order
    ///
    /// Tasks load lazily as the run progresses. Loader failures and empty
    /// test sets abort the run and propagate; skipping them would leave the
    /// summary silently incomplete.
    pub fn run(&self, dataset: &TaskDataset, predictor: &dyn Predictor) -> Result<RunSummary> {
        let mut task_reports = Vec::with_capacity(dataset.len());
        for task in dataset {
            let task = task?;
            let report = self.evaluator.evaluate(predictor, &task)?;
            debug!(task_id = task.task_id(), "task evaluated");
            task_reports.push((task.task_id().to_string(), report));
        }

        Ok(RunSummary::from_reports(
            predictor.name(),
            dataset.split(),
            task_reports,
        ))
    }
}

/// Aggregated results of one benchmark run
#[derive(Debug, Clone)]
pub struct RunSummary {
    predictor: String,
    split: Split,
    task_reports: Vec<(String, MetricsReport)>,
    tasks_scored: usize,
    tasks_without_truth: usize,
    mean_accuracy: f64,
    mean_loss: f64,
}

impl RunSummary {
    fn from_reports(
        predictor: &str,
        split: Split,
        task_reports: Vec<(String, MetricsReport)>,
    ) -> Self {
        let mut tasks_scored = 0usize;
        let mut tasks_without_truth = 0usize;
        let mut accuracy_sum = 0.0;
        let mut loss_sum = 0.0;

        for (_, report) in &task_reports {
            match (
                report.get_float(metrics::ACCURACY),
                report.get_float(metrics::LOSS),
            ) {
                (Some(task_accuracy), Some(task_loss)) => {
                    tasks_scored += 1;
                    accuracy_sum += task_accuracy;
                    loss_sum += task_loss;
                }
                _ => tasks_without_truth += 1,
            }
        }

        let (mean_accuracy, mean_loss) = if tasks_scored > 0 {
            let scored = tasks_scored as f64;
            (accuracy_sum / scored, loss_sum / scored)
        } else {
            (0.0, 0.0)
        };

        Self {
            predictor: predictor.to_string(),
            split,
            task_reports,
            tasks_scored,
            tasks_without_truth,
            mean_accuracy,
            mean_loss,
        }
    }

    /// Name of the predictor that was run
    pub fn predictor(&self) -> &str {
        &self.predictor
    }

    /// The split the run covered
    pub fn split(&self) -> Split {
        self.split
    }

    /// Per-task reports, in dataset order
    pub fn task_reports(&self) -> &[(String, MetricsReport)] {
        &self.task_reports
    }

    /// Number of tasks that produced accuracy/loss scores
    pub fn tasks_scored(&self) -> usize {
        self.tasks_scored
    }

    /// Number of tasks evaluated without ground truth
    pub fn tasks_without_truth(&self) -> usize {
        self.tasks_without_truth
    }

    /// Mean accuracy over scored tasks (0.0 when none were scored)
    pub fn mean_accuracy(&self) -> f64 {
        self.mean_accuracy
    }

    /// Mean loss over scored tasks (0.0 when none were scored)
    pub fn mean_loss(&self) -> f64 {
        self.mean_loss
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "=== Benchmark Summary ===")?;
        writeln!(f, "Predictor: {}", self.predictor)?;
        writeln!(f, "Split: {}", self.split)?;
        writeln!(
            f,
            "Tasks: {} scored, {} without ground truth",
            self.tasks_scored, self.tasks_without_truth
        )?;
        writeln!(f, "Mean accuracy: {:.3}", self.mean_accuracy)?;
        write!(f, "Mean loss: {:.3}", self.mean_loss)
    }
}
