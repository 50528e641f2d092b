//! Evaluator and metric computation
//!
//! Accuracy and loss are total over every prediction representation: a
//! malformed or misshapen prediction degrades the score, it never aborts an
//! evaluation.

use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::grid::Grid;
use crate::metrics::{MetricsReport, ACCURACY, LOSS, NOTE};
use crate::prediction::PredictionValue;
use crate::predictor::Predictor;
use crate::task::Task;

/// Sentinel loss reported when prediction and expected counts differ
pub const MAX_LOSS: f64 = f64::INFINITY;

/// Per-pair penalty for shape mismatches and incomparable representations
const PAIR_PENALTY: f64 = 1.0;

/// Appends extra metrics to a report after `accuracy` and `loss`
pub trait MetricHook: Send + Sync {
    /// Add metrics derived from the aligned predictions and expected outputs
    fn append(
        &self,
        predictions: &[PredictionValue],
        expected: &[PredictionValue],
        report: &mut MetricsReport,
    );
}

/// Scores a predictor against a task's held-out test examples
///
/// Each `evaluate` call is independent; the evaluator holds no mutable state
/// across calls, so one instance may serve many tasks.
#[derive(Default)]
pub struct Evaluator {
    hooks: Vec<Box<dyn MetricHook>>,
}

impl Evaluator {
    /// Create an evaluator computing `accuracy` and `loss` only
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a hook that appends task-specific metrics
    pub fn with_hook(mut self, hook: impl MetricHook + 'static) -> Self {
        self.hooks.push(Box::new(hook));
        self
    }

    /// Evaluate `predictor` on `task`, returning the metrics report
    ///
    /// Fails with [`Error::EmptyTestSet`] when the task has no test
    /// examples. When test examples exist but none carries an expected
    /// output, the report holds a single `note` metric: evaluation without
    /// ground truth is a valid, informative state, not an error.
    pub fn evaluate(&self, predictor: &dyn Predictor, task: &Task) -> Result<MetricsReport> {
        if task.test().is_empty() {
            return Err(Error::EmptyTestSet(task.task_id().to_string()));
        }

        let test_inputs: Vec<Grid> = task
            .test()
            .iter()
            .map(|example| example.input.clone())
            .collect();
        let expected: Vec<PredictionValue> = task
            .test()
            .iter()
            .filter_map(|example| example.output.as_ref())
            .map(PredictionValue::from)
            .collect();

        let mut report = MetricsReport::new();
        if expected.is_empty() {
            debug!(task_id = task.task_id(), "no expected outputs to score");
            report.add_metric(NOTE, "No expected outputs available for evaluation");
            return Ok(report);
        }
        if expected.len() < test_inputs.len() {
            // Predictions cover all test inputs while the expected list is
            // filtered, so the two align by their own respective orders.
            warn!(
                task_id = task.task_id(),
                inputs = test_inputs.len(),
                with_output = expected.len(),
                "some test examples lack outputs; positional alignment may skew"
            );
        }

        let predictions = predictor.predict(&test_inputs);

        report.add_metric(ACCURACY, accuracy(&predictions, &expected));
        report.add_metric(LOSS, loss(&predictions, &expected));
        for hook in &self.hooks {
            hook.append(&predictions, &expected, &mut report);
        }

        Ok(report)
    }
}

/// Fraction of prediction/expected pairs that match exactly
///
/// Pairs align positionally; the excess of the longer sequence is unscored.
/// With nothing to compare the accuracy is 0.0.
pub fn accuracy(predictions: &[PredictionValue], expected: &[PredictionValue]) -> f64 {
    let pairs = predictions.len().min(expected.len());
    if pairs == 0 {
        return 0.0;
    }
    let matches = predictions
        .iter()
        .zip(expected)
        .filter(|(prediction, answer)| pair_matches(prediction, answer))
        .count();
    matches as f64 / pairs as f64
}

/// Mean squared error across aligned prediction/expected pairs
///
/// Returns [`MAX_LOSS`] when the two sequences have different lengths. Shape
/// and representation mismatches within a pair contribute a fixed worst-case
/// penalty instead of failing. With no contributing pairs the loss is 0.0.
pub fn loss(predictions: &[PredictionValue], expected: &[PredictionValue]) -> f64 {
    if predictions.len() != expected.len() {
        return MAX_LOSS;
    }

    let mut total = 0.0;
    let mut count = 0usize;
    for (prediction, answer) in predictions.iter().zip(expected) {
        total += pair_loss(prediction, answer);
        count += 1;
    }

    if count == 0 {
        0.0
    } else {
        total / count as f64
    }
}

fn pair_matches(prediction: &PredictionValue, answer: &PredictionValue) -> bool {
    match (prediction.as_array(), answer.as_array()) {
        (Some(left), Some(right)) => left == right,
        // Dense conversion failed on both sides: compare the canonical
        // textual renderings, which is deterministic for every variant.
        (None, None) => prediction.canonical_text() == answer.canonical_text(),
        _ => false,
    }
}

fn pair_loss(prediction: &PredictionValue, answer: &PredictionValue) -> f64 {
    use PredictionValue::{Opaque, Ragged, Scalar};

    match (prediction, answer) {
        (PredictionValue::Array(left), PredictionValue::Array(right)) => {
            if left.shape() != right.shape() {
                PAIR_PENALTY
            } else if left.is_empty() {
                0.0
            } else {
                let squared_sum: f64 = left
                    .data()
                    .iter()
                    .zip(right.data())
                    .map(|(a, b)| (a - b).powi(2))
                    .sum();
                squared_sum / left.len() as f64
            }
        }
        (Scalar(left), Scalar(right)) => (left - right).powi(2),
        (Ragged(_) | Opaque(_), Ragged(_) | Opaque(_)) => {
            if prediction.canonical_text() == answer.canonical_text() {
                0.0
            } else {
                PAIR_PENALTY
            }
        }
        _ => PAIR_PENALTY,
    }
}
