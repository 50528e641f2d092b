//! Predictor capability traits

use std::path::Path;

use crate::error::Result;
use crate::grid::Grid;
use crate::prediction::PredictionValue;
use crate::task::Example;

/// A component that maps input panels to predicted output panels
///
/// This is the only capability the evaluator requires. Implementations are
/// not obliged to return the same number of predictions as inputs; the
/// evaluator scores cardinality mismatches instead of rejecting them.
pub trait Predictor: Send + Sync {
    /// The name of this predictor (used in reports)
    fn name(&self) -> &str;

    /// Produce predictions for the given input panels, in order
    fn predict(&self, inputs: &[Grid]) -> Vec<PredictionValue>;
}

/// Optional capability for predictors that learn from train examples
pub trait Trainable {
    /// Fit the predictor to the given examples
    fn train(&mut self, examples: &[Example]) -> Result<()>;
}

/// Optional capability for predictors with on-disk state
pub trait Persistable: Sized {
    /// Write predictor state to `path`
    fn save(&self, path: &Path) -> Result<()>;

    /// Read predictor state back from `path`
    fn load(path: &Path) -> Result<Self>;
}

/// Echoes every input panel unchanged
///
/// A baseline predictor: tasks whose expected output equals their input
/// score perfectly, everything else scores zero. Also convenient in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct IdentityPredictor;

impl Predictor for IdentityPredictor {
    fn name(&self) -> &str {
        "identity"
    }

    fn predict(&self, inputs: &[Grid]) -> Vec<PredictionValue> {
        inputs.iter().map(PredictionValue::from).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Error;

    /// Memorizes the first train output and predicts it for every input.
    #[derive(Default)]
    struct MemorizePredictor {
        answer: Option<Grid>,
    }

    impl Predictor for MemorizePredictor {
        fn name(&self) -> &str {
            "memorize"
        }

        fn predict(&self, inputs: &[Grid]) -> Vec<PredictionValue> {
            inputs
                .iter()
                .map(|_| match &self.answer {
                    Some(grid) => PredictionValue::from(grid),
                    None => PredictionValue::Opaque("untrained".into()),
                })
                .collect()
        }
    }

    impl Trainable for MemorizePredictor {
        fn train(&mut self, examples: &[Example]) -> Result<()> {
            let answer = examples
                .iter()
                .find_map(|example| example.output.clone())
                .ok_or_else(|| {
                    Error::InvalidArgument("no train example carries an output".into())
                })?;
            self.answer = Some(answer);
            Ok(())
        }
    }

    #[test]
    fn trainable_is_an_opt_in_capability() {
        let mut predictor = MemorizePredictor::default();
        let input = Grid::from_row(vec![1]).unwrap();
        let output = Grid::from_row(vec![2]).unwrap();

        assert!(predictor.train(&[Example::new(input.clone())]).is_err());

        predictor
            .train(&[Example::with_output(input.clone(), output.clone())])
            .unwrap();
        let predictions = predictor.predict(&[input]);
        assert_eq!(predictions, vec![PredictionValue::from(&output)]);
    }

    #[test]
    fn identity_echoes_each_input() {
        let inputs = vec![
            Grid::from_rows(vec![vec![1, 2], vec![3, 4]]).unwrap(),
            Grid::from_row(vec![5]).unwrap(),
        ];

        let predictions = IdentityPredictor.predict(&inputs);

        assert_eq!(predictions.len(), 2);
        assert_eq!(predictions[0], PredictionValue::from(&inputs[0]));
        assert_eq!(predictions[1], PredictionValue::from(&inputs[1]));
    }
}
