//! Prediction value model
//!
//! Predictors may emit well-formed grids, dense arrays of any shape, ragged
//! nested rows, bare scalars, or values with no numeric reading at all. Each
//! value is classified once at construction, so metric code dispatches on a
//! closed tag set instead of probing representations at comparison time.

use std::fmt::Write as _;

use crate::error::{Error, Result};
use crate::grid::Grid;

/// A dense numeric array with an explicit row-major shape
#[derive(Debug, Clone, PartialEq)]
pub struct NumericArray {
    /// Extent of each dimension
    shape: Vec<usize>,

    /// Row-major element values
    data: Vec<f64>,
}

impl NumericArray {
    /// Create an array, checking that `data` fills `shape` exactly
    pub fn new(shape: Vec<usize>, data: Vec<f64>) -> Result<Self> {
        let expected: usize = shape.iter().product();
        if data.len() != expected {
            return Err(Error::InvalidArgument(format!(
                "data length {} does not match shape product {}",
                data.len(),
                expected
            )));
        }
        Ok(Self { shape, data })
    }

    /// Extent of each dimension
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }

    /// Row-major element values
    pub fn data(&self) -> &[f64] {
        &self.data
    }

    /// Total number of elements
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the array holds no elements
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }
}

/// A prediction in whatever representation the predictor produced
///
/// Every variant participates in metric computation; none is rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum PredictionValue {
    /// Dense numeric array (every valid grid converts to this form)
    Array(NumericArray),

    /// Nested rows that failed dense conversion, kept verbatim
    Ragged(Vec<Vec<f64>>),

    /// A single numeric value
    Scalar(f64),

    /// A value with no numeric reading, held as text
    Opaque(String),
}

impl PredictionValue {
    /// Classify nested rows: rectangular input becomes a dense array,
    /// anything else stays ragged
    pub fn from_rows(rows: Vec<Vec<f64>>) -> Self {
        let height = rows.len();
        let width = rows.first().map_or(0, Vec::len);
        if rows.iter().any(|row| row.len() != width) {
            return PredictionValue::Ragged(rows);
        }
        let data: Vec<f64> = rows.into_iter().flatten().collect();
        PredictionValue::Array(NumericArray {
            shape: vec![height, width],
            data,
        })
    }

    /// The dense array form, if this value has one
    pub fn as_array(&self) -> Option<&NumericArray> {
        match self {
            PredictionValue::Array(array) => Some(array),
            _ => None,
        }
    }

    /// Deterministic textual rendering, used as the comparison fallback for
    /// values without a dense form
    pub fn canonical_text(&self) -> String {
        match self {
            PredictionValue::Array(array) => render_array(array.shape(), array.data()),
            PredictionValue::Ragged(rows) => {
                let mut out = String::from("[");
                for (index, row) in rows.iter().enumerate() {
                    if index > 0 {
                        out.push_str(", ");
                    }
                    render_flat(&mut out, row);
                }
                out.push(']');
                out
            }
            PredictionValue::Scalar(value) => format!("{}", value),
            PredictionValue::Opaque(text) => text.clone(),
        }
    }
}

impl From<&Grid> for PredictionValue {
    fn from(grid: &Grid) -> Self {
        let data = grid.cells().iter().map(|&cell| f64::from(cell)).collect();
        PredictionValue::Array(NumericArray {
            shape: vec![grid.height(), grid.width()],
            data,
        })
    }
}

impl From<Grid> for PredictionValue {
    fn from(grid: Grid) -> Self {
        PredictionValue::from(&grid)
    }
}

fn render_flat(out: &mut String, values: &[f64]) {
    out.push('[');
    for (index, value) in values.iter().enumerate() {
        if index > 0 {
            out.push_str(", ");
        }
        let _ = write!(out, "{}", value);
    }
    out.push(']');
}

fn render_array(shape: &[usize], data: &[f64]) -> String {
    let mut out = String::new();
    match shape {
        [] | [_] => render_flat(&mut out, data),
        [rows, rest @ ..] => {
            let stride: usize = rest.iter().product();
            out.push('[');
            for index in 0..*rows {
                if index > 0 {
                    out.push_str(", ");
                }
                let chunk = &data[index * stride..(index + 1) * stride];
                out.push_str(&render_array(rest, chunk));
            }
            out.push(']');
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangular_rows_become_a_dense_array() {
        let value = PredictionValue::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        let array = value.as_array().unwrap();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array.data(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn ragged_rows_stay_ragged() {
        let value = PredictionValue::from_rows(vec![vec![1.0, 2.0], vec![3.0]]);
        assert!(value.as_array().is_none());
        assert_eq!(value.canonical_text(), "[[1, 2], [3]]");
    }

    #[test]
    fn grid_conversion_preserves_shape_and_values() {
        let grid = Grid::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let value = PredictionValue::from(&grid);
        let array = value.as_array().unwrap();
        assert_eq!(array.shape(), &[2, 2]);
        assert_eq!(array.data(), &[1.0, 0.0, 0.0, 1.0]);
    }

    #[test]
    fn numeric_array_validates_shape() {
        assert!(NumericArray::new(vec![2, 2], vec![1.0, 2.0]).is_err());
        assert!(NumericArray::new(vec![2, 2], vec![0.0; 4]).is_ok());
    }

    #[test]
    fn canonical_text_is_deterministic_across_forms() {
        let grid = Grid::from_rows(vec![vec![1, 0], vec![0, 1]]).unwrap();
        let from_grid = PredictionValue::from(&grid);
        let from_rows = PredictionValue::from_rows(vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
        assert_eq!(from_grid.canonical_text(), from_rows.canonical_text());
        assert_eq!(from_grid.canonical_text(), "[[1, 0], [0, 1]]");

        assert_eq!(PredictionValue::Scalar(3.0).canonical_text(), "3");
        assert_eq!(
            PredictionValue::Opaque("garbage".into()).canonical_text(),
            "garbage"
        );
    }
}
