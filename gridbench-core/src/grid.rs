//! Grid data model for puzzle panels

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Number of distinct cell colors a grid may contain
pub const PALETTE_SIZE: u8 = 10;

/// A rectangular panel of color cells
///
/// Cells are integers in `0..PALETTE_SIZE`, stored row-major. Every row has
/// the same length and there is at least one cell. Grids are read-only once
/// constructed; equality is element-wise structural equality, so two grids
/// with the same flattened contents but different shapes are not equal.
///
/// Serialized form is a nested array of rows. Deserialization also accepts a
/// flat array of cells, which loads as a single-row grid (the form used by
/// one-dimensional task records).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "GridPayload", into = "GridPayload")]
pub struct Grid {
    /// Row-major cell values
    cells: Vec<u8>,

    /// Number of rows
    height: usize,

    /// Number of columns
    width: usize,
}

impl Grid {
    /// Create a grid from nested rows
    ///
    /// Fails if there are no rows, any row is empty, rows have unequal
    /// lengths, or any cell is outside `0..PALETTE_SIZE`.
    pub fn from_rows(rows: Vec<Vec<u8>>) -> Result<Self> {
        let height = rows.len();
        if height == 0 {
            return Err(Error::InvalidGrid("grid has no rows".into()));
        }

        let width = rows[0].len();
        if width == 0 {
            return Err(Error::InvalidGrid("grid rows are empty".into()));
        }

        let mut cells = Vec::with_capacity(height * width);
        for (index, row) in rows.iter().enumerate() {
            if row.len() != width {
                return Err(Error::InvalidGrid(format!(
                    "row {} has length {}, expected {}",
                    index,
                    row.len(),
                    width
                )));
            }
            cells.extend_from_slice(row);
        }

        for &cell in &cells {
            if cell >= PALETTE_SIZE {
                return Err(Error::InvalidGrid(format!(
                    "cell value {} is outside 0..{}",
                    cell, PALETTE_SIZE
                )));
            }
        }

        Ok(Self {
            cells,
            height,
            width,
        })
    }

    /// Create a single-row grid from a flat sequence of cells
    pub fn from_row(row: Vec<u8>) -> Result<Self> {
        Self::from_rows(vec![row])
    }

    /// Number of rows
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of columns
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid dimensions as `(height, width)`
    pub fn shape(&self) -> (usize, usize) {
        (self.height, self.width)
    }

    /// Row-major view of all cells
    pub fn cells(&self) -> &[u8] {
        &self.cells
    }

    /// Cell at `(row, col)`, or `None` if out of bounds
    pub fn get(&self, row: usize, col: usize) -> Option<u8> {
        if row < self.height && col < self.width {
            Some(self.cells[row * self.width + col])
        } else {
            None
        }
    }

    /// Iterate over the rows of this grid
    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        self.cells.chunks(self.width)
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, row) in self.rows().enumerate() {
            if index > 0 {
                writeln!(f)?;
            }
            for cell in row {
                write!(f, "{}", cell)?;
            }
        }
        Ok(())
    }
}

/// Serialized grid shape: nested rows, or a flat row of cells
#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum GridPayload {
    Nested(Vec<Vec<u8>>),
    Flat(Vec<u8>),
}

impl TryFrom<GridPayload> for Grid {
    type Error = Error;

    fn try_from(payload: GridPayload) -> Result<Self> {
        match payload {
            GridPayload::Nested(rows) => Grid::from_rows(rows),
            GridPayload::Flat(row) => Grid::from_row(row),
        }
    }
}

impl From<Grid> for GridPayload {
    fn from(grid: Grid) -> Self {
        GridPayload::Nested(grid.rows().map(<[u8]>::to_vec).collect())
    }
}
