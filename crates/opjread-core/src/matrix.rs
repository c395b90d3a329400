//! Matrix book and matrix sheet types

use crate::error::{Error, Result};

/// One sheet of a matrix book: a dense 2D numeric grid.
///
/// The grid is stored row-major in a flat `Vec` for O(1) access.
/// `x1..y2` map grid indices to a real-world coordinate range (X
/// varies with the column index, Y with the row index); they are
/// metadata only and play no part in decoding.
#[derive(Debug, Clone, PartialEq)]
pub struct MatrixSheet {
    /// Sheet (dataset) name
    pub name: String,
    /// Number of grid columns
    pub column_count: usize,
    /// Number of grid rows
    pub row_count: usize,
    /// Coordinate of the first column
    pub x1: f64,
    /// Coordinate of the last column
    pub x2: f64,
    /// Coordinate of the first row
    pub y1: f64,
    /// Coordinate of the last row
    pub y2: f64,
    /// Cell values, row-major, `row_count * column_count` entries
    pub data: Vec<f64>,
    /// Imaginary parts, parallel to `data` (complex matrices only)
    pub imaginary: Option<Vec<f64>>,
}

impl MatrixSheet {
    /// Create an empty, ungridded sheet.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            column_count: 0,
            row_count: 0,
            x1: 0.0,
            x2: 0.0,
            y1: 0.0,
            y2: 0.0,
            data: Vec::new(),
            imaginary: None,
        }
    }

    /// The cell value at `[row, column]`, or `None` out of bounds.
    pub fn value(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.row_count || column >= self.column_count {
            return None;
        }
        self.data.get(row * self.column_count + column).copied()
    }

    /// Like [`value`](Self::value) but with a typed bounds error.
    pub fn try_value(&self, row: usize, column: usize) -> Result<f64> {
        if row >= self.row_count {
            return Err(Error::RowOutOfBounds(row, self.row_count));
        }
        if column >= self.column_count {
            return Err(Error::ColumnOutOfBounds(column, self.column_count));
        }
        Ok(self.data[row * self.column_count + column])
    }

    /// The imaginary part at `[row, column]` for complex matrices.
    pub fn imaginary_part(&self, row: usize, column: usize) -> Option<f64> {
        if row >= self.row_count || column >= self.column_count {
            return None;
        }
        self.imaginary
            .as_ref()
            .and_then(|im| im.get(row * self.column_count + column))
            .copied()
    }

    /// Whether the sheet carries an imaginary grid.
    pub fn is_complex(&self) -> bool {
        self.imaginary.is_some()
    }
}

/// A matrix book: one or more [`MatrixSheet`]s in on-disk order.
#[derive(Debug, Clone, PartialEq)]
pub struct Matrix {
    /// Book name
    pub name: String,
    /// Window label, if the file carries one
    pub label: String,
    /// Sheets in on-disk order
    pub sheets: Vec<MatrixSheet>,
}

impl Matrix {
    /// Create an empty matrix book.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            sheets: Vec::new(),
        }
    }
}
