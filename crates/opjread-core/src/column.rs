//! Worksheet column type

use crate::variant::Variant;

/// The on-disk storage type of a column.
///
/// Retained for reporting even though every numeric width is
/// normalized to `f64` in [`Column::data`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// 8-bit unsigned integer
    Byte,
    /// 8-bit signed integer
    Char,
    /// 16-bit unsigned integer
    UShort,
    /// 16-bit signed integer
    Short,
    /// 32-bit unsigned integer
    ULong,
    /// 32-bit signed integer
    Long,
    /// IEEE 754 single
    Float,
    /// IEEE 754 double
    Double,
    /// Paired real and imaginary doubles
    Complex,
    /// Text cells
    Text,
    /// Mixed text and numeric cells
    TextNumeric,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ColumnType::Byte => "Byte",
            ColumnType::Char => "Char",
            ColumnType::UShort => "UShort",
            ColumnType::Short => "Short",
            ColumnType::ULong => "ULong",
            ColumnType::Long => "Long",
            ColumnType::Float => "Float",
            ColumnType::Double => "Double",
            ColumnType::Complex => "Complex",
            ColumnType::Text => "Text",
            ColumnType::TextNumeric => "TextNumeric",
        };
        f.write_str(s)
    }
}

/// One column of a [`SpreadSheet`](crate::SpreadSheet).
///
/// `data` holds exactly the stored row extent `[begin_row, end_row)`;
/// rows outside it were never written to the file and read back as
/// implicit NaN through [`Column::value_at`].
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Short column code (e.g. "A")
    pub name: String,
    /// Optional descriptive name
    pub long_name: String,
    /// Optional units text
    pub units: String,
    /// Optional free-text comment
    pub comments: String,
    /// First stored row (inclusive)
    pub begin_row: usize,
    /// One past the last stored row
    pub end_row: usize,
    /// On-disk storage type
    pub column_type: ColumnType,
    /// Stored cell values, one per row of the extent
    pub data: Vec<Variant>,
    /// Imaginary parts, parallel to `data` (complex columns only)
    pub imaginary_data: Option<Vec<f64>>,
}

impl Column {
    /// Create an empty column with the given short name.
    pub fn new<S: Into<String>>(name: S, column_type: ColumnType) -> Self {
        Self {
            name: name.into(),
            long_name: String::new(),
            units: String::new(),
            comments: String::new(),
            begin_row: 0,
            end_row: 0,
            column_type,
            data: Vec::new(),
            imaginary_data: None,
        }
    }

    /// Number of stored rows (`end_row - begin_row`).
    pub fn row_count(&self) -> usize {
        self.data.len()
    }

    /// The value at an absolute sheet row.
    ///
    /// Rows outside the stored extent are implicitly missing and
    /// return `None`, not an indexing error.
    pub fn value_at(&self, row: usize) -> Option<&Variant> {
        if row < self.begin_row || row >= self.end_row {
            return None;
        }
        self.data.get(row - self.begin_row)
    }

    /// The imaginary part at an absolute sheet row (complex columns).
    pub fn imaginary_at(&self, row: usize) -> Option<f64> {
        if row < self.begin_row || row >= self.end_row {
            return None;
        }
        self.imaginary_data
            .as_ref()
            .and_then(|im| im.get(row - self.begin_row))
            .copied()
    }
}
