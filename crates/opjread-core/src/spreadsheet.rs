//! Spreadsheet (worksheet) type

use crate::column::Column;

/// A single worksheet: an ordered list of columns.
///
/// Column order is the on-disk record order, which is also the
/// display order.
#[derive(Debug, Clone, PartialEq)]
pub struct SpreadSheet {
    /// Sheet (or book) name
    pub name: String,
    /// Window label, if the file carries one
    pub label: String,
    /// Columns in display order
    pub columns: Vec<Column>,
}

impl SpreadSheet {
    /// Create an empty sheet.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            columns: Vec::new(),
        }
    }

    /// Number of columns.
    pub fn column_count(&self) -> usize {
        self.columns.len()
    }

    /// Maximum populated row extent over all columns.
    pub fn max_rows(&self) -> usize {
        self.columns.iter().map(|c| c.end_row).max().unwrap_or(0)
    }

    /// Look up a column by its short name.
    pub fn column_by_name(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}
