//! Multi-sheet workbook type

use crate::error::{Error, Result};
use crate::spreadsheet::SpreadSheet;

/// A multi-sheet workbook: named sheets, each independently laid out.
#[derive(Debug, Clone, PartialEq)]
pub struct Excel {
    /// Book name
    pub name: String,
    /// Window label, if the file carries one
    pub label: String,
    /// Sheets in on-disk order
    pub sheets: Vec<SpreadSheet>,
}

impl Excel {
    /// Create an empty workbook.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            sheets: Vec::new(),
        }
    }

    /// Look up a sheet by name.
    pub fn sheet_by_name(&self, name: &str) -> Result<&SpreadSheet> {
        self.sheets
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_string()))
    }
}
