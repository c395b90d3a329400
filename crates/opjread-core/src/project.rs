//! The decoded project root

use crate::column::ColumnType;
use crate::excel::Excel;
use crate::function::Function;
use crate::graph::Graph;
use crate::matrix::Matrix;
use crate::note::Note;
use crate::spreadsheet::SpreadSheet;

/// Summary of one dataset record, independent of containment.
///
/// The legacy conversion tool reports the flat dataset count next to
/// the per-kind collections; this mirrors that view.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetInfo {
    /// Full dataset name as stored (e.g. `Book1_A`, `MBook@2`)
    pub name: String,
    /// On-disk storage type; `None` for functions and for records
    /// whose type could not be decoded
    pub column_type: Option<ColumnType>,
    /// Number of stored rows/cells
    pub rows: usize,
}

/// The root decoded result of one OPJ/OPJU stream.
///
/// Built once, atomically, by a single decode pass; read-only
/// afterwards. Every sheet and column belongs to exactly one of the
/// containers below.
#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    /// File format version (e.g. 900 for 9.0)
    pub version: u32,
    /// Build number from the header line
    pub build_version: u32,
    /// 0 for a clean decode; nonzero when at least one record was
    /// skipped or a non-fatal anomaly occurred
    pub parse_error: u32,
    /// Every dataset record seen, in stream order
    pub datasets: Vec<DatasetInfo>,
    /// Single-sheet worksheets
    pub spread_sheets: Vec<SpreadSheet>,
    /// Matrix books
    pub matrixes: Vec<Matrix>,
    /// Multi-sheet workbooks
    pub excels: Vec<Excel>,
    /// User-defined functions
    pub functions: Vec<Function>,
    /// Graph windows (raw fields)
    pub graphs: Vec<Graph>,
    /// Note windows
    pub notes: Vec<Note>,
    /// Global name/value parameters
    pub parameters: Vec<(String, f64)>,
}

impl Project {
    /// Create an empty project for the given version.
    pub fn new(version: u32, build_version: u32) -> Self {
        Self {
            version,
            build_version,
            parse_error: 0,
            datasets: Vec::new(),
            spread_sheets: Vec::new(),
            matrixes: Vec::new(),
            excels: Vec::new(),
            functions: Vec::new(),
            graphs: Vec::new(),
            notes: Vec::new(),
            parameters: Vec::new(),
        }
    }

    /// Look up a spreadsheet by name.
    pub fn spread_sheet_by_name(&self, name: &str) -> Option<&SpreadSheet> {
        self.spread_sheets.iter().find(|s| s.name == name)
    }

    /// Look up a matrix book by name.
    pub fn matrix_by_name(&self, name: &str) -> Option<&Matrix> {
        self.matrixes.iter().find(|m| m.name == name)
    }

    /// Look up a workbook by name.
    pub fn excel_by_name(&self, name: &str) -> Option<&Excel> {
        self.excels.iter().find(|e| e.name == name)
    }
}
