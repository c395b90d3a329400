//! Object graph builder.
//!
//! The on-disk format has no parent pointers. Containment is
//! reconstructed from the name references embedded in each dataset
//! record (`Book_A`, `Book@Sheet_A`, `MBook@2`) and from record
//! order: books, sheets and columns are appended to flat vectors in
//! first-appearance order, so index order equals on-disk display
//! order. Window records are then matched back to the books they
//! describe to attach labels, matrix dimensions and coordinate
//! bounds.
//!
//! Non-fatal anomalies (an unknown cell type, a clamped extent, a bad
//! end mark) skip the record and leave a nonzero status code on the
//! project; unresolvable containment and dimension mismatches abort
//! the decode.

use log::{debug, warn};
use opjread_core::{
    Column, DatasetInfo, Excel, Function, Graph, GraphLayer, Matrix, MatrixSheet, Note, Project,
    SpreadSheet,
};

use crate::error::{OpjError, OpjResult};
use crate::records::dataset::{DatasetPayload, DatasetRecord};
use crate::records::window::WindowRecord;
use crate::records::WINDOW_KIND_NOTE;

// Nonzero status codes, first anomaly wins.
const STATUS_END_MARK: u32 = 3;
const STATUS_UNKNOWN_TYPE: u32 = 5;
const STATUS_EXTENT_MISMATCH: u32 = 6;
const STATUS_UNKNOWN_WINDOW: u32 = 7;

/// Accumulates records into a [`Project`].
#[derive(Debug, Default)]
pub struct ProjectBuilder {
    datasets: Vec<DatasetInfo>,
    spread_sheets: Vec<SpreadSheet>,
    matrixes: Vec<Matrix>,
    excels: Vec<Excel>,
    functions: Vec<Function>,
    graphs: Vec<Graph>,
    notes: Vec<Note>,
    parameters: Vec<(String, f64)>,
    parse_error: u32,
}

impl ProjectBuilder {
    /// Create an empty builder.
    pub fn new() -> Self {
        Self::default()
    }

    fn flag(&mut self, code: u32) {
        if self.parse_error == 0 {
            self.parse_error = code;
        }
    }

    /// The current status accumulator.
    pub fn parse_error(&self) -> u32 {
        self.parse_error
    }

    /// Add a decoded dataset record.
    pub fn add_dataset(&mut self, record: DatasetRecord) -> OpjResult<()> {
        debug!("dataset {}", record.name);
        if record.extent_mismatch {
            self.flag(STATUS_EXTENT_MISMATCH);
        }

        match record.payload {
            DatasetPayload::Formula(formula) => {
                self.datasets.push(DatasetInfo {
                    name: record.name.clone(),
                    column_type: None,
                    rows: record.total_rows,
                });
                self.functions
                    .push(Function::new(record.name, formula, record.total_rows));
                Ok(())
            }
            DatasetPayload::Unknown { data_type, .. } => {
                warn!(
                    "skipping dataset {} with unknown data type 0x{data_type:04X}",
                    record.name
                );
                self.datasets.push(DatasetInfo {
                    name: record.name,
                    column_type: None,
                    rows: 0,
                });
                self.flag(STATUS_UNKNOWN_TYPE);
                Ok(())
            }
            DatasetPayload::Cells {
                column_type,
                data,
                imaginary,
            } => {
                self.datasets.push(DatasetInfo {
                    name: record.name.clone(),
                    column_type: Some(column_type),
                    rows: data.len(),
                });

                match record.name.rfind('_') {
                    Some(split) => {
                        let book_ref = record.name[..split].to_string();
                        let column_name = record.name[split + 1..].to_string();
                        if column_name.is_empty() {
                            return Err(OpjError::Structural(format!(
                                "dataset '{}': empty column name",
                                record.name
                            )));
                        }
                        if book_ref.is_empty() {
                            return Err(OpjError::Structural(format!(
                                "column dataset '{}' names no owning book",
                                record.name
                            )));
                        }

                        let mut column = Column::new(column_name, column_type);
                        column.long_name = record.long_name;
                        column.units = record.units;
                        column.comments = record.comments;
                        column.begin_row = record.first_row;
                        column.end_row = record.last_row;
                        column.data = data;
                        column.imaginary_data = imaginary;

                        match book_ref.split_once('@') {
                            Some((book, sheet)) => {
                                if book.is_empty() || sheet.is_empty() {
                                    return Err(OpjError::Structural(format!(
                                        "dataset '{}': malformed book reference",
                                        record.name
                                    )));
                                }
                                self.excel_sheet(book, sheet).columns.push(column);
                            }
                            None => {
                                self.spread_sheet(&book_ref).columns.push(column);
                            }
                        }
                        Ok(())
                    }
                    None => self.add_matrix_sheet(record.name, column_type, data, imaginary),
                }
            }
        }
    }

    fn spread_sheet(&mut self, name: &str) -> &mut SpreadSheet {
        if let Some(idx) = self.spread_sheets.iter().position(|s| s.name == name) {
            &mut self.spread_sheets[idx]
        } else {
            self.spread_sheets.push(SpreadSheet::new(name));
            self.spread_sheets.last_mut().unwrap()
        }
    }

    fn excel_sheet(&mut self, book: &str, sheet: &str) -> &mut SpreadSheet {
        let book_idx = if let Some(idx) = self.excels.iter().position(|e| e.name == book) {
            idx
        } else {
            self.excels.push(Excel::new(book));
            self.excels.len() - 1
        };
        let excel = &mut self.excels[book_idx];
        if let Some(idx) = excel.sheets.iter().position(|s| s.name == sheet) {
            &mut excel.sheets[idx]
        } else {
            excel.sheets.push(SpreadSheet::new(sheet));
            excel.sheets.last_mut().unwrap()
        }
    }

    fn add_matrix_sheet(
        &mut self,
        name: String,
        column_type: opjread_core::ColumnType,
        data: Vec<opjread_core::Variant>,
        imaginary: Option<Vec<f64>>,
    ) -> OpjResult<()> {
        use opjread_core::ColumnType;

        if matches!(column_type, ColumnType::Text | ColumnType::TextNumeric) {
            warn!("skipping text dataset '{name}' outside any book");
            self.flag(STATUS_UNKNOWN_TYPE);
            return Ok(());
        }

        // "MBook@2" is sheet 2 of book "MBook"; a bare name is sheet 1
        let (book_name, sheet_no) = match name.split_once('@') {
            Some((book, no)) => match no.parse::<usize>() {
                Ok(n) if n >= 1 && !book.is_empty() => (book.to_string(), n),
                _ => {
                    return Err(OpjError::Structural(format!(
                        "matrix dataset '{name}': malformed sheet reference"
                    )))
                }
            },
            None => (name.clone(), 1),
        };

        let book_idx = if let Some(idx) = self.matrixes.iter().position(|m| m.name == book_name) {
            idx
        } else {
            self.matrixes.push(Matrix::new(&book_name));
            self.matrixes.len() - 1
        };
        let book = &mut self.matrixes[book_idx];
        while book.sheets.len() < sheet_no {
            let n = book.sheets.len() + 1;
            let sheet_name = if n == 1 {
                book_name.clone()
            } else {
                format!("{book_name}@{n}")
            };
            book.sheets.push(MatrixSheet::new(sheet_name));
        }

        let sheet = &mut book.sheets[sheet_no - 1];
        sheet.name = name;
        sheet.data = data.iter().map(|v| v.as_double()).collect();
        sheet.imaginary = imaginary;
        Ok(())
    }

    /// Add a decoded window record.
    pub fn add_window(&mut self, window: WindowRecord) -> OpjResult<()> {
        debug!("window {} (kind {})", window.name, window.kind);
        if window.end_mark_mismatch {
            self.flag(STATUS_END_MARK);
        }

        if window.kind == WINDOW_KIND_NOTE {
            let mut note = Note::new(window.name, window.note_text.unwrap_or_default());
            note.label = window.label;
            self.notes.push(note);
            return Ok(());
        }

        if let Some(sheet) = self
            .spread_sheets
            .iter_mut()
            .find(|s| s.name == window.name)
        {
            sheet.label = window.label;
            return Ok(());
        }

        if let Some(idx) = self.matrixes.iter().position(|m| m.name == window.name) {
            self.apply_matrix_layers(idx, &window)?;
            self.matrixes[idx].label = window.label;
            return Ok(());
        }

        if let Some(excel) = self.excels.iter_mut().find(|e| e.name == window.name) {
            excel.label = window.label;
            return Ok(());
        }

        // not a data book: a graph, or an unknown kind kept as one
        if window.kind > WINDOW_KIND_NOTE {
            warn!("window {}: unknown kind {}", window.name, window.kind);
            self.flag(STATUS_UNKNOWN_WINDOW);
        }
        let mut graph = Graph::new(window.name);
        graph.label = window.label;
        graph.layers = window
            .layers
            .into_iter()
            .map(|l| GraphLayer {
                name: l.name,
                x1: l.x1,
                x2: l.x2,
                y1: l.y1,
                y2: l.y2,
            })
            .collect();
        self.graphs.push(graph);
        Ok(())
    }

    fn apply_matrix_layers(&mut self, idx: usize, window: &WindowRecord) -> OpjResult<()> {
        let book = &mut self.matrixes[idx];
        for (i, layer) in window.layers.iter().enumerate() {
            let Some(sheet) = book.sheets.get_mut(i) else {
                warn!("matrix {}: layer {i} has no sheet", book.name);
                break;
            };
            if layer.column_count == 0 && layer.row_count == 0 {
                continue;
            }
            let cells = layer.column_count * layer.row_count;
            if cells != sheet.data.len() {
                return Err(OpjError::Corrupted(format!(
                    "matrix sheet '{}': {}x{} grid does not match {} decoded cells",
                    sheet.name,
                    layer.row_count,
                    layer.column_count,
                    sheet.data.len()
                )));
            }
            sheet.column_count = layer.column_count;
            sheet.row_count = layer.row_count;
            sheet.x1 = layer.x1;
            sheet.x2 = layer.x2;
            sheet.y1 = layer.y1;
            sheet.y2 = layer.y2;
        }
        Ok(())
    }

    /// Add one global parameter.
    pub fn add_parameter(&mut self, name: String, value: f64) {
        self.parameters.push((name, value));
    }

    /// Consume the builder and produce the project.
    pub fn finish(self, version: u32, build_version: u32) -> Project {
        let mut project = Project::new(version, build_version);
        project.parse_error = self.parse_error;
        project.datasets = self.datasets;
        project.spread_sheets = self.spread_sheets;
        project.matrixes = self.matrixes;
        project.excels = self.excels;
        project.functions = self.functions;
        project.graphs = self.graphs;
        project.notes = self.notes;
        project.parameters = self.parameters;
        project
    }
}
