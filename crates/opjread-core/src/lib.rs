//! # opjread-core
//!
//! Data structures for decoded Origin project files.
//!
//! This crate holds the output model of the OPJ/OPJU decoder: a
//! [`Project`] owning ordered collections of [`SpreadSheet`]s,
//! [`Matrix`] books, [`Excel`] workbooks, [`Function`]s, [`Graph`]s
//! and [`Note`]s. Everything here is a plain data container; the
//! binary decoding itself lives in the `opjread-opj` crate.
//!
//! All values are constructed once, during a single decode pass, and
//! are read-only afterwards.

pub mod column;
pub mod error;
pub mod excel;
pub mod function;
pub mod graph;
pub mod matrix;
pub mod note;
pub mod project;
pub mod spreadsheet;
pub mod variant;

// Re-exports for convenience
pub use column::{Column, ColumnType};
pub use error::{Error, Result};
pub use excel::Excel;
pub use function::Function;
pub use graph::{Graph, GraphLayer};
pub use matrix::{Matrix, MatrixSheet};
pub use note::Note;
pub use project::{DatasetInfo, Project};
pub use spreadsheet::SpreadSheet;
pub use variant::Variant;
