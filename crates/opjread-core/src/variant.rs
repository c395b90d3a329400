//! The per-cell value representation

use std::fmt;

/// A single decoded cell value.
///
/// Every on-disk numeric encoding (8/16/32-bit integers, floats,
/// doubles) is normalized to `Double` during decoding; the original
/// width is retained on the owning column's
/// [`ColumnType`](crate::ColumnType). The format's missing-value
/// sentinel decodes to `Double(f64::NAN)`; cells of a row the file
/// never stored are `Empty`.
#[derive(Debug, Clone, PartialEq)]
pub enum Variant {
    /// No stored value
    Empty,

    /// Numeric value (NaN for the format's missing-value marker)
    Double(f64),

    /// Text value, already decoded from the file's codepage
    String(String),
}

impl Variant {
    /// Check if the value is numeric
    pub fn is_double(&self) -> bool {
        matches!(self, Variant::Double(_))
    }

    /// Check if the value is text
    pub fn is_string(&self) -> bool {
        matches!(self, Variant::String(_))
    }

    /// Check if the value is empty
    pub fn is_empty(&self) -> bool {
        matches!(self, Variant::Empty)
    }

    /// The numeric value; NaN for text or empty cells
    pub fn as_double(&self) -> f64 {
        match self {
            Variant::Double(v) => *v,
            _ => f64::NAN,
        }
    }

    /// The text value, if this is a string cell
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Variant::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Default for Variant {
    fn default() -> Self {
        Variant::Empty
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Variant::Empty => Ok(()),
            Variant::Double(v) => write!(f, "{v}"),
            Variant::String(s) => f.write_str(s),
        }
    }
}

impl From<f64> for Variant {
    fn from(v: f64) -> Self {
        Variant::Double(v)
    }
}

impl From<String> for Variant {
    fn from(s: String) -> Self {
        Variant::String(s)
    }
}
