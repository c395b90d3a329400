//! User-defined function record

/// A user-defined function dataset.
///
/// The decoder extracts the fields verbatim; interpreting the formula
/// is left to the consumer.
#[derive(Debug, Clone, PartialEq)]
pub struct Function {
    /// Function name
    pub name: String,
    /// Formula text as stored in the file
    pub formula: String,
    /// Number of evaluation points declared by the record
    pub point_count: usize,
}

impl Function {
    /// Create a function record.
    pub fn new<S: Into<String>>(name: S, formula: String, point_count: usize) -> Self {
        Self {
            name: name.into(),
            formula,
            point_count,
        }
    }
}
