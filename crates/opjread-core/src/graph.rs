//! Graph window record

/// One layer of a graph window: the axis ranges, kept raw.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphLayer {
    /// Layer name
    pub name: String,
    /// X axis begin
    pub x1: f64,
    /// X axis end
    pub x2: f64,
    /// Y axis begin
    pub y1: f64,
    /// Y axis end
    pub y2: f64,
}

/// A graph window.
///
/// Retained as raw decoded fields; rendering semantics are out of
/// scope for the decoder.
#[derive(Debug, Clone, PartialEq)]
pub struct Graph {
    /// Window name
    pub name: String,
    /// Window label
    pub label: String,
    /// Layers in on-disk order
    pub layers: Vec<GraphLayer>,
}

impl Graph {
    /// Create an empty graph window.
    pub fn new<S: Into<String>>(name: S) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            layers: Vec::new(),
        }
    }
}
