//! Note window record

/// A note window: free text attached to the project.
#[derive(Debug, Clone, PartialEq)]
pub struct Note {
    /// Window name
    pub name: String,
    /// Window label
    pub label: String,
    /// Note body, codepage-decoded
    pub text: String,
}

impl Note {
    /// Create a note.
    pub fn new<S: Into<String>>(name: S, text: String) -> Self {
        Self {
            name: name.into(),
            label: String::new(),
            text,
        }
    }
}
