//! OPJ decoder error types
//!
//! The taxonomy matters operationally to batch consumers: corrupted
//! files are candidates for re-acquisition, structural failures for
//! decoder bugs or unsupported format variants.

use thiserror::Error;

/// Result type for OPJ decoding
pub type OpjResult<T> = std::result::Result<T, OpjError>;

/// Errors that can occur while decoding an OPJ/OPJU stream
#[derive(Debug, Error)]
pub enum OpjError {
    /// IO error while reading the input
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The bytes end prematurely mid-record, or the compressed
    /// container fails to inflate: the file itself is damaged
    #[error("Corrupted stream: {0}")]
    Corrupted(String),

    /// Recognizable header, but the format generation predates the
    /// minimum supported version
    #[error("Unsupported file version {0} (minimum supported is 400)")]
    UnsupportedVersion(u32),

    /// A record's internal fields are inconsistent: unknown magic,
    /// bad delimiter, unresolvable containment
    #[error("Structural parse failure: {0}")]
    Structural(String),
}

impl OpjError {
    /// Corrupted-stream error for a read past the end of the buffer.
    pub(crate) fn end_of_data(offset: usize, need: usize) -> Self {
        OpjError::Corrupted(format!(
            "unexpected end of data at offset {offset}, need {need} bytes"
        ))
    }
}
