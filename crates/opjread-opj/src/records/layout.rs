//! Version-conditional record layouts.
//!
//! The same logical record has different byte layouts across format
//! generations. The layout is selected once, after the version probe
//! (and the global-header refinement), and threaded through the
//! decoder instead of being re-derived per record.

/// Field placement for the records of one version range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordLayout {
    /// Offset of the per-cell value size in a dataset header
    pub value_size_offset: usize,
    /// Offset of the 25-byte dataset name in a dataset header
    pub name_offset: usize,
}

impl RecordLayout {
    /// Select the layout for a probed (and possibly refined) file
    /// version.
    pub fn for_version(file_version: u32) -> Self {
        if file_version == 350 {
            // 3.5 keeps the value size and name one byte earlier
            RecordLayout {
                value_size_offset: 0x36,
                name_offset: 0x57,
            }
        } else {
            RecordLayout {
                value_size_offset: 0x3D,
                name_offset: 0x58,
            }
        }
    }
}
