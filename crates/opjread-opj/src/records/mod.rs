//! Record-level decoding of the OPJ stream.
//!
//! After the version line an OPJ stream is a sequence of size-framed
//! *objects*: a little-endian `u32` byte count, a `\n` delimiter, the
//! payload, and a trailing `\n` when the payload is non-empty. A size
//! of 0 terminates a list of objects.
//!
//! On top of that framing sit the typed records: the global header,
//! dataset elements (worksheet columns, matrix sheets, functions),
//! window elements with their layer lists, and the trailing parameter
//! list. Field layouts inside the record headers are
//! version-conditional; see [`layout::RecordLayout`].

pub mod dataset;
pub mod layout;
pub mod window;

use crate::cursor::ByteCursor;
use crate::error::{OpjError, OpjResult};

// ── Record type tags ────────────────────────────────────────────────────
/// Text column payload
pub const DATA_TYPE_TEXT: u16 = 0x6081;
/// Mixed text-and-numeric column payload
pub const DATA_TYPE_TEXT_NUMERIC: u16 = 0x6881;
/// Dataset signature marking a user-defined function
pub const SIGNATURE_FUNCTION: u16 = 70;

// ── Window kinds ────────────────────────────────────────────────────────
pub const WINDOW_KIND_BOOK: u8 = 0;
pub const WINDOW_KIND_GRAPH: u8 = 1;
pub const WINDOW_KIND_NOTE: u8 = 2;

/// The format's missing-value sentinel. Any cell whose normalized
/// double equals this bit pattern decodes as NaN.
pub const MISSING_VALUE: f64 = -1.23456789e-300;

/// Read an object size field (`u32` + `\n` delimiter).
pub fn read_object_size(cur: &mut ByteCursor<'_>) -> OpjResult<u32> {
    let size = cur.read_u32()?;
    let delim = cur.read_u8()?;
    if delim != b'\n' {
        return Err(OpjError::Structural(format!(
            "wrong object-size delimiter 0x{delim:02X} at offset {}",
            cur.position() - 1
        )));
    }
    Ok(size)
}

/// Read an object body of a known size (payload + trailing `\n` when
/// non-empty).
pub fn read_object<'a>(cur: &mut ByteCursor<'a>, size: u32) -> OpjResult<&'a [u8]> {
    let body = cur.read_bytes(size as usize)?;
    if size > 0 {
        let delim = cur.read_u8()?;
        if delim != b'\n' {
            return Err(OpjError::Structural(format!(
                "wrong object delimiter 0x{delim:02X} at offset {}",
                cur.position() - 1
            )));
        }
    }
    Ok(body)
}

/// Read the global header and return the refined file version, if the
/// header is large enough to carry one.
///
/// Headers longer than 0x1B bytes store `version / 100` as a double
/// at offset 0x1B.
pub fn read_global_header(cur: &mut ByteCursor<'_>) -> OpjResult<Option<u32>> {
    let size = read_object_size(cur)?;
    let body = read_object(cur, size)?;
    if body.len() > 0x1B + 8 - 1 {
        let mut field = ByteCursor::new(&body[0x1B..]);
        let v = field.read_f64()?;
        let refined = if v > 8.5 {
            (v * 100.0).trunc() as u32
        } else {
            10 * (v * 10.0).trunc() as u32
        };
        Ok(Some(refined))
    } else {
        Ok(None)
    }
}

/// Extract a fixed-width field from a record header, tolerating short
/// headers (older format generations omit trailing fields).
pub(crate) fn header_field(header: &[u8], offset: usize, len: usize) -> Option<&[u8]> {
    header.get(offset..offset + len)
}
