//! Window element decoding.
//!
//! A window element is a framed header, a kind-dependent body (a note
//! text object, or a list of layer objects), and an end mark that
//! repeats the header size. Windows carry no payload data of their
//! own; they attach labels, matrix dimensions and coordinate bounds
//! to the books built from the dataset list, or stand alone as graph
//! and note windows.

use log::warn;

use super::{header_field, read_object, read_object_size, WINDOW_KIND_NOTE};
use crate::codepage::decode_terminated;
use crate::cursor::ByteCursor;
use crate::error::OpjResult;

/// One decoded layer of a window.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerRecord {
    /// Layer name (for workbook windows: the owning sheet's name)
    pub name: String,
    /// Axis / coordinate bounds
    pub x1: f64,
    pub x2: f64,
    pub y1: f64,
    pub y2: f64,
    /// Grid width (matrix layers, 0 otherwise)
    pub column_count: usize,
    /// Grid height (matrix layers, 0 otherwise)
    pub row_count: usize,
}

/// One decoded window element.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowRecord {
    /// Window name
    pub name: String,
    /// Kind tag (0 = data book, 1 = graph, 2 = note)
    pub kind: u8,
    /// Window label
    pub label: String,
    /// Layers in on-disk order (empty for notes)
    pub layers: Vec<LayerRecord>,
    /// Note body (note windows only)
    pub note_text: Option<String>,
    /// The end mark did not repeat the header size
    pub end_mark_mismatch: bool,
}

/// Read one window element, or `None` at the list terminator.
pub fn read_window_element(
    cur: &mut ByteCursor<'_>,
    codepage: u16,
) -> OpjResult<Option<WindowRecord>> {
    let header_size = read_object_size(cur)?;
    if header_size == 0 {
        return Ok(None);
    }
    let header = read_object(cur, header_size)?;

    let name = match header_field(header, 0x02, 25) {
        Some(bytes) => decode_terminated(bytes, codepage),
        None => String::new(),
    };
    let kind = header.get(0x1B).copied().unwrap_or(0);
    let label = match header_field(header, 0x34, 25) {
        Some(bytes) => decode_terminated(bytes, codepage),
        None => String::new(),
    };

    let (layers, note_text) = if kind == WINDOW_KIND_NOTE {
        let text_size = read_object_size(cur)?;
        let text = read_object(cur, text_size)?;
        (Vec::new(), Some(decode_terminated(text, codepage)))
    } else {
        let mut layers = Vec::new();
        loop {
            let layer_size = read_object_size(cur)?;
            if layer_size == 0 {
                break;
            }
            let body = read_object(cur, layer_size)?;
            layers.push(parse_layer(body, codepage));
        }
        (layers, None)
    };

    let end_mark = read_object_size(cur)?;
    let end_mark_mismatch = end_mark != header_size;
    if end_mark_mismatch {
        warn!("window {name}: end mark {end_mark} does not match header size {header_size}");
    }

    Ok(Some(WindowRecord {
        name,
        kind,
        label,
        layers,
        note_text,
        end_mark_mismatch,
    }))
}

fn parse_layer(body: &[u8], codepage: u16) -> LayerRecord {
    let name = match header_field(body, 0x02, 25) {
        Some(bytes) => decode_terminated(bytes, codepage),
        None => String::new(),
    };
    LayerRecord {
        name,
        x1: read_f64_at(body, 0x1B),
        x2: read_f64_at(body, 0x23),
        y1: read_f64_at(body, 0x2B),
        y2: read_f64_at(body, 0x33),
        column_count: read_u16_at(body, 0x3B) as usize,
        row_count: read_u16_at(body, 0x3D) as usize,
    }
}

fn read_f64_at(data: &[u8], offset: usize) -> f64 {
    match header_field(data, offset, 8) {
        Some(b) => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(b);
            f64::from_le_bytes(buf)
        }
        None => 0.0,
    }
}

fn read_u16_at(data: &[u8], offset: usize) -> u16 {
    match header_field(data, offset, 2) {
        Some(b) => u16::from_le_bytes([b[0], b[1]]),
        None => 0,
    }
}
