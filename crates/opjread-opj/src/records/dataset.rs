//! Dataset element decoding.
//!
//! A dataset element is three consecutive framed objects: a header, a
//! data payload and a mask. The header carries the dataset name, the
//! row extent and the on-disk cell type; the payload holds the raw
//! cells, which are normalized here into [`Variant`] values.

use log::warn;
use opjread_core::{ColumnType, Variant};

use super::layout::RecordLayout;
use super::{
    header_field, read_object, read_object_size, DATA_TYPE_TEXT, DATA_TYPE_TEXT_NUMERIC,
    MISSING_VALUE, SIGNATURE_FUNCTION,
};
use crate::codepage::decode_terminated;
use crate::cursor::ByteCursor;
use crate::error::{OpjError, OpjResult};

/// Decoded payload of one dataset element.
#[derive(Debug, Clone, PartialEq)]
pub enum DatasetPayload {
    /// Cell values of a column or matrix sheet
    Cells {
        /// On-disk storage type
        column_type: ColumnType,
        /// Normalized values
        data: Vec<Variant>,
        /// Imaginary parts, complex datasets only
        imaginary: Option<Vec<f64>>,
    },
    /// Formula text of a user-defined function
    Formula(String),
    /// Unrecognized cell type; the record was skipped
    Unknown {
        /// Raw type tag
        data_type: u16,
        /// Raw numeric-kind tag
        data_type_u: u8,
    },
}

/// One decoded dataset element.
#[derive(Debug, Clone, PartialEq)]
pub struct DatasetRecord {
    /// Full dataset name as stored (`Book_A`, `Book@Sheet_A`,
    /// `MBook@2`, ...)
    pub name: String,
    /// Record signature (70 marks a function)
    pub signature: u16,
    /// Declared total row count
    pub total_rows: usize,
    /// First stored row (inclusive)
    pub first_row: usize,
    /// One past the last stored row
    pub last_row: usize,
    /// Optional descriptive column name
    pub long_name: String,
    /// Optional units text
    pub units: String,
    /// Optional comment text
    pub comments: String,
    /// Decoded payload
    pub payload: DatasetPayload,
    /// Declared extent disagreed with the payload and was clamped
    pub extent_mismatch: bool,
}

/// Read one dataset element, or `None` at the list terminator.
pub fn read_dataset_element(
    cur: &mut ByteCursor<'_>,
    layout: &RecordLayout,
    codepage: u16,
) -> OpjResult<Option<DatasetRecord>> {
    let header_size = read_object_size(cur)?;
    if header_size == 0 {
        return Ok(None);
    }
    let header = read_object(cur, header_size)?;

    if header.len() < layout.name_offset + 25 {
        return Err(OpjError::Structural(format!(
            "dataset header too short: {} bytes",
            header.len()
        )));
    }

    let data_type = read_u16_at(header, 0x16);
    let total_rows = read_u32_at(header, 0x19) as usize;
    let first_row = read_u32_at(header, 0x1D) as usize;
    let last_row = read_u32_at(header, 0x21) as usize;
    let mut value_size = header[layout.value_size_offset];
    let data_type_u = header[0x3F];
    let name = decode_terminated(&header[layout.name_offset..layout.name_offset + 25], codepage);

    // later generations moved the signature past the name block; short
    // headers fall back to the single-byte field
    let signature = if header.len() > 0x72 {
        read_u16_at(header, 0x71)
    } else {
        header[0x18] as u16
    };

    let (long_name, units, comments) = if header.len() >= 0xEE {
        (
            decode_terminated(&header[0x76..0x76 + 40], codepage),
            decode_terminated(&header[0x9E..0x9E + 40], codepage),
            decode_terminated(&header[0xC6..0xC6 + 40], codepage),
        )
    } else {
        (String::new(), String::new(), String::new())
    };

    if value_size == 0 {
        warn!("dataset {name}: value size 0, assuming 8");
        value_size = 8;
    }

    let data_size = read_object_size(cur)?;
    let data = read_object(cur, data_size)?;

    // mask object, retained unparsed
    let mask_size = read_object_size(cur)?;
    read_object(cur, mask_size)?;

    let is_function = !name.contains('_') && signature == SIGNATURE_FUNCTION;
    let payload = if is_function {
        DatasetPayload::Formula(decode_terminated(data, codepage))
    } else {
        decode_cells(data, data_type, data_type_u, value_size, codepage)
    };

    // clamp the extent to what the payload actually holds
    let (first_row, last_row, extent_mismatch) = match &payload {
        DatasetPayload::Cells { data: cells, .. } => {
            let declared = last_row.saturating_sub(first_row);
            if declared != cells.len() {
                warn!(
                    "dataset {name}: declared extent {declared} rows, payload has {}",
                    cells.len()
                );
                (first_row, first_row + cells.len(), true)
            } else {
                (first_row, last_row, false)
            }
        }
        _ => (first_row, last_row, false),
    };

    Ok(Some(DatasetRecord {
        name,
        signature,
        total_rows,
        first_row,
        last_row,
        long_name,
        units,
        comments,
        payload,
        extent_mismatch,
    }))
}

/// Map the raw type tags to the retained column type.
pub fn column_type_for(data_type: u16, data_type_u: u8, value_size: u8) -> Option<ColumnType> {
    match data_type {
        DATA_TYPE_TEXT => Some(ColumnType::Text),
        DATA_TYPE_TEXT_NUMERIC => Some(ColumnType::TextNumeric),
        _ => match (data_type_u, value_size) {
            (0x00, 8) => Some(ColumnType::Double),
            (0x00, 4) => Some(ColumnType::Float),
            (0x00, 16) => Some(ColumnType::Complex),
            (0x01, 1) => Some(ColumnType::Char),
            (0x01, 2) => Some(ColumnType::Short),
            (0x01, 4) => Some(ColumnType::Long),
            (0x02, 1) => Some(ColumnType::Byte),
            (0x02, 2) => Some(ColumnType::UShort),
            (0x02, 4) => Some(ColumnType::ULong),
            _ => None,
        },
    }
}

/// Normalize a raw payload into variants.
fn decode_cells(
    data: &[u8],
    data_type: u16,
    data_type_u: u8,
    value_size: u8,
    codepage: u16,
) -> DatasetPayload {
    let column_type = match column_type_for(data_type, data_type_u, value_size) {
        Some(ct) => ct,
        None => {
            warn!(
                "unknown cell type: data_type 0x{data_type:04X}, \
                 data_type_u 0x{data_type_u:02X}, value size {value_size}"
            );
            return DatasetPayload::Unknown {
                data_type,
                data_type_u,
            };
        }
    };

    let step = value_size as usize;
    // a text-and-numeric cell starts with 2 flag bytes; anything
    // narrower cannot be indexed safely
    if column_type == ColumnType::TextNumeric && step < 2 {
        warn!("text-and-numeric cells of {step} bytes are too narrow, skipping");
        return DatasetPayload::Unknown {
            data_type,
            data_type_u,
        };
    }
    let count = data.len() / step;
    let mut cells = Vec::with_capacity(count);
    let mut imaginary = if column_type == ColumnType::Complex {
        Some(Vec::with_capacity(count))
    } else {
        None
    };

    for chunk in data.chunks_exact(step) {
        match column_type {
            ColumnType::Text => {
                cells.push(Variant::String(decode_terminated(chunk, codepage)));
            }
            ColumnType::TextNumeric => {
                let flag = u16::from_le_bytes([chunk[0], chunk[1]]);
                if flag == 0 {
                    if chunk.len() < 10 {
                        warn!(
                            "numeric cell in a {}-byte text-and-numeric field, skipping",
                            chunk.len()
                        );
                        return DatasetPayload::Unknown {
                            data_type,
                            data_type_u,
                        };
                    }
                    let mut buf = [0u8; 8];
                    buf.copy_from_slice(&chunk[2..10]);
                    cells.push(Variant::Double(normalize(f64::from_le_bytes(buf))));
                } else {
                    cells.push(Variant::String(decode_terminated(&chunk[2..], codepage)));
                }
            }
            ColumnType::Complex => {
                let mut re = [0u8; 8];
                re.copy_from_slice(&chunk[..8]);
                let mut im = [0u8; 8];
                im.copy_from_slice(&chunk[8..16]);
                cells.push(Variant::Double(normalize(f64::from_le_bytes(re))));
                if let Some(parts) = imaginary.as_mut() {
                    parts.push(f64::from_le_bytes(im));
                }
            }
            _ => {
                cells.push(Variant::Double(normalize(decode_numeric(
                    chunk,
                    column_type,
                ))));
            }
        }
    }

    DatasetPayload::Cells {
        column_type,
        data: cells,
        imaginary,
    }
}

/// Widen one fixed-width numeric cell to f64.
fn decode_numeric(chunk: &[u8], column_type: ColumnType) -> f64 {
    match column_type {
        ColumnType::Double => {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(&chunk[..8]);
            f64::from_le_bytes(buf)
        }
        ColumnType::Float => {
            let mut buf = [0u8; 4];
            buf.copy_from_slice(&chunk[..4]);
            f32::from_le_bytes(buf) as f64
        }
        ColumnType::Char => chunk[0] as i8 as f64,
        ColumnType::Byte => chunk[0] as f64,
        ColumnType::Short => i16::from_le_bytes([chunk[0], chunk[1]]) as f64,
        ColumnType::UShort => u16::from_le_bytes([chunk[0], chunk[1]]) as f64,
        ColumnType::Long => i32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64,
        ColumnType::ULong => u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]) as f64,
        // text/complex handled by the caller
        _ => f64::NAN,
    }
}

/// Map the missing-value sentinel to NaN.
fn normalize(v: f64) -> f64 {
    if v.to_bits() == MISSING_VALUE.to_bits() {
        f64::NAN
    } else {
        v
    }
}

fn read_u16_at(data: &[u8], offset: usize) -> u16 {
    match header_field(data, offset, 2) {
        Some(b) => u16::from_le_bytes([b[0], b[1]]),
        None => 0,
    }
}

fn read_u32_at(data: &[u8], offset: usize) -> u32 {
    match header_field(data, offset, 4) {
        Some(b) => u32::from_le_bytes([b[0], b[1], b[2], b[3]]),
        None => 0,
    }
}
