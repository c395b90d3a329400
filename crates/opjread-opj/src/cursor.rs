//! Bounds-checked byte cursor.
//!
//! All multi-byte values in OPJ streams are little-endian. Every read
//! past the end of the backing buffer fails with a corrupted-stream
//! error; reads never wrap or return garbage.

use crate::error::{OpjError, OpjResult};

/// Sequential reader over an in-memory byte buffer.
#[derive(Debug)]
pub struct ByteCursor<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> ByteCursor<'a> {
    /// Create a cursor positioned at offset 0.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current absolute offset.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether the cursor is at the end of the buffer.
    pub fn at_end(&self) -> bool {
        self.pos == self.data.len()
    }

    fn take(&mut self, n: usize) -> OpjResult<&'a [u8]> {
        if self.remaining() < n {
            return Err(OpjError::end_of_data(self.pos, n));
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    /// Read a fixed-length byte block.
    pub fn read_bytes(&mut self, n: usize) -> OpjResult<&'a [u8]> {
        self.take(n)
    }

    /// Skip `n` bytes.
    pub fn skip(&mut self, n: usize) -> OpjResult<()> {
        self.take(n).map(|_| ())
    }

    /// Read a `u8`.
    pub fn read_u8(&mut self) -> OpjResult<u8> {
        Ok(self.take(1)?[0])
    }

    /// Read an `i8`.
    pub fn read_i8(&mut self) -> OpjResult<i8> {
        self.read_u8().map(|v| v as i8)
    }

    /// Read a `u16` (little-endian).
    pub fn read_u16(&mut self) -> OpjResult<u16> {
        let b = self.take(2)?;
        Ok(u16::from_le_bytes([b[0], b[1]]))
    }

    /// Read an `i16` (little-endian).
    pub fn read_i16(&mut self) -> OpjResult<i16> {
        self.read_u16().map(|v| v as i16)
    }

    /// Read a `u32` (little-endian).
    pub fn read_u32(&mut self) -> OpjResult<u32> {
        let b = self.take(4)?;
        Ok(u32::from_le_bytes([b[0], b[1], b[2], b[3]]))
    }

    /// Read an `i32` (little-endian).
    pub fn read_i32(&mut self) -> OpjResult<i32> {
        self.read_u32().map(|v| v as i32)
    }

    /// Read a `u64` (little-endian).
    pub fn read_u64(&mut self) -> OpjResult<u64> {
        let b = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Ok(u64::from_le_bytes(buf))
    }

    /// Read an `i64` (little-endian).
    pub fn read_i64(&mut self) -> OpjResult<i64> {
        self.read_u64().map(|v| v as i64)
    }

    /// Read an IEEE 754 single (little-endian).
    pub fn read_f32(&mut self) -> OpjResult<f32> {
        let b = self.take(4)?;
        let mut buf = [0u8; 4];
        buf.copy_from_slice(b);
        Ok(f32::from_le_bytes(buf))
    }

    /// Read an IEEE 754 double (little-endian).
    pub fn read_f64(&mut self) -> OpjResult<f64> {
        let b = self.take(8)?;
        let mut buf = [0u8; 8];
        buf.copy_from_slice(b);
        Ok(f64::from_le_bytes(buf))
    }

    /// Look at the next byte without consuming it.
    pub fn peek_u8(&self) -> Option<u8> {
        self.data.get(self.pos).copied()
    }

    /// Read up to and including the next `\n`, returning the bytes
    /// before it.
    pub fn read_line(&mut self) -> OpjResult<&'a [u8]> {
        let rest = &self.data[self.pos..];
        match rest.iter().position(|&b| b == b'\n') {
            Some(idx) => {
                let line = &rest[..idx];
                self.pos += idx + 1;
                Ok(line)
            }
            None => Err(OpjError::Corrupted(format!(
                "unterminated line at offset {}",
                self.pos
            ))),
        }
    }
}
