//! Zlib inflation for the OPJU container.
//!
//! OPJU files keep the ASCII version line uncompressed and deflate
//! everything after it as a single zlib stream. The inflated bytes
//! follow the same record grammar as a plain OPJ body.

use std::io::Read;

use flate2::read::ZlibDecoder;
use log::debug;

use crate::error::{OpjError, OpjResult};

/// Inflate the compressed body of an OPJU file.
pub fn inflate(compressed: &[u8]) -> OpjResult<Vec<u8>> {
    let mut decoder = ZlibDecoder::new(compressed);
    let mut out = Vec::new();
    decoder
        .read_to_end(&mut out)
        .map_err(|e| OpjError::Corrupted(format!("zlib inflation failed: {e}")))?;
    debug!("inflated {} bytes into {}", compressed.len(), out.len());
    Ok(out)
}
