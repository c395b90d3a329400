//! File version probe.
//!
//! OPJ and OPJU streams open with an ASCII version line:
//!
//! ```text
//! CPYA 9.0 B292 #\n          (plain .opj)
//! CPYUA 1.0 V9.8 B985 #\n    (compressed .opju container)
//! ```
//!
//! The probe inspects only this line (at most [`HEADER_REGION`]
//! bytes), never raises on a well-formed-but-old header, and reports
//! an unrecognized magic through [`FileVersionInfo::error`] so the
//! caller can decide whether to attempt a full decode at all.

use std::io::{Read, Seek, SeekFrom};

use crate::error::OpjResult;

/// Maximum size of the header region the probe may consume.
pub const HEADER_REGION: usize = 64;

/// Result of probing the fixed header region.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FileVersionInfo {
    /// Primary format version (e.g. 750 for 7.5, 900 for 9.0;
    /// 9999 for OPJU containers)
    pub file_version: u32,
    /// Refined version used by later format generations (OPJU only)
    pub new_file_version: u32,
    /// Build number from the header line
    pub build_version: u32,
    /// Whether the stream is the compressed OPJU container
    pub is_opju: bool,
    /// Set when the header bytes match no known magic signature
    pub error: Option<String>,
    /// Length of the version line including its terminator
    pub header_len: usize,
}

impl FileVersionInfo {
    fn invalid<S: Into<String>>(msg: S) -> Self {
        FileVersionInfo {
            error: Some(msg.into()),
            ..Default::default()
        }
    }
}

/// Probe the version line of an in-memory stream.
pub fn probe_version_bytes(data: &[u8]) -> FileVersionInfo {
    let region = &data[..data.len().min(HEADER_REGION)];
    let nl = match region.iter().position(|&b| b == b'\n') {
        Some(idx) => idx,
        None => return FileVersionInfo::invalid("no version line within the header region"),
    };
    let line = match std::str::from_utf8(&region[..nl]) {
        Ok(s) => s.trim_end(),
        Err(_) => return FileVersionInfo::invalid("version line is not ASCII"),
    };
    if !line.ends_with('#') {
        return FileVersionInfo::invalid("version line does not end with '#'");
    }

    let tokens: Vec<&str> = line.split_whitespace().collect();
    let mut info = FileVersionInfo {
        header_len: nl + 1,
        ..Default::default()
    };

    match tokens.first().copied() {
        Some("CPYA") => {
            info.file_version = match tokens.get(1).and_then(|t| parse_version(t)) {
                Some(v) => v,
                None => return FileVersionInfo::invalid("missing or malformed version number"),
            };
            info.build_version = tokens
                .get(2)
                .and_then(|t| t.strip_prefix('B'))
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
        }
        Some("CPYUA") => {
            info.is_opju = true;
            info.file_version = 9999;
            info.new_file_version = tokens
                .get(2)
                .and_then(|t| t.strip_prefix('V'))
                .and_then(parse_version)
                .unwrap_or(0);
            info.build_version = tokens
                .iter()
                .find_map(|t| t.strip_prefix('B'))
                .and_then(|t| t.parse().ok())
                .unwrap_or(0);
        }
        _ => return FileVersionInfo::invalid("not a valid opj or opju file"),
    }

    info
}

/// Probe the version line of a seekable stream.
///
/// The stream position is restored to where it was before the call,
/// so probing never consumes from the caller's stream.
pub fn probe_version<R: Read + Seek>(reader: &mut R) -> OpjResult<FileVersionInfo> {
    let start = reader.stream_position()?;
    let mut buf = [0u8; HEADER_REGION];
    let mut filled = 0;
    // read_exact would fail on tiny files; fill as much as available
    while filled < buf.len() {
        let n = reader.read(&mut buf[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    reader.seek(SeekFrom::Start(start))?;
    Ok(probe_version_bytes(&buf[..filled]))
}

/// Parse a dotted version like `9.0` or `7.5` into hundredths (900,
/// 750).
fn parse_version(token: &str) -> Option<u32> {
    let v: f64 = token.parse().ok()?;
    if !(0.0..=100.0).contains(&v) {
        return None;
    }
    Some((v * 100.0).round() as u32)
}
