//! # opjread-opj
//!
//! Decoder for the proprietary Origin project formats (.opj and the
//! zlib-compressed .opju container).
//!
//! The format is a sequence of loosely typed, size-framed records with
//! no explicit pointer structure; parent/child containment (books →
//! sheets → columns) is reconstructed from record ordering and name
//! references embedded in the records. Field layouts are
//! version-conditional and selected once from the probed file version.
//!
//! Decoding is a single synchronous pass:
//!
//! ```text
//! raw bytes → (zlib inflate for .opju) → version probe
//!           → record stream decoder → object graph builder → Project
//! ```

pub mod builder;
pub mod codepage;
pub mod cursor;
pub mod decompress;
pub mod error;
pub mod reader;
pub mod records;
pub mod version;

pub use error::{OpjError, OpjResult};
pub use reader::{DecodeOptions, OpjReader};
pub use version::{probe_version, probe_version_bytes, FileVersionInfo};

/// Oldest file-format version the decoder implements.
///
/// Recognizable headers below this probe successfully but are refused
/// by the decode entry points with
/// [`OpjError::UnsupportedVersion`].
pub const MIN_SUPPORTED_VERSION: u32 = 400;
