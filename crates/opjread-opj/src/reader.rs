//! Decode entry points.
//!
//! A decode is one synchronous pass over an in-memory byte buffer:
//! probe the version line, inflate the body for OPJU containers,
//! select the version-conditional record layout, then stream dataset
//! and window records into a [`ProjectBuilder`]. The result is
//! all-or-nothing: a fatal error discards everything decoded so far.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::{debug, info};
use opjread_core::Project;

use crate::builder::ProjectBuilder;
use crate::codepage::decode_terminated;
use crate::cursor::ByteCursor;
use crate::decompress::inflate;
use crate::error::{OpjError, OpjResult};
use crate::records::dataset::read_dataset_element;
use crate::records::layout::RecordLayout;
use crate::records::window::read_window_element;
use crate::records::{read_global_header, read_object, read_object_size};
use crate::version::probe_version_bytes;
use crate::MIN_SUPPORTED_VERSION;

/// Options controlling a decode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecodeOptions {
    /// Windows codepage used for all embedded text fields.
    pub codepage: u16,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions { codepage: 1252 }
    }
}

/// Decoder for OPJ and OPJU streams.
#[derive(Debug, Clone, Default)]
pub struct OpjReader {
    options: DecodeOptions,
}

impl OpjReader {
    /// Create a decoder with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a decoder that decodes embedded text with the given
    /// Windows codepage.
    pub fn with_codepage(codepage: u16) -> Self {
        OpjReader {
            options: DecodeOptions { codepage },
        }
    }

    /// Decode a project file from disk.
    pub fn read_file<P: AsRef<Path>>(&self, path: P) -> OpjResult<Project> {
        let mut file = File::open(path)?;
        self.read(&mut file)
    }

    /// Decode a project from any byte stream.
    pub fn read<R: Read>(&self, reader: &mut R) -> OpjResult<Project> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        self.read_bytes(&data)
    }

    /// Decode a project from an in-memory buffer.
    pub fn read_bytes(&self, data: &[u8]) -> OpjResult<Project> {
        let probed = probe_version_bytes(data);
        if let Some(msg) = probed.error {
            return Err(OpjError::Structural(msg));
        }
        if !probed.is_opju && probed.file_version < MIN_SUPPORTED_VERSION {
            return Err(OpjError::UnsupportedVersion(probed.file_version));
        }
        info!(
            "decoding {} stream, version {} build {}",
            if probed.is_opju { "opju" } else { "opj" },
            probed.file_version,
            probed.build_version
        );

        let inflated;
        let body: &[u8] = if probed.is_opju {
            inflated = inflate(&data[probed.header_len..])?;
            &inflated
        } else {
            &data[probed.header_len..]
        };

        let mut cur = ByteCursor::new(body);
        let mut version = probed.file_version;
        if let Some(refined) = read_global_header(&mut cur)? {
            debug!("global header refines version {version} to {refined}");
            version = refined;
        }
        let layout = RecordLayout::for_version(version);

        let mut builder = ProjectBuilder::new();
        while let Some(record) = read_dataset_element(&mut cur, &layout, self.options.codepage)? {
            builder.add_dataset(record)?;
        }
        while let Some(window) = read_window_element(&mut cur, self.options.codepage)? {
            builder.add_window(window)?;
        }

        self.read_parameters(&mut cur, &mut builder)?;
        skip_project_tree(&mut cur)?;
        skip_attachments(&mut cur)?;

        Ok(builder.finish(version, probed.build_version))
    }

    /// Read the trailing name/value parameter list. A blank name line
    /// terminates it.
    fn read_parameters(
        &self,
        cur: &mut ByteCursor<'_>,
        builder: &mut ProjectBuilder,
    ) -> OpjResult<()> {
        while !cur.at_end() {
            let line = cur.read_line()?;
            if line.is_empty() {
                break;
            }
            let name = decode_terminated(line, self.options.codepage);
            let value = cur.read_f64()?;
            let delim = cur.read_u8()?;
            if delim != b'\n' {
                return Err(OpjError::Structural(format!(
                    "wrong parameter delimiter 0x{delim:02X} after '{name}'"
                )));
            }
            debug!("parameter {name} = {value}");
            builder.add_parameter(name, value);
        }
        Ok(())
    }
}

// The folder/tree section is two framed objects describing the window
// hierarchy in the UI. Containment of data is fully determined by the
// dataset names, so the tree is skipped.
fn skip_project_tree(cur: &mut ByteCursor<'_>) -> OpjResult<()> {
    for _ in 0..2 {
        if cur.at_end() {
            return Ok(());
        }
        let size = read_object_size(cur)?;
        read_object(cur, size)?;
    }
    Ok(())
}

// Trailing attachment objects, until a zero size or end of stream.
fn skip_attachments(cur: &mut ByteCursor<'_>) -> OpjResult<()> {
    while !cur.at_end() {
        let size = read_object_size(cur)?;
        if size == 0 {
            return Ok(());
        }
        read_object(cur, size)?;
    }
    Ok(())
}
