//! Zip-based archive adapter.

use std::collections::HashSet;
use std::io::{Cursor, Write};

use bytes::Bytes;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::traits::{ArchiveEntry, ArchiveError, Archiver};

/// Content type of zip archives.
pub const ZIP_CONTENT_TYPE: &str = "application/zip";

/// Packs entries into an in-memory zip file.
#[derive(Debug, Clone, Copy)]
pub struct ZipArchiver {
    compression: CompressionMethod,
}

impl ZipArchiver {
    /// Deflate-compressed archives.
    pub fn new() -> Self {
        Self {
            compression: CompressionMethod::Deflated,
        }
    }

    /// Store entries uncompressed.
    pub fn stored() -> Self {
        Self {
            compression: CompressionMethod::Stored,
        }
    }
}

impl Default for ZipArchiver {
    fn default() -> Self {
        Self::new()
    }
}

impl Archiver for ZipArchiver {
    fn content_type(&self) -> &'static str {
        ZIP_CONTENT_TYPE
    }

    fn pack(&self, entries: &[ArchiveEntry]) -> Result<Bytes, ArchiveError> {
        let options = SimpleFileOptions::default().compression_method(self.compression);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        let mut used = HashSet::new();

        for entry in entries {
            let name = unique_name(&entry.name, &mut used);
            zip.start_file(name, options)
                .map_err(|e| ArchiveError::Entry {
                    name: entry.name.clone(),
                    message: e.to_string(),
                })?;
            zip.write_all(&entry.bytes)?;
        }

        let cursor = zip.finish().map_err(|e| ArchiveError::Entry {
            name: String::new(),
            message: e.to_string(),
        })?;
        Ok(Bytes::from(cursor.into_inner()))
    }
}

/// Zip entries need distinct names; artifact names need not be.
/// Repeats get a numeric suffix before the extension: `a.stl`, `a-1.stl`.
fn unique_name(name: &str, used: &mut HashSet<String>) -> String {
    if used.insert(name.to_string()) {
        return name.to_string();
    }
    let (stem, ext) = match name.rfind('.') {
        Some(dot) if dot > 0 => name.split_at(dot),
        _ => (name, ""),
    };
    let mut n = 1;
    loop {
        let candidate = format!("{}-{}{}", stem, n, ext);
        if used.insert(candidate.clone()) {
            return candidate;
        }
        n += 1;
    }
}
