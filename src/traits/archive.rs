//! Archive packaging seam used by "export all".

use bytes::Bytes;
use thiserror::Error;

/// One named file handed to an [`Archiver`].
#[derive(Debug, Clone, PartialEq)]
pub struct ArchiveEntry {
    pub name: String,
    pub bytes: Bytes,
}

impl ArchiveEntry {
    pub fn new(name: impl Into<String>, bytes: Bytes) -> Self {
        Self {
            name: name.into(),
            bytes,
        }
    }
}

/// Error type for archive packaging.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The archive writer rejected an entry or failed to finish
    #[error("Failed to write archive entry '{name}': {message}")]
    Entry { name: String, message: String },

    /// Underlying I/O failure
    #[error("Archive I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Packs named byte blobs into a single archive.
pub trait Archiver: Send + Sync {
    /// Content type of the produced archive.
    fn content_type(&self) -> &'static str;

    /// Pack `entries` in order.
    fn pack(&self, entries: &[ArchiveEntry]) -> Result<Bytes, ArchiveError>;
}
