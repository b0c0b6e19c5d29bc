//! Export of cached artifacts as downloads.

use bytes::Bytes;

use crate::cache::{ArtifactCache, ArtifactIndex};
use crate::config::DEFAULT_ARCHIVE_NAME;
use crate::error::ExportError;
use crate::traits::{ArchiveEntry, Archiver};

/// Content type of a single exported artifact.
pub const OCTET_STREAM: &str = "application/octet-stream";

/// A file ready to hand to the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Download {
    pub name: String,
    pub content_type: &'static str,
    pub bytes: Bytes,
}

/// Builds downloads from the artifact cache.
///
/// Only reads the cache; exporting never changes artifacts or selection.
#[derive(Debug, Clone)]
pub struct ExportCoordinator<A> {
    archiver: A,
    archive_name: String,
}

impl<A: Archiver> ExportCoordinator<A> {
    pub fn new(archiver: A) -> Self {
        Self::with_archive_name(archiver, DEFAULT_ARCHIVE_NAME)
    }

    pub fn with_archive_name(archiver: A, archive_name: impl Into<String>) -> Self {
        Self {
            archiver,
            archive_name: archive_name.into(),
        }
    }

    pub fn archive_name(&self) -> &str {
        &self.archive_name
    }

    /// Export one artifact under its own name.
    pub fn export_one(
        &self,
        cache: &ArtifactCache,
        index: ArtifactIndex,
    ) -> Result<Download, ExportError> {
        let artifact = cache.get(index)?;
        Ok(Download {
            name: artifact.name.clone(),
            content_type: OCTET_STREAM,
            bytes: artifact.payload.clone(),
        })
    }

    /// Export the currently previewed artifact.
    pub fn export_selected(&self, cache: &ArtifactCache) -> Result<Download, ExportError> {
        let index = cache.selected().ok_or(ExportError::EmptyCache)?;
        self.export_one(cache, index)
    }

    /// Pack every artifact, in cache order, into one archive.
    pub fn export_all(&self, cache: &ArtifactCache) -> Result<Download, ExportError> {
        if cache.is_empty() {
            return Err(ExportError::EmptyCache);
        }

        let entries: Vec<ArchiveEntry> = cache
            .all()
            .iter()
            .map(|artifact| ArchiveEntry::new(artifact.name.clone(), artifact.payload.clone()))
            .collect();
        let bytes = self.archiver.pack(&entries)?;

        tracing::debug!(
            "Packed {} artifact(s) into {} ({} bytes)",
            entries.len(),
            self.archive_name,
            bytes.len()
        );

        Ok(Download {
            name: self.archive_name.clone(),
            content_type: self.archiver.content_type(),
            bytes,
        })
    }
}
