//! Artifact storage for ArtifactCache

use std::fmt;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use super::ArtifactCache;
use crate::error::CacheError;
use crate::stream::Bounds;

/// Position of an artifact within its session, by arrival order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ArtifactIndex(usize);

impl ArtifactIndex {
    pub fn new(index: usize) -> Self {
        Self(index)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl fmt::Display for ArtifactIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<usize> for ArtifactIndex {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

/// One generated output. Immutable once cached.
#[derive(Debug, Clone, PartialEq)]
pub struct Artifact {
    pub index: ArtifactIndex,
    /// Display file name; not necessarily unique within a session
    pub name: String,
    /// Decoded payload bytes
    pub payload: Bytes,
    pub bounds: Bounds,
}

/// Entry of the artifact picker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SelectionOption {
    pub index: ArtifactIndex,
    pub name: String,
}

impl From<&Artifact> for SelectionOption {
    fn from(artifact: &Artifact) -> Self {
        Self {
            index: artifact.index,
            name: artifact.name.clone(),
        }
    }
}

/// Result of [`ArtifactCache::append`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Appended {
    /// Index assigned to the new artifact
    pub index: ArtifactIndex,
    /// First artifact since the last reset: it became the selection and
    /// should be shown in the preview
    pub display: bool,
}

impl ArtifactCache {
    /// Cache a new artifact under the next sequential index.
    ///
    /// The first artifact after a reset is selected automatically; later
    /// ones never move the selection.
    pub fn append(&mut self, name: impl Into<String>, payload: Bytes, bounds: Bounds) -> Appended {
        let index = ArtifactIndex::new(self.artifacts.len());
        self.artifacts.push(Artifact {
            index,
            name: name.into(),
            payload,
            bounds,
        });

        let display = self.selected.is_none();
        if display {
            self.selected = Some(index);
        }
        Appended { index, display }
    }

    /// Look up one artifact.
    pub fn get(&self, index: ArtifactIndex) -> Result<&Artifact, CacheError> {
        self.artifacts
            .get(index.get())
            .ok_or(CacheError::NotFound { index })
    }

    /// All artifacts in arrival order.
    pub fn all(&self) -> &[Artifact] {
        &self.artifacts
    }

    /// Picker entries for every cached artifact, in order.
    pub fn options(&self) -> Vec<SelectionOption> {
        self.artifacts.iter().map(SelectionOption::from).collect()
    }
}
