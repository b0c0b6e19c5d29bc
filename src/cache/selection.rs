//! Selection methods for ArtifactCache

use super::{Artifact, ArtifactCache, ArtifactIndex};
use crate::error::CacheError;

impl ArtifactCache {
    /// Index of the artifact currently shown in the preview
    pub fn selected(&self) -> Option<ArtifactIndex> {
        self.selected
    }

    /// The artifact currently shown in the preview
    pub fn selected_artifact(&self) -> Option<&Artifact> {
        self.selected.and_then(|index| self.artifacts.get(index.get()))
    }

    /// Make `index` the previewed artifact.
    ///
    /// Unknown indices are rejected and leave the selection untouched.
    pub fn select(&mut self, index: ArtifactIndex) -> Result<&Artifact, CacheError> {
        if index.get() >= self.artifacts.len() {
            return Err(CacheError::InvalidSelection {
                index,
                len: self.artifacts.len(),
            });
        }
        self.selected = Some(index);
        Ok(&self.artifacts[index.get()])
    }
}
