//! Artifact cache and export errors.

use thiserror::Error;

use crate::cache::ArtifactIndex;
use crate::traits::ArchiveError;

/// Lookup and selection failures on the artifact cache.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CacheError {
    /// Selection target is not in the cache; the current selection is kept
    #[error("Cannot select artifact {index}: cache holds {len} artifact(s)")]
    InvalidSelection { index: ArtifactIndex, len: usize },

    /// No artifact with this index in the current session
    #[error("Artifact {index} not found")]
    NotFound { index: ArtifactIndex },
}

/// Export failures. Exporting never touches the cache contents.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Requested artifact does not exist
    #[error("Artifact {index} not found")]
    NotFound { index: ArtifactIndex },

    /// Export-all with nothing rendered yet
    #[error("Nothing to export: no artifacts in the current session")]
    EmptyCache,

    /// Archive packaging failed
    #[error(transparent)]
    Archive(#[from] ArchiveError),
}

impl From<CacheError> for ExportError {
    fn from(err: CacheError) -> Self {
        match err {
            CacheError::InvalidSelection { index, .. } | CacheError::NotFound { index } => {
                ExportError::NotFound { index }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_display() {
        assert_eq!(
            CacheError::InvalidSelection {
                index: ArtifactIndex::new(4),
                len: 2
            }
            .to_string(),
            "Cannot select artifact 4: cache holds 2 artifact(s)"
        );
        assert_eq!(
            CacheError::NotFound {
                index: ArtifactIndex::new(1)
            }
            .to_string(),
            "Artifact 1 not found"
        );
    }

    #[test]
    fn test_export_error_from_cache_error() {
        let err: ExportError = CacheError::NotFound {
            index: ArtifactIndex::new(3),
        }
        .into();
        assert!(matches!(err, ExportError::NotFound { index } if index.get() == 3));
    }

    #[test]
    fn test_empty_cache_display() {
        assert_eq!(
            ExportError::EmptyCache.to_string(),
            "Nothing to export: no artifacts in the current session"
        );
    }
}
