//! Session-scoped artifact cache
//!
//! Holds everything one render session produced: the artifacts in arrival
//! order, which one is being previewed, and the user-facing log.

mod artifact;
mod log;
mod selection;

pub use artifact::{Appended, Artifact, ArtifactIndex, SelectionOption};
pub use log::{LogEntry, LogKind};

/// Artifacts, selection and log entries of the current render session.
///
/// Indices are assigned by arrival order starting at 0 and are only
/// meaningful until the next [`ArtifactCache::reset`].
#[derive(Debug, Default)]
pub struct ArtifactCache {
    /// Artifacts in arrival order; `artifacts[i].index == i`
    pub(crate) artifacts: Vec<Artifact>,
    /// Artifact currently shown in the preview
    pub(crate) selected: Option<ArtifactIndex>,
    /// User-facing log of the session
    pub(crate) log: Vec<LogEntry>,
}

impl ArtifactCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Start over for a new session.
    ///
    /// Artifacts, selection and log go together in one step; there is no
    /// state where only some of them were cleared.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Number of cached artifacts
    pub fn len(&self) -> usize {
        self.artifacts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.artifacts.is_empty()
    }
}
