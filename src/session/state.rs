//! Session lifecycle types.

use uuid::Uuid;

use crate::error::RecordError;
use crate::traits::HttpError;

/// Where the controller is in its request/response cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionState {
    /// No request in flight
    #[default]
    Idle,
    /// Consuming the response of render number `generation`
    Streaming { generation: u64 },
}

impl SessionState {
    pub fn is_streaming(&self) -> bool {
        matches!(self, SessionState::Streaming { .. })
    }
}

/// What one render produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderSummary {
    pub session_id: Uuid,
    /// Artifacts in the cache when the session ended
    pub artifacts: usize,
    /// Log entries in the cache when the session ended
    pub log_entries: usize,
    /// Records that were dropped, in arrival order
    pub dropped: Vec<RecordError>,
    /// Unterminated bytes discarded at end of stream
    pub discarded_bytes: usize,
}

impl RenderSummary {
    pub(crate) fn new(session_id: Uuid) -> Self {
        Self {
            session_id,
            artifacts: 0,
            log_entries: 0,
            dropped: Vec::new(),
            discarded_bytes: 0,
        }
    }
}

/// How a render ended.
#[derive(Debug, Clone, PartialEq)]
pub enum RenderOutcome {
    /// Stream ended normally
    Completed(RenderSummary),
    /// Transport failed; artifacts received before the failure stay cached
    Failed {
        error: HttpError,
        summary: RenderSummary,
    },
    /// Superseded by a newer render or cancelled explicitly
    Cancelled,
    /// The render task panicked
    Panicked(String),
}

impl RenderOutcome {
    pub fn summary(&self) -> Option<&RenderSummary> {
        match self {
            RenderOutcome::Completed(summary) | RenderOutcome::Failed { summary, .. } => {
                Some(summary)
            }
            RenderOutcome::Cancelled | RenderOutcome::Panicked(_) => None,
        }
    }

    pub fn is_completed(&self) -> bool {
        matches!(self, RenderOutcome::Completed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(SessionState::default(), SessionState::Idle);
        assert!(!SessionState::Idle.is_streaming());
        assert!(SessionState::Streaming { generation: 1 }.is_streaming());
    }

    #[test]
    fn test_outcome_summary() {
        let summary = RenderSummary::new(Uuid::new_v4());
        assert!(RenderOutcome::Completed(summary.clone()).summary().is_some());
        assert!(RenderOutcome::Failed {
            error: HttpError::Io("reset".to_string()),
            summary
        }
        .summary()
        .is_some());
        assert!(RenderOutcome::Cancelled.summary().is_none());
        assert!(!RenderOutcome::Cancelled.is_completed());
    }
}
