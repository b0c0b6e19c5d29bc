//! Log display collaborator seam.

use crate::cache::LogEntry;

/// Receives user-facing log entries in arrival order.
pub trait LogSink: Send {
    /// Append one entry.
    fn append_entry(&mut self, entry: &LogEntry);

    /// Drop everything shown so far. Called when a new render starts.
    fn clear(&mut self);
}
