//! Recording collaborators for testing.
//!
//! Each recorder is cheap to clone and shares its record between clones, so a
//! test can hand one clone to the session and keep another to inspect.

use bytes::Bytes;
use std::sync::{Arc, Mutex};

use crate::cache::{LogEntry, SelectionOption};
use crate::stream::Bounds;
use crate::traits::{LogSink, PreviewSink, SelectionView};

#[derive(Debug, Default)]
struct PreviewRecord {
    loads: Vec<(Bytes, Bounds)>,
    view_resets: usize,
}

/// Preview that remembers every load.
#[derive(Debug, Clone, Default)]
pub struct RecordingPreview {
    record: Arc<Mutex<PreviewRecord>>,
}

impl RecordingPreview {
    pub fn new() -> Self {
        Self::default()
    }

    /// Every `(payload, bounds)` loaded so far, oldest first.
    pub fn loads(&self) -> Vec<(Bytes, Bounds)> {
        self.record.lock().unwrap().loads.clone()
    }

    pub fn view_resets(&self) -> usize {
        self.record.lock().unwrap().view_resets
    }
}

impl PreviewSink for RecordingPreview {
    fn load(&mut self, payload: &[u8], bounds: &Bounds) {
        self.record
            .lock()
            .unwrap()
            .loads
            .push((Bytes::copy_from_slice(payload), *bounds));
    }

    fn reset_view(&mut self) {
        self.record.lock().unwrap().view_resets += 1;
    }
}

#[derive(Debug, Default)]
struct LogRecord {
    entries: Vec<LogEntry>,
    clears: usize,
}

/// Log display that keeps what it was shown.
#[derive(Debug, Clone, Default)]
pub struct RecordingLog {
    record: Arc<Mutex<LogRecord>>,
}

impl RecordingLog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Entries shown since the last clear.
    pub fn entries(&self) -> Vec<LogEntry> {
        self.record.lock().unwrap().entries.clone()
    }

    pub fn clears(&self) -> usize {
        self.record.lock().unwrap().clears
    }
}

impl LogSink for RecordingLog {
    fn append_entry(&mut self, entry: &LogEntry) {
        self.record.lock().unwrap().entries.push(entry.clone());
    }

    fn clear(&mut self) {
        let mut record = self.record.lock().unwrap();
        record.entries.clear();
        record.clears += 1;
    }
}

#[derive(Debug, Default)]
struct SelectionRecord {
    options: Vec<SelectionOption>,
    rebuilds: usize,
}

/// Picker that mirrors the option list.
#[derive(Debug, Clone, Default)]
pub struct RecordingSelection {
    record: Arc<Mutex<SelectionRecord>>,
}

impl RecordingSelection {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn options(&self) -> Vec<SelectionOption> {
        self.record.lock().unwrap().options.clone()
    }

    pub fn rebuilds(&self) -> usize {
        self.record.lock().unwrap().rebuilds
    }
}

impl SelectionView for RecordingSelection {
    fn rebuild(&mut self, options: &[SelectionOption]) {
        let mut record = self.record.lock().unwrap();
        record.options = options.to_vec();
        record.rebuilds += 1;
    }

    fn append(&mut self, option: &SelectionOption) {
        self.record.lock().unwrap().options.push(option.clone());
    }
}
