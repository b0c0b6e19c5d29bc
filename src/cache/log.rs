//! User-facing log entries

use std::fmt;

use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use super::ArtifactCache;

/// Leading `[tag]` the renderer uses to mark which step a line came from.
static TAG_PREFIX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\[[^\]]+\]").expect("Invalid log tag regex"));

/// Severity of a log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogKind {
    Info,
    Error,
}

impl LogKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogKind::Info => "info",
            LogKind::Error => "error",
        }
    }
}

impl fmt::Display for LogKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One line of the session log.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    /// Full text as received
    pub text: String,
    pub kind: LogKind,
    pub received_at: DateTime<Utc>,
}

impl LogEntry {
    pub fn new(text: impl Into<String>, kind: LogKind) -> Self {
        Self {
            text: text.into(),
            kind,
            received_at: Utc::now(),
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, LogKind::Info)
    }

    pub fn error(text: impl Into<String>) -> Self {
        Self::new(text, LogKind::Error)
    }

    /// Leading `[tag]` of the text, brackets included.
    pub fn tag(&self) -> Option<&str> {
        TAG_PREFIX.find(&self.text).map(|m| m.as_str())
    }

    /// Text after the tag, or the whole text when untagged.
    pub fn body(&self) -> &str {
        match TAG_PREFIX.find(&self.text) {
            Some(m) => &self.text[m.end()..],
            None => &self.text,
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == LogKind::Error
    }
}

impl ArtifactCache {
    /// Append an entry to the session log
    pub fn push_log(&mut self, entry: LogEntry) {
        self.log.push(entry);
    }

    /// Session log in arrival order
    pub fn log_entries(&self) -> &[LogEntry] {
        &self.log
    }
}
