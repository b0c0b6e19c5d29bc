//! Errors for individual protocol records.
//!
//! None of these end a session: the offending record is dropped and the
//! stream keeps being processed.

use thiserror::Error;

/// A single record could not be turned into a usable message.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RecordError {
    /// Record bytes are not UTF-8
    #[error("Record is not valid UTF-8: {0}")]
    NotUtf8(String),

    /// Record text is not a well-formed message object
    #[error("Failed to decode record: {message}")]
    Decode { message: String },

    /// Well-formed object without any known message key
    #[error("Unrecognized message (keys: {keys:?})")]
    Unrecognized { keys: Vec<String> },

    /// Artifact message whose payload text does not decode to bytes
    #[error("Artifact '{name}' has an undecodable payload: {message}")]
    Payload { name: String, message: String },
}

impl RecordError {
    /// Short stable code for diagnostics.
    pub fn error_code(&self) -> &'static str {
        match self {
            RecordError::NotUtf8(_) => "RECORD_NOT_UTF8",
            RecordError::Decode { .. } => "RECORD_DECODE",
            RecordError::Unrecognized { .. } => "RECORD_UNRECOGNIZED",
            RecordError::Payload { .. } => "RECORD_PAYLOAD",
        }
    }
}
