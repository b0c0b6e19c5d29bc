//! Wire-level payload structs.
//!
//! These mirror the JSON objects the renderer writes and are converted into
//! [`ProtocolMessage`](super::ProtocolMessage) variants by the parser.

use serde::Deserialize;

use super::message::Bounds;

/// Key marking an artifact record. Checked first.
pub(crate) const ARTIFACT_KEY: &str = "data";
/// Key marking a progress record.
pub(crate) const LOG_KEY: &str = "log";
/// Key marking an error record.
pub(crate) const ERROR_KEY: &str = "error";

/// `{"data": ..., "name": ..., "volume": {...}}`
#[derive(Debug, Deserialize)]
pub(crate) struct ArtifactPayload {
    pub data: String,
    pub name: String,
    pub volume: Bounds,
}
