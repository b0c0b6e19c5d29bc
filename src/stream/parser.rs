//! Record classification.

use serde_json::{Map, Value};

use super::message::{ArtifactMessage, ProtocolMessage};
use super::payloads::{ArtifactPayload, ARTIFACT_KEY, ERROR_KEY, LOG_KEY};
use crate::error::RecordError;

/// Parse one record into a typed message.
///
/// The record must be a JSON object. It is classified by the first key
/// present in this order: `data`, `log`, `error`. Objects with none of them
/// are [`RecordError::Unrecognized`].
pub fn parse_record(record: &str) -> Result<ProtocolMessage, RecordError> {
    let object: Map<String, Value> =
        serde_json::from_str(record).map_err(|e| RecordError::Decode {
            message: e.to_string(),
        })?;

    if object.contains_key(ARTIFACT_KEY) {
        let payload: ArtifactPayload =
            serde_json::from_value(Value::Object(object)).map_err(|e| RecordError::Decode {
                message: format!("invalid artifact message: {}", e),
            })?;
        return Ok(ProtocolMessage::Artifact(ArtifactMessage {
            data: payload.data,
            name: payload.name,
            bounds: payload.volume,
        }));
    }

    if let Some(value) = object.get(LOG_KEY) {
        return Ok(ProtocolMessage::Log {
            text: expect_text(LOG_KEY, value)?,
        });
    }

    if let Some(value) = object.get(ERROR_KEY) {
        return Ok(ProtocolMessage::Error {
            text: expect_text(ERROR_KEY, value)?,
        });
    }

    Err(RecordError::Unrecognized {
        keys: object.keys().cloned().collect(),
    })
}

fn expect_text(key: &str, value: &Value) -> Result<String, RecordError> {
    value
        .as_str()
        .map(str::to_string)
        .ok_or_else(|| RecordError::Decode {
            message: format!("'{}' must be a string, got {}", key, value),
        })
}

/// Shorten a record for diagnostics; artifact records can be megabytes.
pub fn truncate_for_log(record: &str, max_chars: usize) -> String {
    match record.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}... ({} bytes)", &record[..cut], record.len()),
        None => record.to_string(),
    }
}
