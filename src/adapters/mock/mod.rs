//! Mock implementations for testing.
//!
//! This module provides test doubles for the transport and the UI-side
//! collaborators, so sessions can be exercised without a network or a UI.
//!
//! # Available Mocks
//!
//! - [`MockHttpClient`] - scripted or hand-fed response streams
//! - [`RecordingPreview`], [`RecordingLog`], [`RecordingSelection`] - observers
//!   that remember what they were told
//!
//! The `*_record` helpers build protocol records (without the trailing
//! separator).

pub mod http;
pub mod observers;

pub use http::{MockHttpClient, MockResponse, RecordedRequest};
pub use observers::{RecordingLog, RecordingPreview, RecordingSelection};

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::stream::Bounds;

/// `{"data": ..., "name": ..., "volume": ...}` with a unit-cube volume.
pub fn artifact_record(name: &str, payload: &[u8]) -> String {
    artifact_record_with_bounds(name, payload, &Bounds::default())
}

pub fn artifact_record_with_bounds(name: &str, payload: &[u8], bounds: &Bounds) -> String {
    serde_json::json!({
        "data": STANDARD.encode(payload),
        "name": name,
        "volume": bounds,
    })
    .to_string()
}

/// `{"log": ...}`
pub fn log_record(text: &str) -> String {
    serde_json::json!({ "log": text }).to_string()
}

/// `{"error": ...}`
pub fn error_record(text: &str) -> String {
    serde_json::json!({ "error": text }).to_string()
}
