//! Typed protocol messages.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::error::RecordError;

/// Axis-aligned bounding box of an artifact, as sent by the renderer.
///
/// Only the preview looks inside; the session treats it as opaque.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub left: f64,
    pub right: f64,
    pub bottom: f64,
    pub top: f64,
    pub front: f64,
    pub back: f64,
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub mid_x: f64,
    pub mid_y: f64,
    pub mid_z: f64,
}

impl Bounds {
    /// Build a box from its extents, deriving sizes and midpoints.
    ///
    /// x spans left..right, y spans bottom..top and z spans front..back,
    /// each from minimum to maximum, so sizes are non-negative.
    pub fn from_extents(left: f64, right: f64, bottom: f64, top: f64, front: f64, back: f64) -> Self {
        Self {
            left,
            right,
            bottom,
            top,
            front,
            back,
            width: right - left,
            height: top - bottom,
            depth: back - front,
            mid_x: (left + right) / 2.0,
            mid_y: (bottom + top) / 2.0,
            mid_z: (front + back) / 2.0,
        }
    }

    /// Length of the longest side.
    pub fn max_extent(&self) -> f64 {
        self.width.max(self.height).max(self.depth)
    }
}

impl Default for Bounds {
    /// The unit cube shown before anything has been rendered.
    fn default() -> Self {
        Self::from_extents(0.0, 1.0, 0.0, 1.0, 0.0, 1.0)
    }
}

/// An artifact as transmitted: payload still in its text encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactMessage {
    /// Base64 payload
    pub data: String,
    pub name: String,
    pub bounds: Bounds,
}

impl ArtifactMessage {
    /// Decode the base64 payload into raw bytes.
    pub fn decode_payload(&self) -> Result<Bytes, RecordError> {
        STANDARD
            .decode(self.data.as_bytes())
            .map(Bytes::from)
            .map_err(|e| RecordError::Payload {
                name: self.name.clone(),
                message: e.to_string(),
            })
    }
}

/// One protocol record, classified.
#[derive(Debug, Clone, PartialEq)]
pub enum ProtocolMessage {
    /// A generated artifact
    Artifact(ArtifactMessage),
    /// Progress output from the renderer
    Log { text: String },
    /// Error reported by the renderer
    Error { text: String },
}

impl ProtocolMessage {
    /// Variant name for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ProtocolMessage::Artifact(_) => "artifact",
            ProtocolMessage::Log { .. } => "log",
            ProtocolMessage::Error { .. } => "error",
        }
    }
}
