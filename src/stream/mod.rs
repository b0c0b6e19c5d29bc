//! Render response stream decoding
//!
//! The renderer answers a render request with a single long-lived body made
//! of newline-terminated JSON records:
//! - `{"data": <base64>, "name": <string>, "volume": {...}}` - an artifact
//! - `{"log": <string>}` - progress output
//! - `{"error": <string>}` - an error reported by the renderer
//!
//! # Module structure
//! - `decoder` - reframes byte chunks into records ([`ChunkDecoder`])
//! - `message` - typed messages ([`ProtocolMessage`], [`Bounds`])
//! - `payloads` - wire structs
//! - `parser` - record classification ([`parse_record`])

mod decoder;
mod message;
mod parser;
mod payloads;

pub use decoder::{ChunkDecoder, Records, RECORD_SEPARATOR};
pub use message::{ArtifactMessage, Bounds, ProtocolMessage};
pub use parser::{parse_record, truncate_for_log};
