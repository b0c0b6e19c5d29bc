//! Render session orchestration
//!
//! [`SessionController`] drives one render at a time: it resets the session
//! state, sends the script, feeds the response through the
//! [`ChunkDecoder`](crate::stream::ChunkDecoder) and the record parser, and
//! routes each message to the artifact cache or the log.

mod controller;
mod state;

pub use controller::{Observers, RenderTask, SessionController};
pub use state::{RenderOutcome, RenderSummary, SessionState};
