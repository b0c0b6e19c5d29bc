//! Error types for the render client.
//!
//! | Error | Raised by | Recovery |
//! |-------|-----------|----------|
//! | [`RecordError`] | record parsing | record dropped, stream continues |
//! | [`CacheError`] | selection / lookup | returned to the caller |
//! | [`ExportError`] | export | returned to the caller |
//! | [`HttpError`](crate::traits::HttpError) | transport | session ends, cached artifacts kept |

mod cache;
mod record;

pub use cache::{CacheError, ExportError};
pub use record::RecordError;
