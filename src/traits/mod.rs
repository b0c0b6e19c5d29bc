//! Trait abstractions for the collaborators around a render session.
//!
//! The session core talks to the network, the preview, the log display, the
//! artifact picker and the archive packer only through these traits, so any
//! of them can be swapped for a test double.
//!
//! # Traits
//!
//! - [`HttpClient`] - streaming POST transport
//! - [`PreviewSink`] - displays one artifact
//! - [`LogSink`] - shows user-facing log entries
//! - [`SelectionView`] - list of artifacts to pick from
//! - [`Archiver`] - packs several files into one download

pub mod archive;
pub mod http;
pub mod log_sink;
pub mod preview;
pub mod selection;

pub use archive::{ArchiveEntry, ArchiveError, Archiver};
pub use http::{ByteStream, HttpClient, HttpError};
pub use log_sink::LogSink;
pub use preview::PreviewSink;
pub use selection::SelectionView;
