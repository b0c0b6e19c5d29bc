//! Concrete implementations of trait abstractions.
//!
//! # Adapters
//!
//! - [`ReqwestHttpClient`] - streaming POST using reqwest
//! - [`ZipArchiver`] - zip packaging for "export all"
//! - [`ConsoleLog`], [`ConsolePreview`], [`ConsoleSelection`] - terminal
//!   observers for the binary
//!
//! # Mock Implementations
//!
//! The [`mock`] submodule provides test doubles:
//! - [`mock::MockHttpClient`] - scripted or hand-fed response streams
//! - [`mock::RecordingPreview`], [`mock::RecordingLog`],
//!   [`mock::RecordingSelection`] - observers that remember what they saw

pub mod console;
pub mod mock;
pub mod reqwest_http;
pub mod zip_archive;

pub use console::{ConsoleLog, ConsolePreview, ConsoleSelection};
pub use mock::MockHttpClient;
pub use reqwest_http::ReqwestHttpClient;
pub use zip_archive::{ZipArchiver, ZIP_CONTENT_TYPE};
