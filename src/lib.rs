//! meshcast - streaming client for a remote solid-model renderer
//!
//! Sends a model script to the renderer, decodes the newline-separated JSON
//! records it streams back, caches the generated artifacts and log for the
//! session, and exports them as single files or one zip archive.
//!
//! This library exposes modules for use in integration tests.

pub mod adapters;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod session;
pub mod stream;
pub mod traits;
