//! Common test utilities for integration tests.
//!
//! This module provides a session harness wired to recording observers,
//! plus helpers for building response bodies.
//!
//! # Example
//!
//! ```ignore
//! let client = MockHttpClient::new();
//! client.enqueue(MockResponse::Stream(vec![body_of(&[log_record("hi")])]));
//! let h = Harness::new(client);
//! h.controller.start_render("script").await.finished().await;
//! assert_eq!(h.log.entries().len(), 1);
//! ```

#![allow(dead_code)]

use std::time::Duration;

use bytes::Bytes;
use meshcast::adapters::mock::{MockHttpClient, RecordingLog, RecordingPreview, RecordingSelection};
use meshcast::config::ClientConfig;
use meshcast::session::{Observers, SessionController};

/// `{"volume": ...}` with every extent zero.
pub const ZERO_VOLUME: &str = r#"{"left":0,"right":0,"bottom":0,"top":0,"front":0,"back":0,"width":0,"height":0,"depth":0,"mid_x":0,"mid_y":0,"mid_z":0}"#;

/// Controller plus handles on everything it reports to.
pub struct Harness {
    pub controller: SessionController<MockHttpClient>,
    pub client: MockHttpClient,
    pub preview: RecordingPreview,
    pub log: RecordingLog,
    pub selection: RecordingSelection,
}

impl Harness {
    pub fn new(client: MockHttpClient) -> Self {
        Self::with_config(client, ClientConfig::default())
    }

    pub fn with_config(client: MockHttpClient, config: ClientConfig) -> Self {
        let preview = RecordingPreview::new();
        let log = RecordingLog::new();
        let selection = RecordingSelection::new();
        let observers = Observers::new(preview.clone(), log.clone(), selection.clone());
        Self {
            controller: SessionController::new(client.clone(), config, observers),
            client,
            preview,
            log,
            selection,
        }
    }

    /// `(text, kind)` of every log entry the log display holds.
    pub fn log_lines(&self) -> Vec<(String, &'static str)> {
        self.log
            .entries()
            .iter()
            .map(|e| (e.text.clone(), e.kind.as_str()))
            .collect()
    }
}

/// Newline-terminated records as one chunk.
pub fn body_of(records: &[String]) -> Bytes {
    let mut text = records.join("\n");
    text.push('\n');
    Bytes::from(text)
}

/// Poll `condition` until it holds; panics after five seconds.
pub async fn wait_until(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(5), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not reached in time");
}
