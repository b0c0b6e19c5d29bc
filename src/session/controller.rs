//! Render request/response cycle.

use std::sync::Arc;

use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::{AbortHandle, JoinHandle};
use tracing::Instrument;
use uuid::Uuid;

use super::state::{RenderOutcome, RenderSummary, SessionState};
use crate::cache::{ArtifactCache, ArtifactIndex, LogEntry, SelectionOption};
use crate::config::ClientConfig;
use crate::error::{CacheError, RecordError};
use crate::stream::{parse_record, truncate_for_log, ChunkDecoder, ProtocolMessage};
use crate::traits::{HttpClient, HttpError, LogSink, PreviewSink, SelectionView};

/// Longest record excerpt written to diagnostics.
const RECORD_EXCERPT_CHARS: usize = 120;

/// The UI-side collaborators a session reports to.
pub struct Observers {
    pub preview: Box<dyn PreviewSink>,
    pub log: Box<dyn LogSink>,
    pub selection: Box<dyn SelectionView>,
}

impl Observers {
    pub fn new(
        preview: impl PreviewSink + 'static,
        log: impl LogSink + 'static,
        selection: impl SelectionView + 'static,
    ) -> Self {
        Self {
            preview: Box::new(preview),
            log: Box::new(log),
            selection: Box::new(selection),
        }
    }
}

/// State shared between the controller and its render task.
struct SessionCore {
    cache: ArtifactCache,
    observers: Observers,
    state: SessionState,
    /// Bumped on every start and cancel; a render task only touches the
    /// session while its own generation is current
    generation: u64,
    in_flight: Option<AbortHandle>,
    surface_record_errors: bool,
}

impl SessionCore {
    /// Stop whatever is streaming and invalidate its generation.
    fn cancel_in_flight(&mut self) -> bool {
        self.generation += 1;
        self.state = SessionState::Idle;
        match self.in_flight.take() {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    fn begin(&mut self) -> u64 {
        self.cache.reset();
        self.observers.log.clear();
        self.observers.selection.rebuild(&[]);
        self.state = SessionState::Streaming {
            generation: self.generation,
        };
        self.generation
    }

    /// Clean up after a render task that died without finishing.
    fn abandon(&mut self, generation: u64) {
        if self.is_current(generation) {
            self.state = SessionState::Idle;
            self.in_flight = None;
        }
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation == generation
    }

    fn finish(&mut self, summary: &mut RenderSummary) {
        self.state = SessionState::Idle;
        self.in_flight = None;
        summary.artifacts = self.cache.len();
        summary.log_entries = self.cache.log_entries().len();
    }

    fn log(&mut self, entry: LogEntry) {
        self.observers.log.append_entry(&entry);
        self.cache.push_log(entry);
    }

    /// Parse and dispatch one record. Failures drop the record only.
    fn apply_record(&mut self, record: Result<String, RecordError>) -> Result<(), RecordError> {
        let result = record.and_then(|text| {
            let message = parse_record(&text).map_err(|err| {
                tracing::debug!("Unparsable record: {}", truncate_for_log(&text, RECORD_EXCERPT_CHARS));
                err
            })?;
            self.dispatch(message)
        });

        if let Err(err) = &result {
            tracing::warn!(code = err.error_code(), "Dropped record: {}", err);
            if self.surface_record_errors {
                self.log(LogEntry::error(format!("Dropped record: {}", err)));
            }
        }
        result
    }

    fn dispatch(&mut self, message: ProtocolMessage) -> Result<(), RecordError> {
        tracing::debug!("Received {} message", message.kind());
        match message {
            ProtocolMessage::Artifact(msg) => {
                let payload = msg.decode_payload()?;
                let appended = self.cache.append(msg.name, payload, msg.bounds);
                let artifact = &self.cache.all()[appended.index.get()];

                self.observers
                    .selection
                    .append(&SelectionOption::from(artifact));
                if appended.display {
                    self.observers
                        .preview
                        .load(&artifact.payload, &artifact.bounds);
                }
                tracing::info!(
                    "Cached artifact {} '{}' ({} bytes)",
                    artifact.index,
                    artifact.name,
                    artifact.payload.len()
                );
            }
            ProtocolMessage::Log { text } => self.log(LogEntry::info(text)),
            ProtocolMessage::Error { text } => self.log(LogEntry::error(text)),
        }
        Ok(())
    }
}

/// Handle on a started render.
pub struct RenderTask {
    session_id: Uuid,
    generation: u64,
    handle: JoinHandle<RenderOutcome>,
    core: Arc<Mutex<SessionCore>>,
}

impl std::fmt::Debug for RenderTask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderTask")
            .field("session_id", &self.session_id)
            .field("generation", &self.generation)
            .finish_non_exhaustive()
    }
}

impl RenderTask {
    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// Wait for the render to end.
    ///
    /// A task that panicked leaves the session idle, as long as no newer
    /// render has started since.
    pub async fn finished(self) -> RenderOutcome {
        match self.handle.await {
            Ok(outcome) => outcome,
            Err(err) if err.is_cancelled() => RenderOutcome::Cancelled,
            Err(err) => {
                tracing::error!("Render task failed: {}", err);
                self.core.lock().await.abandon(self.generation);
                RenderOutcome::Panicked(err.to_string())
            }
        }
    }
}

/// Runs render sessions, one at a time.
///
/// Starting a render while another is streaming cancels the older one first:
/// its task is aborted, which drops its response stream, and its generation
/// is invalidated so none of its records are applied afterwards.
///
/// # Example
///
/// ```ignore
/// use meshcast::adapters::ReqwestHttpClient;
/// use meshcast::session::{Observers, SessionController};
///
/// let controller = SessionController::new(client, config, observers);
/// let task = controller.start_render(script).await;
/// let outcome = task.finished().await;
/// let names = controller.inspect(|cache| cache.options()).await;
/// ```
pub struct SessionController<C> {
    client: Arc<C>,
    config: ClientConfig,
    core: Arc<Mutex<SessionCore>>,
}

impl<C: HttpClient + 'static> SessionController<C> {
    pub fn new(client: C, config: ClientConfig, observers: Observers) -> Self {
        let core = SessionCore {
            cache: ArtifactCache::new(),
            observers,
            state: SessionState::Idle,
            generation: 0,
            in_flight: None,
            surface_record_errors: config.surface_record_errors,
        };
        Self {
            client: Arc::new(client),
            config,
            core: Arc::new(Mutex::new(core)),
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Start rendering `script`.
    ///
    /// Cache, log and picker are cleared before this returns, ahead of the
    /// request being sent.
    pub async fn start_render(&self, script: impl Into<String>) -> RenderTask {
        let script = script.into();
        let session_id = Uuid::new_v4();

        let mut core = self.core.lock().await;
        if core.cancel_in_flight() {
            tracing::info!("Cancelled in-flight render in favour of a new one");
        }
        let generation = core.begin();

        let worker = RenderWorker {
            core: Arc::clone(&self.core),
            client: Arc::clone(&self.client),
            url: self.config.render_url(),
            separator: self.config.record_separator,
            generation,
            session_id,
        };
        let span = tracing::info_span!("render", session = %session_id, generation);
        let handle = tokio::spawn(worker.run(script).instrument(span));
        core.in_flight = Some(handle.abort_handle());

        RenderTask {
            session_id,
            generation,
            handle,
            core: Arc::clone(&self.core),
        }
    }

    /// Cancel the in-flight render, if any. Cached artifacts stay.
    pub async fn cancel(&self) -> bool {
        let cancelled = self.core.lock().await.cancel_in_flight();
        if cancelled {
            tracing::info!("Render cancelled");
        }
        cancelled
    }

    /// Preview another cached artifact.
    pub async fn select(&self, index: ArtifactIndex) -> Result<(), CacheError> {
        let mut guard = self.core.lock().await;
        let core = &mut *guard;
        let artifact = core.cache.select(index)?;
        core.observers
            .preview
            .load(&artifact.payload, &artifact.bounds);
        Ok(())
    }

    /// Return the preview camera to its default framing.
    pub async fn reset_view(&self) {
        self.core.lock().await.observers.preview.reset_view();
    }

    pub async fn state(&self) -> SessionState {
        self.core.lock().await.state
    }

    pub async fn is_streaming(&self) -> bool {
        self.state().await.is_streaming()
    }

    /// Read the session cache, e.g. to export from it.
    pub async fn inspect<R>(&self, f: impl FnOnce(&ArtifactCache) -> R) -> R {
        let core = self.core.lock().await;
        f(&core.cache)
    }
}

/// Consumes one render response.
struct RenderWorker<C> {
    core: Arc<Mutex<SessionCore>>,
    client: Arc<C>,
    url: String,
    separator: u8,
    generation: u64,
    session_id: Uuid,
}

impl<C: HttpClient> RenderWorker<C> {
    async fn run(self, script: String) -> RenderOutcome {
        let mut summary = RenderSummary::new(self.session_id);
        tracing::info!("Sending render request to {}", self.url);

        let mut body = match self.client.post_stream(&self.url, &script).await {
            Ok(body) => body,
            Err(error) => return self.fail(error, summary).await,
        };

        let mut decoder = ChunkDecoder::with_separator(self.separator);
        while let Some(chunk) = body.next().await {
            let chunk = match chunk {
                Ok(chunk) => chunk,
                Err(error) => return self.fail(error, summary).await,
            };

            let records: Vec<_> = decoder.feed(&chunk).collect();
            if records.is_empty() {
                continue;
            }

            let mut core = self.core.lock().await;
            if !core.is_current(self.generation) {
                return RenderOutcome::Cancelled;
            }
            for record in records {
                if let Err(err) = core.apply_record(record) {
                    summary.dropped.push(err);
                }
            }
        }
        drop(body);

        summary.discarded_bytes = decoder.finish();
        if summary.discarded_bytes > 0 {
            tracing::warn!(
                "Stream ended inside a record; discarded {} trailing byte(s)",
                summary.discarded_bytes
            );
        }

        let mut core = self.core.lock().await;
        if !core.is_current(self.generation) {
            return RenderOutcome::Cancelled;
        }
        core.finish(&mut summary);
        tracing::info!(
            "Render finished: {} artifact(s), {} log entr(ies), {} dropped record(s)",
            summary.artifacts,
            summary.log_entries,
            summary.dropped.len()
        );
        RenderOutcome::Completed(summary)
    }

    async fn fail(&self, error: HttpError, mut summary: RenderSummary) -> RenderOutcome {
        let mut core = self.core.lock().await;
        if !core.is_current(self.generation) {
            return RenderOutcome::Cancelled;
        }
        tracing::error!("Render stream failed: {}", error);
        core.log(LogEntry::error(format!("Render failed: {}", error)));
        core.finish(&mut summary);
        RenderOutcome::Failed { error, summary }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::mock::{
        MockHttpClient, MockResponse, RecordingLog, RecordingPreview, RecordingSelection,
    };
    use bytes::Bytes;

    fn controller(client: MockHttpClient) -> (SessionController<MockHttpClient>, RecordingPreview) {
        let preview = RecordingPreview::new();
        let observers = Observers::new(preview.clone(), RecordingLog::new(), RecordingSelection::new());
        (
            SessionController::new(client, ClientConfig::default(), observers),
            preview,
        )
    }

    #[tokio::test]
    async fn test_idle_before_first_render() {
        let (controller, _) = controller(MockHttpClient::new());
        assert_eq!(controller.state().await, SessionState::Idle);
        assert!(!controller.cancel().await);
    }

    #[tokio::test]
    async fn test_render_returns_to_idle() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::Stream(vec![Bytes::from_static(b"{\"log\":\"hi\"}\n")]));
        let (controller, _) = controller(client);

        let outcome = controller.start_render("- cube: 1").await.finished().await;

        assert!(outcome.is_completed());
        assert_eq!(controller.state().await, SessionState::Idle);
        assert_eq!(controller.inspect(|c| c.log_entries().len()).await, 1);
    }

    #[tokio::test]
    async fn test_select_loads_preview() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::Stream(vec![Bytes::from(format!(
            "{}\n{}\n",
            crate::adapters::mock::artifact_record("a.stl", b"A"),
            crate::adapters::mock::artifact_record("b.stl", b"B"),
        ))]));
        let (controller, preview) = controller(client);
        controller.start_render("x").await.finished().await;

        controller.select(ArtifactIndex::new(1)).await.unwrap();
        let loads = preview.loads();
        assert_eq!(loads.len(), 2);
        assert_eq!(loads[1].0, Bytes::from_static(b"B"));

        let err = controller.select(ArtifactIndex::new(2)).await.unwrap_err();
        assert!(matches!(err, CacheError::InvalidSelection { .. }));
        assert_eq!(preview.loads().len(), 2);
        assert_eq!(
            controller.inspect(|c| c.selected()).await,
            Some(ArtifactIndex::new(1))
        );
    }

    struct CrashingPreview;

    impl PreviewSink for CrashingPreview {
        fn load(&mut self, _payload: &[u8], _bounds: &crate::stream::Bounds) {
            panic!("preview crashed");
        }

        fn reset_view(&mut self) {}
    }

    #[tokio::test]
    async fn test_panicked_render_returns_to_idle() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::Stream(vec![Bytes::from(format!(
            "{}\n",
            crate::adapters::mock::artifact_record("a.stl", b"A"),
        ))]));
        client.enqueue(MockResponse::Stream(vec![]));
        let observers = Observers::new(CrashingPreview, RecordingLog::new(), RecordingSelection::new());
        let controller = SessionController::new(client, ClientConfig::default(), observers);

        let task = controller.start_render("x").await;
        let session_id = task.session_id();
        let outcome = task.finished().await;

        assert!(matches!(outcome, RenderOutcome::Panicked(_)));
        assert_eq!(controller.state().await, SessionState::Idle);
        assert!(!controller.is_streaming().await);
        assert!(!controller.cancel().await);

        let next = controller.start_render("y").await;
        assert_ne!(next.session_id(), session_id);
        assert!(next.finished().await.is_completed());
    }

    #[tokio::test]
    async fn test_reset_view_forwards_to_preview() {
        let (controller, preview) = controller(MockHttpClient::new());
        controller.reset_view().await;
        assert_eq!(preview.view_resets(), 1);
    }
}
