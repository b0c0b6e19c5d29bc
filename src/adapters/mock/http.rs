//! Mock HTTP transport for testing.
//!
//! Responses are queued up front and handed out one per request, so a test
//! can script several renders in a row, including streams that fail midway
//! and streams the test feeds by hand.

use async_trait::async_trait;
use bytes::Bytes;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::mpsc;

use crate::traits::{ByteStream, HttpClient, HttpError};

/// A recorded request for verification in tests.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedRequest {
    pub url: String,
    pub body: String,
}

/// Scripted answer to one request.
#[derive(Debug)]
pub enum MockResponse {
    /// Body delivered as these chunks, then a clean end of stream
    Stream(Vec<Bytes>),
    /// Body chunks followed by a transport failure
    StreamThenError(Vec<Bytes>, HttpError),
    /// Request fails before any body arrives
    Error(HttpError),
    /// Body chunks are whatever the test sends; the stream ends when the
    /// sender is dropped
    Channel(mpsc::UnboundedReceiver<Result<Bytes, HttpError>>),
}

/// Mock HTTP transport for testing.
///
/// # Example
///
/// ```ignore
/// use meshcast::adapters::mock::{MockHttpClient, MockResponse};
/// use bytes::Bytes;
///
/// let client = MockHttpClient::new();
/// client.enqueue(MockResponse::Stream(vec![Bytes::from("{\"log\":\"hi\"}\n")]));
///
/// let body = client.post_stream("http://render/", "- cube: 1").await?;
/// assert_eq!(client.get_requests()[0].body, "- cube: 1");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockHttpClient {
    /// Responses handed out in FIFO order
    responses: Arc<Mutex<VecDeque<MockResponse>>>,
    /// Recorded requests for verification
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

impl MockHttpClient {
    /// Create a new mock HTTP client.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the response for the next unanswered request.
    pub fn enqueue(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Queue a hand-fed stream and return its feeding end.
    pub fn enqueue_channel(&self) -> mpsc::UnboundedSender<Result<Bytes, HttpError>> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.enqueue(MockResponse::Channel(rx));
        tx
    }

    /// Get all recorded requests.
    pub fn get_requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Number of queued responses not yet consumed.
    pub fn pending_responses(&self) -> usize {
        self.responses.lock().unwrap().len()
    }

    fn record_request(&self, url: &str, body: &str) {
        self.requests.lock().unwrap().push(RecordedRequest {
            url: url.to_string(),
            body: body.to_string(),
        });
    }
}

fn chunk_stream(
    chunks: Vec<Bytes>,
    tail: Option<HttpError>,
) -> impl futures::Stream<Item = Result<Bytes, HttpError>> {
    let items = chunks
        .into_iter()
        .map(Ok)
        .chain(tail.into_iter().map(Err));
    futures::stream::iter(items)
}

#[async_trait]
impl HttpClient for MockHttpClient {
    async fn post_stream(&self, url: &str, body: &str) -> Result<ByteStream, HttpError> {
        self.record_request(url, body);

        let response = self.responses.lock().unwrap().pop_front();
        match response {
            Some(MockResponse::Stream(chunks)) => Ok(Box::pin(chunk_stream(chunks, None))),
            Some(MockResponse::StreamThenError(chunks, err)) => {
                Ok(Box::pin(chunk_stream(chunks, Some(err))))
            }
            Some(MockResponse::Error(err)) => Err(err),
            Some(MockResponse::Channel(rx)) => {
                let stream = futures::stream::unfold(rx, |mut rx| async move {
                    rx.recv().await.map(|item| (item, rx))
                });
                Ok(Box::pin(stream))
            }
            None => Err(HttpError::Other(format!(
                "No mock response queued for URL: {}",
                url
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use futures_util::StreamExt;

    async fn drain(mut stream: ByteStream) -> Vec<Result<Bytes, HttpError>> {
        let mut items = Vec::new();
        while let Some(item) = stream.next().await {
            items.push(item);
        }
        items
    }

    #[tokio::test]
    async fn test_stream_response() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::Stream(vec![
            Bytes::from("chunk1"),
            Bytes::from("chunk2"),
        ]));

        let stream = client.post_stream("http://render/", "script").await.unwrap();
        let items = drain(stream).await;

        assert_eq!(items, vec![Ok(Bytes::from("chunk1")), Ok(Bytes::from("chunk2"))]);
        let requests = client.get_requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://render/");
        assert_eq!(requests[0].body, "script");
    }

    #[tokio::test]
    async fn test_stream_then_error() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::StreamThenError(
            vec![Bytes::from("a")],
            HttpError::Io("reset".to_string()),
        ));

        let items = drain(client.post_stream("u", "").await.unwrap()).await;
        assert_eq!(
            items,
            vec![Ok(Bytes::from("a")), Err(HttpError::Io("reset".to_string()))]
        );
    }

    #[tokio::test]
    async fn test_error_response() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::Error(HttpError::ServerError {
            status: 500,
            message: "boom".to_string(),
        }));

        let result = client.post_stream("u", "").await;
        assert!(matches!(result, Err(HttpError::ServerError { status: 500, .. })));
    }

    #[tokio::test]
    async fn test_responses_are_fifo() {
        let client = MockHttpClient::new();
        client.enqueue(MockResponse::Stream(vec![Bytes::from("first")]));
        client.enqueue(MockResponse::Stream(vec![Bytes::from("second")]));
        assert_eq!(client.pending_responses(), 2);

        let first = drain(client.post_stream("u", "").await.unwrap()).await;
        let second = drain(client.post_stream("u", "").await.unwrap()).await;
        assert_eq!(first, vec![Ok(Bytes::from("first"))]);
        assert_eq!(second, vec![Ok(Bytes::from("second"))]);
        assert_eq!(client.pending_responses(), 0);
    }

    #[tokio::test]
    async fn test_no_response_queued() {
        let client = MockHttpClient::new();
        let result = client.post_stream("http://render/", "").await;
        assert!(matches!(result, Err(HttpError::Other(_))));
    }

    #[tokio::test]
    async fn test_channel_stream() {
        let client = MockHttpClient::new();
        let tx = client.enqueue_channel();
        let mut stream = client.post_stream("u", "").await.unwrap();

        tx.send(Ok(Bytes::from("fed"))).unwrap();
        assert_eq!(stream.next().await, Some(Ok(Bytes::from("fed"))));

        drop(tx);
        assert_eq!(stream.next().await, None);
    }

    #[tokio::test]
    async fn test_dropping_channel_stream_closes_sender() {
        let client = MockHttpClient::new();
        let tx = client.enqueue_channel();
        let stream = client.post_stream("u", "").await.unwrap();
        assert!(!tx.is_closed());
        drop(stream);
        assert!(tx.is_closed());
    }
}
