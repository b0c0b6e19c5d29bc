//! HTTP transport trait abstraction.
//!
//! The render session only needs one operation from the transport: POST the
//! script text and hand back the response body as a byte stream. Keeping it
//! behind a trait lets the session be driven by scripted streams in tests.

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use std::pin::Pin;

/// Incrementally delivered response body.
///
/// Chunk boundaries carry no meaning; a record may span any number of chunks.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, HttpError>> + Send>>;

/// Transport failures.
///
/// Any of these ends the current render cycle. Timeouts are configured on the
/// transport and only ever reach the session as one of these values.
#[derive(Debug, Clone, PartialEq)]
pub enum HttpError {
    /// Connection failed
    ConnectionFailed(String),
    /// Request timeout
    Timeout(String),
    /// Server returned an error status
    ServerError { status: u16, message: String },
    /// Failure while reading the body
    Io(String),
    /// Invalid URL
    InvalidUrl(String),
    /// Other error
    Other(String),
}

impl HttpError {
    /// Whether re-issuing the same request may succeed.
    pub fn is_retryable(&self) -> bool {
        match self {
            HttpError::ConnectionFailed(_) | HttpError::Timeout(_) | HttpError::Io(_) => true,
            HttpError::ServerError { status, .. } => *status >= 500,
            HttpError::InvalidUrl(_) | HttpError::Other(_) => false,
        }
    }
}

impl std::fmt::Display for HttpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HttpError::ConnectionFailed(msg) => write!(f, "Connection failed: {}", msg),
            HttpError::Timeout(msg) => write!(f, "Request timeout: {}", msg),
            HttpError::ServerError { status, message } => {
                write!(f, "Server error ({}): {}", status, message)
            }
            HttpError::Io(msg) => write!(f, "IO error: {}", msg),
            HttpError::InvalidUrl(msg) => write!(f, "Invalid URL: {}", msg),
            HttpError::Other(msg) => write!(f, "HTTP error: {}", msg),
        }
    }
}

impl std::error::Error for HttpError {}

/// Streaming HTTP transport.
///
/// # Example
///
/// ```ignore
/// use meshcast::traits::HttpClient;
/// use futures_util::StreamExt;
///
/// async fn dump<C: HttpClient>(client: &C) -> Result<(), HttpError> {
///     let mut body = client.post_stream("http://localhost:5000/render", "- cube: 1").await?;
///     while let Some(chunk) = body.next().await {
///         println!("{} bytes", chunk?.len());
///     }
///     Ok(())
/// }
/// ```
#[async_trait]
pub trait HttpClient: Send + Sync {
    /// Send `body` as a POST request and return the response body as a stream.
    ///
    /// Non-success statuses are reported as [`HttpError::ServerError`] before
    /// any body bytes are yielded.
    async fn post_stream(&self, url: &str, body: &str) -> Result<ByteStream, HttpError>;
}
