use super::record::MemeRecord;
use crate::util::{validate_endpoint, UrlValidationError};
use async_trait::async_trait;
use futures::StreamExt;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;
use url::Url;

/// Public read-only endpoint used when no other endpoint is configured.
pub const DEFAULT_ENDPOINT: &str = "https://api.imgflip.com/get_memes";

/// Largest response body accepted from the meme endpoint.
pub const MAX_BODY_SIZE: usize = 10 * 1024 * 1024; // 10MB

/// Errors that can occur while reading the meme collection.
///
/// The store collapses every variant into a single "fetch failed" state and
/// keeps only the rendered message. The variants exist for logging.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS, connection, TLS, etc.)
    #[error("Request failed: {0}")]
    Network(#[from] reqwest::Error),
    /// Request exceeded the configured timeout
    #[error("Request timed out")]
    Timeout,
    /// HTTP response with non-2xx status code
    #[error("HTTP error: status {0}")]
    HttpStatus(u16),
    /// Response body exceeded the 10MB size limit
    #[error("Response too large")]
    ResponseTooLarge,
    /// Body did not have the `{ data: { memes: [...] } }` shape
    #[error("Malformed response: {0}")]
    Malformed(String),
    /// The task running the request panicked
    #[error("Fetch task failed: {0}")]
    TaskFailed(String),
}

/// Read interface shared by the remote endpoint and the demo fixture.
///
/// Implementations perform exactly one read per call and never cache.
#[async_trait]
pub trait MemeSource: Send + Sync {
    /// Short label for logs and the status bar.
    fn name(&self) -> &str;

    /// Read the full meme collection, in source order.
    async fn fetch_memes(&self) -> Result<Vec<MemeRecord>, FetchError>;
}

#[derive(Deserialize)]
struct Envelope {
    data: EnvelopeData,
}

#[derive(Deserialize)]
struct EnvelopeData {
    memes: Vec<MemeRecord>,
}

/// Decode a response body shaped as `{ data: { memes: [...] } }`.
pub fn decode_collection(body: &[u8]) -> Result<Vec<MemeRecord>, FetchError> {
    let envelope: Envelope =
        serde_json::from_slice(body).map_err(|e| FetchError::Malformed(e.to_string()))?;
    Ok(envelope.data.memes)
}

/// Reads memes from a JSON HTTP endpoint with one GET per call.
pub struct RemoteSource {
    client: reqwest::Client,
    endpoint: Url,
}

impl RemoteSource {
    /// Create a source for `endpoint` using a shared HTTP client.
    pub fn new(client: reqwest::Client, endpoint: &str) -> Result<Self, UrlValidationError> {
        let endpoint = validate_endpoint(endpoint)?;
        Ok(Self { client, endpoint })
    }

    /// Build the HTTP client used for the remote source.
    ///
    /// `timeout` of `None` leaves requests unbounded: a hanging server keeps
    /// the store in `Loading` until the user issues another request.
    pub fn build_client(timeout: Option<Duration>) -> reqwest::Result<reqwest::Client> {
        let mut builder = reqwest::Client::builder()
            .pool_max_idle_per_host(2)
            .pool_idle_timeout(Duration::from_secs(30))
            .user_agent(concat!("memeverse/", env!("CARGO_PKG_VERSION")));
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        builder.build()
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }
}

#[async_trait]
impl MemeSource for RemoteSource {
    fn name(&self) -> &str {
        self.endpoint.host_str().unwrap_or("remote")
    }

    async fn fetch_memes(&self) -> Result<Vec<MemeRecord>, FetchError> {
        tracing::debug!(endpoint = %self.endpoint, "Requesting meme collection");

        let response = self
            .client
            .get(self.endpoint.clone())
            .send()
            .await
            .map_err(map_request_error)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), endpoint = %self.endpoint, "Meme endpoint returned error status");
            return Err(FetchError::HttpStatus(status.as_u16()));
        }

        if let Some(len) = response.content_length() {
            if len > MAX_BODY_SIZE as u64 {
                return Err(FetchError::ResponseTooLarge);
            }
        }

        let body = read_capped(response.bytes_stream(), MAX_BODY_SIZE).await?;

        let memes = decode_collection(&body)?;
        tracing::debug!(count = memes.len(), bytes = body.len(), "Decoded meme collection");
        Ok(memes)
    }
}

/// Collect a body stream, failing once it grows past `max` bytes.
///
/// Servers may omit or understate `Content-Length`, so the running total is
/// checked on every chunk.
async fn read_capped<S, B>(stream: S, max: usize) -> Result<Vec<u8>, FetchError>
where
    S: futures::Stream<Item = Result<B, reqwest::Error>>,
    B: AsRef<[u8]>,
{
    let mut stream = std::pin::pin!(stream);
    let mut body = Vec::new();
    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(map_request_error)?;
        let chunk = chunk.as_ref();
        if body.len() + chunk.len() > max {
            return Err(FetchError::ResponseTooLarge);
        }
        body.extend_from_slice(chunk);
    }
    Ok(body)
}

fn map_request_error(err: reqwest::Error) -> FetchError {
    if err.is_timeout() {
        FetchError::Timeout
    } else {
        FetchError::Network(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_collection_accepts_envelope() {
        let body = br#"{"success": true, "data": {"memes": [
            {"id": "1", "name": "One", "url": "https://i.imgflip.com/1.jpg"},
            {"id": "2", "name": "Two", "url": "https://i.imgflip.com/2.jpg"}
        ]}}"#;
        let memes = decode_collection(body).unwrap();
        assert_eq!(memes.len(), 2);
        assert_eq!(memes[0].title, "One");
        assert_eq!(memes[1].id, "2");
    }

    #[test]
    fn decode_collection_rejects_wrong_shape() {
        let body = br#"{"success": false, "error_message": "nope"}"#;
        let err = decode_collection(body).unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
        assert!(err.to_string().starts_with("Malformed response"));
    }

    #[tokio::test]
    async fn read_capped_stops_past_limit() {
        let chunks = vec![Ok::<_, reqwest::Error>(vec![b'a'; 6]), Ok(vec![b'b'; 6])];
        let err = read_capped(futures::stream::iter(chunks), 10).await.unwrap_err();
        assert!(matches!(err, FetchError::ResponseTooLarge));
    }

    #[tokio::test]
    async fn read_capped_accepts_body_at_limit() {
        let chunks = vec![Ok::<_, reqwest::Error>(vec![b'a'; 4]), Ok(vec![b'b'; 6])];
        let body = read_capped(futures::stream::iter(chunks), 10).await.unwrap();
        assert_eq!(body.len(), 10);
        assert_eq!(&body[..5], b"aaaab");
    }

    #[test]
    fn decode_collection_rejects_non_json() {
        assert!(matches!(
            decode_collection(b"<html>oops</html>"),
            Err(FetchError::Malformed(_))
        ));
    }

    #[test]
    fn remote_source_rejects_bad_endpoint() {
        let client = reqwest::Client::new();
        assert!(RemoteSource::new(client.clone(), "ftp://example.com/memes").is_err());
        assert!(RemoteSource::new(client, "not a url").is_err());
    }

    #[test]
    fn remote_source_name_is_host() {
        let source = RemoteSource::new(reqwest::Client::new(), DEFAULT_ENDPOINT).unwrap();
        assert_eq!(source.name(), "api.imgflip.com");
    }
}
