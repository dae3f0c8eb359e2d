//! Where the encrypted envelope comes from.
//!
//! Every failure here is `VoyageError::PayloadUnavailable`: the caller only
//! learns that the envelope could not be loaded, never anything about the
//! passphrase.

use std::path::PathBuf;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CACHE_CONTROL, PRAGMA};
use reqwest::Client;
use serde_json::Value;
use tracing::debug;

use crate::error::{Result, VoyageError};

/// Default total request timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Default connect timeout.
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches the raw envelope JSON. Structural validation is left to the caller.
#[async_trait]
pub trait EnvelopeSource: Send + Sync {
    async fn fetch(&self) -> Result<Value>;

    /// Human-readable origin, for logs and error hints.
    fn describe(&self) -> String;
}

/// A configured envelope location.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SourceLocation {
    Url(String),
    Path(PathBuf),
}

impl SourceLocation {
    /// `http://` and `https://` prefixes select a URL; anything else is a path.
    pub fn parse(raw: &str) -> Self {
        let trimmed = raw.trim();
        let lowered = trimmed.to_ascii_lowercase();
        if lowered.starts_with("http://") || lowered.starts_with("https://") {
            Self::Url(trimmed.to_string())
        } else {
            Self::Path(PathBuf::from(trimmed))
        }
    }

    /// Build the matching source.
    pub fn into_source(self, timeout: Duration) -> Result<Box<dyn EnvelopeSource>> {
        Ok(match self {
            Self::Url(url) => Box::new(HttpEnvelopeSource::with_timeouts(
                url,
                timeout,
                DEFAULT_CONNECT_TIMEOUT.min(timeout),
            )?),
            Self::Path(path) => Box::new(FileEnvelopeSource::new(path)),
        })
    }
}

impl std::fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Url(url) => f.write_str(url),
            Self::Path(path) => write!(f, "{}", path.display()),
        }
    }
}

/// GET over HTTP(S), bypassing intermediary caches.
#[derive(Debug, Clone)]
pub struct HttpEnvelopeSource {
    client: Client,
    url: String,
}

impl HttpEnvelopeSource {
    pub fn new(url: impl Into<String>) -> Result<Self> {
        Self::with_timeouts(url, DEFAULT_TIMEOUT, DEFAULT_CONNECT_TIMEOUT)
    }

    pub fn with_timeouts(
        url: impl Into<String>,
        timeout: Duration,
        connect_timeout: Duration,
    ) -> Result<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CACHE_CONTROL, HeaderValue::from_static("no-cache"));
        headers.insert(PRAGMA, HeaderValue::from_static("no-cache"));

        let client = Client::builder()
            .timeout(timeout)
            .connect_timeout(connect_timeout)
            .default_headers(headers)
            .build()
            .map_err(|e| VoyageError::PayloadUnavailable(format!("HTTP client setup: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl EnvelopeSource for HttpEnvelopeSource {
    async fn fetch(&self) -> Result<Value> {
        debug!(url = %self.url, "fetching envelope");
        let response = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| VoyageError::PayloadUnavailable(format!("Request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(VoyageError::PayloadUnavailable(format!("HTTP {}", status.as_u16())));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| VoyageError::PayloadUnavailable(format!("Body read failed: {}", e)))?;
        parse_body(&body)
    }

    fn describe(&self) -> String {
        self.url.clone()
    }
}

/// A `trip.enc.json` on disk.
#[derive(Debug, Clone)]
pub struct FileEnvelopeSource {
    path: PathBuf,
}

impl FileEnvelopeSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[async_trait]
impl EnvelopeSource for FileEnvelopeSource {
    async fn fetch(&self) -> Result<Value> {
        debug!(path = %self.path.display(), "reading envelope");
        let body = tokio::fs::read(&self.path).await.map_err(|e| {
            VoyageError::PayloadUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        parse_body(&body)
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}

fn parse_body(body: &[u8]) -> Result<Value> {
    serde_json::from_slice(body)
        .map_err(|e| VoyageError::PayloadUnavailable(format!("Envelope is not JSON: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    /// Serve exactly one HTTP response and hand back the raw request.
    async fn serve_once(status_line: &'static str, body: &'static str) -> (String, oneshot::Receiver<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let (tx, rx) = oneshot::channel();

        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut request = Vec::new();
            let mut buf = [0u8; 1024];
            while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
            }
            let response = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status_line,
                body.len(),
                body
            );
            socket.write_all(response.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            let _ = tx.send(String::from_utf8_lossy(&request).into_owned());
        });

        (format!("http://{}/data/trip.enc.json", addr), rx)
    }

    #[tokio::test]
    async fn test_http_fetch_sends_no_cache_headers() {
        let (url, request) = serve_once("200 OK", r#"{"salt":"a"}"#).await;
        let source = HttpEnvelopeSource::new(url).unwrap();

        let value = source.fetch().await.unwrap();
        assert_eq!(value["salt"], "a");

        let request = request.await.unwrap().to_ascii_lowercase();
        assert!(request.starts_with("get /data/trip.enc.json"));
        assert!(request.contains("cache-control: no-cache"));
        assert!(request.contains("pragma: no-cache"));
    }

    #[tokio::test]
    async fn test_http_404_is_unavailable() {
        let (url, _request) = serve_once("404 Not Found", "{}").await;
        let source = HttpEnvelopeSource::new(url).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(VoyageError::PayloadUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_http_non_json_is_unavailable() {
        let (url, _request) = serve_once("200 OK", "<html>captive portal</html>").await;
        let source = HttpEnvelopeSource::new(url).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(VoyageError::PayloadUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_http_connection_refused_is_unavailable() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let source = HttpEnvelopeSource::new(format!("http://{}/trip.enc.json", addr)).unwrap();
        assert!(matches!(
            source.fetch().await,
            Err(VoyageError::PayloadUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_file_source() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("trip.enc.json");
        std::fs::write(&path, r#"{"iterations": 5}"#).unwrap();

        let value = FileEnvelopeSource::new(&path).fetch().await.unwrap();
        assert_eq!(value["iterations"], 5);

        let missing = FileEnvelopeSource::new(dir.path().join("nope.json"));
        assert!(matches!(
            missing.fetch().await,
            Err(VoyageError::PayloadUnavailable(_))
        ));
    }

    #[test]
    fn test_location_parse() {
        assert_eq!(
            SourceLocation::parse("https://example.org/trip.enc.json"),
            SourceLocation::Url("https://example.org/trip.enc.json".to_string())
        );
        assert_eq!(
            SourceLocation::parse(" HTTP://host/x "),
            SourceLocation::Url("HTTP://host/x".to_string())
        );
        assert_eq!(
            SourceLocation::parse("data/trip.enc.json"),
            SourceLocation::Path(PathBuf::from("data/trip.enc.json"))
        );
    }
}
