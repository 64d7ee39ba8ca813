//! Where story feeds come from.
//!
//! A [`StorySource`] turns a location into the raw response body. Sources
//! classify their own failures into [`LoadError`]; the catalog owns the
//! deadline and the parsing.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;

use crate::constants::HTTP_CONNECT_TIMEOUT;
use crate::error::LoadError;

/// A fetch-capable data source for story feeds.
#[async_trait]
pub trait StorySource: Send + Sync {
    /// Fetch the raw feed body at `location`.
    async fn fetch(&self, location: &str) -> Result<String, LoadError>;
}

#[async_trait]
impl<S: StorySource + ?Sized> StorySource for Box<S> {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        (**self).fetch(location).await
    }
}

/// Pick a source for `location`: HTTP for `http(s)://` URLs, the filesystem otherwise.
pub fn source_for(location: &str) -> Result<Box<dyn StorySource>, LoadError> {
    if location.starts_with("http://") || location.starts_with("https://") {
        Ok(Box::new(HttpSource::new()?))
    } else {
        Ok(Box::new(FileSource))
    }
}

// ============================================================================
// HTTP
// ============================================================================

/// Fetches feeds with an HTTP GET.
///
/// The overall deadline belongs to the catalog. The client only bounds the
/// connect phase, and running out of it is reported as a network failure.
#[derive(Clone)]
pub struct HttpSource {
    client: reqwest::Client,
    connect_timeout: Option<Duration>,
}

impl HttpSource {
    pub fn new() -> Result<Self, LoadError> {
        Self::with_connect_timeout(HTTP_CONNECT_TIMEOUT)
    }

    /// Give up on connecting after `connect_timeout`.
    pub fn with_connect_timeout(connect_timeout: Duration) -> Result<Self, LoadError> {
        let client = reqwest::Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .map_err(|e| LoadError::unknown(format!("Failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            connect_timeout: Some(connect_timeout),
        })
    }

    /// Use a preconfigured client.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            connect_timeout: None,
        }
    }

    fn classify_transport(&self, error: reqwest::Error) -> LoadError {
        if error.is_timeout() {
            let connect_limit = self.connect_timeout.filter(|_| error.is_connect());
            client_timeout(connect_limit, &error)
        } else if error.is_builder() {
            LoadError::unknown(format!("Invalid request: {error}"))
        } else if error.is_decode() {
            LoadError::parse(format!("Could not decode response body: {error}"))
        } else {
            LoadError::Network {
                message: error.to_string(),
                status: error.status().map(|s| s.as_u16()),
            }
        }
    }
}

#[async_trait]
impl StorySource for HttpSource {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let response = self
            .client
            .get(location)
            .send()
            .await
            .map_err(|e| self.classify_transport(e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), location, "feed request rejected");
            return Err(LoadError::from_status(
                status.as_u16(),
                status.canonical_reason(),
                location,
            ));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| self.classify_transport(e))?;
        String::from_utf8(body.to_vec())
            .map_err(|_| LoadError::parse(format!("Response from {location} is not valid UTF-8")))
    }
}

/// A client-side timeout. `connect_limit` is set when the connect phase ran out.
fn client_timeout(connect_limit: Option<Duration>, detail: impl std::fmt::Display) -> LoadError {
    match connect_limit {
        Some(limit) => LoadError::network(format!(
            "Could not connect within {}s",
            limit.as_secs_f64()
        )),
        None => LoadError::network(format!("HTTP client timed out: {detail}")),
    }
}

// ============================================================================
// Filesystem
// ============================================================================

/// Reads feeds from local files. Accepts plain paths and `file://` URLs.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileSource;

#[async_trait]
impl StorySource for FileSource {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        let path = location.strip_prefix("file://").unwrap_or(location);
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| match e.kind() {
                std::io::ErrorKind::NotFound => LoadError::NotFound {
                    resource: path.to_string(),
                },
                std::io::ErrorKind::InvalidData => {
                    LoadError::parse(format!("{path} is not valid UTF-8"))
                }
                _ => LoadError::unknown(format!("Failed to read {path}: {e}")),
            })
    }
}

// ============================================================================
// In-memory
// ============================================================================

/// Serves canned responses from memory.
///
/// Unknown locations fail with [`LoadError::NotFound`]. An optional delay is
/// applied before every response, which makes deadlines easy to exercise.
#[derive(Debug, Default)]
pub struct StaticSource {
    responses: HashMap<String, Result<String, LoadError>>,
    delay: Option<Duration>,
    fetches: AtomicUsize,
}

impl StaticSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Respond to `location` with `body`.
    pub fn with_body(mut self, location: impl Into<String>, body: impl Into<String>) -> Self {
        self.responses.insert(location.into(), Ok(body.into()));
        self
    }

    /// Fail requests for `location` with `error`.
    pub fn with_error(mut self, location: impl Into<String>, error: LoadError) -> Self {
        self.responses.insert(location.into(), Err(error));
        self
    }

    /// Wait this long before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Replace the response for `location` in place.
    pub fn set_body(&mut self, location: impl Into<String>, body: impl Into<String>) {
        self.responses.insert(location.into(), Ok(body.into()));
    }

    /// Number of fetches started so far.
    pub fn fetch_count(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StorySource for StaticSource {
    async fn fetch(&self, location: &str) -> Result<String, LoadError> {
        self.fetches.fetch_add(1, Ordering::SeqCst);

        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }

        self.responses
            .get(location)
            .cloned()
            .unwrap_or_else(|| {
                Err(LoadError::NotFound {
                    resource: location.to_string(),
                })
            })
    }
}
