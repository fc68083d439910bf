// SPDX-License-Identifier: MPL-2.0
//! Realtime database client.
//!
//! [`DatabaseClient`] is a connection descriptor for a realtime database REST
//! endpoint; creating it performs no network I/O. The UI receives it wrapped
//! in a [`DatabaseBinding`], from which components obtain [`DatabaseRef`]
//! handles to read a path once or to listen for changes.
//!
//! # Examples
//!
//! ```no_run
//! use abx_tester::backend::{DatabaseBinding, DatabaseClient};
//!
//! # async fn demo() -> abx_tester::error::Result<()> {
//! let client = DatabaseClient::new("https://example-default-rtdb.firebaseio.com")?;
//! let binding = DatabaseBinding::new(client);
//! let value = binding.reference("settings/trials")?.fetch().await?;
//! println!("{value}");
//! # Ok(())
//! # }
//! ```

pub mod event;

pub use event::{DatabaseEvent, EventParser};

use crate::error::{BackendError, Error, Result};
use futures_util::{stream, Stream, StreamExt};
use reqwest::header::ACCEPT;
use reqwest::Url;
use serde_json::Value;
use std::collections::VecDeque;
use std::fmt;
use std::sync::Arc;

/// Characters the database refuses in path segments.
const FORBIDDEN_PATH_CHARS: [char; 5] = ['.', '#', '$', '[', ']'];

/// Connection descriptor for one database endpoint.
#[derive(Debug, Clone)]
pub struct DatabaseClient {
    endpoint: Url,
    http: reqwest::Client,
}

impl DatabaseClient {
    /// Validates `url` and prepares an HTTP client for it.
    pub fn new(url: &str) -> Result<Self> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("AbxTester/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| BackendError::Request(e.to_string()))?;
        Self::with_http(url, http)
    }

    /// Same as [`DatabaseClient::new`] with a caller-supplied HTTP client.
    pub fn with_http(url: &str, http: reqwest::Client) -> Result<Self> {
        let endpoint =
            Url::parse(url.trim()).map_err(|e| BackendError::InvalidUrl(e.to_string()))?;
        if !matches!(endpoint.scheme(), "http" | "https") {
            return Err(BackendError::InvalidUrl(format!(
                "unsupported scheme '{}'",
                endpoint.scheme()
            ))
            .into());
        }
        if endpoint.host_str().is_none() {
            return Err(BackendError::InvalidUrl(format!("no host in '{}'", url)).into());
        }
        Ok(Self { endpoint, http })
    }

    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// REST URL of `path`: the endpoint followed by `<path>.json`.
    ///
    /// The endpoint's query string is kept so emulator namespaces
    /// (`?ns=...`) keep working.
    pub fn rest_url(&self, path: &DatabasePath) -> Result<Url> {
        let mut url = self.endpoint.clone();
        {
            let mut segments = url.path_segments_mut().map_err(|_| {
                BackendError::InvalidUrl(format!("'{}' cannot be a base", self.endpoint))
            })?;
            segments.pop_if_empty();
            let mut parts = path.segments().peekable();
            if parts.peek().is_none() {
                segments.push(".json");
            }
            while let Some(part) = parts.next() {
                if parts.peek().is_none() {
                    segments.push(&format!("{part}.json"));
                } else {
                    segments.push(part);
                }
            }
        }
        Ok(url)
    }
}

/// Slash-separated location inside the database. The empty path is the root.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct DatabasePath(String);

impl DatabasePath {
    pub fn root() -> Self {
        Self::default()
    }

    /// Parses `raw`, trimming leading and trailing slashes.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim_matches('/');
        if trimmed.is_empty() {
            return Ok(Self::root());
        }
        if !trimmed.split('/').all(is_valid_segment) {
            return Err(BackendError::InvalidPath(raw.to_string()).into());
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Appends one or more segments. An empty `segment` is rejected.
    pub fn child(&self, segment: &str) -> Result<Self> {
        let segment = segment.trim_matches('/');
        if segment.is_empty() {
            return Err(BackendError::InvalidPath(format!("{}/", self)).into());
        }
        let joined = if self.is_root() {
            segment.to_string()
        } else {
            format!("{}/{}", self.0, segment)
        };
        Self::parse(&joined)
    }

    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }
}

impl fmt::Display for DatabasePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "/{}", self.0)
    }
}

fn is_valid_segment(segment: &str) -> bool {
    !segment.is_empty()
        && !segment
            .chars()
            .any(|c| FORBIDDEN_PATH_CHARS.contains(&c) || c.is_control())
}

/// Capability handed to UI components for binding state to database paths.
///
/// Cloning is cheap; every clone shares the same [`DatabaseClient`].
#[derive(Debug, Clone)]
pub struct DatabaseBinding {
    client: Arc<DatabaseClient>,
}

impl DatabaseBinding {
    pub fn new(client: DatabaseClient) -> Self {
        Self {
            client: Arc::new(client),
        }
    }

    pub fn client(&self) -> &DatabaseClient {
        &self.client
    }

    /// Handle to `path`, sharing this binding's client.
    pub fn reference(&self, path: &str) -> Result<DatabaseRef> {
        Ok(DatabaseRef {
            client: Arc::clone(&self.client),
            path: DatabasePath::parse(path)?,
        })
    }
}

/// Handle to one database location.
#[derive(Debug, Clone)]
pub struct DatabaseRef {
    client: Arc<DatabaseClient>,
    path: DatabasePath,
}

impl DatabaseRef {
    pub fn path(&self) -> &DatabasePath {
        &self.path
    }

    pub fn child(&self, segment: &str) -> Result<Self> {
        Ok(Self {
            client: Arc::clone(&self.client),
            path: self.path.child(segment)?,
        })
    }

    pub fn rest_url(&self) -> Result<Url> {
        self.client.rest_url(&self.path)
    }

    /// Reads the current value once. A missing location reads as `null`.
    pub async fn fetch(&self) -> Result<Value> {
        let url = self.rest_url()?;
        tracing::debug!(path = %self.path, "fetching");

        let response = self
            .client
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()).into());
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;
        serde_json::from_slice(&body).map_err(|e| BackendError::Decode(e.to_string()).into())
    }

    /// Opens a change stream for this location.
    ///
    /// The first event is a `put` carrying the current value; later events
    /// describe changes relative to this path. The stream ends when the
    /// server closes the connection.
    pub async fn listen(&self) -> Result<impl Stream<Item = Result<DatabaseEvent>>> {
        let url = self.rest_url()?;
        tracing::debug!(path = %self.path, "listening");

        let response = self
            .client
            .http
            .get(url)
            .header(ACCEPT, "text/event-stream")
            .send()
            .await
            .map_err(|e| BackendError::Request(e.to_string()))?;

        if !response.status().is_success() {
            return Err(BackendError::Status(response.status().as_u16()).into());
        }

        let state = (
            response.bytes_stream(),
            EventParser::new(),
            VecDeque::new(),
        );
        Ok(stream::unfold(
            state,
            |(mut bytes, mut parser, mut pending)| async move {
                loop {
                    if let Some(event) = pending.pop_front() {
                        return Some((event, (bytes, parser, pending)));
                    }
                    match bytes.next().await {
                        Some(Ok(chunk)) => pending.extend(parser.feed(&chunk)),
                        Some(Err(e)) => {
                            let error: Error = BackendError::Request(e.to_string()).into();
                            return Some((Err(error), (bytes, parser, pending)));
                        }
                        None => return None,
                    }
                }
            },
        ))
    }
}
