// SPDX-License-Identifier: MPL-2.0
use std::fmt;

#[derive(Debug, Clone)]
pub enum Error {
    Io(String),
    Config(String),
    Catalog(String),
    Backend(BackendError),
    Mount(String),
}

/// Failures of the realtime database client and its bindings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendError {
    /// No endpoint URL was supplied at build time, in the environment or on the CLI.
    MissingUrl,

    /// The endpoint URL could not be parsed or uses an unsupported scheme.
    InvalidUrl(String),

    /// A database path contains a forbidden character or an empty segment.
    InvalidPath(String),

    /// The HTTP request could not be sent or the connection dropped.
    Request(String),

    /// The server answered with a non-success status code.
    Status(u16),

    /// The response body or an event payload was not valid JSON.
    Decode(String),
}

impl fmt::Display for BackendError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendError::MissingUrl => write!(f, "Database URL is not configured"),
            BackendError::InvalidUrl(msg) => write!(f, "Invalid database URL: {}", msg),
            BackendError::InvalidPath(path) => write!(f, "Invalid database path: {}", path),
            BackendError::Request(msg) => write!(f, "Request failed: {}", msg),
            BackendError::Status(code) => write!(f, "HTTP status: {}", code),
            BackendError::Decode(msg) => write!(f, "Invalid payload: {}", msg),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::Io(e) => write!(f, "I/O Error: {}", e),
            Error::Config(e) => write!(f, "Config Error: {}", e),
            Error::Catalog(e) => write!(f, "Catalog Error: {}", e),
            Error::Backend(e) => write!(f, "Backend Error: {}", e),
            Error::Mount(e) => write!(f, "Mount Error: {}", e),
        }
    }
}

impl std::error::Error for Error {}

impl From<BackendError> for Error {
    fn from(err: BackendError) -> Self {
        Error::Backend(err)
    }
}

impl From<std::io::Error> for Error {
    fn from(err: std::io::Error) -> Self {
        Error::Io(err.to_string())
    }
}

impl From<toml::de::Error> for Error {
    fn from(err: toml::de::Error) -> Self {
        Error::Config(err.to_string())
    }
}

impl From<toml::ser::Error> for Error {
    fn from(err: toml::ser::Error) -> Self {
        Error::Config(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;
