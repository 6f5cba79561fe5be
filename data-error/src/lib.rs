use std::str::Utf8Error;
use std::sync::Arc;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Errors shared by every crate of the catalog.
///
/// The enum is `Clone` so a single settled fetch can be reported to
/// each caller that joined it.
#[derive(Error, Debug, Clone)]
pub enum CatalogError {
    #[error("{message} (HTTP {status})")]
    Fetch { message: String, status: u16 },
    #[error("Network error: {0}")]
    Network(String),
    #[error("Parsing error")]
    Parse,
    #[error("IO error: {0}")]
    Io(Arc<std::io::Error>),
    #[error("Path error: {0}")]
    Path(String),
    #[error("Storage error: {0} {1}")]
    Storage(String, String),
    #[error("Cache error: {0}")]
    Cache(String),
}

impl CatalogError {
    /// Error for a non-success status returned by the upstream API.
    pub fn fetch(message: impl Into<String>, status: u16) -> Self {
        Self::Fetch {
            message: message.into(),
            status,
        }
    }

    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch { .. } | Self::Network(_))
    }
}

impl From<std::io::Error> for CatalogError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(Arc::new(e))
    }
}

impl From<Utf8Error> for CatalogError {
    fn from(_: Utf8Error) -> Self {
        Self::Parse
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        log::debug!("json error: {}", e);
        Self::Parse
    }
}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            log::debug!("failed to decode response body: {}", e);
            return Self::Parse;
        }
        Self::Network(e.to_string())
    }
}
