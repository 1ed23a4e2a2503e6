use std::fmt;
use std::pin::Pin;

use bytes::Bytes;
use futures_util::Stream;
use relay_core::ErrorPayload;

/// Upstream body chunks as they arrive.
pub type BodyStream = Pin<Box<dyn Stream<Item = Result<Bytes, RelayError>> + Send>>;

/// An upstream response that answered 200 and is ready to stream.
pub struct UpstreamBody {
    /// Declared Content-Length, if any.
    pub size: Option<u64>,
    pub content_type: Option<String>,
    pub chunks: BodyStream,
}

impl fmt::Debug for UpstreamBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpstreamBody")
            .field("size", &self.size)
            .field("content_type", &self.content_type)
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{kind}: {message}")]
pub struct RelayError {
    pub kind: FailureKind,
    pub message: String,
}

impl RelayError {
    pub fn new(kind: FailureKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Body sent to the client when the relay fails before streaming.
    pub fn to_payload(&self) -> ErrorPayload {
        match self.kind {
            FailureKind::HttpStatus(code) => {
                ErrorPayload::new(format!("Failed to fetch content. Status code: {code}"))
            }
            _ => ErrorPayload::new(format!("Failed to fetch content. Error: {}", self.message)),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureKind {
    InvalidUrl,
    UnsupportedScheme(String),
    HttpStatus(u16),
    Timeout,
    Network,
    Encode,
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureKind::InvalidUrl => write!(f, "invalid url"),
            FailureKind::UnsupportedScheme(scheme) => write!(f, "unsupported scheme {scheme}"),
            FailureKind::HttpStatus(code) => write!(f, "http status {code}"),
            FailureKind::Timeout => write!(f, "timeout"),
            FailureKind::Network => write!(f, "network error"),
            FailureKind::Encode => write!(f, "frame encoding error"),
        }
    }
}
