use std::time::Duration;

use futures_util::StreamExt;
use relay_logging::{relay_debug, relay_info};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use url::Url;

use crate::{BodyStream, FailureKind, RelayError, UpstreamBody};

/// Transport knobs for the upstream request. Nothing is retried.
#[derive(Debug, Clone, Default)]
pub struct RelaySettings {
    /// `None` leaves the transport default in place.
    pub connect_timeout: Option<Duration>,
    pub request_timeout: Option<Duration>,
    /// `0` disables redirects: a 3xx then counts as a non-200 upstream status.
    pub redirect_limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transport {
    Http,
    Https,
}

impl Transport {
    /// `Https` only for an exact `https` scheme; anything else gets http semantics.
    pub fn for_url(url: &Url) -> Self {
        if url.scheme() == "https" {
            Transport::Https
        } else {
            Transport::Http
        }
    }
}

#[async_trait::async_trait]
pub trait Fetcher: Send + Sync {
    /// Open `url` upstream. Resolves once headers arrive with status 200;
    /// every other outcome is a pre-stream failure.
    async fn open(&self, url: &str) -> Result<UpstreamBody, RelayError>;
}

#[derive(Debug, Clone)]
pub struct ReqwestFetcher {
    client: reqwest::Client,
}

impl ReqwestFetcher {
    pub fn new(settings: RelaySettings) -> Result<Self, RelayError> {
        let policy = if settings.redirect_limit == 0 {
            reqwest::redirect::Policy::none()
        } else {
            reqwest::redirect::Policy::limited(settings.redirect_limit)
        };

        let mut builder = reqwest::Client::builder().redirect(policy);
        if let Some(timeout) = settings.connect_timeout {
            builder = builder.connect_timeout(timeout);
        }
        if let Some(timeout) = settings.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|err| RelayError::new(FailureKind::Network, err.to_string()))?;
        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl Fetcher for ReqwestFetcher {
    async fn open(&self, url: &str) -> Result<UpstreamBody, RelayError> {
        let parsed =
            Url::parse(url).map_err(|err| RelayError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let transport = Transport::for_url(&parsed);
        if transport == Transport::Http && parsed.scheme() != "http" {
            return Err(RelayError::new(
                FailureKind::UnsupportedScheme(parsed.scheme().to_string()),
                format!("Protocol \"{}:\" not supported", parsed.scheme()),
            ));
        }
        relay_debug!("Opening upstream {} over {:?}", parsed, transport);

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(map_reqwest_error)?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(RelayError::new(
                FailureKind::HttpStatus(status.as_u16()),
                status.to_string(),
            ));
        }

        let size = response.content_length();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(|value| value.to_string());
        relay_info!("Upstream {} answered 200, size={:?}", url, size);

        let chunks: BodyStream = Box::pin(
            response
                .bytes_stream()
                .map(|chunk| chunk.map_err(map_reqwest_error)),
        );
        Ok(UpstreamBody {
            size,
            content_type,
            chunks,
        })
    }
}

fn map_reqwest_error(err: reqwest::Error) -> RelayError {
    if err.is_timeout() {
        return RelayError::new(FailureKind::Timeout, err.to_string());
    }
    RelayError::new(FailureKind::Network, err.to_string())
}
