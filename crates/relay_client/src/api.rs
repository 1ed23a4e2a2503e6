use futures_util::StreamExt;
use relay_engine::{read_events, EventHandler, ReadError, ReadSummary};
use reqwest::{StatusCode, Url};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("invalid server url: {0}")]
    BaseUrl(String),
    #[error("{0}")]
    Http(#[from] reqwest::Error),
    #[error("HTTP error! Status: {0}")]
    Status(u16),
    #[error("unexpected response body: {0}")]
    Body(String),
    #[error(transparent)]
    Read(#[from] ReadError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UrlLookup {
    Found(Vec<String>),
    NotFound,
}

/// Thin client for the relay server's HTTP surface.
pub struct ApiClient {
    http: reqwest::Client,
    base: Url,
}

impl ApiClient {
    pub fn new(server: &str) -> Result<Self, ApiError> {
        let base = Url::parse(server).map_err(|err| ApiError::BaseUrl(err.to_string()))?;
        Ok(Self {
            http: reqwest::Client::new(),
            base,
        })
    }

    pub async fn keywords(&self) -> Result<Vec<String>, ApiError> {
        let response = self.http.get(self.endpoint("keywords", &[])?).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        string_list(&response.bytes().await?)
    }

    pub async fn urls(&self, keyword: &str) -> Result<UrlLookup, ApiError> {
        let url = self.endpoint("urls", &[("keyword", keyword)])?;
        let response = self.http.get(url).send().await?;
        match response.status() {
            StatusCode::NOT_FOUND => Ok(UrlLookup::NotFound),
            status if status.is_success() => {
                Ok(UrlLookup::Found(string_list(&response.bytes().await?)?))
            }
            status => Err(ApiError::Status(status.as_u16())),
        }
    }

    /// Start a relayed download and feed every frame to `handler` until the stream ends.
    pub async fn download(
        &self,
        target: &str,
        handler: &mut dyn EventHandler,
    ) -> Result<ReadSummary, ApiError> {
        let url = self.endpoint("download", &[("url", target)])?;
        let response = self.http.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ApiError::Status(response.status().as_u16()));
        }
        let body = response.bytes_stream().map(|chunk| chunk.map_err(|err| err.to_string()));
        Ok(read_events(body, handler).await?)
    }

    fn endpoint(&self, path: &str, params: &[(&str, &str)]) -> Result<Url, ApiError> {
        let mut url = self
            .base
            .join(path)
            .map_err(|err| ApiError::BaseUrl(err.to_string()))?;
        if !params.is_empty() {
            url.query_pairs_mut().extend_pairs(params);
        }
        Ok(url)
    }
}

fn string_list(bytes: &[u8]) -> Result<Vec<String>, ApiError> {
    serde_json::from_slice(bytes).map_err(|err| ApiError::Body(err.to_string()))
}
