//! The search endpoint consumed by the controller.
//!
//! [`SearchEndpoint`] is the seam between orchestration and transport: the
//! controller only ever sees a list of matches or a [`SearchError`].
//! [`HttpSearchEndpoint`] is the production implementation speaking the
//! `GET <base>?q=<query>` protocol.

use std::future::Future;

use reqwest::{Client, Url};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::error::SearchError;

/// Something that can answer a search query.
///
/// Implementations perform a single attempt; timeout and retry are applied
/// by the controller's pipeline.
pub trait SearchEndpoint: Send + Sync + 'static {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<String>, SearchError>> + Send;
}

/// Successful response body of the search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub query: String,
    #[serde(default)]
    pub results: Vec<String>,
}

#[derive(Debug, Error)]
#[error("invalid search endpoint `{url}`: {reason}")]
pub struct InvalidEndpoint {
    url: String,
    reason: String,
}

/// HTTP implementation of [`SearchEndpoint`].
#[derive(Debug, Clone)]
pub struct HttpSearchEndpoint {
    client: Client,
    base: Url,
}

impl HttpSearchEndpoint {
    /// Parse `base` (for example `http://localhost:8000/api/search`) into an endpoint.
    pub fn parse(base: &str) -> Result<Self, InvalidEndpoint> {
        let url = Url::parse(base).map_err(|err| InvalidEndpoint {
            url: base.to_string(),
            reason: err.to_string(),
        })?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(InvalidEndpoint {
                url: base.to_string(),
                reason: format!("unsupported scheme `{}`", url.scheme()),
            });
        }
        Ok(Self::new(url))
    }

    #[must_use]
    pub fn new(base: Url) -> Self {
        Self {
            client: Client::new(),
            base,
        }
    }

    #[must_use]
    pub fn base(&self) -> &Url {
        &self.base
    }

    async fn fetch(&self, query: &str) -> Result<Vec<String>, SearchError> {
        let response = self
            .client
            .get(self.base.clone())
            .query(&[("q", query)])
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        debug!(%query, status = status.as_u16(), "search endpoint responded");
        if status.is_success() {
            let body: SearchResponse = response
                .json()
                .await
                .map_err(|err| SearchError::Unknown(err.to_string()))?;
            return Ok(body.results);
        }

        let body = response.text().await.unwrap_or_default();
        Err(SearchError::from_status(status.as_u16(), &body))
    }
}

impl SearchEndpoint for HttpSearchEndpoint {
    fn search(&self, query: &str) -> impl Future<Output = Result<Vec<String>, SearchError>> + Send {
        self.fetch(query)
    }
}

/// Map a failure that produced no HTTP status.
fn classify_transport(err: reqwest::Error) -> SearchError {
    if err.is_timeout() {
        SearchError::TimeoutExceeded
    } else {
        debug!(error = %err, "search request failed before a status was received");
        SearchError::ConnectionRefused
    }
}
