//! `reqwest`-backed transport bound to a fixed base URL and timeout.

use super::{Transport, TransportResponse};
use crate::domain::error::{RepolensError, Result, TransportError};
use crate::Config;
use futures_util::future::BoxFuture;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::Instrument;

/// HTTP transport for the public catalog API.
///
/// Every request carries the configured `User-Agent` and the catalog's JSON
/// media type. Requests that exceed `timeout_ms` fail with
/// [`TransportError::Timeout`].
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: Client,
    base_url: String,
    timeout_ms: u64,
}

impl HttpTransport {
    /// Builds a transport from configuration.
    ///
    /// # Errors
    ///
    /// Returns [`RepolensError::Config`] if the user agent is not a valid
    /// header value or the HTTP client cannot be constructed.
    pub fn new(config: &Config) -> Result<Self> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::ACCEPT,
            header::HeaderValue::from_static("application/vnd.github+json"),
        );
        let user_agent = header::HeaderValue::from_str(&config.user_agent)
            .map_err(|e| RepolensError::Config(format!("invalid user_agent: {e}")))?;
        headers.insert(header::USER_AGENT, user_agent);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| RepolensError::Config(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            timeout_ms: config.timeout_ms,
        })
    }

    fn classify(&self, error: &reqwest::Error) -> TransportError {
        if error.is_timeout() {
            TransportError::Timeout { millis: self.timeout_ms }
        } else if error.is_decode() {
            TransportError::Decode(error.to_string())
        } else {
            TransportError::Network(error.to_string())
        }
    }

    async fn fetch(&self, path: &str) -> std::result::Result<TransportResponse, TransportError> {
        let url = format!("{}{path}", self.base_url);

        let response = self.client.get(&url).send().await.map_err(|e| self.classify(&e))?;

        let status = response.status();
        if !status.is_success() {
            tracing::debug!(status = status.as_u16(), "request rejected");
            return Err(TransportError::Status { status: status.as_u16() });
        }

        let headers: Vec<(String, String)> = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.as_str().to_string(), value.to_str().ok()?.to_string())))
            .collect();

        let body = response.bytes().await.map_err(|e| self.classify(&e))?;
        let data = if body.is_empty() {
            serde_json::Value::Null
        } else {
            serde_json::from_slice(&body).map_err(|e| TransportError::Decode(e.to_string()))?
        };

        tracing::debug!(bytes = body.len(), "response received");

        Ok(headers
            .into_iter()
            .fold(TransportResponse::new(data), |response, (name, value)| {
                response.with_header(&name, value)
            }))
    }
}

impl Transport for HttpTransport {
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, std::result::Result<TransportResponse, TransportError>> {
        Box::pin(self.fetch(path).instrument(tracing::debug_span!("http_get", path = %path)))
    }
}
