//! Transport layer: the GET collaborator the workflows run against.
//!
//! The workflows only need one capability, `GET(path) -> {data, headers}`,
//! so the [`Transport`] trait is kept to exactly that. Base URL, timeout and
//! default headers are configuration of the implementation, not of the
//! workflows.
//!
//! # Implementations
//!
//! - [`HttpTransport`]: `reqwest` client bound to the configured base URL

pub mod http;

pub use http::HttpTransport;

use crate::domain::TransportError;
use futures_util::future::BoxFuture;
use std::collections::HashMap;

/// Decoded body and headers of a successful GET.
///
/// Header names are stored lowercased so lookups are case-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransportResponse {
    pub data: serde_json::Value,
    headers: HashMap<String, String>,
}

impl TransportResponse {
    #[must_use]
    pub fn new(data: serde_json::Value) -> Self {
        Self {
            data,
            headers: HashMap::new(),
        }
    }

    /// Adds a header, replacing any previous value for the same name.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }

    /// Looks up a header by case-insensitive name.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(&name.to_ascii_lowercase()).map(String::as_str)
    }
}

/// Abstraction over the remote catalog's GET endpoint.
///
/// Implementations must be shareable across worker tasks.
///
/// # Examples
///
/// ```no_run
/// use repolens::transport::{HttpTransport, Transport};
/// use repolens::Config;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let transport = HttpTransport::new(&Config::default())?;
/// let response = transport.get("/repositories?since=0").await?;
/// println!("{:?}", response.header("link"));
/// # Ok(())
/// # }
/// ```
pub trait Transport: Send + Sync {
    /// Issues a GET for `path` relative to the transport's base URL.
    ///
    /// # Errors
    ///
    /// Returns a [`TransportError`] for network failures, timeouts, non-2xx
    /// statuses and undecodable bodies.
    fn get<'a>(&'a self, path: &'a str) -> BoxFuture<'a, Result<TransportResponse, TransportError>>;
}
