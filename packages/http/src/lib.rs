#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Shared HTTP transport for the safeto upstream clients.
//!
//! Both the bulk feature-service fetcher and the reverse geocoder talk to
//! their upstream APIs through the [`HttpTransport`] trait. A single
//! [`ReqwestTransport`] is built once at process start and handed to each
//! component as an `Arc<dyn HttpTransport>`, so connection pooling and the
//! identifying `User-Agent` header are shared across every call.
//!
//! The transport only moves bytes: it returns the raw response body and
//! leaves JSON decoding to the caller, which keeps transport failures and
//! decode failures distinguishable.

mod client;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

use std::time::Duration;

pub use client::ReqwestTransport;

/// Default `User-Agent` sent with every upstream request.
pub const DEFAULT_USER_AGENT: &str = "safeTO <analysis@csc207.joefang.org>";

/// Errors raised while performing an HTTP request.
#[derive(Debug, thiserror::Error)]
pub enum TransportError {
    /// Connection, timeout, or body read failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The request or client could not be constructed.
    #[error("Invalid HTTP request: {message}")]
    Build {
        /// Description of what was invalid.
        message: String,
    },
}

/// A single GET request: a base URL plus ordered query parameters.
///
/// Query values are stored unencoded; the transport is responsible for
/// URL-encoding them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Base URL without a query string.
    pub url: String,
    /// Query parameters in the order they are sent.
    pub query: Vec<(String, String)>,
}

impl HttpRequest {
    /// Creates a request for `url` with no query parameters.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            query: Vec::new(),
        }
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Returns the first value for `key`, if present.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// GET-only transport shared by every upstream client.
#[async_trait::async_trait]
pub trait HttpTransport: Send + Sync {
    /// Issues a GET request and returns the response body as text.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on connection, timeout, or I/O failure.
    /// A non-success status code is not an error at this layer.
    async fn get(&self, request: &HttpRequest) -> Result<String, TransportError>;
}

/// Settings for building a [`ReqwestTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Identifying `User-Agent` header value (app name with contact).
    pub user_agent: String,
    /// Maximum time to establish a connection.
    pub connect_timeout: Duration,
    /// Maximum time for a whole request, including reading the body.
    pub request_timeout: Duration,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            user_agent: DEFAULT_USER_AGENT.to_string(),
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(60),
        }
    }
}

impl TransportConfig {
    /// Builds a config from the defaults, overridden by `SAFETO_USER_AGENT`
    /// and `SAFETO_HTTP_TIMEOUT_SECS` when set.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(user_agent) = std::env::var("SAFETO_USER_AGENT")
            && !user_agent.trim().is_empty()
        {
            config.user_agent = user_agent;
        }

        if let Some(timeout) = std::env::var("SAFETO_HTTP_TIMEOUT_SECS")
            .ok()
            .as_deref()
            .and_then(parse_timeout_secs)
        {
            config.request_timeout = timeout;
        }

        config
    }
}

/// Parses a whole number of seconds. Zero and unparsable values are ignored.
fn parse_timeout_secs(value: &str) -> Option<Duration> {
    match value.trim().parse::<u64>() {
        Ok(0) | Err(_) => None,
        Ok(secs) => Some(Duration::from_secs(secs)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn request_keeps_query_order() {
        let request = HttpRequest::get("https://example.com/query")
            .param("f", "json")
            .param("resultOffset", 2000)
            .param("where", "OCC_YEAR=2020");

        let keys: Vec<&str> = request.query.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["f", "resultOffset", "where"]);
        assert_eq!(request.query_value("resultOffset"), Some("2000"));
        assert_eq!(request.query_value("missing"), None);
    }

    #[test]
    fn timeout_override_ignores_zero_and_garbage() {
        assert_eq!(parse_timeout_secs("30"), Some(Duration::from_secs(30)));
        assert_eq!(parse_timeout_secs(" 5 "), Some(Duration::from_secs(5)));
        assert_eq!(parse_timeout_secs("0"), None);
        assert_eq!(parse_timeout_secs("soon"), None);
        assert_eq!(parse_timeout_secs("-1"), None);
    }

    #[test]
    fn default_config_identifies_the_app() {
        let config = TransportConfig::default();
        assert!(config.user_agent.starts_with("safeTO"));
        assert!(config.request_timeout > config.connect_timeout);
    }
}
