//! `reqwest`-backed [`HttpTransport`].

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue, USER_AGENT};

use crate::{HttpRequest, HttpTransport, TransportConfig, TransportError};

/// Production transport wrapping one pooled [`reqwest::Client`].
///
/// Every request carries the configured `User-Agent` and
/// `Accept: application/json`.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    /// Builds the underlying client from `config`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Build`] if the user agent is not a valid
    /// header value, or [`TransportError::Http`] if the TLS backend fails to
    /// initialize.
    pub fn new(config: &TransportConfig) -> Result<Self, TransportError> {
        let user_agent =
            HeaderValue::from_str(&config.user_agent).map_err(|e| TransportError::Build {
                message: format!("invalid user agent '{}': {e}", config.user_agent),
            })?;

        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, user_agent);
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .default_headers(headers)
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait::async_trait]
impl HttpTransport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<String, TransportError> {
        let response = self
            .client
            .get(&request.url)
            .query(&request.query)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            // Upstream APIs report errors as JSON bodies; let the caller decode them.
            log::warn!("GET {} returned HTTP {status}", response.url());
        }

        Ok(response.text().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_with_default_config() {
        assert!(ReqwestTransport::new(&TransportConfig::default()).is_ok());
    }

    #[test]
    fn rejects_user_agent_with_newline() {
        let config = TransportConfig {
            user_agent: "safeTO\r\nX-Injected: 1".to_string(),
            ..TransportConfig::default()
        };

        assert!(matches!(
            ReqwestTransport::new(&config),
            Err(TransportError::Build { .. })
        ));
    }
}
