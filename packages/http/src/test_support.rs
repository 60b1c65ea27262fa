//! In-memory transport for tests.
//!
//! Gated behind the `test-support` feature (and `cfg(test)`).

use std::collections::VecDeque;
use std::sync::Mutex;

use crate::{HttpRequest, HttpTransport, TransportError};

/// Replays scripted responses in order and records every request it sees.
///
/// Once the script is exhausted, further requests fail with
/// [`TransportError::Build`] so runaway loops surface as errors instead of
/// hanging.
#[derive(Debug, Default)]
pub struct ScriptedTransport {
    responses: Mutex<VecDeque<Result<String, String>>>,
    requests: Mutex<Vec<HttpRequest>>,
}

impl ScriptedTransport {
    /// Creates a transport with an empty script.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful response body.
    #[must_use]
    pub fn with_body(self, body: impl Into<String>) -> Self {
        self.lock_responses().push_back(Ok(body.into()));
        self
    }

    /// Queues a transport failure.
    #[must_use]
    pub fn with_failure(self, message: impl Into<String>) -> Self {
        self.lock_responses().push_back(Err(message.into()));
        self
    }

    /// Returns a copy of every request issued so far.
    ///
    /// # Panics
    ///
    /// Panics if the request log mutex is poisoned.
    #[must_use]
    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests
            .lock()
            .expect("request log mutex poisoned")
            .clone()
    }

    /// Returns how many scripted responses have not been consumed.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.lock_responses().len()
    }

    fn lock_responses(&self) -> std::sync::MutexGuard<'_, VecDeque<Result<String, String>>> {
        self.responses.lock().expect("response script mutex poisoned")
    }
}

#[async_trait::async_trait]
impl HttpTransport for ScriptedTransport {
    async fn get(&self, request: &HttpRequest) -> Result<String, TransportError> {
        self.requests
            .lock()
            .expect("request log mutex poisoned")
            .push(request.clone());

        match self.lock_responses().pop_front() {
            Some(Ok(body)) => Ok(body),
            Some(Err(message)) => Err(TransportError::Build { message }),
            None => Err(TransportError::Build {
                message: format!("no scripted response left for {}", request.url),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn replays_in_order_and_records_requests() {
        let transport = ScriptedTransport::new()
            .with_body("first")
            .with_failure("boom");

        let first = transport.get(&HttpRequest::get("a")).await.unwrap();
        let second = transport.get(&HttpRequest::get("b")).await;
        let third = transport.get(&HttpRequest::get("c")).await;

        assert_eq!(first, "first");
        assert!(second.is_err());
        assert!(third.is_err());
        assert_eq!(transport.requests().len(), 3);
        assert_eq!(transport.remaining(), 0);
    }
}
