//! Retrying JSON client for upstream REST services
//!
//! Every outbound call goes through [`UpstreamClient`], which applies the
//! request timeout and the [`RetryPolicy`]:
//!
//! - a timeout is retried with linear backoff until attempts run out, then
//!   surfaces as `PortError::Timeout`
//! - a non-success status surfaces at once as `PortError::Upstream` with the
//!   status code
//! - transport failures (DNS, refused connection) surface at once as
//!   `PortError::Upstream` without a status
//! - a body that does not decode surfaces as `PortError::Upstream` too, since
//!   the upstream broke its contract

use std::future::Future;
use std::time::Duration;

use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use core_kernel::{PortError, RetryPolicy};

/// Timeout and retry settings shared by the upstream adapters
#[derive(Debug, Clone, Copy)]
pub struct UpstreamConfig {
    /// Per-attempt request timeout
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for UpstreamConfig {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry: RetryPolicy::default(),
        }
    }
}

impl UpstreamConfig {
    pub fn new(timeout_secs: u64, max_attempts: u32, backoff_step_ms: u64) -> Self {
        Self {
            timeout: Duration::from_secs(timeout_secs),
            retry: RetryPolicy::new(max_attempts, backoff_step_ms),
        }
    }
}

/// A `reqwest` client bound to one upstream service name
#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
    service: String,
    config: UpstreamConfig,
}

impl UpstreamClient {
    /// Builds a client for `service`
    ///
    /// # Errors
    ///
    /// `PortError::Internal` when the TLS backend cannot be initialized
    pub fn new(service: impl Into<String>, config: UpstreamConfig) -> Result<Self, PortError> {
        let http = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(concat!("swasthyasetu/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| PortError::internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http,
            service: service.into(),
            config,
        })
    }

    pub fn service(&self) -> &str {
        &self.service
    }

    /// GET `url` with query parameters and decode the JSON body
    #[instrument(skip(self, query), fields(service = %self.service))]
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
    ) -> Result<T, PortError> {
        with_retry(&self.config.retry, url, self.config.timeout, || async move {
            let response = self.http.get(url).query(query).send().await;
            self.decode(url, response).await
        })
        .await
    }

    /// POST a JSON body to `url` and decode the JSON response
    #[instrument(skip(self, query, body), fields(service = %self.service))]
    pub async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, PortError> {
        with_retry(&self.config.retry, url, self.config.timeout, || async move {
            let response = self.http.post(url).query(query).json(body).send().await;
            self.decode(url, response).await
        })
        .await
    }

    async fn decode<T: DeserializeOwned>(
        &self,
        url: &str,
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, PortError> {
        let response = response.map_err(|e| self.transport_error(url, e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(PortError::upstream(
                &self.service,
                Some(status.as_u16()),
                format!("{} returned {}", url, status),
            ));
        }

        response.json::<T>().await.map_err(|e| {
            if e.is_timeout() {
                PortError::timeout(url, self.config.timeout)
            } else {
                PortError::upstream(
                    &self.service,
                    Some(status.as_u16()),
                    format!("Invalid JSON from {}: {}", url, e),
                )
            }
        })
    }

    fn transport_error(&self, url: &str, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::timeout(url, self.config.timeout)
        } else {
            PortError::upstream(&self.service, error.status().map(|s| s.as_u16()), error.to_string())
        }
    }
}

/// Runs `attempt` until it succeeds, fails with a non-timeout error, or the
/// policy runs out of attempts
pub async fn with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    operation: &str,
    timeout: Duration,
    mut attempt: F,
) -> Result<T, PortError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, PortError>>,
{
    let mut tries = 0;
    loop {
        tries += 1;
        match attempt().await {
            Ok(value) => return Ok(value),
            Err(PortError::Timeout { .. }) if policy.should_retry(tries) => {
                let delay = policy.delay_after(tries);
                warn!(operation, attempt = tries, delay_ms = delay.as_millis() as u64, "Upstream timeout, retrying");
                tokio::time::sleep(delay).await;
            }
            Err(PortError::Timeout { .. }) => {
                debug!(operation, attempts = tries, "Upstream timeout, giving up");
                return Err(PortError::timeout(operation, timeout));
            }
            Err(e) => return Err(e),
        }
    }
}
