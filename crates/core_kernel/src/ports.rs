//! Ports and Adapters Infrastructure
//!
//! Foundational types for the hexagonal layout used by every service.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │          Application services (claims, allergy, ...)      │
//! └──────────────────────────────────────────────────────────┘
//!                             │
//!                             ▼
//! ┌──────────────────────────────────────────────────────────┐
//! │   Port traits (CatalogPort, DrugNormalizerPort, ...)      │
//! │   defined in each domain, depending only on core_kernel   │
//! └──────────────────────────────────────────────────────────┘
//!            ▲                    ▲                   ▲
//!   ┌────────┴───────┐  ┌────────┴────────┐  ┌───────┴───────┐
//!   │   PostgreSQL   │  │  Upstream REST  │  │   In-memory   │
//!   │   (infra_db)   │  │  (infra_http)   │  │ (seed / tests)│
//!   └────────────────┘  └─────────────────┘  └───────────────┘
//! ```
//!
//! Every adapter speaks [`PortError`], so the HTTP layer can map failures to
//! status codes without knowing which adapter produced them.

use std::fmt;
use std::time::Duration;
use thiserror::Error;
use serde::{Deserialize, Serialize};

/// Error type for port operations
#[derive(Debug, Error)]
pub enum PortError {
    /// The requested entity was not found
    #[error("Not found: {entity_type} with id {id}")]
    NotFound {
        entity_type: String,
        id: String,
    },

    /// Connection to the underlying system failed
    #[error("Connection error: {message}")]
    Connection { message: String },

    /// The operation timed out, after all retries
    #[error("Upstream timeout calling {operation} after {duration_ms}ms")]
    Timeout {
        operation: String,
        duration_ms: u64,
    },

    /// An upstream service answered with a non-success status
    #[error("Upstream HTTP error from {service}: {message}")]
    Upstream {
        service: String,
        status: Option<u16>,
        message: String,
    },

    /// The backing system is not available
    #[error("Service unavailable: {service}")]
    ServiceUnavailable {
        service: String,
    },

    /// A response could not be decoded into domain types
    #[error("Transformation error: {message}")]
    Transformation {
        message: String,
    },

    #[error("Internal error: {message}")]
    Internal { message: String },
}

impl PortError {
    pub fn not_found(entity_type: impl Into<String>, id: impl fmt::Display) -> Self {
        PortError::NotFound {
            entity_type: entity_type.into(),
            id: id.to_string(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        PortError::Connection { message: message.into() }
    }

    pub fn timeout(operation: impl Into<String>, duration: Duration) -> Self {
        PortError::Timeout {
            operation: operation.into(),
            duration_ms: duration.as_millis() as u64,
        }
    }

    pub fn upstream(service: impl Into<String>, status: Option<u16>, message: impl Into<String>) -> Self {
        PortError::Upstream {
            service: service.into(),
            status,
            message: message.into(),
        }
    }

    pub fn unavailable(service: impl Into<String>) -> Self {
        PortError::ServiceUnavailable {
            service: service.into(),
        }
    }

    pub fn transformation(message: impl Into<String>) -> Self {
        PortError::Transformation {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        PortError::Internal { message: message.into() }
    }

    /// Returns true if this error indicates a transient failure that may succeed on retry
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortError::Connection { .. }
                | PortError::Timeout { .. }
                | PortError::ServiceUnavailable { .. }
        )
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, PortError::NotFound { .. })
    }
}

/// Marker trait for all domain ports
///
/// All port traits extend this marker so they can sit behind an `Arc<dyn _>`
/// in shared application state.
pub trait DomainPort: Send + Sync + 'static {}

/// Retry schedule for outbound calls
///
/// Only timeouts are retried. The delay grows linearly: attempt `n` (1-based)
/// waits `backoff_step * n` before the next try.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Total attempts, including the first
    pub max_attempts: u32,
    /// Linear backoff step in milliseconds
    pub backoff_step_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step_ms: 1500,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: u32, backoff_step_ms: u64) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            backoff_step_ms,
        }
    }

    /// Delay to wait after the given failed attempt (1-based)
    pub fn delay_after(&self, attempt: u32) -> Duration {
        Duration::from_millis(self.backoff_step_ms.saturating_mul(attempt as u64))
    }

    /// Whether another attempt is allowed after `attempt` failures
    pub fn should_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }
}

/// Health status for an adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AdapterHealth {
    Healthy,
    Unhealthy,
}

/// Health check result for an adapter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub adapter_id: String,
    pub status: AdapterHealth,
    /// Latency of the health check in milliseconds
    pub latency_ms: u64,
    pub message: Option<String>,
}

impl HealthCheckResult {
    pub fn healthy(adapter_id: impl Into<String>, latency_ms: u64) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Healthy,
            latency_ms,
            message: None,
        }
    }

    pub fn unhealthy(adapter_id: impl Into<String>, latency_ms: u64, message: impl Into<String>) -> Self {
        Self {
            adapter_id: adapter_id.into(),
            status: AdapterHealth::Unhealthy,
            latency_ms,
            message: Some(message.into()),
        }
    }

    pub fn is_healthy(&self) -> bool {
        self.status == AdapterHealth::Healthy
    }
}

/// Trait for adapters that support health checks
#[async_trait::async_trait]
pub trait HealthCheckable: Send + Sync {
    /// Performs a health check on the adapter
    async fn health_check(&self) -> HealthCheckResult;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_port_error_not_found() {
        let error = PortError::not_found("Package", "PKG999");
        assert!(error.is_not_found());
        assert!(!error.is_transient());
        assert!(error.to_string().contains("PKG999"));
    }

    #[test]
    fn test_port_error_transient() {
        let timeout = PortError::timeout("rxcui.json", Duration::from_secs(30));
        assert!(timeout.is_transient());

        let upstream = PortError::upstream("rxnav", Some(500), "Internal Server Error");
        assert!(!upstream.is_transient());
    }

    #[test]
    fn test_retry_policy_linear_backoff() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.delay_after(1), Duration::from_millis(1500));
        assert_eq!(policy.delay_after(2), Duration::from_millis(3000));
        assert!(policy.should_retry(2));
        assert!(!policy.should_retry(3));
    }

    #[test]
    fn test_retry_policy_never_zero_attempts() {
        assert_eq!(RetryPolicy::new(0, 10).max_attempts, 1);
        assert!(!RetryPolicy::new(1, 0).should_retry(1));
    }
}
