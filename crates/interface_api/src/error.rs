//! API error handling

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::error;

use core_kernel::PortError;
use domain_allergy::AllergyError;
use domain_assessment::AssessmentError;
use domain_claims::ClaimError;
use domain_terminology::TerminologyError;

/// Hint returned with an unknown package id
pub const UNKNOWN_PACKAGE_HINT: &str = "Check /meta/packages or verify your HBP seed";

/// API error types
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Not found: {message}")]
    NotFound {
        message: String,
        details: Option<Value>,
    },

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Validation error: {message}")]
    Validation {
        message: String,
        field: Option<String>,
    },

    #[error("Upstream error: {0}")]
    Upstream(String),

    #[error("Upstream timeout: {0}")]
    Timeout(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal server error: {0}")]
    Internal(String),

    #[error("Database error: {0}")]
    Database(String),
}

impl ApiError {
    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound {
            message: message.into(),
            details: None,
        }
    }

    pub fn not_found_with(message: impl Into<String>, details: Value) -> Self {
        ApiError::NotFound {
            message: message.into(),
            details: Some(details),
        }
    }

    pub fn validation(message: impl Into<String>, field: Option<&str>) -> Self {
        ApiError::Validation {
            message: message.into(),
            field: field.map(str::to_string),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            ApiError::Upstream(_) => StatusCode::BAD_GATEWAY,
            ApiError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            ApiError::Internal(_) | ApiError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_type(&self) -> &'static str {
        match self {
            ApiError::NotFound { .. } => "not_found",
            ApiError::BadRequest(_) => "bad_request",
            ApiError::Validation { .. } => "validation_error",
            ApiError::Upstream(_) => "upstream_error",
            ApiError::Timeout(_) => "upstream_timeout",
            ApiError::ServiceUnavailable(_) => "service_unavailable",
            ApiError::Internal(_) => "internal_error",
            ApiError::Database(_) => "database_error",
        }
    }
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            error!(status = status.as_u16(), error = %self, "Request failed");
        }

        let error_type = self.error_type().to_string();
        let (message, field, details) = match self {
            ApiError::NotFound { message, details } => (message, None, details),
            ApiError::Validation { message, field } => (message, field, None),
            ApiError::BadRequest(message)
            | ApiError::Upstream(message)
            | ApiError::Timeout(message)
            | ApiError::ServiceUnavailable(message)
            | ApiError::Internal(message)
            | ApiError::Database(message) => (message, None, None),
        };

        let body = ErrorResponse {
            error: error_type,
            message,
            field,
            details,
        };

        (status, Json(body)).into_response()
    }
}

impl From<PortError> for ApiError {
    fn from(err: PortError) -> Self {
        let message = err.to_string();
        match err {
            PortError::NotFound { .. } => ApiError::not_found(message),
            PortError::Connection { .. } => ApiError::Database(message),
            PortError::Timeout { .. } => ApiError::Timeout(message),
            PortError::Upstream { .. } => ApiError::Upstream(message),
            PortError::ServiceUnavailable { .. } => ApiError::ServiceUnavailable(message),
            PortError::Transformation { .. } | PortError::Internal { .. } => ApiError::Internal(message),
        }
    }
}

impl From<ClaimError> for ApiError {
    fn from(err: ClaimError) -> Self {
        match err {
            ClaimError::UnknownPackage { package_id } => ApiError::not_found_with(
                format!("Unknown package_id: {}", package_id),
                json!({
                    "error": "Unknown package_id",
                    "package_id": package_id,
                    "hint": UNKNOWN_PACKAGE_HINT,
                }),
            ),
            ClaimError::UnknownPlan { input, suggestions } => ApiError::not_found_with(
                format!("Unknown plan: {}", input),
                json!({
                    "error": "Unknown plan",
                    "input": input,
                    "try_one_of": suggestions,
                }),
            ),
            ClaimError::InvalidRequest(message) => ApiError::validation(message, None),
            ClaimError::Money(e) => ApiError::BadRequest(e.to_string()),
            ClaimError::Catalog(e) => e.into(),
        }
    }
}

impl From<TerminologyError> for ApiError {
    fn from(err: TerminologyError) -> Self {
        match err {
            TerminologyError::MappingUnavailable => ApiError::ServiceUnavailable(err.to_string()),
            TerminologyError::Load(_) => ApiError::Internal(err.to_string()),
            TerminologyError::InvalidThreshold { .. } => ApiError::validation(err.to_string(), Some("threshold")),
            TerminologyError::InvalidQuery(message) => ApiError::validation(message, None),
        }
    }
}

impl From<AllergyError> for ApiError {
    fn from(err: AllergyError) -> Self {
        match err {
            AllergyError::UnknownDrug { ref drug } => {
                let details = json!({ "drug": drug });
                ApiError::not_found_with(err.to_string(), details)
            }
            AllergyError::InvalidDrug(message) => ApiError::validation(message, Some("drug")),
            AllergyError::Port(e) => e.into(),
        }
    }
}

impl From<AssessmentError> for ApiError {
    fn from(err: AssessmentError) -> Self {
        match err {
            AssessmentError::Validation { field, message } => ApiError::Validation {
                message,
                field: Some(field),
            },
        }
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let mut fields: Vec<(String, String)> = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let message = errs
                    .first()
                    .map(|e| match &e.message {
                        Some(message) => message.to_string(),
                        None => format!("{} is invalid ({})", field, e.code),
                    })
                    .unwrap_or_else(|| format!("{} is invalid", field));
                (field.to_string(), message)
            })
            .collect();
        fields.sort();

        match fields.into_iter().next() {
            Some((field, message)) => ApiError::Validation {
                message,
                field: Some(field),
            },
            None => ApiError::validation(errors.to_string(), None),
        }
    }
}
