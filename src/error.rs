//! Custom error types and handling
//!
//! Errors raised by resource overrides, the implicit-resource strategy and
//! the authorization predicate are carried as `source` without alteration
//! and abort the whole computation. The Axum conversion lets the adapter
//! turn them into a 500 response.

use axum::{
    http::{header::InvalidHeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::action::Action;

/// Allow header computation error
#[derive(Debug, thiserror::Error)]
pub enum AllowError {
    #[error("Resource resolution failed for {method}: {source}")]
    Resolution {
        method: Method,
        #[source]
        source: anyhow::Error,
    },

    #[error("Authorization check `{action}` failed for {method}: {source}")]
    Authorization {
        method: Method,
        action: Action,
        #[source]
        source: anyhow::Error,
    },

    #[error("Invalid Allow header value: {0}")]
    InvalidHeaderValue(#[from] InvalidHeaderValue),

    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: ErrorDetails,
}

/// Error details in response
#[derive(Debug, Serialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
}

impl AllowError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Resolution { .. } => "RESOURCE_RESOLUTION_ERROR",
            Self::Authorization { .. } => "AUTHORIZATION_ERROR",
            Self::InvalidHeaderValue(_) => "INVALID_HEADER_VALUE",
            Self::Configuration(_) => "CONFIGURATION_ERROR",
        }
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        StatusCode::INTERNAL_SERVER_ERROR
    }

    /// The caller-supplied error behind a resolution or authorization failure.
    pub fn inner(&self) -> Option<&anyhow::Error> {
        match self {
            Self::Resolution { source, .. } | Self::Authorization { source, .. } => Some(source),
            _ => None,
        }
    }
}

impl IntoResponse for AllowError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        // Log the cause but don't expose it to clients
        tracing::error!(code = self.error_code(), "Allow header error: {:#}", self);

        let body = ErrorResponse {
            error: ErrorDetails {
                code: self.error_code().to_string(),
                message: "An internal error occurred".to_string(),
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Result type alias using AllowError
pub type AllowResult<T> = Result<T, AllowError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, thiserror::Error)]
    #[error("lookup failed")]
    struct LookupFailed;

    #[test]
    fn test_source_is_preserved() {
        let err = AllowError::Resolution {
            method: Method::GET,
            source: anyhow::Error::new(LookupFailed),
        };

        assert_eq!(err.error_code(), "RESOURCE_RESOLUTION_ERROR");
        assert!(err.inner().unwrap().downcast_ref::<LookupFailed>().is_some());
        assert!(err.to_string().contains("GET"));
    }

    #[test]
    fn test_into_response_is_server_error() {
        let response = AllowError::Configuration("missing authorizer".into()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
