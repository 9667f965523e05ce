//! API error handling
//!
//! Maps application and injected failures onto HTTP statuses with a uniform
//! JSON body.

use application::ApplicationError;
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use infrastructure::InjectedFault;
use serde::Serialize;
use thiserror::Error;

/// API error type
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// A downstream collaborator failed or answered garbage
    #[error("Bad gateway: {0}")]
    BadGateway(String),

    /// Deliberate chaos, never a genuine defect
    #[error("{0}")]
    InjectedFault(String),

    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

/// Error response body
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error message
    pub error: String,
    /// Error code
    pub code: String,
    /// Additional error details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl ApiError {
    /// HTTP status for this error
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::BadRequest(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::BadGateway(_) => StatusCode::BAD_GATEWAY,
            Self::InjectedFault(_) | Self::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Machine-readable code for this error
    pub const fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::BadGateway(_) => "bad_gateway",
            Self::InjectedFault(_) => "injected_fault",
            Self::ServiceUnavailable(_) => "service_unavailable",
            Self::Internal(_) => "internal_error",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let code = self.code().to_string();
        let (error, details) = match self {
            Self::BadRequest(msg)
            | Self::NotFound(msg)
            | Self::BadGateway(msg)
            | Self::InjectedFault(msg)
            | Self::ServiceUnavailable(msg) => (msg, None),
            Self::Internal(msg) => ("An internal error occurred".to_string(), Some(msg)),
        };

        if status.is_server_error() {
            tracing::warn!(status = %status, code = %code, error = %error, "Request failed");
        }

        (
            status,
            Json(ErrorResponse {
                error,
                code,
                details,
            }),
        )
            .into_response()
    }
}

impl From<ApplicationError> for ApiError {
    fn from(err: ApplicationError) -> Self {
        if err.is_upstream() {
            tracing::warn!(error = %err, "Downstream collaborator failed");
        }
        match err {
            ApplicationError::Domain(e) => Self::BadRequest(e.to_string()),
            ApplicationError::InvalidDelay(msg) => Self::BadRequest(msg),
            e @ (ApplicationError::UpstreamUnreachable { .. }
            | ApplicationError::BadUpstreamResponse { .. }) => Self::BadGateway(e.to_string()),
            ApplicationError::ExternalService(msg) => Self::ServiceUnavailable(msg),
            ApplicationError::Internal(msg) => Self::Internal(msg),
        }
    }
}

impl From<InjectedFault> for ApiError {
    fn from(fault: InjectedFault) -> Self {
        Self::InjectedFault(fault.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain::{DomainError, JourneyName};

    #[test]
    fn invalid_journey_is_bad_request() {
        let err: ApiError = ApplicationError::from(DomainError::invalid_journey("bogus")).into();
        assert_eq!(err.status(), StatusCode::BAD_REQUEST);
        assert!(err.to_string().contains("Unknown journey: bogus"));
    }

    #[test]
    fn upstream_errors_are_bad_gateway() {
        let err: ApiError = ApplicationError::UpstreamUnreachable {
            service: "inventory-svc".to_string(),
            reason: "connection refused".to_string(),
        }
        .into();
        assert_eq!(err.status(), StatusCode::BAD_GATEWAY);
        assert!(matches!(err, ApiError::BadGateway(ref m) if m == "inventory-svc unreachable: connection refused"));

        let err: ApiError = ApplicationError::BadUpstreamResponse {
            service: "inventory-svc".to_string(),
        }
        .into();
        assert_eq!(err.code(), "bad_gateway");
    }

    #[test]
    fn injected_fault_is_labelled() {
        let err: ApiError = InjectedFault {
            journey: JourneyName::Checkout,
            error_rate: 1.0,
        }
        .into();
        assert_eq!(err.status(), StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(err.code(), "injected_fault");
        assert!(err.to_string().starts_with("[chaos] Injected fault for journey 'checkout'"));
    }

    #[test]
    fn internal_error_hides_message_in_body() {
        let response = ApiError::Internal("db pool exhausted".to_string()).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
