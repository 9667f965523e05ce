//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Domain-level error
    #[error(transparent)]
    Domain(#[from] DomainError),

    /// Delay value rejected before relaying it downstream
    #[error("Invalid delay: {0}")]
    InvalidDelay(String),

    /// Downstream collaborator could not be reached
    #[error("{service} unreachable: {reason}")]
    UpstreamUnreachable { service: String, reason: String },

    /// Downstream collaborator answered with something that is not JSON
    #[error("Bad response from {service}")]
    BadUpstreamResponse { service: String },

    /// External service returned an error
    #[error("External service error: {0}")]
    ExternalService(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApplicationError {
    /// Check if this error came from a downstream collaborator
    pub const fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::UpstreamUnreachable { .. }
                | Self::BadUpstreamResponse { .. }
                | Self::ExternalService(_)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unreachable_message_names_service() {
        let err = ApplicationError::UpstreamUnreachable {
            service: "inventory-svc".to_string(),
            reason: "connection refused".to_string(),
        };
        assert_eq!(err.to_string(), "inventory-svc unreachable: connection refused");
        assert!(err.is_upstream());
    }

    #[test]
    fn bad_response_message_names_service() {
        let err = ApplicationError::BadUpstreamResponse {
            service: "inventory-svc".to_string(),
        };
        assert_eq!(err.to_string(), "Bad response from inventory-svc");
    }

    #[test]
    fn domain_errors_are_transparent() {
        let err: ApplicationError = DomainError::invalid_journey("nope").into();
        assert!(err.to_string().starts_with("Unknown journey: nope"));
        assert!(!err.is_upstream());
    }
}
