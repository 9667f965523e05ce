//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// Journey name outside the closed enumeration
    #[error("Unknown journey: {name}. Valid: {valid}")]
    InvalidJourneyName { name: String, valid: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create an invalid journey error listing every accepted name
    pub fn invalid_journey(name: impl Into<String>) -> Self {
        let valid = crate::JourneyName::ALL
            .iter()
            .map(crate::JourneyName::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        Self::InvalidJourneyName {
            name: name.into(),
            valid,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invalid_journey_lists_valid_names() {
        let err = DomainError::invalid_journey("not-a-real-journey");
        let msg = err.to_string();
        assert!(msg.starts_with("Unknown journey: not-a-real-journey. Valid: checkout"));
        assert!(msg.contains("product-upload-job"));
    }

    #[test]
    fn validation_error_message() {
        let err = DomainError::ValidationError("items is required".to_string());
        assert_eq!(err.to_string(), "Validation failed: items is required");
    }
}
