//! Critical user journey identifiers

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::DomainError;

/// A named business flow tracked end-to-end across services
///
/// The set is closed: anything outside it is rejected at parse time, so a
/// `JourneyName` value is always valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum JourneyName {
    /// Placing an order
    Checkout,
    /// Browsing the product grid
    ProductDiscovery,
    /// Searching the catalog
    ProductSearch,
    /// Reading or writing product reviews
    ProductReview,
    /// Listing past orders
    OrderHistory,
    /// Looking up a single order
    OrderLookup,
    /// Submitting a bulk product upload
    ProductUpload,
    /// Asynchronous processing of a bulk upload
    ProductUploadJob,
}

impl JourneyName {
    /// Every journey, in declaration order
    pub const ALL: [Self; 8] = [
        Self::Checkout,
        Self::ProductDiscovery,
        Self::ProductSearch,
        Self::ProductReview,
        Self::OrderHistory,
        Self::OrderLookup,
        Self::ProductUpload,
        Self::ProductUploadJob,
    ];

    /// Wire name used in baggage, span attributes and admin routes
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Checkout => "checkout",
            Self::ProductDiscovery => "product-discovery",
            Self::ProductSearch => "product-search",
            Self::ProductReview => "product-review",
            Self::OrderHistory => "order-history",
            Self::OrderLookup => "order-lookup",
            Self::ProductUpload => "product-upload",
            Self::ProductUploadJob => "product-upload-job",
        }
    }

    /// Whether the journey is flagged critical
    ///
    /// Every journey is currently critical. Kept as a per-journey value so the
    /// flag has a single source.
    #[must_use]
    pub const fn is_critical(&self) -> bool {
        true
    }

    /// Name of the span wrapping this journey's critical path
    #[must_use]
    pub fn span_name(&self) -> String {
        format!("journey.{}", self.as_str())
    }
}

impl fmt::Display for JourneyName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for JourneyName {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|journey| journey.as_str() == s)
            .ok_or_else(|| DomainError::invalid_journey(s))
    }
}

impl TryFrom<&str> for JourneyName {
    type Error = DomainError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_wire_name() {
        for journey in JourneyName::ALL {
            assert_eq!(journey.as_str().parse::<JourneyName>(), Ok(journey));
        }
    }

    #[test]
    fn rejects_unknown_names() {
        let err = "not-a-real-journey".parse::<JourneyName>().unwrap_err();
        assert!(matches!(err, DomainError::InvalidJourneyName { ref name, .. } if name == "not-a-real-journey"));
    }

    #[test]
    fn parsing_is_case_sensitive() {
        assert!("Checkout".parse::<JourneyName>().is_err());
    }

    #[test]
    fn span_name_uses_journey_prefix() {
        assert_eq!(JourneyName::Checkout.span_name(), "journey.checkout");
        assert_eq!(
            JourneyName::ProductUploadJob.span_name(),
            "journey.product-upload-job"
        );
    }

    #[test]
    fn every_journey_is_critical() {
        assert!(JourneyName::ALL.iter().all(JourneyName::is_critical));
    }

    #[test]
    fn serde_uses_kebab_case() {
        let json = serde_json::to_string(&JourneyName::OrderHistory).unwrap();
        assert_eq!(json, "\"order-history\"");
        let parsed: JourneyName = serde_json::from_str("\"product-search\"").unwrap();
        assert_eq!(parsed, JourneyName::ProductSearch);
    }

    #[test]
    fn display_matches_wire_name() {
        assert_eq!(JourneyName::OrderLookup.to_string(), "order-lookup");
    }
}
