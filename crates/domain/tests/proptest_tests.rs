//! Property-based tests for domain value objects
//!
//! These tests use proptest to verify invariants across many random inputs.

use domain::{FaultConfig, JourneyName};
use proptest::prelude::*;

// ============================================================================
// FaultConfig Property Tests
// ============================================================================

mod fault_config_tests {
    use super::*;

    proptest! {
        #[test]
        fn normalized_rate_always_in_unit_interval(
            delay in prop::num::f64::ANY,
            rate in prop::num::f64::ANY
        ) {
            let config = FaultConfig::normalized(delay, rate);
            prop_assert!((0.0..=1.0).contains(&config.error_rate()));
        }

        #[test]
        fn in_range_rate_is_preserved(rate in 0.0f64..=1.0f64) {
            let config = FaultConfig::new(10, rate);
            prop_assert!((config.error_rate() - rate).abs() < f64::EPSILON);
        }

        #[test]
        fn non_positive_delay_normalizes_to_zero(delay in -1.0e12f64..=0.0f64) {
            prop_assert_eq!(FaultConfig::normalized(delay, 0.5).delay_ms(), 0);
        }

        #[test]
        fn positive_delay_is_floored(delay in 0.0f64..1.0e9f64) {
            let config = FaultConfig::normalized(delay, 0.0);
            #[allow(clippy::cast_precision_loss)]
            let stored = config.delay_ms() as f64;
            prop_assert!(stored <= delay);
            prop_assert!(delay - stored < 1.0);
        }

        #[test]
        fn noop_iff_both_fields_zero(delay in 0u64..10_000, rate in 0.0f64..=1.0f64) {
            let config = FaultConfig::new(delay, rate);
            prop_assert_eq!(config.is_noop(), delay == 0 && rate == 0.0);
        }

        #[test]
        fn normalization_is_idempotent(
            delay in -1.0e6f64..1.0e6f64,
            rate in -2.0f64..2.0f64
        ) {
            let once = FaultConfig::normalized(delay, rate);
            #[allow(clippy::cast_precision_loss)]
            let twice = FaultConfig::normalized(once.delay_ms() as f64, once.error_rate());
            prop_assert_eq!(once, twice);
        }
    }
}

// ============================================================================
// JourneyName Property Tests
// ============================================================================

mod journey_name_tests {
    use super::*;

    proptest! {
        #[test]
        fn arbitrary_strings_parse_only_to_known_names(name in "[a-z-]{0,24}") {
            match name.parse::<JourneyName>() {
                Ok(journey) => prop_assert_eq!(journey.as_str(), name.as_str()),
                Err(err) => prop_assert!(err.to_string().contains(&name)),
            }
        }

        #[test]
        fn wire_names_round_trip(index in 0usize..JourneyName::ALL.len()) {
            let journey = JourneyName::ALL[index];
            prop_assert_eq!(journey.as_str().parse::<JourneyName>().ok(), Some(journey));
        }
    }
}
