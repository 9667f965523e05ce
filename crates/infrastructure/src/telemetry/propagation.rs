//! Journey identity carried in W3C baggage
//!
//! Inside a journey scope the ambient [`Context`] holds `journey.name` and
//! `journey.critical` baggage entries. Outbound requests carry them in the
//! `baggage` header next to `traceparent`; inbound requests get them back
//! through [`extract_context`].

use std::sync::LazyLock;

use domain::JourneyName;
use opentelemetry::baggage::{Baggage, BaggageExt};
use opentelemetry::propagation::{
    Extractor, Injector, TextMapCompositePropagator, TextMapPropagator,
};
use opentelemetry::Context;
use opentelemetry_sdk::propagation::{BaggagePropagator, TraceContextPropagator};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};

use super::attributes::{JOURNEY_CRITICAL, JOURNEY_NAME};

static PROPAGATOR: LazyLock<TextMapCompositePropagator> = LazyLock::new(w3c_propagator);

/// `traceparent` + `baggage` propagator
pub fn w3c_propagator() -> TextMapCompositePropagator {
    TextMapCompositePropagator::new(vec![
        Box::new(TraceContextPropagator::new()),
        Box::new(BaggagePropagator::new()),
    ])
}

/// Writes propagation fields into an HTTP header map
#[derive(Debug)]
pub struct HeaderInjector<'a>(pub &'a mut HeaderMap);

impl Injector for HeaderInjector<'_> {
    fn set(&mut self, key: &str, value: String) {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(key.as_bytes()),
            HeaderValue::from_str(&value),
        ) {
            self.0.insert(name, value);
        }
    }
}

/// Reads propagation fields from an HTTP header map
#[derive(Debug)]
pub struct HeaderExtractor<'a>(pub &'a HeaderMap);

impl Extractor for HeaderExtractor<'_> {
    fn get(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(|value| value.to_str().ok())
    }

    fn keys(&self) -> Vec<&str> {
        self.0.keys().map(HeaderName::as_str).collect()
    }
}

/// Write `cx`'s trace parent and baggage into `headers`
pub fn inject_context(cx: &Context, headers: &mut HeaderMap) {
    PROPAGATOR.inject_context(cx, &mut HeaderInjector(headers));
}

/// Build a context from inbound `traceparent` and `baggage` headers
///
/// Missing or malformed headers yield a context without a remote parent
/// or without baggage; extraction never fails.
pub fn extract_context(headers: &HeaderMap) -> Context {
    PROPAGATOR.extract_with_context(&Context::new(), &HeaderExtractor(headers))
}

/// `cx` with the journey's baggage entries overwritten
///
/// Every other baggage entry is kept as is.
pub fn with_journey_baggage(cx: &Context, journey: JourneyName) -> Context {
    let mut baggage: Baggage = cx
        .baggage()
        .iter()
        .map(|(k, (v, m))| (k.clone(), (v.clone(), m.clone())))
        .collect();
    baggage.insert(JOURNEY_NAME, journey.as_str());
    baggage.insert(JOURNEY_CRITICAL, journey.is_critical().to_string());
    cx.with_baggage(baggage)
}

/// Journey name carried in `cx`'s baggage, if any
pub fn baggage_journey(cx: &Context) -> Option<String> {
    cx.baggage().get(JOURNEY_NAME).map(ToString::to_string)
}

/// Journey name carried by the ambient context, if any
pub fn current_journey() -> Option<String> {
    baggage_journey(&Context::current())
}
