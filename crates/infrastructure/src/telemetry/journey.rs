//! Journey scopes and downstream journey stamping

use std::fmt;
use std::future::Future;

use domain::JourneyName;
use opentelemetry::trace::{SpanBuilder, TraceContextExt};
use opentelemetry::{Context, KeyValue};
use tracing::debug;

use super::attributes::{JOURNEY_CRITICAL, JOURNEY_NAME};
use super::propagation::{baggage_journey, with_journey_baggage};
use super::span::{SharedTracer, SpanScope, journey_attributes, with_active_context};

/// Runs business work inside a named journey scope
///
/// Within the scope every nested span and outbound request inherits the
/// journey's baggage, and the work itself is wrapped in a
/// `journey.<name>` span.
#[derive(Clone)]
pub struct JourneyRunner {
    tracer: SharedTracer,
}

impl fmt::Debug for JourneyRunner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JourneyRunner").finish_non_exhaustive()
    }
}

impl JourneyRunner {
    /// Create a runner opening spans through `tracer`
    pub fn new(tracer: SharedTracer) -> Self {
        Self { tracer }
    }

    /// Run `operation` as part of `journey`
    ///
    /// The operation's result is returned unchanged; a failure is recorded
    /// on the journey span and then handed back as is.
    pub async fn with_journey<F, T, E>(&self, journey: JourneyName, operation: F) -> Result<T, E>
    where
        F: Future<Output = Result<T, E>>,
        E: fmt::Display,
    {
        let parent = Context::current();
        if parent.has_active_span() {
            let span = parent.span();
            for attribute in journey_attributes(journey) {
                span.set_attribute(attribute);
            }
        }

        let cx = with_journey_baggage(&parent, journey);
        let scope = SpanScope::start(
            self.tracer.as_ref(),
            SpanBuilder::from_name(journey.span_name()).with_attributes(journey_attributes(journey)),
            &cx,
        );

        let result = with_active_context(scope.context().clone(), operation).await;
        match &result {
            Ok(_) => scope.succeed(),
            Err(err) => {
                debug!(journey = %journey, error = %err, "Journey failed");
                scope.fail(&err.to_string());
            },
        }
        result
    }
}

/// Tag the context's active span with the journey found in its baggage
///
/// Returns the journey name when one was present. Without one, nothing is
/// tagged.
pub fn stamp_journey_from_baggage(cx: &Context) -> Option<String> {
    let journey = baggage_journey(cx)?;
    let span = cx.span();
    span.set_attribute(KeyValue::new(JOURNEY_NAME, journey.clone()));
    span.set_attribute(KeyValue::new(JOURNEY_CRITICAL, true));
    Some(journey)
}
