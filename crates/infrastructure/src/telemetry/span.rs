//! Span capability
//!
//! Components open spans through [`SpanFactory`] rather than a concrete
//! tracer, so a process can hand them the global tracer while tests hand
//! them an SDK tracer backed by an in-memory exporter.

use std::fmt;
use std::future::{Future, poll_fn};
use std::pin::pin;
use std::sync::Arc;

use domain::JourneyName;
use opentelemetry::trace::{SpanBuilder, Status, TraceContextExt, Tracer};
use opentelemetry::{Context, KeyValue};

/// Attribute keys queried by trace-analysis tooling
pub mod attributes {
    pub const JOURNEY_NAME: &str = "journey.name";
    pub const JOURNEY_CRITICAL: &str = "journey.critical";
    pub const CHAOS_DELAY_MS: &str = "chaos.delay_ms";
    pub const CHAOS_ERROR_RATE: &str = "chaos.error_rate";
    pub const EXCEPTION_MESSAGE: &str = "exception.message";
}

/// Something that can open a span as a child of a context
pub trait SpanFactory: Send + Sync {
    /// Start a span under `parent` and return `parent` with the span active
    fn start_span(&self, builder: SpanBuilder, parent: &Context) -> Context;
}

impl<T> SpanFactory for T
where
    T: Tracer + Send + Sync,
    T::Span: Send + Sync + 'static,
{
    fn start_span(&self, builder: SpanBuilder, parent: &Context) -> Context {
        parent.with_span(self.build_with_context(builder, parent))
    }
}

/// Span factory shared across components
pub type SharedTracer = Arc<dyn SpanFactory>;

/// `journey.name` and `journey.critical` for a journey
pub(crate) fn journey_attributes(journey: JourneyName) -> Vec<KeyValue> {
    vec![
        KeyValue::new(attributes::JOURNEY_NAME, journey.as_str()),
        KeyValue::new(attributes::JOURNEY_CRITICAL, journey.is_critical()),
    ]
}

/// An open span that is ended when the scope is dropped
///
/// The span is ended exactly once whichever way the owning code exits,
/// including when its future is dropped mid-flight.
pub struct SpanScope {
    cx: Context,
}

impl fmt::Debug for SpanScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpanScope")
            .field("span_context", self.cx.span().span_context())
            .finish()
    }
}

impl SpanScope {
    /// Open a span under `parent`
    pub fn start(tracer: &dyn SpanFactory, builder: SpanBuilder, parent: &Context) -> Self {
        Self {
            cx: tracer.start_span(builder, parent),
        }
    }

    /// Context carrying this span as the active one
    pub const fn context(&self) -> &Context {
        &self.cx
    }

    /// Mark the span successful
    pub fn succeed(&self) {
        self.cx.span().set_status(Status::Ok);
    }

    /// Record an exception event and mark the span failed
    pub fn fail(&self, message: &str) {
        let span = self.cx.span();
        span.add_event(
            "exception",
            vec![KeyValue::new(
                attributes::EXCEPTION_MESSAGE,
                message.to_string(),
            )],
        );
        span.set_status(Status::error(message.to_string()));
    }
}

impl Drop for SpanScope {
    fn drop(&mut self) {
        self.cx.span().end();
    }
}

/// Run `future` with `cx` as the current context on every poll
///
/// Anything the future does between polls (nested spans, outbound calls)
/// sees `cx` through `Context::current()`. Other tasks never do.
pub async fn with_active_context<F: Future>(cx: Context, future: F) -> F::Output {
    let mut future = pin!(future);
    poll_fn(|task| {
        let _guard = cx.clone().attach();
        future.as_mut().poll(task)
    })
    .await
}


#[cfg(test)]
mod tests {
    use super::testing::{RecordingTracer, attribute};
    use super::*;
    use opentelemetry::Value;

    #[test]
    fn scope_ends_span_once_on_drop() {
        let recorder = RecordingTracer::new();
        {
            let scope = SpanScope::start(
                recorder.tracer.as_ref(),
                SpanBuilder::from_name("unit"),
                &Context::new(),
            );
            scope.succeed();
        }
        let spans = recorder.spans();
        assert_eq!(spans.len(), 1);
        assert_eq!(spans[0].status, Status::Ok);
    }

    #[test]
    fn fail_records_exception_and_error_status() {
        let recorder = RecordingTracer::new();
        let scope = SpanScope::start(
            recorder.tracer.as_ref(),
            SpanBuilder::from_name("unit"),
            &Context::new(),
        );
        scope.fail("boom");
        drop(scope);

        let span = recorder.span("unit");
        assert_eq!(span.status, Status::error("boom"));
        let event = &span.events.events[0];
        assert_eq!(event.name, "exception");
        assert_eq!(event.attributes[0].value.as_str(), "boom");
    }

    #[test]
    fn journey_attributes_mark_critical() {
        let recorder = RecordingTracer::new();
        drop(SpanScope::start(
            recorder.tracer.as_ref(),
            SpanBuilder::from_name("unit")
                .with_attributes(journey_attributes(JourneyName::OrderHistory)),
            &Context::new(),
        ));

        let span = recorder.span("unit");
        assert_eq!(
            attribute(&span, attributes::JOURNEY_NAME).map(|v| v.to_string()),
            Some("order-history".to_string())
        );
        assert_eq!(
            attribute(&span, attributes::JOURNEY_CRITICAL),
            Some(Value::Bool(true))
        );
    }

    #[tokio::test]
    async fn active_context_is_visible_inside_future_only() {
        let recorder = RecordingTracer::new();
        let scope = SpanScope::start(
            recorder.tracer.as_ref(),
            SpanBuilder::from_name("outer"),
            &Context::new(),
        );
        let expected = scope.context().span().span_context().span_id();

        let seen = with_active_context(scope.context().clone(), async {
            tokio::task::yield_now().await;
            Context::current().span().span_context().span_id()
        })
        .await;

        assert_eq!(seen, expected);
        assert!(!Context::current().has_active_span());
    }
}
