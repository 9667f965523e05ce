//! Server span middleware
//!
//! Continues the caller's trace from inbound `traceparent`/`baggage` headers
//! and opens a `<METHOD> <path>` server span around each request. Handlers
//! and further middleware observe the span through `Context::current()`.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context as TaskContext, Poll};

use axum::{body::Body, extract::Request, response::Response};
use infrastructure::telemetry::{SharedTracer, SpanScope, extract_context, with_active_context};
use opentelemetry::KeyValue;
use opentelemetry::trace::{SpanBuilder, SpanKind, Status, TraceContextExt};
use tower::{Layer, Service};
use tracing::Instrument;

const HTTP_REQUEST_METHOD: &str = "http.request.method";
const HTTP_RESPONSE_STATUS_CODE: &str = "http.response.status_code";
const URL_PATH: &str = "url.path";

/// Layer opening a server span per request
#[derive(Clone)]
pub struct TraceContextLayer {
    tracer: SharedTracer,
}

impl fmt::Debug for TraceContextLayer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceContextLayer").finish_non_exhaustive()
    }
}

impl TraceContextLayer {
    /// Create a layer opening spans through `tracer`
    #[must_use]
    pub fn new(tracer: SharedTracer) -> Self {
        Self { tracer }
    }
}

impl<S> Layer<S> for TraceContextLayer {
    type Service = TraceContextService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        TraceContextService {
            inner,
            tracer: self.tracer.clone(),
        }
    }
}

/// Service wrapping each request in a server span
#[derive(Clone)]
pub struct TraceContextService<S> {
    inner: S,
    tracer: SharedTracer,
}

impl<S> fmt::Debug for TraceContextService<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TraceContextService").finish_non_exhaustive()
    }
}

impl<S> Service<Request<Body>> for TraceContextService<S>
where
    S: Service<Request<Body>, Response = Response<Body>> + Clone + Send + 'static,
    S::Future: Send,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, request: Request<Body>) -> Self::Future {
        let parent = extract_context(request.headers());
        let method = request.method().to_string();
        let path = request.uri().path().to_string();

        let builder = SpanBuilder::from_name(format!("{method} {path}"))
            .with_kind(SpanKind::Server)
            .with_attributes(vec![
                KeyValue::new(HTTP_REQUEST_METHOD, method.clone()),
                KeyValue::new(URL_PATH, path.clone()),
            ]);
        let scope = SpanScope::start(self.tracer.as_ref(), builder, &parent);

        let mut inner = self.inner.clone();

        Box::pin(async move {
            let cx = scope.context().clone();
            // created under the attached context so it nests in the server span
            let response = with_active_context(cx, async move {
                let span = tracing::info_span!("http_request", method = %method, path = %path);
                inner.call(request).instrument(span).await
            })
            .await?;

            let status = response.status();
            let otel_span = scope.context().span();
            otel_span.set_attribute(KeyValue::new(
                HTTP_RESPONSE_STATUS_CODE,
                i64::from(status.as_u16()),
            ));
            if status.is_server_error() {
                otel_span.set_status(Status::error(format!("HTTP {}", status.as_u16())));
            }

            Ok::<_, S::Error>(response)
        })
    }
}
