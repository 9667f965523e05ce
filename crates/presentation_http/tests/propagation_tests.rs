//! End-to-end journey propagation across a real network hop
//!
//! The storefront side calls inventory-svc over TCP through the propagating
//! client; inventory-svc never opens a journey scope itself, yet its server
//! span must carry the caller's journey.
#![allow(clippy::expect_used, clippy::unwrap_used)]

use std::net::SocketAddr;
use std::sync::Arc;

use application::ports::{InventoryPort, ReservationItem};
use axum::http::StatusCode;
use axum_test::TestServer;
use domain::JourneyName;
use infrastructure::telemetry::attributes::{JOURNEY_CRITICAL, JOURNEY_NAME};
use infrastructure::{
    FixedRandom, HttpDownstreamDelayAdapter, HttpInventoryAdapter, InMemoryFaultRegistry,
    JourneyRunner, PropagatingHttpClient, SharedTracer,
};
use opentelemetry::trace::{SpanKind, Status, TracerProvider as _};
use opentelemetry::Value;
use opentelemetry_sdk::trace::{InMemorySpanExporter, SdkTracerProvider, SpanData};
use presentation_http::{AppState, InventoryState, create_inventory_router, create_router};
use serde_json::json;
use tokio::net::TcpListener;

struct Recorder {
    tracer: SharedTracer,
    exporter: InMemorySpanExporter,
    provider: SdkTracerProvider,
}

impl Recorder {
    fn new(name: &'static str) -> Self {
        let exporter = InMemorySpanExporter::default();
        let provider = SdkTracerProvider::builder()
            .with_simple_exporter(exporter.clone())
            .build();
        Self {
            tracer: Arc::new(provider.tracer(name)),
            exporter,
            provider,
        }
    }

    fn span(&self, name: &str) -> SpanData {
        self.exporter
            .get_finished_spans()
            .unwrap()
            .into_iter()
            .find(|span| span.name == name)
            .unwrap_or_else(|| panic!("no finished span named {name}"))
    }
}

fn attribute(span: &SpanData, key: &str) -> Option<Value> {
    span.attributes
        .iter()
        .find(|kv| kv.key.as_str() == key)
        .map(|kv| kv.value.clone())
}

async fn spawn_inventory(recorder: &Recorder, delay_ms: u64) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = create_inventory_router(InventoryState::new(delay_ms), recorder.tracer.clone());
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn items() -> Vec<ReservationItem> {
    vec![ReservationItem {
        product_id: 42,
        quantity: 1,
    }]
}

#[tokio::test]
async fn downstream_root_span_carries_caller_journey() {
    let inventory_side = Recorder::new("inventory-svc");
    let api_side = Recorder::new("techmart-api");
    let addr = spawn_inventory(&inventory_side, 0).await;

    let adapter = HttpInventoryAdapter::new(PropagatingHttpClient::new().unwrap(), &format!("http://{addr}"));
    let runner = JourneyRunner::new(api_side.tracer.clone());

    let reservation = runner
        .with_journey(JourneyName::Checkout, adapter.reserve(&items()))
        .await
        .unwrap();
    assert!(reservation.reserved);

    let journey = api_side.span("journey.checkout");
    let root = inventory_side.span("POST /reserve");

    assert_eq!(root.span_kind, SpanKind::Server);
    assert_eq!(
        attribute(&root, JOURNEY_NAME).map(|v| v.to_string()),
        Some("checkout".to_string())
    );
    assert_eq!(attribute(&root, JOURNEY_CRITICAL), Some(Value::Bool(true)));
    assert_eq!(
        root.span_context.trace_id(),
        journey.span_context.trace_id()
    );
    assert_eq!(root.parent_span_id, journey.span_context.span_id());
    assert_eq!(
        attribute(&root, "http.response.status_code"),
        Some(Value::I64(200))
    );
}

#[tokio::test]
async fn request_log_span_nests_under_server_span() {
    use tracing_subscriber::layer::SubscriberExt;

    let inventory_side = Recorder::new("inventory-svc");
    let subscriber = tracing_subscriber::registry()
        .with(tracing_opentelemetry::layer().with_tracer(inventory_side.provider.tracer("log-bridge")));
    let _guard = tracing::subscriber::set_default(subscriber);

    let app = create_inventory_router(InventoryState::new(0), inventory_side.tracer.clone());
    let server = TestServer::new(app).unwrap();
    server.get("/health").await.assert_status_ok();

    let root = inventory_side.span("GET /health");
    let request = inventory_side.span("http_request");
    assert_eq!(request.parent_span_id, root.span_context.span_id());

    let spans = inventory_side.exporter.get_finished_spans().unwrap();
    assert!(
        spans
            .iter()
            .all(|span| span.span_context.trace_id() == root.span_context.trace_id())
    );
}

#[tokio::test]
async fn request_outside_a_journey_is_not_stamped() {
    let inventory_side = Recorder::new("inventory-svc");
    let addr = spawn_inventory(&inventory_side, 0).await;

    let adapter = HttpInventoryAdapter::new(PropagatingHttpClient::new().unwrap(), &format!("http://{addr}"));
    adapter.reserve(&items()).await.unwrap();

    let root = inventory_side.span("POST /reserve");
    assert_eq!(attribute(&root, JOURNEY_NAME), None);
}

#[tokio::test]
async fn checkout_through_storefront_reaches_inventory_with_journey() {
    let inventory_side = Recorder::new("inventory-svc");
    let api_side = Recorder::new("techmart-api");
    let addr = spawn_inventory(&inventory_side, 0).await;
    let base_url = format!("http://{addr}");

    let client = PropagatingHttpClient::new().unwrap();
    let state = AppState::new(
        Arc::new(InMemoryFaultRegistry::new()),
        Arc::new(HttpDownstreamDelayAdapter::new(client.clone(), &base_url)),
        Arc::new(HttpInventoryAdapter::new(client, &base_url)),
        Arc::new(FixedRandom(0.5)),
        api_side.tracer.clone(),
    );
    let server = TestServer::new(create_router(state, api_side.tracer.clone())).unwrap();

    let response = server
        .post("/api/orders")
        .json(&json!({
            "customer_name": "Grace Hopper",
            "customer_email": "grace@example.com",
            "shipping_address": "1 Compiler Way",
            "items": [{ "product_id": 42, "quantity": 2 }]
        }))
        .await;
    response.assert_status(StatusCode::CREATED);

    let api_root = api_side.span("POST /api/orders");
    assert_eq!(
        attribute(&api_root, JOURNEY_NAME).map(|v| v.to_string()),
        Some("checkout".to_string())
    );
    let journey = api_side.span("journey.checkout");
    assert_eq!(journey.parent_span_id, api_root.span_context.span_id());
    assert_eq!(journey.status, Status::Ok);

    let inventory_root = inventory_side.span("POST /reserve");
    assert_eq!(
        attribute(&inventory_root, JOURNEY_NAME).map(|v| v.to_string()),
        Some("checkout".to_string())
    );
    assert_eq!(
        inventory_root.span_context.trace_id(),
        api_root.span_context.trace_id()
    );
}

#[tokio::test]
async fn delay_relay_reaches_live_inventory() {
    let inventory_side = Recorder::new("inventory-svc");
    let api_side = Recorder::new("techmart-api");
    let addr = spawn_inventory(&inventory_side, 500).await;
    let base_url = format!("http://{addr}");

    let client = PropagatingHttpClient::new().unwrap();
    let state = AppState::new(
        Arc::new(InMemoryFaultRegistry::new()),
        Arc::new(HttpDownstreamDelayAdapter::new(client.clone(), &base_url)),
        Arc::new(HttpInventoryAdapter::new(client, &base_url)),
        Arc::new(FixedRandom(0.5)),
        api_side.tracer.clone(),
    );
    let server = TestServer::new(create_router(state, api_side.tracer.clone())).unwrap();

    let before = server.get("/api/admin/chaos/inventory-delay").await;
    before.assert_status_ok();
    assert_eq!(before.json::<serde_json::Value>(), json!({ "delayMs": 500 }));

    let updated = server
        .put("/api/admin/chaos/inventory-delay")
        .json(&json!({ "delayMs": 0 }))
        .await;
    updated.assert_status_ok();
    assert_eq!(updated.json::<serde_json::Value>(), json!({ "delayMs": 0 }));

    let health: serde_json::Value = PropagatingHttpClient::new()
        .unwrap()
        .get(format!("{base_url}/health"))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(health["delay_ms"], 0);
}

#[tokio::test]
async fn server_errors_mark_root_span_failed() {
    let api_side = Recorder::new("techmart-api");
    let client = PropagatingHttpClient::new().unwrap();
    // nothing listens on port 9 (discard) in the test environment
    let base_url = "http://127.0.0.1:9";
    let state = AppState::new(
        Arc::new(InMemoryFaultRegistry::new()),
        Arc::new(HttpDownstreamDelayAdapter::new(client.clone(), base_url)),
        Arc::new(HttpInventoryAdapter::new(client, base_url)),
        Arc::new(FixedRandom(0.5)),
        api_side.tracer.clone(),
    );
    let server = TestServer::new(create_router(state, api_side.tracer.clone())).unwrap();

    server
        .get("/api/admin/chaos/inventory-delay")
        .await
        .assert_status(StatusCode::BAD_GATEWAY);

    let root = api_side.span("GET /api/admin/chaos/inventory-delay");
    assert!(matches!(root.status, Status::Error { .. }));
    assert_eq!(
        attribute(&root, "http.response.status_code"),
        Some(Value::I64(502))
    );
}
