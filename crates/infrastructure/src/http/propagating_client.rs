//! HTTP client with automatic context propagation
//!
//! Wraps `reqwest::Client` and injects the current OpenTelemetry context
//! into every request when it is sent.
//!
//! # Examples
//!
//! ```ignore
//! use infrastructure::http::PropagatingHttpClient;
//!
//! let client = PropagatingHttpClient::new()?;
//!
//! // Inside a journey scope the request carries `baggage: journey.name=checkout,...`
//! let response = client
//!     .post("http://inventory-svc:3002/reserve")
//!     .json(&body)
//!     .send()
//!     .await?;
//! ```

use std::time::Duration;

use opentelemetry::Context;
use reqwest::{
    Client, Method, RequestBuilder, Response,
    header::{HeaderMap, HeaderName, HeaderValue},
};
use tracing::{debug, instrument};

use crate::telemetry::inject_context;
use crate::telemetry::propagation::baggage_journey;

/// Configuration for the propagating HTTP client
#[derive(Debug, Clone)]
pub struct PropagatingClientConfig {
    /// Connection timeout
    pub connect_timeout: Duration,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
    /// Default headers to include in all requests
    pub default_headers: HeaderMap,
}

impl Default for PropagatingClientConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(5),
            timeout: Duration::from_secs(30),
            user_agent: format!("TechMart/{}", env!("CARGO_PKG_VERSION")),
            default_headers: HeaderMap::new(),
        }
    }
}

impl PropagatingClientConfig {
    /// Set the request timeout
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set the connect timeout
    #[must_use]
    pub const fn with_connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Set the user agent string
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Add a default header to all requests
    #[must_use]
    pub fn with_header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.default_headers.insert(name, value);
        }
        self
    }
}

/// HTTP client that propagates the ambient trace context and baggage
#[derive(Debug, Clone)]
pub struct PropagatingHttpClient {
    inner: Client,
    config: PropagatingClientConfig,
}

impl PropagatingHttpClient {
    /// Create a new client with default configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn new() -> Result<Self, reqwest::Error> {
        Self::with_config(PropagatingClientConfig::default())
    }

    /// Create a new client with custom configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying reqwest client cannot be built.
    pub fn with_config(config: PropagatingClientConfig) -> Result<Self, reqwest::Error> {
        let inner = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .default_headers(config.default_headers.clone())
            .build()?;

        Ok(Self { inner, config })
    }

    /// Get the configuration
    #[must_use]
    pub const fn config(&self) -> &PropagatingClientConfig {
        &self.config
    }

    /// Start a GET request
    pub fn get(&self, url: impl AsRef<str>) -> PropagatingRequestBuilder {
        self.request(Method::GET, url)
    }

    /// Start a POST request
    pub fn post(&self, url: impl AsRef<str>) -> PropagatingRequestBuilder {
        self.request(Method::POST, url)
    }

    /// Start a PUT request
    pub fn put(&self, url: impl AsRef<str>) -> PropagatingRequestBuilder {
        self.request(Method::PUT, url)
    }

    /// Start a DELETE request
    pub fn delete(&self, url: impl AsRef<str>) -> PropagatingRequestBuilder {
        self.request(Method::DELETE, url)
    }

    /// Start a request with a specific method
    pub fn request(&self, method: Method, url: impl AsRef<str>) -> PropagatingRequestBuilder {
        PropagatingRequestBuilder::new(self.inner.request(method, url.as_ref()))
    }
}

/// A request builder that injects trace context at send time
pub struct PropagatingRequestBuilder {
    inner: RequestBuilder,
    context: Option<Context>,
}

impl std::fmt::Debug for PropagatingRequestBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PropagatingRequestBuilder")
            .field("explicit_context", &self.context.is_some())
            .finish_non_exhaustive()
    }
}

impl PropagatingRequestBuilder {
    #[allow(clippy::missing_const_for_fn)]
    fn new(inner: RequestBuilder) -> Self {
        Self {
            inner,
            context: None,
        }
    }

    /// Propagate `cx` instead of the context current at send time
    #[must_use]
    pub fn with_context(mut self, cx: Context) -> Self {
        self.context = Some(cx);
        self
    }

    /// Add a header to the request
    #[must_use]
    pub fn header(
        mut self,
        name: impl TryInto<HeaderName>,
        value: impl TryInto<HeaderValue>,
    ) -> Self {
        if let (Ok(name), Ok(value)) = (name.try_into(), value.try_into()) {
            self.inner = self.inner.header(name, value);
        }
        self
    }

    /// Set the request body as JSON
    #[must_use]
    pub fn json<T: serde::Serialize + ?Sized>(mut self, json: &T) -> Self {
        self.inner = self.inner.json(json);
        self
    }

    /// Set the request timeout
    #[must_use]
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.inner = self.inner.timeout(timeout);
        self
    }

    /// Send the request
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails.
    #[instrument(skip(self))]
    pub async fn send(self) -> Result<Response, reqwest::Error> {
        let cx = self.context.unwrap_or_else(Context::current);

        let mut headers = HeaderMap::new();
        inject_context(&cx, &mut headers);
        if let Some(journey) = baggage_journey(&cx) {
            debug!(journey = %journey, "Sending request inside journey scope");
        }

        self.inner.headers(headers).send().await
    }
}
