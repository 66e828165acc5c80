//! Request correlation and HTTP metrics.
//!
//! [`MetricsLayer`] assigns every request a [`RequestId`] (taken from the
//! `x-request-id` header or freshly generated), stores it in the request
//! extensions for handlers, echoes it on the response and records
//! `fuelroute_http_requests_total` / `fuelroute_http_request_duration_seconds`
//! labelled by method, matched route and status code.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};
use std::time::Instant;

use axum::extract::{FromRequestParts, MatchedPath};
use axum::http::{request::Parts, Extensions, HeaderMap, HeaderName, HeaderValue, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::{info_span, Span};
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Route label for requests that matched no route, keeping label cardinality bounded.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Correlation ID of one request; reported as the `instance` of problems.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// The trimmed `x-request-id` header when non-empty, else a new UUID v7.
pub fn extract_or_generate_request_id(headers: &HeaderMap) -> RequestId {
    headers
        .get(&REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(RequestId::new)
        .unwrap_or_else(RequestId::generate)
}

impl<S> FromRequestParts<S> for RequestId
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| extract_or_generate_request_id(&parts.headers)))
    }
}

fn route_label(extensions: &Extensions) -> String {
    extensions
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string())
}

#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsLayer;

impl<S> Layer<S> for MetricsLayer {
    type Service = MetricsMiddleware<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MetricsMiddleware { inner }
    }
}

#[derive(Debug, Clone)]
pub struct MetricsMiddleware<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for MetricsMiddleware<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = MetricsFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let request_id = extract_or_generate_request_id(req.headers());
        req.extensions_mut().insert(request_id.clone());

        let record = RequestRecord {
            started: Instant::now(),
            method: req.method().to_string(),
            route: route_label(req.extensions()),
            request_id,
        };
        let span = info_span!(
            "request",
            request_id = %record.request_id,
            method = %record.method,
            route = %record.route,
        );

        MetricsFuture {
            inner: span.in_scope(|| self.inner.call(req)),
            record,
            span,
        }
    }
}

struct RequestRecord {
    started: Instant,
    method: String,
    route: String,
    request_id: RequestId,
}

impl RequestRecord {
    fn finish(&self, status: &str) -> f64 {
        let elapsed = self.started.elapsed().as_secs_f64();
        metrics::counter!(
            "fuelroute_http_requests_total",
            "method" => self.method.clone(),
            "route" => self.route.clone(),
            "status" => status.to_string()
        )
        .increment(1);
        metrics::histogram!(
            "fuelroute_http_request_duration_seconds",
            "method" => self.method.clone(),
            "route" => self.route.clone()
        )
        .record(elapsed);
        elapsed
    }
}

pin_project! {
    pub struct MetricsFuture<F> {
        #[pin]
        inner: F,
        record: RequestRecord,
        span: Span,
    }
}

impl<F, ResBody, E> Future for MetricsFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _enter = this.span.enter();

        let mut result = match this.inner.poll(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(result) => result,
        };

        match &mut result {
            Ok(response) => {
                let status = response.status();
                let elapsed = this.record.finish(status.as_str());
                if let Ok(value) = HeaderValue::from_str(this.record.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                tracing::info!(
                    status = status.as_u16(),
                    latency_ms = elapsed * 1000.0,
                    "request completed"
                );
            }
            Err(_) => {
                let elapsed = this.record.finish("error");
                tracing::error!(latency_ms = elapsed * 1000.0, "request failed");
            }
        }

        Poll::Ready(result)
    }
}
