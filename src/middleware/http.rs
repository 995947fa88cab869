//! HTTP-level middleware (cross-cutting concerns).
//!
//! Applied around the whole gate service, outside the per-route handlers.
//!
//! Responsibility:
//! - Request-Id generation + propagation (X-Request-Id). The gate forwards the
//!   id to the identity service, so both logs can be joined on it.
//! - Access logging / request tracing (TraceLayer)
//! - Body size limits
//! - Global timeout
//!
//! Defaults:
//! - Request-Id header: `x-request-id` (a UUID is generated when the proxy sends none)
//! - Body limit: 64 KiB (forward-auth subrequests carry no body)
//! - Timeout: `REQUEST_TIMEOUT_SECS`, 30 seconds unless configured. Config
//!   rejects values that do not exceed `IDENTITY_TIMEOUT_MS`, so a slow
//!   identity service ends in the gate's 500, never in this layer's 408.

use std::time::Duration;

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

const BODY_LIMIT_BYTES: usize = 64 * 1024;

/// Apply HTTP-level middleware to the given Router.
///
/// `request_timeout` bounds the whole request, identity call included.
pub fn apply(router: Router, request_timeout: Duration) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                StatusCode::REQUEST_TIMEOUT
            } else {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }))
        // Generate a request id if missing, then propagate it to the response.
        .layer(SetRequestIdLayer::new(
            request_id_header.clone(),
            MakeRequestUuid,
        ))
        .layer(PropagateRequestIdLayer::new(request_id_header))
        .layer(RequestBodyLimitLayer::new(BODY_LIMIT_BYTES))
        .layer(TimeoutLayer::new(request_timeout))
        // Access log for every request, including denied ones.
        .layer(TraceLayer::new_for_http());

    router.layer(layers)
}
