//! API middleware

use std::time::Instant;

use axum::{body::Body, http::Request, middleware::Next, response::Response};
use tracing::{info, warn};

use crate::handlers::gateway::{ALLERGY_PREFIX, AYUSH_PREFIX, CLAIMS_PREFIX, PREDICTIVE_PREFIX};

/// Header carrying the per-request id set by the request-id layer
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Service label for a request path; unprefixed aliases count as the gateway
fn service_for(path: &str) -> &'static str {
    [
        (CLAIMS_PREFIX, "claims"),
        (AYUSH_PREFIX, "ayush"),
        (ALLERGY_PREFIX, "allergy"),
        (PREDICTIVE_PREFIX, "predictive"),
    ]
    .into_iter()
    .find(|(prefix, _)| path.starts_with(prefix))
    .map_or("gateway", |(_, service)| service)
}

/// One log line per request, tagged with the owning service
///
/// 5xx responses log at warn; upstream and availability failures land there.
pub async fn audit_middleware(request: Request<Body>, next: Next) -> Response {
    let started = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let service = service_for(&path);
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
        .map(str::to_owned)
        .unwrap_or_default();

    let response = next.run(request).await;
    let status = response.status().as_u16();
    let elapsed_ms = started.elapsed().as_millis() as u64;

    if response.status().is_server_error() {
        warn!(service, %method, path, request_id, status, elapsed_ms, "Request failed");
    } else {
        info!(service, %method, path, request_id, status, elapsed_ms, "Request served");
    }
    response
}
