//! Top-level router: every resource router plus the shared middleware stack.

use axum::body::Body;
use axum::http::{HeaderName, HeaderValue, Request};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use super::calls::call_router;
use super::customers::customer_router;
use super::reports::report_router;
use super::state::AppState;
use super::system::system_router;
use super::webhooks::webhook_router;
use crate::config::ServerConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Builds the complete application.
///
/// Every request gets an `x-request-id` (kept when the client sent one),
/// echoed on the response and recorded on the trace span.
pub fn build_router(state: AppState, server: &ServerConfig) -> Router {
    let request_id = HeaderName::from_static(REQUEST_ID_HEADER);

    let middleware = ServiceBuilder::new()
        .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|v| v.to_str().ok())
                    .unwrap_or("-");
                tracing::info_span!(
                    "http_request",
                    method = %request.method(),
                    uri = %request.uri(),
                    request_id = %request_id,
                )
            }),
        )
        .layer(PropagateRequestIdLayer::new(request_id))
        .layer(TimeoutLayer::new(server.request_timeout()))
        .layer(cors_layer(&server.allowed_origins()));

    Router::new()
        .merge(system_router())
        .merge(customer_router())
        .merge(call_router())
        .merge(webhook_router())
        .merge(report_router())
        .layer(middleware)
        .with_state(state)
}

/// Restricts CORS to the configured origins; any origin when none are set.
fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.is_empty() {
        return CorsLayer::permissive();
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(Any)
        .allow_headers(Any)
}
