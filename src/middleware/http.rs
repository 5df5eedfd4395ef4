/*
 * Responsibility
 * - 全リクエスト共通の layer: request id の採番と返却, body サイズ上限, タイムアウト, trace
 * - 上限値は Config (HTTP_BODY_LIMIT_BYTES / HTTP_TIMEOUT_SECONDS) から受け取る
 */
use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::http::{StatusCode, header::HeaderName};
use tower::timeout::{TimeoutLayer, error::Elapsed};
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::config::HttpConfig;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

async fn timeout_status(err: BoxError) -> StatusCode {
    if err.is::<Elapsed>() {
        tracing::warn!("request timed out");
        StatusCode::REQUEST_TIMEOUT
    } else {
        tracing::error!(error = %err, "unhandled middleware error");
        StatusCode::INTERNAL_SERVER_ERROR
    }
}

/// Wrap `router` so every order and profile lookup gets a request id, a
/// bounded body and a deadline.
pub fn apply(router: Router, limits: &HttpConfig) -> Router {
    let header = HeaderName::from_static(REQUEST_ID_HEADER);

    router.layer(
        ServiceBuilder::new()
            .layer(HandleErrorLayer::new(timeout_status))
            .layer(SetRequestIdLayer::new(header.clone(), MakeRequestUuid))
            .layer(PropagateRequestIdLayer::new(header))
            .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes))
            .layer(TimeoutLayer::new(limits.timeout()))
            .layer(TraceLayer::new_for_http()),
    )
}
