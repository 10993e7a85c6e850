use axum::extract::{MatchedPath, Request};
use axum::middleware::Next;
use axum::response::Response;
use std::time::Instant;
use tracing::{error, info, warn};
use uuid::Uuid;

/// Logs one line per request: id, method, matched route, status, and
/// latency, leveled by status class.
pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let request_id = Uuid::new_v4();
    let method = req.method().clone();
    let path = match req.extensions().get::<MatchedPath>() {
        Some(matched) => matched.as_str().to_owned(),
        None => req.uri().path().to_owned(),
    };

    let started = Instant::now();
    let response = next.run(req).await;

    let status = response.status().as_u16();
    let latency_ms = started.elapsed().as_millis() as u64;

    if status >= 500 {
        error!(%request_id, %method, path, status, latency_ms, "request failed");
    } else if status >= 400 {
        warn!(%request_id, %method, path, status, latency_ms, "request rejected");
    } else {
        info!(%request_id, %method, path, status, latency_ms, "request handled");
    }

    response
}
