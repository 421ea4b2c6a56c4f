//! Per-request access log.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    middleware::Next,
    response::Response,
};

use crate::observability::metrics;

/// Log method, path, remote address and elapsed time once the inner service returns.
pub async fn access_log(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let remote_addr = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.to_string())
        .unwrap_or_else(|| "-".to_string());

    let response = next.run(request).await;
    let elapsed = start.elapsed();

    tracing::info!(
        method = %method,
        path = %path,
        remote_addr = %remote_addr,
        status = response.status().as_u16(),
        elapsed = ?elapsed,
        "Request handled"
    );
    metrics::record_request(method.as_str(), response.status().as_u16(), start);

    response
}
