//! The forwarding handler.
//!
//! # Data Flow
//! ```text
//! inbound request
//!     → target.rs (read `url`, re-encode the remaining query)
//!     → outbound request (same method, streamed body, copied headers)
//!     → client.rs (single call, bounded by the configured timeout)
//!     → upstream status + streamed body back to the caller
//! ```
//!
//! Failures at any step end the request with a JSON error payload; see
//! `error.rs` for the status policy.

use std::time::Duration;

use axum::{
    body::{Body, Bytes, HttpBody},
    extract::State,
    http::{header, HeaderMap, HeaderValue, Method, Request, StatusCode},
    response::{IntoResponse, Response},
};
use futures_util::{stream, Stream, StreamExt};
use url::Url;

use crate::config::{ErrorStatusMode, ForwardingConfig, ResponseHeaderMode};
use crate::forward::client::{build_client, UpstreamTimeouts};
use crate::forward::error::ForwardError;
use crate::forward::headers::{copy_request_headers, copy_response_headers};
use crate::forward::target::extract_target;
use crate::observability::metrics;

/// State shared by every handler invocation.
#[derive(Clone)]
pub struct ForwardState {
    client: reqwest::Client,
    timeout: Duration,
    response_headers: ResponseHeaderMode,
    error_status: ErrorStatusMode,
}

impl ForwardState {
    pub fn new(config: &ForwardingConfig) -> Result<Self, reqwest::Error> {
        let timeouts = UpstreamTimeouts::from(config);
        Ok(Self {
            client: build_client(timeouts)?,
            timeout: timeouts.total,
            response_headers: config.response_headers,
            error_status: config.error_status,
        })
    }
}

/// Forward one request to the URL named by its `url` query parameter.
pub async fn forward(State(state): State<ForwardState>, request: Request<Body>) -> Response {
    let (parts, body) = request.into_parts();

    tracing::debug!(method = %parts.method, query = ?parts.uri.query(), "Forwarding request");

    let Some(target) = extract_target(parts.uri.query()) else {
        return empty_ok();
    };
    let outbound_url = target.outbound_url();

    let outbound = match build_outbound(&state.client, parts.method, &outbound_url, &parts.headers, body) {
        Ok(outbound) => outbound,
        Err(err) => return reject(&state, &outbound_url, err),
    };

    match state.client.execute(outbound).await {
        Ok(upstream) => relay(&state, upstream),
        Err(err) => reject(&state, &outbound_url, ForwardError::from_upstream(err, state.timeout)),
    }
}

/// No target: answer 200 with an empty body.
fn empty_ok() -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, HeaderValue::from_static("application/json"))],
    )
        .into_response()
}

/// Assemble the outbound request. The inbound body is streamed, not buffered.
fn build_outbound(
    client: &reqwest::Client,
    method: Method,
    url: &str,
    headers: &HeaderMap,
    body: Body,
) -> Result<reqwest::Request, ForwardError> {
    let parsed = Url::parse(url).map_err(|source| ForwardError::InvalidTarget {
        url: url.to_string(),
        source,
    })?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(ForwardError::UnsupportedScheme(parsed.scheme().to_string()));
    }

    let mut builder = client.request(method, parsed);
    if !body.is_end_stream() {
        builder = builder.body(reqwest::Body::wrap_stream(body.into_data_stream()));
    }

    let mut outbound = builder.build().map_err(ForwardError::Build)?;
    copy_request_headers(headers, outbound.headers_mut());
    Ok(outbound)
}

fn reject(state: &ForwardState, target: &str, err: ForwardError) -> Response {
    tracing::warn!(target_url = %target, kind = err.kind(), error = %err, "Forwarding failed");
    metrics::record_upstream_error(err.kind());
    err.into_response_with(state.error_status)
}

/// Commit the upstream status and stream its body through.
fn relay(state: &ForwardState, upstream: reqwest::Response) -> Response {
    let status = upstream.status();
    let mut headers = HeaderMap::new();
    match state.response_headers {
        ResponseHeaderMode::Compat => {
            headers.insert(header::CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }
        ResponseHeaderMode::Passthrough => copy_response_headers(upstream.headers(), &mut headers),
    }

    let mut response = Response::new(Body::from_stream(copy_body(upstream)));
    *response.status_mut() = status;
    *response.headers_mut() = headers;
    response
}

struct BodyCopy<S> {
    stream: S,
    copied: u64,
}

/// Upstream body as a stream that logs how much was copied once it ends.
///
/// Status and headers are committed before the first chunk, so a failure
/// here can only be logged and surfaced as an aborted body.
fn copy_body(
    upstream: reqwest::Response,
) -> impl Stream<Item = Result<Bytes, reqwest::Error>> + Send + 'static {
    let copy = BodyCopy {
        stream: upstream.bytes_stream().boxed(),
        copied: 0,
    };

    stream::unfold(Some(copy), |state| async move {
        let Some(mut copy) = state else {
            return None;
        };
        match copy.stream.next().await {
            Some(Ok(chunk)) => {
                copy.copied += chunk.len() as u64;
                Some((Ok(chunk), Some(copy)))
            }
            Some(Err(err)) => {
                tracing::warn!(bytes_copied = copy.copied, error = %err, "Response body copy failed");
                metrics::record_upstream_error("stream_copy");
                Some((Err(err), None))
            }
            None => {
                tracing::debug!(bytes_copied = copy.copied, "Response body copied");
                metrics::record_response_bytes(copy.copied);
                None
            }
        }
    })
}
