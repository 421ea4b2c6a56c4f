//! Header copying between the inbound and outbound legs.
//!
//! # Responsibilities
//! - Duplicate every inbound header value onto the outbound request
//! - Strip hop-by-hop headers in both directions
//! - Leave `Host` to be derived from the target URL
//!
//! # Design Decisions
//! - Copies append, so repeated header keys keep all their values
//! - Response framing (`Content-Length`) is left to the server, the body is streamed

use axum::http::{header, HeaderMap, HeaderName};

/// Headers scoped to a single connection, never forwarded.
const HOP_BY_HOP: [HeaderName; 6] = [
    header::CONNECTION,
    header::PROXY_AUTHENTICATE,
    header::TE,
    header::TRAILER,
    header::TRANSFER_ENCODING,
    header::UPGRADE,
];

/// Non-standard hop-by-hop headers still sent by some clients.
const LEGACY_HOP_BY_HOP: [&str; 2] = ["keep-alive", "proxy-connection"];

fn is_hop_by_hop(name: &HeaderName) -> bool {
    HOP_BY_HOP.contains(name) || LEGACY_HOP_BY_HOP.contains(&name.as_str())
}

/// Append every end-to-end inbound header onto `outbound`.
pub fn copy_request_headers(inbound: &HeaderMap, outbound: &mut HeaderMap) {
    for (name, value) in inbound {
        if name == header::HOST || is_hop_by_hop(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
}

/// Append every end-to-end upstream response header onto `outbound`.
pub fn copy_response_headers(upstream: &HeaderMap, outbound: &mut HeaderMap) {
    for (name, value) in upstream {
        if name == header::CONTENT_LENGTH || is_hop_by_hop(name) {
            continue;
        }
        outbound.append(name.clone(), value.clone());
    }
}
