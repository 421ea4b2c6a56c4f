//! Shared upstream HTTP client.
//!
//! # Responsibilities
//! - Own the connection pool used by every forwarded request
//! - Enforce the connect timeout and the overall per-request budget
//!
//! # Design Decisions
//! - The overall timeout covers the response body download too, so a slow
//!   upstream or a slow caller cannot hold a handler past the budget
//! - Redirects are followed by the client, the caller sees the final response
//! - No retries: one outbound call per inbound request

use std::time::Duration;

use crate::config::ForwardingConfig;

/// Timeouts applied to every outbound call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpstreamTimeouts {
    pub connect: Duration,
    pub total: Duration,
}

impl From<&ForwardingConfig> for UpstreamTimeouts {
    fn from(config: &ForwardingConfig) -> Self {
        Self {
            connect: Duration::from_secs(config.connect_timeout_secs),
            total: Duration::from_secs(config.timeout_secs),
        }
    }
}

/// Build the pooled client. Safe to clone and share across tasks.
pub fn build_client(timeouts: UpstreamTimeouts) -> Result<reqwest::Client, reqwest::Error> {
    reqwest::Client::builder()
        .connect_timeout(timeouts.connect)
        .timeout(timeouts.total)
        .build()
}
