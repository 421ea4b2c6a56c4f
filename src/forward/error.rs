//! Forwarding failures and their JSON rendering.
//!
//! Every failure ends the request with `{"error": "<message>"}`. The message is
//! the underlying error text including its source chain, unredacted.

use std::error::Error as StdError;
use std::time::Duration;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::config::ErrorStatusMode;

/// JSON body written on every failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Why a request could not be forwarded.
#[derive(Debug, thiserror::Error)]
pub enum ForwardError {
    /// The `url` parameter does not parse as an absolute URL.
    #[error("parse {url:?}: {source}")]
    InvalidTarget {
        url: String,
        #[source]
        source: url::ParseError,
    },

    /// Only plain HTTP and HTTPS targets are forwarded.
    #[error("unsupported protocol scheme {0:?}")]
    UnsupportedScheme(String),

    /// The outbound request could not be assembled.
    #[error("{}", error_chain(.0))]
    Build(#[source] reqwest::Error),

    /// The upstream did not answer within the configured budget.
    #[error("upstream timeout after {}s: {}", .after.as_secs(), error_chain(.source))]
    Timeout {
        after: Duration,
        #[source]
        source: reqwest::Error,
    },

    /// DNS, connect, TLS or protocol failure talking to the upstream.
    #[error("{}", error_chain(.0))]
    Transport(#[source] reqwest::Error),
}

impl ForwardError {
    /// Classify a failed `execute` call.
    pub fn from_upstream(err: reqwest::Error, timeout: Duration) -> Self {
        if err.is_timeout() {
            ForwardError::Timeout {
                after: timeout,
                source: err,
            }
        } else if err.is_builder() {
            ForwardError::Build(err)
        } else {
            ForwardError::Transport(err)
        }
    }

    /// Short label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            ForwardError::InvalidTarget { .. } => "invalid_target",
            ForwardError::UnsupportedScheme(_) => "unsupported_scheme",
            ForwardError::Build(_) => "build",
            ForwardError::Timeout { .. } => "timeout",
            ForwardError::Transport(_) => "transport",
        }
    }

    /// Status code reported to the caller under the given policy.
    pub fn status(&self, mode: ErrorStatusMode) -> StatusCode {
        match (mode, self) {
            (ErrorStatusMode::BadRequest, _) => StatusCode::BAD_REQUEST,
            (ErrorStatusMode::Gateway, ForwardError::Timeout { .. }) => StatusCode::GATEWAY_TIMEOUT,
            (ErrorStatusMode::Gateway, ForwardError::Transport(_)) => StatusCode::BAD_GATEWAY,
            (ErrorStatusMode::Gateway, _) => StatusCode::BAD_REQUEST,
        }
    }

    /// Render as a terminal response.
    pub fn into_response_with(self, mode: ErrorStatusMode) -> Response {
        error_response(self.status(mode), self.to_string())
    }
}

/// `status` with a JSON `{"error": message}` body.
pub fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(ErrorBody::new(message))).into_response()
}

/// `err: source: source...`, skipping sources whose text is already included.
fn error_chain(err: &dyn StdError) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        let text = cause.to_string();
        if !message.contains(&text) {
            message.push_str(": ");
            message.push_str(&text);
        }
        source = cause.source();
    }
    message
}
