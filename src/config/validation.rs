//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0)
//! - Check that CORS lists hold valid methods and header values
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ProxyConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use axum::http::{HeaderName, HeaderValue, Method};

use crate::config::schema::ProxyConfig;

/// A single semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// First segment of `path` the router would refuse.
///
/// Captures must fill a whole segment (`{name}`, or `{*name}` as the last
/// segment); `:name` and bare `*name` are the old capture syntax and rejected.
fn invalid_route_segment(path: &str) -> Option<&str> {
    let segments: Vec<&str> = path.split('/').skip(1).collect();
    let last = segments.len().saturating_sub(1);

    segments.iter().enumerate().find_map(|(i, &segment)| {
        let valid = if segment.starts_with(':') || segment.starts_with('*') {
            false
        } else if segment.contains(['{', '}']) {
            let name = segment
                .strip_prefix('{')
                .and_then(|s| s.strip_suffix('}'))
                .map(|s| if i == last { s.strip_prefix('*').unwrap_or(s) } else { s });
            matches!(name, Some(name) if !name.is_empty()
                && name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_'))
        } else {
            true
        };
        (!valid).then_some(segment)
    })
}

/// Validate a configuration, collecting every problem found.
pub fn validate_config(config: &ProxyConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let forwarding = &config.forwarding;
    if forwarding.timeout_secs == 0 {
        errors.push(ValidationError::new("forwarding.timeout_secs", "must be greater than 0"));
    }
    if forwarding.connect_timeout_secs == 0 {
        errors.push(ValidationError::new(
            "forwarding.connect_timeout_secs",
            "must be greater than 0",
        ));
    }
    if !forwarding.path.starts_with('/') {
        errors.push(ValidationError::new(
            "forwarding.path",
            format!("{:?} must start with '/'", forwarding.path),
        ));
    } else if let Some(segment) = invalid_route_segment(&forwarding.path) {
        errors.push(ValidationError::new(
            "forwarding.path",
            format!("{:?} has an invalid route segment {segment:?}", forwarding.path),
        ));
    }
    if forwarding.max_body_bytes == Some(0) {
        errors.push(ValidationError::new("forwarding.max_body_bytes", "must be greater than 0"));
    }

    let cors = &config.cors;
    if cors.allowed_methods.is_empty() {
        errors.push(ValidationError::new("cors.allowed_methods", "must not be empty"));
    }
    for method in cors.allowed_methods.iter().filter(|m| m.as_str() != "*") {
        if Method::from_bytes(method.as_bytes()).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_methods",
                format!("{method:?} is not an HTTP method"),
            ));
        }
    }
    for origin in cors.allowed_origins.iter().filter(|o| o.as_str() != "*") {
        if HeaderValue::from_str(origin).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_origins",
                format!("{origin:?} is not a valid origin"),
            ));
        }
    }
    for header in cors.allowed_headers.iter().filter(|h| h.as_str() != "*") {
        if HeaderName::from_bytes(header.as_bytes()).is_err() {
            errors.push(ValidationError::new(
                "cors.allowed_headers",
                format!("{header:?} is not a valid header name"),
            ));
        }
    }

    let observability = &config.observability;
    if observability.log_level.trim().is_empty() {
        errors.push(ValidationError::new("observability.log_level", "must not be empty"));
    }
    if observability.metrics_enabled
        && observability.metrics_address.parse::<SocketAddr>().is_err()
    {
        errors.push(ValidationError::new(
            "observability.metrics_address",
            format!("{:?} is not a socket address", observability.metrics_address),
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
