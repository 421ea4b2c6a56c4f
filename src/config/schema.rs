//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the proxy.
//! All types derive Serde traits for deserialization from config files, and
//! every section has defaults so an empty file is a valid configuration.

use serde::{Deserialize, Serialize};

/// Root configuration for the CORS proxy.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
#[serde(default)]
pub struct ProxyConfig {
    /// Listener configuration (host, port).
    pub listener: ListenerConfig,

    /// Forwarding handler settings.
    pub forwarding: ForwardingConfig,

    /// Cross-origin policy applied in front of the handler.
    pub cors: CorsConfig,

    /// Observability settings.
    pub observability: ObservabilityConfig,
}

/// Listener configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ListenerConfig {
    /// Interface to bind.
    pub host: String,

    /// TCP port. Overridden by `PORT` / `--port`.
    pub port: u16,
}

impl ListenerConfig {
    /// `host:port` string handed to the socket layer.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for ListenerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
        }
    }
}

/// Forwarding handler configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ForwardingConfig {
    /// Route the handler is mounted on. `/` catches every path.
    pub path: String,

    /// Total budget for one outbound call in seconds: connect, upload,
    /// response headers and response body.
    pub timeout_secs: u64,

    /// Connection establishment timeout in seconds.
    pub connect_timeout_secs: u64,

    /// Optional cap on inbound request bodies.
    pub max_body_bytes: Option<usize>,

    /// Which headers a successful response carries.
    pub response_headers: ResponseHeaderMode,

    /// How forwarding failures map to status codes.
    pub error_status: ErrorStatusMode,
}

impl Default for ForwardingConfig {
    fn default() -> Self {
        Self {
            path: "/".to_string(),
            timeout_secs: 10,
            connect_timeout_secs: 5,
            max_body_bytes: None,
            response_headers: ResponseHeaderMode::Compat,
            error_status: ErrorStatusMode::BadRequest,
        }
    }
}

/// Response header policy on the success path.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ResponseHeaderMode {
    /// Always `Content-Type: application/json`, no upstream headers.
    #[default]
    Compat,
    /// Copy upstream end-to-end headers.
    Passthrough,
}

/// Status code policy for forwarding failures.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum ErrorStatusMode {
    /// Every failure is reported as 400 Bad Request.
    #[default]
    BadRequest,
    /// Upstream failures are reported as 502, timeouts as 504.
    Gateway,
}

/// Cross-origin policy.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct CorsConfig {
    /// Allowed origins. `*` mirrors the request origin.
    pub allowed_origins: Vec<String>,

    /// Allowed request headers. `*` mirrors the preflight request.
    pub allowed_headers: Vec<String>,

    /// Allowed methods.
    pub allowed_methods: Vec<String>,

    /// Emit `Access-Control-Allow-Credentials: true`.
    pub allow_credentials: bool,
}

impl Default for CorsConfig {
    fn default() -> Self {
        Self {
            allowed_origins: vec!["*".to_string()],
            allowed_headers: vec!["*".to_string()],
            allowed_methods: ["GET", "POST", "OPTIONS", "PUT", "PATCH"]
                .into_iter()
                .map(String::from)
                .collect(),
            allow_credentials: true,
        }
    }
}

/// Observability configuration.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
#[serde(default)]
pub struct ObservabilityConfig {
    /// Log level (trace, debug, info, warn, error). `RUST_LOG` wins when set.
    pub log_level: String,

    /// Log line format.
    pub log_format: LogFormat,

    /// Enable the Prometheus metrics endpoint.
    pub metrics_enabled: bool,

    /// Metrics endpoint bind address.
    pub metrics_address: String,
}

impl Default for ObservabilityConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            metrics_enabled: false,
            metrics_address: "0.0.0.0:9090".to_string(),
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Deserialize, Serialize, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}
