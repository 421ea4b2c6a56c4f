//! Request forwarding subsystem.
//!
//! # Data Flow
//! ```text
//! Request (method, query, headers, body)
//!     → target.rs (extract `url`, rebuild query)
//!     → headers.rs (copy end-to-end headers)
//!     → client.rs (shared pool, bounded timeout)
//!     → handler.rs (execute, relay status + body)
//!     → error.rs ({"error": ...} on any failure)
//! ```
//!
//! # Design Decisions
//! - Stateless per request; the client pool is the only shared resource
//! - Bodies are streamed in both directions, never buffered
//! - No retries, no caching: one outbound call per inbound request

pub mod client;
pub mod error;
pub mod handler;
pub mod headers;
pub mod target;

pub use error::{ErrorBody, ForwardError};
pub use handler::{forward, ForwardState};
pub use target::{extract_target, ForwardTarget, TARGET_PARAM};
