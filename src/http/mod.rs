//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, one task per connection)
//!     → middleware (access log, CORS, body limit)
//!     → forward::handler
//!     → Send to client
//! ```

pub mod middleware;
pub mod server;

pub use server::{HttpServer, ServerError};
