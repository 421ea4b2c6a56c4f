//! Network layer subsystem.
//!
//! # Data Flow
//! ```text
//! ListenerConfig (host, port)
//!     → listener.rs (resolve + bind)
//!     → TcpListener handed to the HTTP server
//! ```
//!
//! A bind failure is the one fatal error of the process; callers exit on it.

pub mod listener;

pub use listener::{bind, ListenerError};
