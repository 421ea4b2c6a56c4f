//! Layers wrapped around the forwarding handler.
//!
//! Order (outer → inner): access log → CORS → body limit → handler, so
//! preflights are answered by the CORS layer and still get logged.

pub mod access_log;
pub mod cors;

pub use access_log::access_log;
pub use cors::cors_layer;
