//! CORS forwarding proxy library.
//!
//! Relays `ANY /?url=<target>&...` to `<target>?...`, answering with the
//! upstream status and body plus permissive cross-origin headers.

pub mod config;
pub mod forward;
pub mod http;
pub mod lifecycle;
pub mod net;
pub mod observability;

pub use config::schema::ProxyConfig;
pub use http::HttpServer;
pub use lifecycle::Shutdown;
