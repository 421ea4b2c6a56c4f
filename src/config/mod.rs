//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! CLI args / PORT env (clap)
//!     → loader.rs (optional TOML file, port override)
//!     → validation.rs (semantic checks)
//!     → ProxyConfig (validated, immutable)
//!     → injected once into the server state
//! ```
//!
//! # Design Decisions
//! - Config is read once at startup; nothing is reloaded at runtime
//! - All fields have defaults so running without a file is valid
//! - Validation separates syntactic (serde) from semantic checks

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, Cli, ConfigError};
pub use schema::{
    CorsConfig, ErrorStatusMode, ForwardingConfig, ListenerConfig, LogFormat,
    ObservabilityConfig, ProxyConfig, ResponseHeaderMode,
};
