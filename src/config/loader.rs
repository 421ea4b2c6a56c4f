//! Configuration loading from disk and the command line.

use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;

use crate::config::schema::ProxyConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Error type for configuration loading.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<ProxyConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    let config: ProxyConfig = toml::from_str(&content)?;

    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Command line of the `cors-proxy` binary.
#[derive(Debug, Parser)]
#[command(name = "cors-proxy")]
#[command(about = "HTTP forwarding proxy that adds permissive CORS headers", long_about = None)]
pub struct Cli {
    /// TOML configuration file.
    #[arg(short, long, env = "CORS_PROXY_CONFIG")]
    pub config: Option<PathBuf>,

    /// Listen port; overrides the configuration file.
    #[arg(short, long, env = "PORT")]
    pub port: Option<u16>,
}

impl Cli {
    /// Resolve the effective configuration: file (or defaults), then port override.
    pub fn resolve(&self) -> Result<ProxyConfig, ConfigError> {
        let mut config = match &self.config {
            Some(path) => load_config(path)?,
            None => ProxyConfig::default(),
        };

        if let Some(port) = self.port {
            config.listener.port = port;
        }

        Ok(config)
    }
}
