//! CORS forwarding proxy.
//!
//! ```text
//!   browser ──▶ access log ──▶ CORS ──▶ forward handler ──▶ target URL
//!      ▲                                      │
//!      └──────── upstream status + body ◀─────┘
//! ```

use std::net::SocketAddr;
use std::process::ExitCode;

use clap::Parser;

use cors_proxy::config::Cli;
use cors_proxy::observability::{logging, metrics};
use cors_proxy::{net, HttpServer, Shutdown};

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("cors-proxy: {e}");
            return ExitCode::FAILURE;
        }
    };

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "cors-proxy starting");

    tracing::info!(
        bind_address = %config.listener.bind_address(),
        path = %config.forwarding.path,
        timeout_secs = config.forwarding.timeout_secs,
        response_headers = ?config.forwarding.response_headers,
        error_status = ?config.forwarding.error_status,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(e) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                error = %e,
                "Failed to parse metrics address"
            ),
        }
    }

    let listener = match net::bind(&config.listener).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(error = %e, "Listener startup failed");
            return ExitCode::FAILURE;
        }
    };

    let server = match HttpServer::new(config) {
        Ok(server) => server,
        Err(e) => {
            tracing::error!(error = %e, "Server initialization failed");
            return ExitCode::FAILURE;
        }
    };

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(shutdown.trigger_on_signal());

    if let Err(e) = server.run(listener, server_shutdown).await {
        tracing::error!(error = %e, "Server terminated with error");
        return ExitCode::FAILURE;
    }

    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
