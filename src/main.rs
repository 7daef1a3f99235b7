//! MCP Server Entry Point
//!
//! Initializes logging, loads configuration and starts the server with the
//! configured transport.

use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::{EnvFilter, fmt};

use odoo_mcp_server::core::config::LoggingConfig;
use odoo_mcp_server::core::{Config, McpServer, TransportService};

#[tokio::main]
async fn main() -> Result<()> {
    // Logging must be up before the Odoo configuration is discovered.
    dotenvy::dotenv().ok();
    init_logging(&logging_from_env());

    let config = Config::from_env()?;

    info!("Starting {} v{}", config.server.name, config.server.version);

    let server = McpServer::new(config.clone())?;

    info!("Server initialized");

    let transport = TransportService::new(config.transport);
    transport.run(server).await?;

    info!("Server shutting down");

    Ok(())
}

fn logging_from_env() -> LoggingConfig {
    let mut logging = LoggingConfig::default();
    if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
        logging.level = level;
    }
    if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
        logging.with_timestamps = !matches!(timestamps.to_lowercase().as_str(), "false" | "0");
    }
    logging
}

/// Initialize the logging subsystem.
///
/// Logs go to stderr; stdout carries the STDIO transport.
fn init_logging(config: &LoggingConfig) {
    let level = match config.level.to_lowercase().as_str() {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    let filter = EnvFilter::from_default_env().add_directive(level.into());

    let builder = fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .with_writer(std::io::stderr);

    if config.with_timestamps {
        builder.init();
    } else {
        builder.without_time().init();
    }
}
