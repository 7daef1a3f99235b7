//! Configuration management for the MCP server.
//!
//! Server settings come from `MCP_*` environment variables (a `.env` file is
//! loaded first when present). The Odoo connection is discovered separately
//! by [`OdooConfig::load`].

use super::odoo::{ConfigError, OdooConfig};
use super::transport::TransportConfig;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Resources domain configuration.
    pub resources: ResourcesConfig,

    /// Prompts domain configuration.
    pub prompts: PromptsConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Transport configuration.
    pub transport: TransportConfig,

    /// Odoo connection. `Debug` redacts the password.
    pub odoo: OdooConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Configuration for the resources domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourcesConfig {
    // Resources are registered in domains/resources/registry.rs
}

/// Configuration for the prompts domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptsConfig {
    // Prompts are registered in domains/prompts/registry.rs
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,

    /// Whether to include timestamps in log output.
    pub with_timestamps: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            name: "odoo-mcp-server".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            with_timestamps: true,
        }
    }
}

impl Config {
    /// Default settings around the given Odoo connection.
    pub fn new(odoo: OdooConfig) -> Self {
        Self {
            server: ServerConfig::default(),
            resources: ResourcesConfig::default(),
            prompts: PromptsConfig::default(),
            logging: LoggingConfig::default(),
            transport: TransportConfig::default(),
            odoo,
        }
    }

    /// Load configuration from the environment.
    ///
    /// Fails before any network call when no Odoo connection is configured.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let odoo = OdooConfig::load()?;
        info!(url = %odoo.url, db = %odoo.db, "Odoo connection configured");

        let mut config = Self::new(odoo);
        config.apply_env();
        Ok(config)
    }

    /// Override server settings from `MCP_*` variables.
    fn apply_env(&mut self) {
        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            self.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(timestamps) = std::env::var("MCP_LOG_TIMESTAMPS") {
            self.logging.with_timestamps = !matches!(timestamps.to_lowercase().as_str(), "false" | "0");
        }

        self.transport = TransportConfig::from_env();
        debug!(transport = %self.transport.description(), "Transport configured");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    // Mutex to ensure env var tests run serially
    static ENV_TEST_LOCK: Mutex<()> = Mutex::new(());

    fn odoo() -> OdooConfig {
        OdooConfig::new("http://localhost:8069", "demo", "admin", "s3cret")
    }

    #[test]
    fn test_new_uses_defaults() {
        let config = Config::new(odoo());
        assert_eq!(config.server.name, "odoo-mcp-server");
        assert_eq!(config.logging.level, "info");
        assert!(config.logging.with_timestamps);
        assert_eq!(config.odoo.db, "demo");
    }

    #[test]
    fn test_env_overrides() {
        let _lock = ENV_TEST_LOCK.lock().unwrap();
        unsafe {
            std::env::set_var("MCP_SERVER_NAME", "erp-bridge");
            std::env::set_var("MCP_LOG_LEVEL", "debug");
            std::env::set_var("MCP_LOG_TIMESTAMPS", "false");
        }

        let mut config = Config::new(odoo());
        config.apply_env();

        unsafe {
            std::env::remove_var("MCP_SERVER_NAME");
            std::env::remove_var("MCP_LOG_LEVEL");
            std::env::remove_var("MCP_LOG_TIMESTAMPS");
        }
        assert_eq!(config.server.name, "erp-bridge");
        assert_eq!(config.logging.level, "debug");
        assert!(!config.logging.with_timestamps);
    }

    #[test]
    fn test_password_redacted_in_debug() {
        let debug_str = format!("{:?}", Config::new(odoo()));
        assert!(debug_str.contains("REDACTED"));
        assert!(!debug_str.contains("s3cret"));
    }
}
