//! Odoo MCP Server Library
//!
//! A Model Context Protocol (MCP) server that exposes an Odoo ERP instance
//! (sales, purchase, inventory and accounting) through its XML-RPC API.
//!
//! # Architecture
//!
//! - **core**: configuration, error handling, the Odoo client, the server and transports
//! - **domains**: Business logic organized by bounded contexts
//!   - **tools**: Odoo operations and analyses callable by clients
//!   - **resources**: server information and per-area reference docs
//!   - **prompts**: guidance templates for common analyses
//!
//! # Example
//!
//! ```rust,no_run
//! use odoo_mcp_server::{core::McpServer, core::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let server = McpServer::new(config)?;
//!     // Start the server...
//!     Ok(())
//! }
//! ```

pub mod core;
pub mod domains;

// Re-export commonly used types for convenience
pub use core::{Config, Error, McpServer, Result};
