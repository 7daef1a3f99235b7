//! Core module containing shared infrastructure components.
//!
//! Configuration, error handling, the Odoo client, server lifecycle
//! management and transport layer abstractions.

pub mod config;
pub mod error;
pub mod odoo;
pub mod server;
pub mod transport;

pub use config::Config;
pub use error::{Error, Result};
pub use server::McpServer;
pub use transport::{TransportConfig, TransportService};
