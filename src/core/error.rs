//! Error types and handling for the MCP server.
//!
//! Each layer has its own `thiserror` enum; [`Error`] unifies them for
//! startup and the binaries.

use thiserror::Error;

/// A specialized Result type for MCP server operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Unified error type for the MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Error originating from the tools domain.
    #[error("Tool error: {0}")]
    Tool(#[from] crate::domains::tools::ToolError),

    /// Error originating from the resources domain.
    #[error("Resource error: {0}")]
    Resource(#[from] crate::domains::resources::ResourceError),

    /// Error originating from the prompts domain.
    #[error("Prompt error: {0}")]
    Prompt(#[from] crate::domains::prompts::PromptError),

    /// Error talking to Odoo.
    #[error("Odoo error: {0}")]
    Odoo(#[from] super::odoo::OdooError),

    /// The Odoo connection could not be configured.
    #[error(transparent)]
    OdooConfig(#[from] super::odoo::ConfigError),

    /// Transport failure.
    #[error("Transport error: {0}")]
    Transport(#[from] super::transport::TransportError),

    /// Internal server errors that should not occur under normal operation.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a new internal error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
