//! Tool-specific error types.

use thiserror::Error;

use super::schemas::ValidationError;
use crate::core::odoo::OdooError;

/// Errors that can occur during tool registration and execution.
#[derive(Debug, Error)]
pub enum ToolError {
    /// Arguments failed schema validation.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Odoo rejected the credentials.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Odoo refused the operation; the fault text is kept verbatim.
    #[error("{0}")]
    RemoteOperation(String),

    /// Odoo could not be reached or answered garbage.
    #[error("Transport error: {0}")]
    Transport(String),

    /// No records matched where at least one is required.
    #[error("{0}")]
    NotFound(String),

    /// The requested tool is not registered.
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    /// A tool with this name is already registered.
    #[error("Tool already registered: {0}")]
    AlreadyRegistered(String),

    /// An internal error occurred.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Create a new "not found" error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create a new "internal" error.
    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Stable kind reported to clients in the error envelope.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Validation(_) => "validation",
            Self::Authentication(_) => "authentication",
            Self::RemoteOperation(_) => "remote_operation",
            Self::Transport(_) => "transport",
            Self::NotFound(_) => "not_found",
            Self::UnknownTool(_) => "unknown_tool",
            Self::AlreadyRegistered(_) => "already_registered",
            Self::Internal(_) => "internal",
        }
    }
}

impl From<OdooError> for ToolError {
    fn from(err: OdooError) -> Self {
        match err {
            OdooError::Authentication(msg) => Self::Authentication(msg),
            OdooError::Remote { message, .. } => Self::RemoteOperation(message),
            OdooError::Transport(msg) => Self::Transport(msg),
            OdooError::Protocol(msg) => Self::Transport(format!("malformed response: {}", msg)),
        }
    }
}
