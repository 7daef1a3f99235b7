//! Odoo client error types.

use std::path::PathBuf;

use thiserror::Error;

use super::xmlrpc::Fault;

/// Errors raised while talking to the Odoo external API.
///
/// The variants keep the failure kinds apart so callers can tell a
/// credential problem from a rejected operation or an unreachable server.
#[derive(Debug, Error)]
pub enum OdooError {
    /// Credentials were rejected or the session is no longer valid.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The call reached Odoo but the operation was rejected.
    #[error("Odoo rejected the operation (fault {code}): {message}")]
    Remote { code: String, message: String },

    /// The server could not be reached or answered with a non-success status.
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response was not a well-formed XML-RPC document.
    #[error("Malformed XML-RPC payload: {0}")]
    Protocol(String),
}

impl OdooError {
    /// Create a new authentication error.
    pub fn authentication(msg: impl Into<String>) -> Self {
        Self::Authentication(msg.into())
    }

    /// Create a new transport error.
    pub fn transport(msg: impl Into<String>) -> Self {
        Self::Transport(msg.into())
    }

    /// Create a new protocol error.
    pub fn protocol(msg: impl Into<String>) -> Self {
        Self::Protocol(msg.into())
    }

    /// Create a remote operation error without a fault code.
    pub fn remote(msg: impl Into<String>) -> Self {
        Self::Remote {
            code: String::new(),
            message: msg.into(),
        }
    }
}

impl From<Fault> for OdooError {
    fn from(fault: Fault) -> Self {
        if fault.is_access_denied() {
            Self::Authentication(fault.message)
        } else {
            Self::Remote {
                code: fault.code,
                message: fault.message,
            }
        }
    }
}

impl From<reqwest::Error> for OdooError {
    fn from(err: reqwest::Error) -> Self {
        Self::Transport(err.to_string())
    }
}

/// Errors raised while locating the Odoo connection settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Neither the environment nor any candidate file provided settings.
    #[error("No Odoo configuration found (set ODOO_URL, ODOO_DB, ODOO_USERNAME, ODOO_PASSWORD or create one of: {})", display_paths(.searched))]
    NotFound { searched: Vec<PathBuf> },

    /// A candidate file exists but could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A candidate file exists but is not valid configuration JSON.
    #[error("Invalid Odoo configuration in {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// An environment variable holds an unusable value.
    #[error("Invalid value for {name}: {reason}")]
    InvalidEnv { name: String, reason: String },
}

fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|p| p.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
