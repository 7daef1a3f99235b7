//! Odoo external API client.
//!
//! Layers, bottom-up:
//! - `xmlrpc`: XML-RPC document codec
//! - `rpc`: the transport seam and its HTTP implementation
//! - `client`: session handling and `execute_kw` helpers
//! - `config`: connection settings discovery

pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod rpc;
pub mod xmlrpc;

pub use client::{OdooClient, Record, SearchOptions, fields};
pub use config::OdooConfig;
pub use domain::Domain;
pub use error::{ConfigError, OdooError};
pub use rpc::{HttpRpcTransport, RpcTransport, Service};
