//! Resources domain module.
//!
//! Resources are read-only documents served to MCP clients: a dynamic
//! server information record and one static Markdown reference per business
//! area.
//!
//! ## Architecture
//!
//! - `definitions/` - Individual resource definitions (one file per resource)
//! - `registry.rs` - Central resource registration
//! - `service.rs` - Resource service for listing and reading

pub mod definitions;
mod error;
mod registry;
mod service;

pub use definitions::{ResourceDefinition, ServerInfo};
pub use error::ResourceError;
pub use registry::{register_all_resources, resource_uris};
pub use service::{DynamicResourceType, ResourceContent, ResourceEntry, ResourceService};
