//! Resource service implementation.
//!
//! The ResourceService holds the registered resources and serves read
//! requests. Resources are defined in `definitions/` and registered via
//! `registry.rs`.

use rmcp::model::{ReadResourceResult, Resource, ResourceContents};
use std::collections::BTreeMap;
use tracing::{debug, info};

use super::definitions::ServerInfo;
use super::error::ResourceError;
use crate::core::config::ResourcesConfig;

/// Service for listing and reading resources.
pub struct ResourceService {
    #[allow(dead_code)]
    config: ResourcesConfig,

    /// Snapshot served by the dynamic server info resource.
    server_info: ServerInfo,

    /// Key: resource URI, Value: resource metadata and content
    resources: BTreeMap<String, ResourceEntry>,
}

/// An entry in the resource registry.
#[derive(Debug, Clone)]
pub struct ResourceEntry {
    /// The resource metadata.
    pub resource: Resource,

    /// The content provider for this resource.
    pub content: ResourceContent,
}

/// Different types of resource content.
#[derive(Debug, Clone)]
pub enum ResourceContent {
    /// Static text content.
    Text(String),

    /// Content computed on read.
    Dynamic(DynamicResourceType),
}

/// Types of dynamic resources.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DynamicResourceType {
    /// Server and Odoo connection information.
    ServerInfo,
}

impl ResourceService {
    /// Create an empty ResourceService.
    pub fn new(config: ResourcesConfig, server_info: ServerInfo) -> Self {
        Self {
            config,
            server_info,
            resources: BTreeMap::new(),
        }
    }

    /// Register a resource; URIs must be unique.
    pub fn register_resource(&mut self, entry: ResourceEntry) -> Result<(), ResourceError> {
        let uri = entry.resource.raw.uri.to_string();
        if self.resources.contains_key(&uri) {
            return Err(ResourceError::AlreadyRegistered(uri));
        }
        info!("Registering resource: {}", uri);
        self.resources.insert(uri, entry);
        Ok(())
    }

    /// Record the registered tool names in the server info snapshot.
    pub fn set_tool_names(&mut self, tools: Vec<String>) {
        self.server_info.tools = tools;
    }

    pub fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }

    /// List all available resources.
    pub async fn list_resources(&self) -> Vec<Resource> {
        self.resources
            .values()
            .map(|entry| entry.resource.clone())
            .collect()
    }

    /// Read a resource by URI.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ResourceError> {
        let entry = self
            .resources
            .get(uri)
            .ok_or_else(|| ResourceError::not_found(uri))?;

        debug!(uri, "Reading resource");
        let content = match &entry.content {
            ResourceContent::Text(text) => text.clone(),
            ResourceContent::Dynamic(DynamicResourceType::ServerInfo) => {
                serde_json::to_string_pretty(&self.server_info)
                    .map_err(|e| ResourceError::internal(e.to_string()))?
            }
        };

        let mut contents = ResourceContents::text(content, uri);
        if let ResourceContents::TextResourceContents { mime_type, .. } = &mut contents {
            *mime_type = entry.resource.raw.mime_type.clone();
        }

        Ok(ReadResourceResult {
            contents: vec![contents],
        })
    }
}
