//! Server info resource definition.

use serde::Serialize;

use super::ResourceDefinition;
use crate::core::config::Config;
use crate::domains::resources::service::{DynamicResourceType, ResourceContent};

/// Server and Odoo connection details. The password is never included.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
    pub odoo_url: String,
    pub database: String,
    pub username: String,
    pub tools: Vec<String>,
}

impl ServerInfo {
    pub fn from_config(config: &Config) -> Self {
        Self {
            name: config.server.name.clone(),
            version: config.server.version.clone(),
            odoo_url: config.odoo.url.clone(),
            database: config.odoo.db.clone(),
            username: config.odoo.username.clone(),
            tools: Vec::new(),
        }
    }
}

/// Server information resource (dynamic).
pub struct ServerInfoResource;

impl ResourceDefinition for ServerInfoResource {
    const URI: &'static str = "odoo://server/info";
    const NAME: &'static str = "Server Information";
    const DESCRIPTION: &'static str = "Server version, Odoo connection and available tools";
    const MIME_TYPE: &'static str = "application/json";

    fn content() -> ResourceContent {
        ResourceContent::Dynamic(DynamicResourceType::ServerInfo)
    }
}
