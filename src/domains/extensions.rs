//! Startup registration of every prompt, resource and tool.

use std::sync::Arc;

use tracing::info;

use super::prompts::{PromptService, register_all_prompts};
use super::resources::{ResourceService, ServerInfo, register_all_resources};
use super::tools::ToolRegistry;
use super::tools::definitions::register_all_tools;
use crate::core::config::Config;
use crate::core::error::Result;
use crate::core::odoo::OdooClient;

/// Everything the server exposes, fully registered.
pub struct Extensions {
    pub prompts: PromptService,
    pub resources: ResourceService,
    pub tools: ToolRegistry,
}

/// Register prompts, then resources, then tools into fresh registries.
///
/// The first registration error aborts the whole pass.
pub fn register_all_extensions(config: &Config, client: Arc<OdooClient>) -> Result<Extensions> {
    let mut prompts = PromptService::new(config.prompts.clone());
    register_all_prompts(&mut prompts)?;

    let mut resources =
        ResourceService::new(config.resources.clone(), ServerInfo::from_config(config));
    register_all_resources(&mut resources)?;

    let mut tools = ToolRegistry::new(client);
    register_all_tools(&mut tools)?;
    resources.set_tool_names(tools.tool_names().into_iter().map(String::from).collect());

    info!(
        prompts = prompts.len(),
        resources = resources.len(),
        tools = tools.len(),
        "Extensions registered"
    );
    Ok(Extensions {
        prompts,
        resources,
        tools,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::OdooConfig;
    use crate::core::odoo::client::testing::{MockTransport, client};

    fn register() -> Extensions {
        let config = Config::new(OdooConfig::new("http://odoo.test", "test", "admin", "admin"));
        let client = Arc::new(client(Arc::new(MockTransport::new())));
        register_all_extensions(&config, client).unwrap()
    }

    #[tokio::test]
    async fn test_registers_everything() {
        let extensions = register();
        assert_eq!(extensions.prompts.len(), 4);
        assert_eq!(extensions.resources.len(), 5);
        assert_eq!(extensions.tools.len(), 13);
        assert_eq!(extensions.resources.server_info().tools.len(), 13);
    }

    #[tokio::test]
    async fn test_two_passes_are_identical() {
        let first = register();
        let second = register();

        let first_prompts: Vec<_> = first.prompts.list_prompts().await.into_iter().map(|p| p.name).collect();
        let second_prompts: Vec<_> = second.prompts.list_prompts().await.into_iter().map(|p| p.name).collect();
        assert_eq!(first_prompts, second_prompts);
        assert_eq!(first.tools.tool_names(), second.tools.tool_names());

        let first_uris: Vec<_> = first
            .resources
            .list_resources()
            .await
            .into_iter()
            .map(|r| r.raw.uri)
            .collect();
        let second_uris: Vec<_> = second
            .resources
            .list_resources()
            .await
            .into_iter()
            .map(|r| r.raw.uri)
            .collect();
        assert_eq!(first_uris, second_uris);
    }

    #[test]
    fn test_listing_is_sorted_by_name() {
        let extensions = register();
        let names = extensions.tools.tool_names();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
    }
}
