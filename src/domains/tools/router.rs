//! Tool Router - builds the rmcp ToolRouter from the registry.
//!
//! Each registered tool becomes a dynamic route whose handler forwards the
//! call arguments to [`ToolRegistry::call`].

use std::sync::Arc;

use futures::FutureExt;
use rmcp::handler::server::tool::{ToolCallContext, ToolRoute, ToolRouter};

use super::registry::ToolRegistry;

/// Build the tool router with all registered tools.
pub fn build_tool_router<S>(registry: Arc<ToolRegistry>) -> ToolRouter<S>
where
    S: Send + Sync + 'static,
{
    registry
        .tools()
        .into_iter()
        .fold(ToolRouter::new(), |router, tool| {
            let registry = registry.clone();
            let name = tool.name.to_string();
            router.with_route(ToolRoute::new_dyn(tool, move |ctx: ToolCallContext<'_, S>| {
                let args = ctx.arguments.clone().unwrap_or_default();
                let registry = registry.clone();
                let name = name.clone();
                async move { registry.call(&name, args).await }.boxed()
            }))
        })
}
