//! Tool Registry - central registration and dispatch for all tools.
//!
//! The registry maps each tool name to its metadata and a type-erased
//! handler. Both transports go through [`ToolRegistry::call`]: the rmcp
//! router for STDIO and the JSON-RPC endpoint for HTTP.

use std::collections::BTreeMap;
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use rmcp::ErrorData as McpError;
use rmcp::model::{CallToolResult, JsonObject, Tool};
use tracing::{info, warn};

use super::error::ToolError;
use super::handlers::{OdooTool, ToolOutput};
use super::schemas::parse_params;
use crate::core::odoo::OdooClient;

type Handler =
    Arc<dyn Fn(Arc<OdooClient>, JsonObject) -> BoxFuture<'static, Result<CallToolResult, McpError>> + Send + Sync>;

struct ToolEntry {
    tool: Tool,
    handler: Handler,
}

/// Tool registry - manages all available tools.
pub struct ToolRegistry {
    client: Arc<OdooClient>,
    tools: BTreeMap<String, ToolEntry>,
}

impl ToolRegistry {
    /// Create an empty registry bound to an Odoo client.
    pub fn new(client: Arc<OdooClient>) -> Self {
        Self {
            client,
            tools: BTreeMap::new(),
        }
    }

    /// Register a tool; a second tool with the same name is rejected.
    pub fn register<T: OdooTool>(&mut self) -> Result<(), ToolError> {
        if self.tools.contains_key(T::NAME) {
            return Err(ToolError::AlreadyRegistered(T::NAME.to_string()));
        }

        let handler: Handler = Arc::new(|client: Arc<OdooClient>, arguments: JsonObject| {
            dispatch::<T>(client, arguments).boxed()
        });
        self.tools.insert(
            T::NAME.to_string(),
            ToolEntry {
                tool: T::to_tool(),
                handler,
            },
        );
        info!("Registered tool: {}", T::NAME);
        Ok(())
    }

    /// Get all tool names, sorted.
    pub fn tool_names(&self) -> Vec<&str> {
        self.tools.keys().map(String::as_str).collect()
    }

    /// Get all tools as Tool models (metadata).
    pub fn tools(&self) -> Vec<Tool> {
        self.tools.values().map(|entry| entry.tool.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Dispatch a call to the named tool.
    ///
    /// Validation failures surface as MCP `invalid_params`; every other
    /// failure is returned as an error envelope with `is_error` set.
    pub async fn call(&self, name: &str, arguments: JsonObject) -> Result<CallToolResult, McpError> {
        let Some(entry) = self.tools.get(name) else {
            warn!("Unknown tool requested: {}", name);
            return Err(McpError::invalid_params(
                ToolError::UnknownTool(name.to_string()).to_string(),
                None,
            ));
        };
        (entry.handler)(self.client.clone(), arguments).await
    }
}

async fn dispatch<T: OdooTool>(
    client: Arc<OdooClient>,
    arguments: JsonObject,
) -> Result<CallToolResult, McpError> {
    let params: T::Params = parse_params(arguments).map_err(|err| {
        warn!(tool = T::NAME, "Rejected arguments: {}", err);
        err.into_mcp_error()
    })?;

    info!(tool = T::NAME, "Tool called");
    match T::execute(&client, params).await {
        Ok(result) => Ok(ToolOutput::success(result).into_call_result()),
        Err(err) => {
            warn!(tool = T::NAME, kind = err.kind(), "Tool failed: {}", err);
            Ok(ToolOutput::failure(&err).into_call_result())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::client::testing::{MockTransport, client};
    use crate::domains::tools::schemas::ExecuteMethodInput;
    use serde_json::{Value as Json, json};

    struct PingTool;

    #[async_trait::async_trait]
    impl OdooTool for PingTool {
        const NAME: &'static str = "ping";
        const DESCRIPTION: &'static str = "Count partners";
        type Params = ExecuteMethodInput;

        async fn execute(client: &OdooClient, params: Self::Params) -> Result<Json, ToolError> {
            Ok(client.call(&params.model, &params.method, params.args).await?)
        }
    }

    fn registry(transport: MockTransport) -> ToolRegistry {
        let mut registry = ToolRegistry::new(Arc::new(client(Arc::new(transport))));
        registry.register::<PingTool>().unwrap();
        registry
    }

    fn object(value: Json) -> JsonObject {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn test_duplicate_registration_rejected() {
        let mut registry = registry(MockTransport::new());
        let err = registry.register::<PingTool>().unwrap_err();
        assert!(matches!(err, ToolError::AlreadyRegistered(name) if name == "ping"));
        assert_eq!(registry.len(), 1);
    }

    #[tokio::test]
    async fn test_call_success() {
        let registry = registry(MockTransport::new().on("res.partner", "search_count", json!(5)));
        let result = registry
            .call("ping", object(json!({ "model": "res.partner", "method": "search_count" })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(false));
        assert_eq!(result.structured_content.unwrap()["result"], 5);
    }

    #[tokio::test]
    async fn test_validation_error_is_invalid_params() {
        let transport = Arc::new(MockTransport::new());
        let mut registry = ToolRegistry::new(Arc::new(client(transport.clone())));
        registry.register::<PingTool>().unwrap();

        let err = registry
            .call("ping", object(json!({ "method": "read" })))
            .await
            .unwrap_err();
        assert_eq!(err.code, rmcp::model::ErrorCode::INVALID_PARAMS);
        assert_eq!(err.data.unwrap()["errors"][0]["field"], "model");
        assert!(transport.calls().is_empty());
        assert_eq!(transport.auth_calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_failure_is_error_envelope() {
        let registry = registry(MockTransport::new().once(
            "res.partner",
            "unlink",
            Err(crate::core::odoo::OdooError::Remote {
                code: "2".to_string(),
                message: "Record is referenced".to_string(),
            }),
        ));
        let result = registry
            .call("ping", object(json!({ "model": "res.partner", "method": "unlink", "args": [[1]] })))
            .await
            .unwrap();
        assert_eq!(result.is_error, Some(true));
        let structured = result.structured_content.unwrap();
        assert_eq!(structured["error"]["kind"], "remote_operation");
        assert_eq!(structured["error"]["message"], "Record is referenced");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = registry(MockTransport::new());
        assert!(registry.call("nope", JsonObject::new()).await.is_err());
    }
}
