//! Tool handler trait and result envelope.
//!
//! Every Odoo tool is a unit struct implementing [`OdooTool`]: a name, a
//! description, a typed params record and an async `execute`. The registry
//! turns that into an rmcp `Tool` plus a dispatch closure.

use rmcp::model::{CallToolResult, Content, Tool};
use rmcp::handler::server::tool::cached_schema_for_type;
use schemars::JsonSchema;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value as Json;

use super::error::ToolError;
use super::schemas::Validate;
use crate::core::odoo::OdooClient;

/// An operation exposed to MCP clients.
#[async_trait::async_trait]
pub trait OdooTool: Send + Sync + 'static {
    /// Tool name as registered in MCP.
    const NAME: &'static str;

    /// Tool description shown to clients.
    const DESCRIPTION: &'static str;

    /// Validated input record.
    type Params: DeserializeOwned + JsonSchema + Validate + Send + 'static;

    /// Run the operation against Odoo.
    async fn execute(client: &OdooClient, params: Self::Params) -> Result<Json, ToolError>;

    /// Tool metadata with the JSON schema of `Params`.
    fn to_tool() -> Tool {
        Tool {
            name: Self::NAME.into(),
            description: Some(Self::DESCRIPTION.into()),
            input_schema: cached_schema_for_type::<Self::Params>(),
            annotations: None,
            output_schema: None,
            icons: None,
            meta: None,
            title: None,
        }
    }
}

/// Error half of the envelope.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolFailure {
    pub kind: String,
    pub message: String,
}

/// Output from a tool execution: `{"success": true, "result": ...}` or
/// `{"success": false, "error": {"kind", "message"}}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolOutput {
    /// Whether the execution was successful.
    pub success: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Json>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ToolFailure>,
}

impl ToolOutput {
    /// Create a successful tool output.
    pub fn success(result: Json) -> Self {
        Self {
            success: true,
            result: Some(result),
            error: None,
        }
    }

    /// Create a failed tool output.
    pub fn failure(error: &ToolError) -> Self {
        Self {
            success: false,
            result: None,
            error: Some(ToolFailure {
                kind: error.kind().to_string(),
                message: error.to_string(),
            }),
        }
    }

    /// Render as an MCP result: pretty JSON text plus structured content.
    pub fn into_call_result(self) -> CallToolResult {
        let structured = serde_json::to_value(&self).unwrap_or(Json::Null);
        let text = serde_json::to_string_pretty(&structured).unwrap_or_default();

        CallToolResult {
            content: vec![Content::text(text)],
            structured_content: Some(structured),
            is_error: Some(!self.success),
            meta: None,
        }
    }
}
