//! Generic model method call.

use serde_json::Value as Json;
use tracing::instrument;

use crate::core::odoo::OdooClient;
use crate::domains::tools::schemas::ExecuteMethodInput;
use crate::domains::tools::{OdooTool, ToolError};

/// Call any method on any model through `execute_kw`.
pub struct ExecuteMethodTool;

#[async_trait::async_trait]
impl OdooTool for ExecuteMethodTool {
    const NAME: &'static str = "execute_method";
    const DESCRIPTION: &'static str = "Execute an arbitrary method on an Odoo model with positional args and keyword args. The raw method result is returned unchanged.";
    type Params = ExecuteMethodInput;

    #[instrument(skip_all, fields(model = %params.model, method = %params.method))]
    async fn execute(client: &OdooClient, params: ExecuteMethodInput) -> Result<Json, ToolError> {
        let result = client
            .execute_kw(
                &params.model,
                &params.method,
                params.args,
                params.kwargs.unwrap_or_default(),
            )
            .await?;
        Ok(result)
    }
}
