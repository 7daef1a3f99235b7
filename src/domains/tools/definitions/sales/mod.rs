//! Sales tools: order search, order creation and performance analysis.

pub mod create_order;
pub mod performance;
pub mod search_orders;

pub use create_order::CreateSalesOrderTool;
pub use performance::AnalyzeSalesPerformanceTool;
pub use search_orders::SearchSalesOrdersTool;

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register the sales tools.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry.register::<SearchSalesOrdersTool>()?;
    registry.register::<CreateSalesOrderTool>()?;
    registry.register::<AnalyzeSalesPerformanceTool>()?;
    Ok(())
}
