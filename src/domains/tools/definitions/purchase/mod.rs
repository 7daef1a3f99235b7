//! Purchase tools.

pub mod create_order;
pub mod search_orders;
pub mod supplier_performance;

pub use create_order::CreatePurchaseOrderTool;
pub use search_orders::SearchPurchaseOrdersTool;
pub use supplier_performance::AnalyzeSupplierPerformanceTool;

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register the purchase tools.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry.register::<SearchPurchaseOrdersTool>()?;
    registry.register::<CreatePurchaseOrderTool>()?;
    registry.register::<AnalyzeSupplierPerformanceTool>()?;
    Ok(())
}
