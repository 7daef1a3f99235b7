//! Inventory tools: availability, adjustments and turnover analysis.

pub mod adjustment;
pub mod availability;
pub mod turnover;

pub use adjustment::CreateInventoryAdjustmentTool;
pub use availability::CheckProductAvailabilityTool;
pub use turnover::AnalyzeInventoryTurnoverTool;

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register the inventory tools.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry.register::<CheckProductAvailabilityTool>()?;
    registry.register::<CreateInventoryAdjustmentTool>()?;
    registry.register::<AnalyzeInventoryTurnoverTool>()?;
    Ok(())
}
