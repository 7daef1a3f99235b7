//! Tool definitions, grouped by business area.
//!
//! Each area exposes a `register` function; [`register_all_tools`] wires
//! them all into a [`ToolRegistry`].

pub mod accounting;
pub mod common;
pub mod execute_method;
pub mod inventory;
pub mod purchase;
pub mod sales;

pub use accounting::{AnalyzeFinancialRatiosTool, CreateJournalEntryTool, SearchJournalEntriesTool};
pub use execute_method::ExecuteMethodTool;
pub use inventory::{
    AnalyzeInventoryTurnoverTool, CheckProductAvailabilityTool, CreateInventoryAdjustmentTool,
};
pub use purchase::{AnalyzeSupplierPerformanceTool, CreatePurchaseOrderTool, SearchPurchaseOrdersTool};
pub use sales::{AnalyzeSalesPerformanceTool, CreateSalesOrderTool, SearchSalesOrdersTool};

use super::{ToolError, ToolRegistry};

/// Register every tool, stopping at the first failure.
pub fn register_all_tools(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    sales::register(registry)?;
    purchase::register(registry)?;
    inventory::register(registry)?;
    accounting::register(registry)?;
    registry.register::<ExecuteMethodTool>()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::client::testing::{MockTransport, client};
    use std::sync::Arc;

    #[test]
    fn test_register_all_tools() {
        let mut registry = ToolRegistry::new(Arc::new(client(Arc::new(MockTransport::new()))));
        register_all_tools(&mut registry).unwrap();

        let names = registry.tool_names();
        for name in [
            "search_sales_orders",
            "create_sales_order",
            "analyze_sales_performance",
            "search_purchase_orders",
            "create_purchase_order",
            "analyze_supplier_performance",
            "check_product_availability",
            "create_inventory_adjustment",
            "analyze_inventory_turnover",
            "search_journal_entries",
            "create_journal_entry",
            "analyze_financial_ratios",
            "execute_method",
        ] {
            assert!(names.contains(&name), "missing {name}");
        }
    }

    #[test]
    fn test_second_registration_fails() {
        let mut registry = ToolRegistry::new(Arc::new(client(Arc::new(MockTransport::new()))));
        register_all_tools(&mut registry).unwrap();

        let err = register_all_tools(&mut registry).unwrap_err();
        assert_eq!(err.kind(), "already_registered");
        assert_eq!(registry.len(), 13);
    }
}
