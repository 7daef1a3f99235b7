//! Inventory management prompt.

use super::{PromptDefinition, period_argument};
use rmcp::model::PromptArgument;

pub struct InventoryManagementPrompt;

impl PromptDefinition for InventoryManagementPrompt {
    const NAME: &'static str = "inventory_management";
    const DESCRIPTION: &'static str = "Analyzes inventory status and provides recommendations";

    fn template() -> &'static str {
        "Analyze the current inventory status{{#if period}}, using stock movements over the last {{period}}{{/if}}, and provide information on:
- Low stock products (below the minimum when one is configured)
- Excess stock products (above the maximum, or inactive)
- Current inventory valuation
- Inventory turnover for key products
- Recommendations for adjustments, restocking or stock liquidation

Use the 'check_product_availability' and 'analyze_inventory_turnover' tools to obtain the data from Odoo."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![period_argument("Turnover window, e.g. 'quarter'; defaults to current stock only")]
    }
}
