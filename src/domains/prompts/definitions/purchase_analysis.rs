//! Purchase analysis prompt.

use super::PromptDefinition;

pub struct PurchaseAnalysisPrompt;

impl PromptDefinition for PurchaseAnalysisPrompt {
    const NAME: &'static str = "purchase_analysis";
    const DESCRIPTION: &'static str = "Analyzes purchase orders and supplier performance";

    fn template() -> &'static str {
        "Analyze purchases made in the last {{#if period}}{{period}}{{else}}month{{/if}} and provide insights on:
- Most purchased products (top 5)
- Key suppliers (top 5 by volume and value)
- Purchase trends
- Average delivery delay and on-time rate by supplier
- Recommendations to optimize purchasing or negotiate with suppliers

Use the 'search_purchase_orders' and 'analyze_supplier_performance' tools to obtain the data from Odoo."
    }
}
