//! Sales analysis prompt.

use super::PromptDefinition;

pub struct SalesAnalysisPrompt;

impl PromptDefinition for SalesAnalysisPrompt {
    const NAME: &'static str = "sales_analysis";
    const DESCRIPTION: &'static str = "Analyzes sales for a specific period and provides key insights";

    fn template() -> &'static str {
        "Analyze sales from the last {{#if period}}{{period}}{{else}}month{{/if}} and provide insights on:
- Top-selling products (top 5)
- Key customers (top 5)
- Sales trends, compared with the previous period when possible
- Performance by salesperson, if applicable
- Actionable recommendations to improve sales

Use the 'analyze_sales_performance', 'search_sales_orders' and 'execute_method' tools to obtain the data from Odoo."
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sales_analysis_metadata() {
        assert_eq!(SalesAnalysisPrompt::NAME, "sales_analysis");
        let args = SalesAnalysisPrompt::arguments();
        assert_eq!(args.len(), 1);
        assert_eq!(args[0].name, "period");
        assert_eq!(args[0].required, Some(false));
        assert!(SalesAnalysisPrompt::template().contains("search_sales_orders"));
    }
}
