//! Financial analysis prompt.

use super::{PromptDefinition, period_argument};
use rmcp::model::PromptArgument;

pub struct FinancialAnalysisPrompt;

impl PromptDefinition for FinancialAnalysisPrompt {
    const NAME: &'static str = "financial_analysis";
    const DESCRIPTION: &'static str = "Performs basic financial analysis";

    fn template() -> &'static str {
        "Perform a financial analysis for the {{#if period}}{{period}}{{else}}last_month{{/if}} period and provide:
- Income statement summary (revenue, expenses, profit)
- Balance sheet summary (assets, liabilities, equity)
- Key financial ratios (liquidity, profitability, debt, efficiency)
- Comparison with the previous period when possible
- Important observations or alerts

Use the 'search_journal_entries' and 'analyze_financial_ratios' tools to obtain the data from Odoo."
    }

    fn arguments() -> Vec<PromptArgument> {
        vec![period_argument("Period, e.g. 'last_month', 'last_quarter' or 'year_to_date'")]
    }
}
