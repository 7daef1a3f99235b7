//! Prompt definitions, one per business area.
//!
//! Each prompt takes a single optional `period` argument and points the
//! model at the tools that fetch the data it needs.

mod financial_analysis;
mod inventory_management;
mod purchase_analysis;
mod sales_analysis;

pub use financial_analysis::FinancialAnalysisPrompt;
pub use inventory_management::InventoryManagementPrompt;
pub use purchase_analysis::PurchaseAnalysisPrompt;
pub use sales_analysis::SalesAnalysisPrompt;

use rmcp::model::PromptArgument;

/// Trait for prompt definitions.
pub trait PromptDefinition {
    /// The unique name of the prompt.
    const NAME: &'static str;

    /// A description of what the prompt does.
    const DESCRIPTION: &'static str;

    /// The template text.
    fn template() -> &'static str;

    /// The arguments this prompt accepts.
    fn arguments() -> Vec<PromptArgument> {
        vec![period_argument("Analysis period, e.g. 'month', 'quarter' or 'year'")]
    }
}

/// The optional `period` argument shared by all prompts.
pub(crate) fn period_argument(description: &str) -> PromptArgument {
    PromptArgument {
        name: "period".to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(false),
    }
}
