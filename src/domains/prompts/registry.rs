//! Prompt Registry - central registration of all prompts.
//!
//! When adding a new prompt:
//! 1. Create the prompt file in `definitions/`
//! 2. Export it in `definitions/mod.rs`
//! 3. Register it here in `register_all_prompts()`

use super::definitions::{
    FinancialAnalysisPrompt, InventoryManagementPrompt, PromptDefinition, PurchaseAnalysisPrompt,
    SalesAnalysisPrompt,
};
use super::error::PromptError;
use super::service::PromptService;
use super::templates::PromptTemplate;

/// Build a PromptTemplate from a PromptDefinition.
fn build_template<P: PromptDefinition>() -> PromptTemplate {
    PromptTemplate::new(
        P::NAME,
        Some(P::DESCRIPTION.to_string()),
        P::arguments(),
        P::template(),
    )
}

/// Register every prompt, stopping at the first duplicate.
pub fn register_all_prompts(service: &mut PromptService) -> Result<(), PromptError> {
    service.register_prompt(build_template::<SalesAnalysisPrompt>())?;
    service.register_prompt(build_template::<PurchaseAnalysisPrompt>())?;
    service.register_prompt(build_template::<InventoryManagementPrompt>())?;
    service.register_prompt(build_template::<FinancialAnalysisPrompt>())?;
    Ok(())
}

/// Get the list of all prompt names.
pub fn prompt_names() -> Vec<&'static str> {
    vec![
        SalesAnalysisPrompt::NAME,
        PurchaseAnalysisPrompt::NAME,
        InventoryManagementPrompt::NAME,
        FinancialAnalysisPrompt::NAME,
    ]
}
