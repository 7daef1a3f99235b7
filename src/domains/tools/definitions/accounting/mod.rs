//! Accounting tools.

pub mod create_entry;
pub mod ratios;
pub mod search_entries;

pub use create_entry::CreateJournalEntryTool;
pub use ratios::AnalyzeFinancialRatiosTool;
pub use search_entries::SearchJournalEntriesTool;

use crate::domains::tools::{ToolError, ToolRegistry};

/// Register the accounting tools.
pub fn register(registry: &mut ToolRegistry) -> Result<(), ToolError> {
    registry.register::<SearchJournalEntriesTool>()?;
    registry.register::<CreateJournalEntryTool>()?;
    registry.register::<AnalyzeFinancialRatiosTool>()?;
    Ok(())
}
