//! Accounting inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Checks, Validate, ValidationError, default_limit};

/// Journal entry line for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JournalEntryLineCreate {
    /// Account ID
    pub account_id: i64,

    /// Partner ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<i64>,

    /// Line label (defaults to '/')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Debit amount
    #[serde(default)]
    pub debit: f64,

    /// Credit amount
    #[serde(default)]
    pub credit: f64,
}

/// Data to create a journal entry.
///
/// Debits and credits are not required to balance here; Odoo refuses
/// unbalanced moves itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JournalEntryCreate {
    /// Entry reference
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub r#ref: Option<String>,

    /// Journal ID
    pub journal_id: i64,

    /// Accounting date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,

    /// Entry lines
    pub lines: Vec<JournalEntryLineCreate>,
}

impl JournalEntryCreate {
    /// Sum of debits and sum of credits.
    pub fn totals(&self) -> (f64, f64) {
        self.lines
            .iter()
            .fold((0.0, 0.0), |(d, c), line| (d + line.debit, c + line.credit))
    }
}

impl Validate for JournalEntryCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date", self.date.as_deref())
            .finish()
    }
}

/// Filters for searching journal entries.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct JournalEntryFilter {
    /// Start date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    /// Filter by journal ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub journal_id: Option<i64>,

    /// Entry state (e.g. 'draft', 'posted')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Maximum number of entries returned
    #[serde(default = "default_limit")]
    pub limit: Option<u32>,

    /// Pagination offset
    #[serde(default)]
    pub offset: u32,
}

impl Validate for JournalEntryFilter {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date_from", self.date_from.as_deref())
            .optional_date("date_to", self.date_to.as_deref())
            .finish()
    }
}

/// Ratio family computed by `analyze_financial_ratios`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum Ratio {
    Liquidity,
    Profitability,
    Debt,
    Efficiency,
}

impl Ratio {
    pub fn as_str(&self) -> &'static str {
        match self {
            Ratio::Liquidity => "liquidity",
            Ratio::Profitability => "profitability",
            Ratio::Debt => "debt",
            Ratio::Efficiency => "efficiency",
        }
    }
}

/// Parameters for financial ratio calculation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct FinancialRatioInput {
    /// Start date (YYYY-MM-DD)
    pub date_from: String,

    /// End date (YYYY-MM-DD)
    pub date_to: String,

    /// Ratio families: 'liquidity', 'profitability', 'debt', 'efficiency'
    pub ratios: Vec<Ratio>,
}

impl Validate for FinancialRatioInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .date("date_from", &self.date_from)
            .date("date_to", &self.date_to)
            .finish()
    }
}
