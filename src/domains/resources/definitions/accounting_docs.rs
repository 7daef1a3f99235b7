//! Accounting documentation resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Accounting models, entry states and tools.
pub struct AccountingDocsResource;

impl ResourceDefinition for AccountingDocsResource {
    const URI: &'static str = "odoo://docs/accounting";
    const NAME: &'static str = "Accounting Documentation";
    const DESCRIPTION: &'static str = "Accounting models, entry states and tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Accounting

## Models

- `account.move`: journal entries and invoices
- `account.move.line`: journal items with `debit`, `credit` and `balance`
- `account.journal`: journals
- `account.account`: chart of accounts; the account type's `internal_group` is one of `asset`, `liability`, `equity`, `income`, `expense`

## Entry states

| State | Meaning |
|---|---|
| `draft` | Unposted |
| `posted` | Posted |
| `cancel` | Cancelled |

## Tools

- `search_journal_entries`: filter by date range, journal and state; each entry includes its lines
- `create_journal_entry`: create a draft entry; debits and credits must balance or Odoo rejects it
- `analyze_financial_ratios`: liquidity, profitability, debt and efficiency ratios from posted items over a period"#;

