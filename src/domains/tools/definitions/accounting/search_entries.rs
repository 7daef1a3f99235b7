//! Search journal entries tool definition.

use serde_json::{Value as Json, json};
use tracing::instrument;

use crate::core::odoo::{Domain, OdooClient, SearchOptions};
use crate::domains::tools::definitions::common::search_with_count;
use crate::domains::tools::schemas::JournalEntryFilter;
use crate::domains::tools::{OdooTool, ToolError};

const FIELDS: &[&str] = &[
    "name",
    "ref",
    "date",
    "journal_id",
    "state",
    "amount_total",
    "amount_total_signed",
    "line_ids",
];

const LINE_FIELDS: &[&str] = &["name", "account_id", "partner_id", "debit", "credit", "balance"];

/// Search journal entries, expanding each entry's lines.
pub struct SearchJournalEntriesTool;

impl SearchJournalEntriesTool {
    pub fn domain(filter: &JournalEntryFilter) -> Domain {
        let mut domain = Domain::new();
        if let Some(date_from) = &filter.date_from {
            domain.push("date", ">=", date_from.as_str());
        }
        if let Some(date_to) = &filter.date_to {
            domain.push("date", "<=", date_to.as_str());
        }
        if let Some(journal_id) = filter.journal_id {
            domain.push("journal_id", "=", journal_id);
        }
        if let Some(state) = &filter.state {
            domain.push("state", "=", state.as_str());
        }
        domain
    }
}

#[async_trait::async_trait]
impl OdooTool for SearchJournalEntriesTool {
    const NAME: &'static str = "search_journal_entries";
    const DESCRIPTION: &'static str = "Search for journal entries by date range, journal and state, with pagination. Each entry includes its move lines (account, partner, debit, credit, balance).";
    type Params = JournalEntryFilter;

    #[instrument(skip_all, fields(limit = ?params.limit, offset = params.offset))]
    async fn execute(client: &OdooClient, params: JournalEntryFilter) -> Result<Json, ToolError> {
        let domain = Self::domain(&params);
        let options = SearchOptions {
            limit: params.limit,
            ..SearchOptions::fields(FIELDS).offset(params.offset)
        };
        let (mut entries, total_count) =
            search_with_count(client, "account.move", &domain, options).await?;

        for entry in entries.iter_mut() {
            let line_ids = match entry.get("line_ids") {
                Some(Json::Array(ids)) if !ids.is_empty() => ids.clone(),
                _ => continue,
            };
            let lines = client
                .search_read(
                    "account.move.line",
                    &Domain::new().term("id", "in", Json::Array(line_ids)),
                    SearchOptions::fields(LINE_FIELDS),
                )
                .await?;
            entry.remove("line_ids");
            entry.insert("lines".to_string(), json!(lines));
        }

        Ok(json!({
            "count": entries.len(),
            "total_count": total_count,
            "entries": entries,
        }))
    }
}
