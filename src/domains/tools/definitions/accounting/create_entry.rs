//! Create journal entry tool definition.

use serde_json::{Value as Json, json};
use tracing::{info, instrument, warn};

use crate::core::odoo::{OdooClient, fields};
use crate::domains::tools::definitions::common::{create_command, read_one, round2};
use crate::domains::tools::schemas::JournalEntryCreate;
use crate::domains::tools::{OdooTool, ToolError};

const MODEL: &str = "account.move";

/// Create a draft journal entry.
///
/// Balance is left to Odoo, which rejects unbalanced moves.
pub struct CreateJournalEntryTool;

impl CreateJournalEntryTool {
    pub fn values(entry: &JournalEntryCreate) -> Json {
        let lines: Vec<Json> = entry
            .lines
            .iter()
            .map(|line| {
                let mut vals = json!({
                    "account_id": line.account_id,
                    "name": line.name.as_deref().unwrap_or("/"),
                    "debit": line.debit,
                    "credit": line.credit,
                });
                if let Some(partner_id) = line.partner_id {
                    vals["partner_id"] = json!(partner_id);
                }
                create_command(vals)
            })
            .collect();

        let mut values = json!({
            "journal_id": entry.journal_id,
            "line_ids": lines,
        });
        if let Some(reference) = &entry.r#ref {
            values["ref"] = json!(reference);
        }
        if let Some(date) = &entry.date {
            values["date"] = json!(date);
        }
        values
    }
}

#[async_trait::async_trait]
impl OdooTool for CreateJournalEntryTool {
    const NAME: &'static str = "create_journal_entry";
    const DESCRIPTION: &'static str = "Create a new journal entry in the given journal. Lines default to a '/' label and zero debit/credit; Odoo rejects entries whose debits and credits do not balance.";
    type Params = JournalEntryCreate;

    #[instrument(skip_all, fields(journal_id = params.journal_id, lines = params.lines.len()))]
    async fn execute(client: &OdooClient, params: JournalEntryCreate) -> Result<Json, ToolError> {
        let (debit, credit) = params.totals();
        if round2(debit) != round2(credit) {
            warn!(debit, credit, "Journal entry is not balanced; Odoo will likely reject it");
        }

        let move_id = client.create(MODEL, Self::values(&params)).await?;
        let record = read_one(client, MODEL, move_id, &["name", "state"]).await?;

        info!(move_id, "Journal entry created");
        Ok(json!({
            "move_id": move_id,
            "name": fields::text(&record, "name").unwrap_or_default(),
            "state": fields::text(&record, "state").unwrap_or_default(),
        }))
    }
}
