//! Search purchase orders tool definition.

use serde_json::{Value as Json, json};
use tracing::instrument;

use crate::core::odoo::{Domain, OdooClient, SearchOptions};
use crate::domains::tools::definitions::common::search_with_count;
use crate::domains::tools::schemas::PurchaseOrderFilter;
use crate::domains::tools::{OdooTool, ToolError};

const MODEL: &str = "purchase.order";

const FIELDS: &[&str] = &[
    "name",
    "partner_id",
    "date_order",
    "date_planned",
    "amount_total",
    "state",
    "invoice_status",
    "user_id",
    "order_line",
];

/// Search purchase orders with optional supplier, date and state filters.
pub struct SearchPurchaseOrdersTool;

impl SearchPurchaseOrdersTool {
    pub fn domain(filter: &PurchaseOrderFilter) -> Domain {
        let mut domain = Domain::new();
        if let Some(partner_id) = filter.partner_id {
            domain.push("partner_id", "=", partner_id);
        }
        if let Some(date_from) = &filter.date_from {
            domain.push("date_order", ">=", date_from.as_str());
        }
        if let Some(date_to) = &filter.date_to {
            domain.push("date_order", "<=", date_to.as_str());
        }
        if let Some(state) = &filter.state {
            domain.push("state", "=", state.as_str());
        }
        domain
    }
}

#[async_trait::async_trait]
impl OdooTool for SearchPurchaseOrdersTool {
    const NAME: &'static str = "search_purchase_orders";
    const DESCRIPTION: &'static str = "Search for purchase orders with filters (supplier, date range, state) and pagination. Returns the matching page and the total count.";
    type Params = PurchaseOrderFilter;

    #[instrument(skip_all, fields(limit = ?params.limit, offset = params.offset))]
    async fn execute(client: &OdooClient, params: PurchaseOrderFilter) -> Result<Json, ToolError> {
        let domain = Self::domain(&params);
        let options = SearchOptions {
            limit: params.limit,
            ..SearchOptions::fields(FIELDS).offset(params.offset).order(params.order)
        };
        let (orders, total_count) = search_with_count(client, MODEL, &domain, options).await?;

        Ok(json!({
            "count": orders.len(),
            "total_count": total_count,
            "orders": orders,
        }))
    }
}
