//! Search sales orders tool definition.

use serde_json::{Value as Json, json};
use tracing::{debug, instrument};

use crate::core::odoo::{Domain, OdooClient, SearchOptions};
use crate::domains::tools::definitions::common::search_with_count;
use crate::domains::tools::schemas::SalesOrderFilter;
use crate::domains::tools::{OdooTool, ToolError};

const MODEL: &str = "sale.order";

const FIELDS: &[&str] = &[
    "name",
    "partner_id",
    "date_order",
    "amount_total",
    "state",
    "invoice_status",
    "user_id",
    "order_line",
];

/// Search sales orders with optional customer, date and state filters.
pub struct SearchSalesOrdersTool;

impl SearchSalesOrdersTool {
    /// Build the search domain in filter order: customer, dates, state.
    pub fn domain(filter: &SalesOrderFilter) -> Domain {
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
impl OdooTool for SearchSalesOrdersTool {
    const NAME: &'static str = "search_sales_orders";
    const DESCRIPTION: &'static str = "Search for sales orders with advanced filters (customer, date range, state) and pagination. Returns the matching page and the total count.";
    type Params = SalesOrderFilter;

    #[instrument(skip_all, fields(limit = ?params.limit, offset = params.offset))]
    async fn execute(client: &OdooClient, params: SalesOrderFilter) -> Result<Json, ToolError> {
        let domain = Self::domain(&params);
        debug!(terms = domain.len(), "Searching sales orders");

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

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::client::testing::{MockTransport, client};
    use crate::domains::tools::schemas::{args, parse_params};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_date_and_state_filter_issues_one_search_read() {
        let transport = Arc::new(
            MockTransport::new()
                .on(MODEL, "search_read", json!([{ "id": 1, "name": "S00001" }]))
                .on(MODEL, "search_count", json!(1)),
        );
        let client = client(transport.clone());
        let params: SalesOrderFilter = parse_params(args(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-01-31",
            "state": "sale"
        })))
        .unwrap();

        let result = SearchSalesOrdersTool::execute(&client, params).await.unwrap();

        let searches = transport.calls_to(MODEL, "search_read");
        assert_eq!(searches.len(), 1);
        assert_eq!(
            searches[0].args,
            json!([[
                ["date_order", ">=", "2024-01-01"],
                ["date_order", "<=", "2024-01-31"],
                ["state", "=", "sale"]
            ]])
        );
        assert_eq!(searches[0].kwargs["limit"], 20);
        assert_eq!(searches[0].kwargs["offset"], 0);
        assert!(searches[0].kwargs.get("order").is_none());

        assert_eq!(result["count"], 1);
        assert_eq!(result["total_count"], 1);
    }

    #[tokio::test]
    async fn test_total_count_uses_same_domain() {
        let transport = Arc::new(
            MockTransport::new()
                .on(MODEL, "search_read", json!([]))
                .on(MODEL, "search_count", json!(57)),
        );
        let client = client(transport.clone());
        let params: SalesOrderFilter =
            parse_params(args(json!({ "partner_id": 9, "limit": 5, "order": "date_order DESC" })))
                .unwrap();

        let result = SearchSalesOrdersTool::execute(&client, params).await.unwrap();

        let counts = transport.calls_to(MODEL, "search_count");
        assert_eq!(counts[0].args, json!([[["partner_id", "=", 9]]]));
        let search = &transport.calls_to(MODEL, "search_read")[0];
        assert_eq!(search.kwargs["order"], "date_order DESC");
        assert_eq!(result["total_count"], 57);
        assert_eq!(result["count"], 0);
    }

    #[tokio::test]
    async fn test_null_limit_reads_every_match() {
        let transport = Arc::new(
            MockTransport::new()
                .on(MODEL, "search_read", json!([]))
                .on(MODEL, "search_count", json!(0)),
        );
        let client = client(transport.clone());
        let params: SalesOrderFilter = parse_params(args(json!({ "limit": null }))).unwrap();
        assert_eq!(params.limit, None);

        SearchSalesOrdersTool::execute(&client, params).await.unwrap();

        let search = &transport.calls_to(MODEL, "search_read")[0];
        assert!(search.kwargs.get("limit").is_none());
        assert_eq!(search.kwargs["offset"], 0);
    }
}
