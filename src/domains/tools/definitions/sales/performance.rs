//! Sales performance analysis tool definition.

use serde_json::{Map, Value as Json, json};
use tracing::{debug, instrument};

use crate::core::odoo::{Domain, OdooClient, SearchOptions, fields};
use crate::domains::tools::definitions::common::{
    date_arg, format_date, group_totals, previous_period, round2, sum_field,
};
use crate::domains::tools::schemas::{GroupBy, SalesPerformanceInput};
use crate::domains::tools::{OdooTool, ToolError};

const TOP: usize = 10;

/// Totals for a period compared to the preceding period of equal length,
/// optionally broken down by product, customer or salesperson.
pub struct AnalyzeSalesPerformanceTool;

fn confirmed_orders(from: &str, to: &str) -> Domain {
    Domain::new()
        .term("date_order", ">=", from)
        .term("date_order", "<=", to)
        .term("state", "in", json!(["sale", "done"]))
}

/// Percentage change, 0 when there is nothing to compare against.
pub fn percent_change(current: f64, previous: f64) -> f64 {
    if previous > 0.0 {
        round2((current - previous) / previous * 100.0)
    } else {
        0.0
    }
}

#[async_trait::async_trait]
impl OdooTool for AnalyzeSalesPerformanceTool {
    const NAME: &'static str = "analyze_sales_performance";
    const DESCRIPTION: &'static str = "Analyze confirmed sales over a period: totals, change versus the previous period of equal length, and an optional breakdown by 'product', 'customer' or 'salesperson'.";
    type Params = SalesPerformanceInput;

    #[instrument(skip_all, fields(from = %params.date_from, to = %params.date_to))]
    async fn execute(client: &OdooClient, params: SalesPerformanceInput) -> Result<Json, ToolError> {
        let (prev_from, prev_to) =
            previous_period(date_arg(&params.date_from)?, date_arg(&params.date_to)?)?;
        let (prev_from, prev_to) = (format_date(prev_from), format_date(prev_to));

        let orders = client
            .search_read(
                "sale.order",
                &confirmed_orders(&params.date_from, &params.date_to),
                SearchOptions::fields(&["name", "partner_id", "date_order", "amount_total", "user_id"]),
            )
            .await?;
        let previous = client
            .search_read(
                "sale.order",
                &confirmed_orders(&prev_from, &prev_to),
                SearchOptions::fields(&["amount_total"]),
            )
            .await?;
        debug!(current = orders.len(), previous = previous.len(), "Loaded orders");

        let current_total = sum_field(&orders, "amount_total");
        let previous_total = sum_field(&previous, "amount_total");

        let mut grouped = Map::new();
        match params.group_by {
            Some(GroupBy::Product) => {
                let order_ids: Vec<i64> = orders.iter().filter_map(|o| fields::int(o, "id")).collect();
                if !order_ids.is_empty() {
                    let lines = client
                        .search_read(
                            "sale.order.line",
                            &Domain::new().term("order_id", "in", json!(order_ids)),
                            SearchOptions::fields(&["product_id", "product_uom_qty", "price_subtotal"]),
                        )
                        .await?;
                    let mut products =
                        group_totals(&lines, "product_id", "price_subtotal", Some("product_uom_qty"));
                    products.truncate(TOP);
                    grouped.insert("products".to_string(), json!(products));
                }
            }
            Some(GroupBy::Customer) => {
                let mut customers = group_totals(&orders, "partner_id", "amount_total", None);
                customers.truncate(TOP);
                grouped.insert("customers".to_string(), json!(customers));
            }
            Some(GroupBy::Salesperson) => {
                let salespersons = group_totals(&orders, "user_id", "amount_total", None);
                grouped.insert("salespersons".to_string(), json!(salespersons));
            }
            None => {}
        }

        let mut result = json!({
            "period": { "from": params.date_from, "to": params.date_to },
            "summary": {
                "order_count": orders.len(),
                "total_amount": current_total,
                "previous_period": {
                    "from": prev_from,
                    "to": prev_to,
                    "order_count": previous.len(),
                    "total_amount": previous_total,
                },
                "percent_change": percent_change(current_total, previous_total),
            },
        });
        if !grouped.is_empty() {
            result["grouped_data"] = Json::Object(grouped);
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::client::testing::{MockTransport, client};
    use std::sync::Arc;

    fn input(group_by: Option<GroupBy>) -> SalesPerformanceInput {
        SalesPerformanceInput {
            date_from: "2024-04-01".to_string(),
            date_to: "2024-04-30".to_string(),
            group_by,
        }
    }

    fn transport() -> MockTransport {
        MockTransport::new().on_with("sale.order", "search_read", |call| {
            if call.args[0][0][2] == "2024-04-01" {
                Ok(json!([
                    { "id": 1, "partner_id": [3, "Gemini Furniture"], "user_id": [2, "Mitchell Admin"], "amount_total": 600.0 },
                    { "id": 2, "partner_id": [4, "Deco Addict"], "user_id": [2, "Mitchell Admin"], "amount_total": 200.0 }
                ]))
            } else {
                Ok(json!([{ "id": 9, "amount_total": 400.0 }]))
            }
        })
    }

    #[test]
    fn test_percent_change() {
        assert_eq!(percent_change(150.0, 100.0), 50.0);
        assert_eq!(percent_change(100.0, 0.0), 0.0);
        assert_eq!(percent_change(100.0, 300.0), -66.67);
    }

    #[tokio::test]
    async fn test_compares_with_previous_period() {
        let transport = Arc::new(transport());
        let client = client(transport.clone());

        let result = AnalyzeSalesPerformanceTool::execute(&client, input(None)).await.unwrap();

        let searches = transport.calls_to("sale.order", "search_read");
        assert_eq!(searches.len(), 2);
        assert_eq!(
            searches[1].args[0],
            json!([
                ["date_order", ">=", "2024-03-02"],
                ["date_order", "<=", "2024-03-31"],
                ["state", "in", ["sale", "done"]]
            ])
        );
        assert_eq!(result["summary"]["total_amount"], 800.0);
        assert_eq!(result["summary"]["previous_period"]["total_amount"], 400.0);
        assert_eq!(result["summary"]["percent_change"], 100.0);
        assert!(result.get("grouped_data").is_none());
    }

    #[tokio::test]
    async fn test_group_by_customer() {
        let client = client(Arc::new(transport()));
        let result = AnalyzeSalesPerformanceTool::execute(&client, input(Some(GroupBy::Customer)))
            .await
            .unwrap();

        let customers = result["grouped_data"]["customers"].as_array().unwrap();
        assert_eq!(customers.len(), 2);
        assert_eq!(customers[0]["name"], "Gemini Furniture");
        assert_eq!(customers[0]["order_count"], 1);
    }

    #[tokio::test]
    async fn test_group_by_product_reads_lines() {
        let transport = Arc::new(transport().on(
            "sale.order.line",
            "search_read",
            json!([
                { "product_id": [11, "Office Chair"], "product_uom_qty": 4.0, "price_subtotal": 480.0 },
                { "product_id": [12, "Desk"], "product_uom_qty": 1.0, "price_subtotal": 320.0 }
            ]),
        ));
        let client = client(transport.clone());

        let result = AnalyzeSalesPerformanceTool::execute(&client, input(Some(GroupBy::Product)))
            .await
            .unwrap();

        let lines = transport.calls_to("sale.order.line", "search_read");
        assert_eq!(lines[0].args, json!([[["order_id", "in", [1, 2]]]]));
        let products = result["grouped_data"]["products"].as_array().unwrap();
        assert_eq!(products[0]["name"], "Office Chair");
        assert_eq!(products[0]["quantity"], 4.0);
    }
}
