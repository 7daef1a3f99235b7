//! Inventory turnover analysis tool definition.

use serde::Serialize;
use serde_json::{Value as Json, json};
use tracing::{debug, instrument, warn};

use crate::core::odoo::{Domain, OdooClient, OdooError, Record, SearchOptions, fields};
use crate::domains::tools::definitions::common::{date_arg, days_in_period, is_remote_rejection};
use crate::domains::tools::schemas::InventoryTurnoverInput;
use crate::domains::tools::{OdooTool, ToolError};

const PRODUCT: &str = "product.product";

/// Turnover figures for one product.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProductTurnover {
    pub id: i64,
    pub name: String,
    pub default_code: Option<String>,
    pub category: String,
    pub cogs: f64,
    pub avg_inventory_value: f64,
    pub turnover_ratio: f64,
    pub days_inventory: f64,
}

/// Turnover ratio and days of inventory for a period of `days` days.
pub fn turnover(cogs: f64, avg_inventory_value: f64, days: i64) -> (f64, f64) {
    if avg_inventory_value <= 0.0 {
        return (0.0, 0.0);
    }
    let turnover_ratio = cogs / avg_inventory_value;
    let days_inventory = if turnover_ratio > 0.0 {
        days as f64 / turnover_ratio
    } else {
        0.0
    };
    (turnover_ratio, days_inventory)
}

/// Turnover of storable products over a period.
pub struct AnalyzeInventoryTurnoverTool;

impl AnalyzeInventoryTurnoverTool {
    /// Read one numeric field as of a date (`to_date` context).
    async fn value_at(
        client: &OdooClient,
        product_id: i64,
        field: &str,
        date: &str,
    ) -> Result<f64, OdooError> {
        let rows = client
            .read(PRODUCT, &[product_id], &[field], Some(json!({ "to_date": date })))
            .await?;
        Ok(rows.first().map(|r| fields::float(r, field)).unwrap_or(0.0))
    }

    /// Average of the stock valuation at period start and end, or of the
    /// on-hand quantity times the standard price when Odoo rejects
    /// `stock_value`.
    async fn average_inventory_value(
        client: &OdooClient,
        product: &Record,
        product_id: i64,
        params: &InventoryTurnoverInput,
    ) -> Result<f64, ToolError> {
        let valuation = async {
            let start = Self::value_at(client, product_id, "stock_value", &params.date_from).await?;
            let end = Self::value_at(client, product_id, "stock_value", &params.date_to).await?;
            Ok::<_, OdooError>((start + end) / 2.0)
        }
        .await;

        match valuation {
            Ok(value) => Ok(value),
            Err(err) if is_remote_rejection(&err) => {
                warn!(product_id, "stock_value unavailable, estimating from quantities: {}", err);
                let start = Self::value_at(client, product_id, "qty_available", &params.date_from).await?;
                let end = Self::value_at(client, product_id, "qty_available", &params.date_to).await?;
                Ok((start + end) / 2.0 * fields::float(product, "standard_price"))
            }
            Err(err) => Err(err.into()),
        }
    }

    async fn cogs(
        client: &OdooClient,
        product: &Record,
        product_id: i64,
        params: &InventoryTurnoverInput,
    ) -> Result<f64, ToolError> {
        let domain = Domain::new()
            .term("product_id", "=", product_id)
            .term("date", ">=", params.date_from.as_str())
            .term("date", "<=", params.date_to.as_str())
            .term("location_dest_id.usage", "=", "customer");
        let moves = client
            .search_read("stock.move", &domain, SearchOptions::fields(&["product_uom_qty", "price_unit"]))
            .await?;

        let standard_price = fields::float(product, "standard_price");
        Ok(moves
            .iter()
            .map(|m| {
                let price = match fields::float(m, "price_unit") {
                    p if p != 0.0 => p,
                    _ => standard_price,
                };
                fields::float(m, "product_uom_qty") * price
            })
            .sum())
    }
}

#[async_trait::async_trait]
impl OdooTool for AnalyzeInventoryTurnoverTool {
    const NAME: &'static str = "analyze_inventory_turnover";
    const DESCRIPTION: &'static str = "Calculate inventory turnover for storable products over a period: cost of goods sold, average inventory value, turnover ratio and days of inventory, optionally filtered by products or category.";
    type Params = InventoryTurnoverInput;

    #[instrument(skip_all, fields(from = %params.date_from, to = %params.date_to))]
    async fn execute(client: &OdooClient, params: InventoryTurnoverInput) -> Result<Json, ToolError> {
        let days = days_in_period(date_arg(&params.date_from)?, date_arg(&params.date_to)?);

        let mut domain = Domain::new().term("type", "=", "product");
        if let Some(ids) = params.product_ids.as_deref().filter(|ids| !ids.is_empty()) {
            domain.push("id", "in", json!(ids));
        }
        if let Some(category_id) = params.category_id {
            domain.push("categ_id", "=", category_id);
        }

        let products = client
            .search_read(
                PRODUCT,
                &domain,
                SearchOptions::fields(&["name", "default_code", "categ_id", "standard_price"]),
            )
            .await?;
        if products.is_empty() {
            return Err(ToolError::not_found("No products found with the specified criteria"));
        }
        debug!(products = products.len(), "Computing turnover");

        let mut rows = Vec::with_capacity(products.len());
        for product in &products {
            let Some(product_id) = fields::int(product, "id") else {
                continue;
            };
            let cogs = Self::cogs(client, product, product_id, &params).await?;
            let avg_value = Self::average_inventory_value(client, product, product_id, &params).await?;
            let (turnover_ratio, days_inventory) = turnover(cogs, avg_value, days);

            rows.push(ProductTurnover {
                id: product_id,
                name: fields::text(product, "name").unwrap_or_default().to_string(),
                default_code: fields::text(product, "default_code").map(String::from),
                category: fields::many2one(product, "categ_id")
                    .map(|(_, name)| name.to_string())
                    .unwrap_or_else(|| "No category".to_string()),
                cogs,
                avg_inventory_value: avg_value,
                turnover_ratio,
                days_inventory,
            });
        }
        rows.sort_by(|a, b| b.turnover_ratio.total_cmp(&a.turnover_ratio));

        let total_cogs: f64 = rows.iter().map(|r| r.cogs).sum();
        let total_avg_value: f64 = rows.iter().map(|r| r.avg_inventory_value).sum();
        let (overall_turnover, overall_days) = turnover(total_cogs, total_avg_value, days);

        Ok(json!({
            "period": { "from": params.date_from, "to": params.date_to, "days": days },
            "summary": {
                "product_count": products.len(),
                "total_cogs": total_cogs,
                "total_avg_inventory_value": total_avg_value,
                "overall_turnover_ratio": overall_turnover,
                "overall_days_inventory": overall_days,
            },
            "products": rows,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::client::testing::{MockTransport, client};
    use std::sync::Arc;

    fn params(product_ids: Option<Vec<i64>>) -> InventoryTurnoverInput {
        InventoryTurnoverInput {
            date_from: "2024-01-01".to_string(),
            date_to: "2024-01-30".to_string(),
            product_ids,
            category_id: None,
        }
    }

    fn base() -> MockTransport {
        MockTransport::new()
            .on(
                PRODUCT,
                "search_read",
                json!([{ "id": 3, "name": "Drawer", "default_code": "FURN_8855", "categ_id": [5, "Office"], "standard_price": 10.0 }]),
            )
            .on(
                "stock.move",
                "search_read",
                json!([
                    { "product_uom_qty": 10.0, "price_unit": 0.0 },
                    { "product_uom_qty": 5.0, "price_unit": 12.0 }
                ]),
            )
    }

    #[test]
    fn test_turnover_math() {
        assert_eq!(turnover(300.0, 150.0, 30), (2.0, 15.0));
        assert_eq!(turnover(300.0, 0.0, 30), (0.0, 0.0));
        assert_eq!(turnover(0.0, 100.0, 30), (0.0, 0.0));
    }

    #[tokio::test]
    async fn test_uses_stock_value_when_available() {
        let transport = Arc::new(base().on_with(PRODUCT, "read", |call| {
            let value = if call.kwargs["context"]["to_date"] == "2024-01-01" { 100.0 } else { 220.0 };
            Ok(json!([{ "id": 3, "stock_value": value }]))
        }));
        let client = client(transport.clone());

        let result = AnalyzeInventoryTurnoverTool::execute(&client, params(None)).await.unwrap();

        let product = &result["products"][0];
        assert_eq!(product["cogs"], 160.0);
        assert_eq!(product["avg_inventory_value"], 160.0);
        assert_eq!(product["turnover_ratio"], 1.0);
        assert_eq!(product["days_inventory"], 30.0);
        assert_eq!(result["period"]["days"], 30);

        let search = &transport.calls_to(PRODUCT, "search_read")[0];
        assert_eq!(search.args, json!([[["type", "=", "product"]]]));
    }

    #[tokio::test]
    async fn test_falls_back_to_quantity_when_stock_value_rejected() {
        let transport = Arc::new(
            base()
                .once(PRODUCT, "read", Err(OdooError::remote("Invalid field 'stock_value' on model 'product.product'")))
                .on(PRODUCT, "read", json!([{ "id": 3, "qty_available": 8.0 }])),
        );
        let client = client(transport.clone());

        let result = AnalyzeInventoryTurnoverTool::execute(&client, params(Some(vec![3]))).await.unwrap();

        assert_eq!(result["products"][0]["avg_inventory_value"], 80.0);
        let reads = transport.calls_to(PRODUCT, "read");
        assert_eq!(reads.len(), 3);
        assert_eq!(reads[1].kwargs["fields"], json!(["qty_available"]));
    }

    #[tokio::test]
    async fn test_authentication_failure_does_not_fall_back() {
        let transport = Arc::new(
            base().once(PRODUCT, "read", Err(OdooError::authentication("session expired"))),
        );
        let client = client(transport.clone());

        let err = AnalyzeInventoryTurnoverTool::execute(&client, params(None)).await.unwrap_err();
        assert_eq!(err.kind(), "authentication");
    }

    #[tokio::test]
    async fn test_no_products_is_not_found() {
        let transport = Arc::new(MockTransport::new().on(PRODUCT, "search_read", json!([])));
        let client = client(transport.clone());

        let err = AnalyzeInventoryTurnoverTool::execute(&client, params(Some(vec![404]))).await.unwrap_err();
        assert_eq!(err.kind(), "not_found");

        let search = &transport.calls_to(PRODUCT, "search_read")[0];
        assert_eq!(search.args, json!([[["type", "=", "product"], ["id", "in", [404]]]]));
    }

    #[tokio::test]
    async fn test_empty_product_ids_analyzes_all_products() {
        let transport = Arc::new(base().on(PRODUCT, "read", json!([{ "id": 3, "stock_value": 100.0 }])));
        let client = client(transport.clone());

        let result = AnalyzeInventoryTurnoverTool::execute(&client, params(Some(vec![]))).await.unwrap();

        let search = &transport.calls_to(PRODUCT, "search_read")[0];
        assert_eq!(search.args, json!([[["type", "=", "product"]]]));
        assert_eq!(result["products"][0]["id"], 3);
    }
}
