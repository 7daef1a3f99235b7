//! Create sales order tool definition.

use serde_json::{Value as Json, json};
use tracing::{info, instrument};

use crate::core::odoo::{OdooClient, fields};
use crate::domains::tools::definitions::common::{create_command, read_one};
use crate::domains::tools::schemas::SalesOrderCreate;
use crate::domains::tools::{OdooTool, ToolError};

const MODEL: &str = "sale.order";

/// Create a quotation with its order lines.
pub struct CreateSalesOrderTool;

impl CreateSalesOrderTool {
    /// Values passed to `sale.order.create`.
    pub fn values(order: &SalesOrderCreate) -> Json {
        let lines: Vec<Json> = order
            .order_lines
            .iter()
            .map(|line| {
                let mut vals = json!({
                    "product_id": line.product_id,
                    "product_uom_qty": line.product_uom_qty,
                });
                if let Some(price) = line.price_unit {
                    vals["price_unit"] = json!(price);
                }
                create_command(vals)
            })
            .collect();

        let mut values = json!({
            "partner_id": order.partner_id,
            "order_line": lines,
        });
        if let Some(date) = &order.date_order {
            values["date_order"] = json!(date);
        }
        values
    }
}

#[async_trait::async_trait]
impl OdooTool for CreateSalesOrderTool {
    const NAME: &'static str = "create_sales_order";
    const DESCRIPTION: &'static str = "Create a new sales order (quotation) for a customer with the given product lines. Unit prices are optional; Odoo applies the pricelist when omitted.";
    type Params = SalesOrderCreate;

    #[instrument(skip_all, fields(partner_id = params.partner_id, lines = params.order_lines.len()))]
    async fn execute(client: &OdooClient, params: SalesOrderCreate) -> Result<Json, ToolError> {
        let order_id = client.create(MODEL, Self::values(&params)).await?;
        let record = read_one(client, MODEL, order_id, &["name"]).await?;
        let order_name = fields::text(&record, "name").unwrap_or_default();

        info!(order_id, order_name, "Sales order created");
        Ok(json!({
            "order_id": order_id,
            "order_name": order_name,
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
    async fn test_create_sends_line_commands() {
        let transport = Arc::new(
            MockTransport::new()
                .on(MODEL, "create", json!(42))
                .on(MODEL, "read", json!([{ "id": 42, "name": "S00042" }])),
        );
        let client = client(transport.clone());
        let params: SalesOrderCreate = parse_params(args(json!({
            "partner_id": 7,
            "date_order": "2024-05-02",
            "order_lines": [
                { "product_id": 3, "product_uom_qty": 2.0 },
                { "product_id": 4, "product_uom_qty": 1.0, "price_unit": 99.5 }
            ]
        })))
        .unwrap();

        let result = CreateSalesOrderTool::execute(&client, params).await.unwrap();
        assert_eq!(result, json!({ "order_id": 42, "order_name": "S00042" }));

        let create = &transport.calls_to(MODEL, "create")[0];
        assert_eq!(
            create.args,
            json!([{
                "partner_id": 7,
                "date_order": "2024-05-02",
                "order_line": [
                    [0, 0, { "product_id": 3, "product_uom_qty": 2.0 }],
                    [0, 0, { "product_id": 4, "product_uom_qty": 1.0, "price_unit": 99.5 }]
                ]
            }])
        );
        let read = &transport.calls_to(MODEL, "read")[0];
        assert_eq!(read.args, json!([[42]]));
    }

    #[tokio::test]
    async fn test_remote_rejection_propagates() {
        let transport = Arc::new(MockTransport::new().once(
            MODEL,
            "create",
            Err(crate::core::odoo::OdooError::Remote {
                code: "1".to_string(),
                message: "Missing required value for the field 'Customer'".to_string(),
            }),
        ));
        let client = client(transport.clone());
        let params: SalesOrderCreate =
            parse_params(args(json!({ "partner_id": 0, "order_lines": [] }))).unwrap();

        let err = CreateSalesOrderTool::execute(&client, params).await.unwrap_err();
        assert_eq!(err.kind(), "remote_operation");
        assert!(transport.calls_to(MODEL, "read").is_empty());
    }
}
