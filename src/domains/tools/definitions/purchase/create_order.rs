//! Create purchase order tool definition.

use serde_json::{Value as Json, json};
use tracing::{info, instrument};

use crate::core::odoo::{OdooClient, fields};
use crate::domains::tools::definitions::common::{create_command, read_one};
use crate::domains::tools::schemas::PurchaseOrderCreate;
use crate::domains::tools::{OdooTool, ToolError};

const MODEL: &str = "purchase.order";

/// Create a request for quotation with its order lines.
pub struct CreatePurchaseOrderTool;

impl CreatePurchaseOrderTool {
    pub fn values(order: &PurchaseOrderCreate) -> Json {
        let lines: Vec<Json> = order
            .order_lines
            .iter()
            .map(|line| {
                let mut vals = json!({
                    "product_id": line.product_id,
                    "product_qty": line.product_qty,
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
impl OdooTool for CreatePurchaseOrderTool {
    const NAME: &'static str = "create_purchase_order";
    const DESCRIPTION: &'static str = "Create a new purchase order (request for quotation) for a supplier with the given product lines.";
    type Params = PurchaseOrderCreate;

    #[instrument(skip_all, fields(partner_id = params.partner_id, lines = params.order_lines.len()))]
    async fn execute(client: &OdooClient, params: PurchaseOrderCreate) -> Result<Json, ToolError> {
        let order_id = client.create(MODEL, Self::values(&params)).await?;
        let record = read_one(client, MODEL, order_id, &["name"]).await?;
        let order_name = fields::text(&record, "name").unwrap_or_default();

        info!(order_id, order_name, "Purchase order created");
        Ok(json!({
            "order_id": order_id,
            "order_name": order_name,
        }))
    }
}
