//! Inventory adjustment tool definition.
//!
//! Odoo 13/14 record counts on a `stock.inventory` document; from 15 on the
//! counted quantity is written directly on `stock.quant` and applied. The
//! flow is picked by checking whether `stock.inventory` is installed.

use serde_json::{Value as Json, json};
use tracing::{info, instrument};

use crate::core::odoo::{Domain, OdooClient, SearchOptions, fields};
use crate::domains::tools::schemas::InventoryAdjustmentCreate;
use crate::domains::tools::{OdooTool, ToolError};

/// Correct stock levels to counted quantities.
pub struct CreateInventoryAdjustmentTool;

impl CreateInventoryAdjustmentTool {
    async fn has_inventory_model(client: &OdooClient) -> Result<bool, ToolError> {
        let count = client
            .search_count("ir.model", &Domain::new().term("model", "=", "stock.inventory"))
            .await?;
        Ok(count > 0)
    }

    async fn adjust_with_inventory(
        client: &OdooClient,
        adjustment: &InventoryAdjustmentCreate,
    ) -> Result<Json, ToolError> {
        let mut values = json!({ "name": adjustment.name, "line_ids": [] });
        if let Some(date) = &adjustment.date {
            values["date"] = json!(date);
        }
        let inventory_id = client.create("stock.inventory", values).await?;

        for line in &adjustment.adjustment_lines {
            client
                .create(
                    "stock.inventory.line",
                    json!({
                        "inventory_id": inventory_id,
                        "product_id": line.product_id,
                        "location_id": line.location_id,
                        "product_qty": line.product_qty,
                    }),
                )
                .await?;
        }

        client
            .call("stock.inventory", "action_validate", vec![json!([inventory_id])])
            .await?;
        info!(inventory_id, "Inventory adjustment validated");

        Ok(json!({
            "inventory_id": inventory_id,
            "name": adjustment.name,
        }))
    }

    async fn adjust_with_quants(
        client: &OdooClient,
        adjustment: &InventoryAdjustmentCreate,
    ) -> Result<Json, ToolError> {
        let mut quant_ids = Vec::with_capacity(adjustment.adjustment_lines.len());

        for line in &adjustment.adjustment_lines {
            let domain = Domain::new()
                .term("product_id", "=", line.product_id)
                .term("location_id", "=", line.location_id);
            let existing = client
                .search_read("stock.quant", &domain, SearchOptions::fields(&["id", "quantity"]))
                .await?;

            let quant_id = match existing.first().and_then(|q| fields::int(q, "id")) {
                Some(id) => {
                    client
                        .write("stock.quant", &[id], json!({ "inventory_quantity": line.product_qty }))
                        .await?;
                    id
                }
                None => {
                    client
                        .create(
                            "stock.quant",
                            json!({
                                "product_id": line.product_id,
                                "location_id": line.location_id,
                                "inventory_quantity": line.product_qty,
                            }),
                        )
                        .await?
                }
            };
            quant_ids.push(quant_id);
        }

        if !quant_ids.is_empty() {
            client
                .call("stock.quant", "action_apply_inventory", vec![json!(quant_ids)])
                .await?;
        }
        info!(quants = quant_ids.len(), "Inventory quantities applied");

        Ok(json!({
            "quant_ids": quant_ids,
            "name": adjustment.name,
        }))
    }
}

#[async_trait::async_trait]
impl OdooTool for CreateInventoryAdjustmentTool {
    const NAME: &'static str = "create_inventory_adjustment";
    const DESCRIPTION: &'static str = "Create and apply an inventory adjustment setting products to their counted quantities in given locations. Works with both stock.inventory (Odoo 13/14) and stock.quant (Odoo 15+).";
    type Params = InventoryAdjustmentCreate;

    #[instrument(skip_all, fields(name = %params.name, lines = params.adjustment_lines.len()))]
    async fn execute(client: &OdooClient, params: InventoryAdjustmentCreate) -> Result<Json, ToolError> {
        if Self::has_inventory_model(client).await? {
            Self::adjust_with_inventory(client, &params).await
        } else {
            Self::adjust_with_quants(client, &params).await
        }
    }
}
