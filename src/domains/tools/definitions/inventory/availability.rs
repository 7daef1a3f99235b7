//! Product availability tool definition.

use std::collections::HashMap;

use serde_json::{Map, Value as Json, json};
use tracing::{instrument, warn};

use crate::core::odoo::{Domain, OdooClient, SearchOptions, fields};
use crate::domains::tools::definitions::common::is_remote_rejection;
use crate::domains::tools::schemas::ProductAvailabilityInput;
use crate::domains::tools::{OdooTool, ToolError};

const QUANTITY_FIELDS: &[&str] = &["qty_available", "virtual_available", "incoming_qty", "outgoing_qty"];

/// On-hand, forecast, incoming and outgoing quantities per product.
pub struct CheckProductAvailabilityTool;

#[async_trait::async_trait]
impl OdooTool for CheckProductAvailabilityTool {
    const NAME: &'static str = "check_product_availability";
    const DESCRIPTION: &'static str = "Check stock availability (on hand, forecast, incoming, outgoing) for one or more products, optionally within a specific stock location.";
    type Params = ProductAvailabilityInput;

    #[instrument(skip_all, fields(products = params.product_ids.len(), location = ?params.location_id))]
    async fn execute(client: &OdooClient, params: ProductAvailabilityInput) -> Result<Json, ToolError> {
        let products = client
            .search_read(
                "product.product",
                &Domain::new().term("id", "in", json!(params.product_ids)),
                SearchOptions::fields(&["name", "default_code", "type", "uom_id"]),
            )
            .await?;
        if products.is_empty() {
            return Err(ToolError::not_found("No products found with the provided IDs"));
        }

        let names: HashMap<i64, String> = products
            .iter()
            .filter_map(|p| Some((fields::int(p, "id")?, fields::text(p, "name")?.to_string())))
            .collect();
        let name_of = |id: i64| {
            names
                .get(&id)
                .cloned()
                .unwrap_or_else(|| format!("Product {}", id))
        };
        let context = params.location_id.map(|location| json!({ "location": location }));

        let mut availability = Map::new();
        for &product_id in &params.product_ids {
            let entry = match client
                .read("product.product", &[product_id], QUANTITY_FIELDS, context.clone())
                .await
            {
                Ok(rows) => match rows.first() {
                    Some(row) => {
                        let mut entry = json!({ "name": name_of(product_id) });
                        for field in QUANTITY_FIELDS {
                            entry[*field] = json!(fields::float(row, field));
                        }
                        entry
                    }
                    None => json!({ "name": name_of(product_id), "error": "Product not found" }),
                },
                Err(err) if is_remote_rejection(&err) => {
                    warn!(product_id, "Availability read rejected: {}", err);
                    json!({ "name": name_of(product_id), "error": err.to_string() })
                }
                Err(err) => return Err(err.into()),
            };
            availability.insert(product_id.to_string(), entry);
        }

        let location = match params.location_id {
            Some(location_id) => {
                match client
                    .search_read(
                        "stock.location",
                        &Domain::new().term("id", "=", location_id),
                        SearchOptions::fields(&["name", "complete_name"]),
                    )
                    .await
                {
                    Ok(rows) => rows.into_iter().next().map(Json::Object).unwrap_or(Json::Null),
                    Err(err) if is_remote_rejection(&err) => {
                        json!({ "id": location_id, "name": "Unknown location" })
                    }
                    Err(err) => return Err(err.into()),
                }
            }
            None => Json::Null,
        };

        Ok(json!({
            "products": availability,
            "location": location,
        }))
    }
}
