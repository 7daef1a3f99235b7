//! Inventory documentation resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Inventory models and tools.
pub struct InventoryDocsResource;

impl ResourceDefinition for InventoryDocsResource {
    const URI: &'static str = "odoo://docs/inventory";
    const NAME: &'static str = "Inventory Documentation";
    const DESCRIPTION: &'static str = "Inventory models and tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Inventory

## Models

- `product.product`: product variants with `qty_available`, `virtual_available`, `incoming_qty`, `outgoing_qty` and `standard_price`
- `stock.location`: warehouses and internal locations
- `stock.quant`: on-hand quantity per product and location
- `stock.move`: stock movements; `done` moves leaving internal locations are consumption
- `stock.inventory`: inventory adjustments on Odoo 14 and earlier

## Adjustments

On Odoo 14 and earlier an adjustment is a `stock.inventory` with lines, then
validated. On Odoo 15 and later quants are updated directly with
`inventory_quantity` and applied. `create_inventory_adjustment` detects which
model is installed.

## Tools

- `check_product_availability`: on-hand, forecast, incoming and outgoing quantities, optionally for one location
- `create_inventory_adjustment`: set counted quantities per product and location
- `analyze_inventory_turnover`: cost of goods sold, average inventory value, turnover ratio and days of inventory per product"#;

