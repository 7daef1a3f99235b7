//! Purchase documentation resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Purchase models, order states and tools.
pub struct PurchaseDocsResource;

impl ResourceDefinition for PurchaseDocsResource {
    const URI: &'static str = "odoo://docs/purchase";
    const NAME: &'static str = "Purchase Documentation";
    const DESCRIPTION: &'static str = "Purchase models, order states and tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Purchase

## Models

- `purchase.order`: requests for quotation and purchase orders
- `purchase.order.line`: order lines (product, quantity, unit price)
- `res.partner`: suppliers

## Order states

| State | Meaning |
|---|---|
| `draft` | Request for quotation |
| `sent` | RFQ sent |
| `to approve` | Waiting for approval |
| `purchase` | Confirmed purchase order |
| `done` | Locked |
| `cancel` | Cancelled |

## Tools

- `search_purchase_orders`: filter by supplier, date range (`date_order`) and state, with pagination
- `create_purchase_order`: create an RFQ for a supplier with one or more product lines
- `analyze_supplier_performance`: per supplier order count, amount, average delivery delay in days and on-time rate, from `date_planned` versus `effective_date`"#;

