//! Sales documentation resource.

use super::ResourceDefinition;
use crate::domains::resources::service::ResourceContent;

/// Sales models, order states and tools.
pub struct SalesDocsResource;

impl ResourceDefinition for SalesDocsResource {
    const URI: &'static str = "odoo://docs/sales";
    const NAME: &'static str = "Sales Documentation";
    const DESCRIPTION: &'static str = "Sales models, order states and tools";
    const MIME_TYPE: &'static str = "text/markdown";

    fn content() -> ResourceContent {
        ResourceContent::Text(DOCUMENTATION.to_string())
    }
}

const DOCUMENTATION: &str = r#"# Sales

## Models

- `sale.order`: quotations and sales orders
- `sale.order.line`: order lines (product, quantity, unit price, subtotal)
- `res.partner`: customers
- `res.users`: salespeople (`user_id` on the order)

## Order states

| State | Meaning |
|---|---|
| `draft` | Quotation |
| `sent` | Quotation sent |
| `sale` | Confirmed sales order |
| `done` | Locked |
| `cancel` | Cancelled |

## Tools

- `search_sales_orders`: filter by customer, date range (`date_order`) and state, with `limit` (default 20), `offset` and `order`
- `create_sales_order`: create a quotation for a customer with one or more product lines
- `analyze_sales_performance`: totals for confirmed orders over a period, compared with the previous period of equal length, grouped by product, customer or salesperson
- `execute_method`: call any other `sale.order` method, e.g. `action_confirm`"#;
