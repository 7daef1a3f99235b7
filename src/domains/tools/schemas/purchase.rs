//! Purchase inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Checks, Validate, ValidationError, default_limit};

/// Purchase order line for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PurchaseOrderLineCreate {
    /// Product ID
    pub product_id: i64,

    /// Quantity
    pub product_qty: f64,

    /// Unit price (optional)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<f64>,
}

/// Data to create a purchase order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PurchaseOrderCreate {
    /// Supplier ID
    pub partner_id: i64,

    /// Order lines
    pub order_lines: Vec<PurchaseOrderLineCreate>,

    /// Order date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_order: Option<String>,
}

impl Validate for PurchaseOrderCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date_order", self.date_order.as_deref())
            .finish()
    }
}

/// Filters for searching purchase orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct PurchaseOrderFilter {
    /// Filter by supplier ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<i64>,

    /// Start date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    /// Order state (e.g. 'draft', 'purchase', 'done', 'cancel')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Maximum number of orders returned
    #[serde(default = "default_limit")]
    pub limit: Option<u32>,

    /// Pagination offset
    #[serde(default)]
    pub offset: u32,

    /// Sort order (e.g. 'date_order DESC')
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<String>,
}

impl Validate for PurchaseOrderFilter {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date_from", self.date_from.as_deref())
            .optional_date("date_to", self.date_to.as_deref())
            .finish()
    }
}

/// Parameters for supplier performance analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SupplierPerformanceInput {
    /// Start date (YYYY-MM-DD)
    pub date_from: String,

    /// End date (YYYY-MM-DD)
    pub date_to: String,

    /// Restrict to these supplier IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supplier_ids: Option<Vec<i64>>,
}

impl Validate for SupplierPerformanceInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .date("date_from", &self.date_from)
            .date("date_to", &self.date_to)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{Constraint, args, parse_params};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_purchase_create_requires_supplier() {
        let err = parse_params::<PurchaseOrderCreate>(args(json!({
            "order_lines": [{ "product_id": 1, "product_qty": 5.0 }]
        })))
        .unwrap_err();
        assert_eq!(err.errors[0].field, "partner_id");
        assert_eq!(err.errors[0].constraint, Constraint::Required);
    }

    #[test]
    fn test_purchase_filter_defaults() {
        let filter: PurchaseOrderFilter =
            parse_params(args(json!({ "state": "purchase" }))).unwrap();
        assert_eq!(filter.limit, Some(20));
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.state.as_deref(), Some("purchase"));
    }

    #[test]
    fn test_supplier_ids_optional() {
        let input: SupplierPerformanceInput = parse_params(args(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-06-30"
        })))
        .unwrap();
        assert_eq!(input.supplier_ids, None);
    }
}
