//! Sales inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Checks, Validate, ValidationError, default_limit};

/// Sales order line for creation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesOrderLineCreate {
    /// Product ID
    pub product_id: i64,

    /// Quantity
    pub product_uom_qty: f64,

    /// Unit price (optional, Odoo computes it from the pricelist when omitted)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_unit: Option<f64>,
}

/// Data to create a sales order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesOrderCreate {
    /// Customer ID
    pub partner_id: i64,

    /// Order lines
    pub order_lines: Vec<SalesOrderLineCreate>,

    /// Order date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_order: Option<String>,
}

impl Validate for SalesOrderCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date_order", self.date_order.as_deref())
            .finish()
    }
}

/// Filters for searching sales orders.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesOrderFilter {
    /// Filter by customer ID
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub partner_id: Option<i64>,

    /// Start date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,

    /// End date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,

    /// Order state (e.g. 'draft', 'sale', 'done', 'cancel')
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

impl Validate for SalesOrderFilter {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date_from", self.date_from.as_deref())
            .optional_date("date_to", self.date_to.as_deref())
            .finish()
    }
}

/// Grouping dimension for sales analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GroupBy {
    Product,
    Customer,
    Salesperson,
}

/// Parameters for sales performance analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct SalesPerformanceInput {
    /// Start date (YYYY-MM-DD)
    pub date_from: String,

    /// End date (YYYY-MM-DD)
    pub date_to: String,

    /// Optional breakdown: 'product', 'customer' or 'salesperson'
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_by: Option<GroupBy>,
}

impl Validate for SalesPerformanceInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .date("date_from", &self.date_from)
            .date("date_to", &self.date_to)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::super::{args, parse_params};
    use super::*;
    use serde_json::json;

    #[test]
    fn test_filter_defaults() {
        let filter: SalesOrderFilter = parse_params(args(json!({}))).unwrap();
        assert_eq!(filter.limit, Some(20));
        assert_eq!(filter.offset, 0);
        assert_eq!(filter.partner_id, None);
    }

    #[test]
    fn test_explicit_null_limit_is_unbounded() {
        let filter: SalesOrderFilter = parse_params(args(json!({ "limit": null }))).unwrap();
        assert_eq!(filter.limit, None);
        let filter: SalesOrderFilter = parse_params(args(json!({ "limit": 5 }))).unwrap();
        assert_eq!(filter.limit, Some(5));
    }

    #[test]
    fn test_line_with_price_survives_revalidation() {
        let order: SalesOrderCreate = parse_params(args(json!({
            "partner_id": 7,
            "order_lines": [{ "product_id": 4, "product_uom_qty": 2.0, "price_unit": 12.5 }]
        })))
        .unwrap();

        let again: SalesOrderCreate =
            parse_params(args(serde_json::to_value(&order).unwrap())).unwrap();
        assert_eq!(order, again);
        assert_eq!(again.order_lines[0].price_unit, Some(12.5));
    }

    #[test]
    fn test_empty_lines_allowed() {
        let order: SalesOrderCreate =
            parse_params(args(json!({ "partner_id": 7, "order_lines": [] }))).unwrap();
        assert!(order.order_lines.is_empty());
    }

    #[test]
    fn test_group_by_parsed() {
        let input: SalesPerformanceInput = parse_params(args(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-03-31",
            "group_by": "salesperson"
        })))
        .unwrap();
        assert_eq!(input.group_by, Some(GroupBy::Salesperson));
    }

    #[test]
    fn test_filter_rejects_bad_date() {
        let err = parse_params::<SalesOrderFilter>(args(json!({ "date_from": "yesterday" })))
            .unwrap_err();
        assert_eq!(err.errors[0].field, "date_from");
    }
}
