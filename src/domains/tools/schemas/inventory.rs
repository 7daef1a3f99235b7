//! Inventory inputs.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::{Checks, Validate, ValidationError};

/// Parameters for checking product availability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ProductAvailabilityInput {
    /// Product IDs to check
    pub product_ids: Vec<i64>,

    /// Restrict quantities to this stock location
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<i64>,
}

impl Validate for ProductAvailabilityInput {
    fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// Inventory adjustment line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InventoryLineAdjustment {
    /// Product ID
    pub product_id: i64,

    /// Location ID
    pub location_id: i64,

    /// Counted quantity
    pub product_qty: f64,
}

/// Data to create an inventory adjustment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InventoryAdjustmentCreate {
    /// Name or description of the adjustment
    pub name: String,

    /// Adjustment lines
    pub adjustment_lines: Vec<InventoryLineAdjustment>,

    /// Adjustment date (YYYY-MM-DD)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
}

impl Validate for InventoryAdjustmentCreate {
    fn validate(&self) -> Result<(), ValidationError> {
        Checks::new()
            .optional_date("date", self.date.as_deref())
            .finish()
    }
}

/// Parameters for inventory turnover analysis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct InventoryTurnoverInput {
    /// Start date (YYYY-MM-DD)
    pub date_from: String,

    /// End date (YYYY-MM-DD)
    pub date_to: String,

    /// Restrict to these product IDs
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub product_ids: Option<Vec<i64>>,

    /// Restrict to this product category
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
}

impl Validate for InventoryTurnoverInput {
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
    fn test_turnover_without_product_ids_is_none() {
        let input: InventoryTurnoverInput = parse_params(args(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-12-31"
        })))
        .unwrap();
        assert_eq!(input.product_ids, None);
        assert_eq!(input.category_id, None);
    }

    #[test]
    fn test_turnover_with_empty_product_ids_is_some() {
        let input: InventoryTurnoverInput = parse_params(args(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-12-31",
            "product_ids": []
        })))
        .unwrap();
        assert_eq!(input.product_ids, Some(vec![]));
    }

    #[test]
    fn test_adjustment_line_path() {
        let err = parse_params::<InventoryAdjustmentCreate>(args(json!({
            "name": "Q1 count",
            "adjustment_lines": [
                { "product_id": 1, "location_id": 8, "product_qty": 3.0 },
                { "product_id": 2, "product_qty": 1.0 }
            ]
        })))
        .unwrap_err();
        assert_eq!(err.errors[0].field, "adjustment_lines[1].location_id");
    }
}
