//! Typed input records for every tool.
//!
//! Arguments arrive as an untyped JSON object. [`parse_params`] deserializes
//! them into the tool's record (applying defaults), tracks the path of the
//! first structural failure, then runs the record's [`Validate`] checks.

pub mod accounting;
pub mod common;
pub mod inventory;
pub mod purchase;
pub mod sales;

use chrono::NaiveDate;
use rmcp::ErrorData as McpError;
use rmcp::model::JsonObject;
use serde::Serialize;
use serde::de::DeserializeOwned;
use thiserror::Error;

pub use accounting::*;
pub use common::*;
pub use inventory::*;
pub use purchase::*;
pub use sales::*;

/// Date format accepted by every date field.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Field-level checks that serde cannot express.
pub trait Validate {
    fn validate(&self) -> Result<(), ValidationError>;
}

/// Kind of rule a field violated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Constraint {
    Required,
    Type,
    OneOf,
    DateFormat,
    Invalid,
}

/// One offending field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Path such as `order_lines[0].product_id`.
    pub field: String,
    pub constraint: Constraint,
    pub message: String,
}

/// Arguments rejected before any remote call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[error("Invalid parameters: {}", summarize(.errors))]
pub struct ValidationError {
    pub errors: Vec<FieldError>,
}

fn summarize(errors: &[FieldError]) -> String {
    errors
        .iter()
        .map(|e| format!("{}: {}", e.field, e.message))
        .collect::<Vec<_>>()
        .join("; ")
}

impl ValidationError {
    pub fn single(field: impl Into<String>, constraint: Constraint, message: impl Into<String>) -> Self {
        Self {
            errors: vec![FieldError {
                field: field.into(),
                constraint,
                message: message.into(),
            }],
        }
    }

    /// MCP `invalid_params` carrying the field list as data.
    pub fn into_mcp_error(self) -> McpError {
        let data = serde_json::json!({ "errors": self.errors });
        McpError::invalid_params(self.to_string(), Some(data))
    }
}

/// Deserialize and validate tool arguments.
pub fn parse_params<T>(arguments: JsonObject) -> Result<T, ValidationError>
where
    T: DeserializeOwned + Validate,
{
    let value = serde_json::Value::Object(arguments);
    let params: T = serde_path_to_error::deserialize(value).map_err(|err| {
        let path = err.path().to_string();
        let message = err.inner().to_string();
        ValidationError {
            errors: vec![classify(&path, message)],
        }
    })?;
    params.validate()?;
    Ok(params)
}

fn classify(path: &str, message: String) -> FieldError {
    let parent = if path == "." { "" } else { path };

    if let Some(name) = message
        .strip_prefix("missing field `")
        .and_then(|rest| rest.split('`').next())
    {
        let field = if parent.is_empty() {
            name.to_string()
        } else {
            format!("{}.{}", parent, name)
        };
        return FieldError {
            field,
            constraint: Constraint::Required,
            message,
        };
    }

    let constraint = if message.starts_with("unknown variant") {
        Constraint::OneOf
    } else if message.starts_with("invalid type") || message.starts_with("invalid value") {
        Constraint::Type
    } else {
        Constraint::Invalid
    };

    FieldError {
        field: if parent.is_empty() { "<root>".to_string() } else { parent.to_string() },
        constraint,
        message,
    }
}

/// Collects field errors during [`Validate::validate`].
#[derive(Debug, Default)]
pub struct Checks {
    errors: Vec<FieldError>,
}

impl Checks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Require a `YYYY-MM-DD` date.
    pub fn date(&mut self, field: &str, value: &str) -> &mut Self {
        if parse_date(value).is_none() {
            self.errors.push(FieldError {
                field: field.to_string(),
                constraint: Constraint::DateFormat,
                message: format!("Invalid date format: {}. Use YYYY-MM-DD.", value),
            });
        }
        self
    }

    pub fn optional_date(&mut self, field: &str, value: Option<&str>) -> &mut Self {
        if let Some(value) = value {
            self.date(field, value);
        }
        self
    }

    pub fn finish(&mut self) -> Result<(), ValidationError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError {
                errors: std::mem::take(&mut self.errors),
            })
        }
    }
}

/// Parse a `YYYY-MM-DD` date with a four-digit, unsigned year.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    let bytes = value.as_bytes();
    if bytes.len() != 10 || !bytes[..4].iter().all(u8::is_ascii_digit) {
        return None;
    }
    NaiveDate::parse_from_str(value, DATE_FORMAT).ok()
}

/// Default page size; an explicit `null` lifts the limit.
fn default_limit() -> Option<u32> {
    Some(20)
}

#[cfg(test)]
pub(crate) fn args(value: serde_json::Value) -> JsonObject {
    match value {
        serde_json::Value::Object(map) => map,
        other => panic!("expected an object, got {other}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_missing_field_is_required() {
        let err = parse_params::<SalesOrderCreate>(args(json!({ "order_lines": [] }))).unwrap_err();
        assert_eq!(err.errors.len(), 1);
        assert_eq!(err.errors[0].field, "partner_id");
        assert_eq!(err.errors[0].constraint, Constraint::Required);
    }

    #[test]
    fn test_nested_missing_field_has_path() {
        let err = parse_params::<SalesOrderCreate>(args(json!({
            "partner_id": 3,
            "order_lines": [{ "product_uom_qty": 1.0 }]
        })))
        .unwrap_err();
        assert_eq!(err.errors[0].field, "order_lines[0].product_id");
        assert_eq!(err.errors[0].constraint, Constraint::Required);
    }

    #[test]
    fn test_wrong_type() {
        let err = parse_params::<SalesOrderCreate>(args(json!({
            "partner_id": "three",
            "order_lines": []
        })))
        .unwrap_err();
        assert_eq!(err.errors[0].field, "partner_id");
        assert_eq!(err.errors[0].constraint, Constraint::Type);
    }

    #[test]
    fn test_unknown_variant_is_one_of() {
        let err = parse_params::<SalesPerformanceInput>(args(json!({
            "date_from": "2024-01-01",
            "date_to": "2024-01-31",
            "group_by": "region"
        })))
        .unwrap_err();
        assert_eq!(err.errors[0].field, "group_by");
        assert_eq!(err.errors[0].constraint, Constraint::OneOf);
    }

    #[test]
    fn test_bad_dates_are_all_reported() {
        let err = parse_params::<SalesPerformanceInput>(args(json!({
            "date_from": "01/01/2024",
            "date_to": "2024-13-01"
        })))
        .unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["date_from", "date_to"]);
        assert!(err.errors.iter().all(|e| e.constraint == Constraint::DateFormat));
    }

    #[test]
    fn test_out_of_range_years_are_rejected() {
        let err = parse_params::<SalesPerformanceInput>(args(json!({
            "date_from": "-100000-01-01",
            "date_to": "+200000-01-01"
        })))
        .unwrap_err();
        let fields: Vec<_> = err.errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["date_from", "date_to"]);
        assert!(err.errors.iter().all(|e| e.constraint == Constraint::DateFormat));

        assert!(parse_date("99999-01-01").is_none());
        assert!(parse_date("2024-1-01").is_none());
        assert_eq!(parse_date("0001-01-01"), NaiveDate::from_ymd_opt(1, 1, 1));
    }

    #[test]
    fn test_mcp_error_carries_fields() {
        let err = ValidationError::single("partner_id", Constraint::Required, "missing field `partner_id`");
        let mcp = err.into_mcp_error();
        let data = mcp.data.unwrap();
        assert_eq!(data["errors"][0]["field"], "partner_id");
        assert_eq!(data["errors"][0]["constraint"], "required");
    }
}
