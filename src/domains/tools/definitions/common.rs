//! Helpers shared by the tool definitions.

use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use serde::Serialize;
use serde_json::{Value as Json, json};

use crate::core::odoo::{Domain, OdooClient, OdooError, Record, SearchOptions, fields};
use crate::domains::tools::ToolError;
use crate::domains::tools::schemas::parse_date;

/// Odoo's server-side datetime format.
const ODOO_DATETIME: &str = "%Y-%m-%d %H:%M:%S";

/// Round to two decimals.
pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// `numerator / denominator`, or 0 when the denominator is zero.
pub fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

/// A validated `YYYY-MM-DD` argument.
pub fn date_arg(value: &str) -> Result<NaiveDate, ToolError> {
    parse_date(value).ok_or_else(|| ToolError::internal(format!("unvalidated date: {}", value)))
}

pub fn format_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

/// The period of equal length ending the day before `from`.
pub fn previous_period(from: NaiveDate, to: NaiveDate) -> Result<(NaiveDate, NaiveDate), ToolError> {
    let prev_to = from.pred_opt();
    let prev_from = prev_to.and_then(|prev_to| prev_to.checked_sub_signed(to - from));
    match (prev_from, prev_to) {
        (Some(prev_from), Some(prev_to)) => Ok((prev_from, prev_to)),
        _ => Err(ToolError::internal(format!(
            "no previous period before {}",
            format_date(from)
        ))),
    }
}

/// Inclusive number of days in a period.
pub fn days_in_period(from: NaiveDate, to: NaiveDate) -> i64 {
    (to - from).num_days() + 1
}

/// Parse a datetime field as sent by Odoo, accepting plain dates too.
pub fn parse_odoo_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, ODOO_DATETIME)
        .ok()
        .or_else(|| parse_date(value).and_then(|d| d.and_hms_opt(0, 0, 0)))
}

/// Paginated `search_read` plus the unpaginated `search_count`.
pub async fn search_with_count(
    client: &OdooClient,
    model: &str,
    domain: &Domain,
    options: SearchOptions,
) -> Result<(Vec<Record>, i64), ToolError> {
    let records = client.search_read(model, domain, options).await?;
    let total_count = client.search_count(model, domain).await?;
    Ok((records, total_count))
}

/// Read one record, failing with not-found when Odoo returns nothing.
pub async fn read_one(
    client: &OdooClient,
    model: &str,
    id: i64,
    field_names: &[&str],
) -> Result<Record, ToolError> {
    client
        .read(model, &[id], field_names, None)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| ToolError::not_found(format!("{} {} not found after create", model, id)))
}

/// One-to-many "create" command `(0, 0, values)`.
pub fn create_command(values: Json) -> Json {
    json!([0, 0, values])
}

/// Whether an error is a rejection by Odoo rather than a session or
/// connectivity failure.
pub fn is_remote_rejection(err: &OdooError) -> bool {
    matches!(err, OdooError::Remote { .. })
}

/// Totals for one value of a many2one field.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GroupTotal {
    pub id: i64,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_count: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<f64>,
    pub amount: f64,
}

/// Group records by a many2one field, summing `amount_field`.
///
/// With `quantity_field` the groups carry a summed quantity, otherwise a
/// record count. Records without a value land in group 0 ("Unknown").
/// Result is sorted by amount, highest first.
pub fn group_totals(
    records: &[Record],
    key_field: &str,
    amount_field: &str,
    quantity_field: Option<&str>,
) -> Vec<GroupTotal> {
    let mut groups: BTreeMap<i64, GroupTotal> = BTreeMap::new();

    for record in records {
        let (id, name) = fields::many2one(record, key_field).unwrap_or((0, "Unknown"));
        let group = groups.entry(id).or_insert_with(|| GroupTotal {
            id,
            name: name.to_string(),
            order_count: quantity_field.is_none().then_some(0),
            quantity: quantity_field.map(|_| 0.0),
            amount: 0.0,
        });

        group.amount += fields::float(record, amount_field);
        match quantity_field {
            Some(qty) => {
                if let Some(total) = group.quantity.as_mut() {
                    *total += fields::float(record, qty);
                }
            }
            None => {
                if let Some(count) = group.order_count.as_mut() {
                    *count += 1;
                }
            }
        }
    }

    let mut totals: Vec<GroupTotal> = groups.into_values().collect();
    totals.sort_by(|a, b| b.amount.total_cmp(&a.amount).then(a.id.cmp(&b.id)));
    totals
}

/// Sum a numeric field over records.
pub fn sum_field(records: &[Record], field: &str) -> f64 {
    records.iter().map(|r| fields::float(r, field)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn records(value: Json) -> Vec<Record> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_previous_period() {
        let from = NaiveDate::from_ymd_opt(2024, 2, 1).unwrap();
        let to = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        let (prev_from, prev_to) = previous_period(from, to).unwrap();
        assert_eq!(format_date(prev_to), "2024-01-31");
        assert_eq!(format_date(prev_from), "2024-01-03");
        assert_eq!(days_in_period(from, to), 29);
    }

    #[test]
    fn test_previous_period_out_of_range() {
        let err = previous_period(NaiveDate::MIN, NaiveDate::MAX).unwrap_err();
        assert_eq!(err.kind(), "internal");
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(33.33333), 33.33);
        assert_eq!(round2(-12.346), -12.35);
    }

    #[test]
    fn test_ratio_by_zero() {
        assert_eq!(ratio(10.0, 0.0), 0.0);
        assert_eq!(ratio(10.0, 4.0), 2.5);
    }

    #[test]
    fn test_group_totals_by_order() {
        let orders = records(json!([
            { "partner_id": [1, "Deco Addict"], "amount_total": 100.0 },
            { "partner_id": [2, "Azure Interior"], "amount_total": 300.0 },
            { "partner_id": [1, "Deco Addict"], "amount_total": 50.0 },
            { "partner_id": false, "amount_total": 10.0 }
        ]));
        let groups = group_totals(&orders, "partner_id", "amount_total", None);

        assert_eq!(groups.len(), 3);
        assert_eq!(groups[0].name, "Azure Interior");
        assert_eq!(groups[1].amount, 150.0);
        assert_eq!(groups[1].order_count, Some(2));
        assert_eq!(groups[2].id, 0);
        assert_eq!(groups[2].name, "Unknown");
    }

    #[test]
    fn test_group_totals_with_quantity() {
        let lines = records(json!([
            { "product_id": [5, "Desk"], "product_uom_qty": 2.0, "price_subtotal": 400.0 },
            { "product_id": [5, "Desk"], "product_uom_qty": 1.0, "price_subtotal": 200.0 }
        ]));
        let groups = group_totals(&lines, "product_id", "price_subtotal", Some("product_uom_qty"));

        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0].quantity, Some(3.0));
        assert_eq!(groups[0].order_count, None);
        assert_eq!(groups[0].amount, 600.0);
    }

    #[test]
    fn test_parse_odoo_datetime() {
        assert!(parse_odoo_datetime("2024-03-01 14:30:00").is_some());
        assert!(parse_odoo_datetime("2024-03-01").is_some());
        assert!(parse_odoo_datetime("soon").is_none());
    }
}
