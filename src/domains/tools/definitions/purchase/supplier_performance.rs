//! Supplier performance analysis tool definition.
//!
//! Confirmed purchase orders in the period are grouped per supplier. Volume
//! comes from `amount_total`; punctuality compares the expected arrival
//! (`date_planned`) with the actual one (`effective_date`, set once the
//! goods are received).

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Value as Json, json};
use tracing::{debug, instrument};

use crate::core::odoo::{Domain, OdooClient, Record, SearchOptions, fields};
use crate::domains::tools::definitions::common::{parse_odoo_datetime, ratio, round2};
use crate::domains::tools::schemas::SupplierPerformanceInput;
use crate::domains::tools::{OdooTool, ToolError};

const FIELDS: &[&str] = &[
    "name",
    "partner_id",
    "date_order",
    "date_planned",
    "effective_date",
    "amount_total",
    "state",
];

/// Per-supplier figures.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SupplierStats {
    pub id: i64,
    pub name: String,
    pub order_count: u64,
    pub total_amount: f64,
    pub average_order_value: f64,
    /// Orders with both a planned and an effective date.
    pub received_count: u64,
    pub on_time_count: u64,
    /// Percentage of received orders that arrived on or before the planned date.
    pub on_time_rate: Option<f64>,
    /// Mean of (effective - planned) in days; negative means early.
    pub average_delay_days: Option<f64>,
}

#[derive(Default)]
struct Accumulator {
    name: String,
    order_count: u64,
    total_amount: f64,
    delays: Vec<f64>,
}

/// Aggregate orders into per-supplier stats, largest spend first.
pub fn supplier_stats(orders: &[Record]) -> Vec<SupplierStats> {
    let mut suppliers: BTreeMap<i64, Accumulator> = BTreeMap::new();

    for order in orders {
        let (id, name) = fields::many2one(order, "partner_id").unwrap_or((0, "Unknown"));
        let acc = suppliers.entry(id).or_insert_with(|| Accumulator {
            name: name.to_string(),
            ..Default::default()
        });
        acc.order_count += 1;
        acc.total_amount += fields::float(order, "amount_total");

        let planned = fields::text(order, "date_planned").and_then(parse_odoo_datetime);
        let effective = fields::text(order, "effective_date").and_then(parse_odoo_datetime);
        if let (Some(planned), Some(effective)) = (planned, effective) {
            let delay = (effective - planned).num_seconds() as f64 / 86_400.0;
            acc.delays.push(delay);
        }
    }

    let mut stats: Vec<SupplierStats> = suppliers
        .into_iter()
        .map(|(id, acc)| {
            let received = acc.delays.len() as u64;
            let on_time = acc.delays.iter().filter(|d| **d <= 0.0).count() as u64;
            let (on_time_rate, average_delay_days) = if received > 0 {
                (
                    Some(round2(on_time as f64 / received as f64 * 100.0)),
                    Some(round2(acc.delays.iter().sum::<f64>() / received as f64)),
                )
            } else {
                (None, None)
            };

            SupplierStats {
                id,
                name: acc.name,
                order_count: acc.order_count,
                total_amount: acc.total_amount,
                average_order_value: round2(ratio(acc.total_amount, acc.order_count as f64)),
                received_count: received,
                on_time_count: on_time,
                on_time_rate,
                average_delay_days,
            }
        })
        .collect();

    stats.sort_by(|a, b| b.total_amount.total_cmp(&a.total_amount).then(a.id.cmp(&b.id)));
    stats
}

/// Spend and delivery punctuality per supplier.
pub struct AnalyzeSupplierPerformanceTool;

#[async_trait::async_trait]
impl OdooTool for AnalyzeSupplierPerformanceTool {
    const NAME: &'static str = "analyze_supplier_performance";
    const DESCRIPTION: &'static str = "Analyze supplier performance over a period: order count, total and average spend, and delivery punctuality (average delay, on-time rate) per supplier, optionally restricted to given suppliers.";
    type Params = SupplierPerformanceInput;

    #[instrument(skip_all, fields(from = %params.date_from, to = %params.date_to))]
    async fn execute(client: &OdooClient, params: SupplierPerformanceInput) -> Result<Json, ToolError> {
        let mut domain = Domain::new()
            .term("date_order", ">=", params.date_from.as_str())
            .term("date_order", "<=", params.date_to.as_str())
            .term("state", "in", json!(["purchase", "done"]));
        if let Some(ids) = params.supplier_ids.as_deref().filter(|ids| !ids.is_empty()) {
            domain.push("partner_id", "in", json!(ids));
        }

        let orders = client
            .search_read("purchase.order", &domain, SearchOptions::fields(FIELDS))
            .await?;
        debug!(orders = orders.len(), "Loaded purchase orders");

        let suppliers = supplier_stats(&orders);
        let total_amount: f64 = suppliers.iter().map(|s| s.total_amount).sum();

        Ok(json!({
            "period": { "from": params.date_from, "to": params.date_to },
            "summary": {
                "supplier_count": suppliers.len(),
                "order_count": orders.len(),
                "total_amount": total_amount,
            },
            "suppliers": suppliers,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::odoo::client::testing::{MockTransport, client};
    use std::sync::Arc;

    fn orders() -> Json {
        json!([
            {
                "id": 1, "partner_id": [10, "Wood Corner"], "amount_total": 1000.0,
                "date_planned": "2024-02-10 08:00:00", "effective_date": "2024-02-09 10:00:00"
            },
            {
                "id": 2, "partner_id": [10, "Wood Corner"], "amount_total": 500.0,
                "date_planned": "2024-02-20 08:00:00", "effective_date": "2024-02-23 08:00:00"
            },
            {
                "id": 3, "partner_id": [11, "Ready Mat"], "amount_total": 2000.0,
                "date_planned": "2024-02-25 08:00:00", "effective_date": false
            }
        ])
    }

    #[test]
    fn test_supplier_stats() {
        let records: Vec<Record> = serde_json::from_value(orders()).unwrap();
        let stats = supplier_stats(&records);

        assert_eq!(stats.len(), 2);
        assert_eq!(stats[0].name, "Ready Mat");
        assert_eq!(stats[0].received_count, 0);
        assert_eq!(stats[0].on_time_rate, None);

        let wood = &stats[1];
        assert_eq!(wood.order_count, 2);
        assert_eq!(wood.total_amount, 1500.0);
        assert_eq!(wood.average_order_value, 750.0);
        assert_eq!(wood.received_count, 2);
        assert_eq!(wood.on_time_count, 1);
        assert_eq!(wood.on_time_rate, Some(50.0));
        // (-22h + 72h) / 2 = 25h
        assert_eq!(wood.average_delay_days, Some(round2(25.0 / 24.0)));
    }

    #[tokio::test]
    async fn test_supplier_filter_in_domain() {
        let transport = Arc::new(MockTransport::new().on("purchase.order", "search_read", orders()));
        let client = client(transport.clone());
        let params = SupplierPerformanceInput {
            date_from: "2024-02-01".to_string(),
            date_to: "2024-02-29".to_string(),
            supplier_ids: Some(vec![10, 11]),
        };

        let result = AnalyzeSupplierPerformanceTool::execute(&client, params).await.unwrap();

        let search = &transport.calls_to("purchase.order", "search_read")[0];
        assert_eq!(search.args[0][3], json!(["partner_id", "in", [10, 11]]));
        assert_eq!(result["summary"]["supplier_count"], 2);
        assert_eq!(result["summary"]["total_amount"], 3500.0);
        assert_eq!(result["suppliers"][0]["id"], 11);
    }

    #[tokio::test]
    async fn test_empty_supplier_ids_is_no_filter() {
        let transport = Arc::new(MockTransport::new().on("purchase.order", "search_read", orders()));
        let client = client(transport.clone());
        let params = SupplierPerformanceInput {
            date_from: "2024-02-01".to_string(),
            date_to: "2024-02-29".to_string(),
            supplier_ids: Some(vec![]),
        };

        AnalyzeSupplierPerformanceTool::execute(&client, params).await.unwrap();

        let search = &transport.calls_to("purchase.order", "search_read")[0];
        assert_eq!(search.args[0].as_array().unwrap().len(), 3);
    }
}
