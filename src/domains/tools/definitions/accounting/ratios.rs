//! Financial ratio analysis tool definition.
//!
//! Balances are summed from posted move lines in the period, grouped by the
//! account type's internal group. Ratios with a zero denominator are 0.

use serde_json::{Map, Value as Json, json};
use tracing::{debug, instrument};

use crate::core::odoo::{Domain, OdooClient, SearchOptions};
use crate::domains::tools::definitions::common::{ratio, sum_field};
use crate::domains::tools::schemas::{FinancialRatioInput, Ratio};
use crate::domains::tools::{OdooTool, ToolError};

/// Summed balances feeding the ratios.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Balances {
    pub total_assets: f64,
    pub current_assets: f64,
    pub total_liabilities: f64,
    pub current_liabilities: f64,
    pub total_equity: f64,
    pub total_income: f64,
    pub total_expenses: f64,
}

impl Balances {
    pub fn net_income(&self) -> f64 {
        self.total_income - self.total_expenses
    }

    /// Figures for one ratio family.
    pub fn compute(&self, family: Ratio) -> Json {
        let net_income = self.net_income();
        let liabilities = self.total_liabilities.abs();
        match family {
            Ratio::Liquidity => json!({
                "current_ratio": ratio(self.current_assets, self.current_liabilities.abs()),
                "current_assets": self.current_assets,
                "current_liabilities": self.current_liabilities.abs(),
            }),
            Ratio::Profitability => json!({
                "return_on_assets": ratio(net_income, self.total_assets) * 100.0,
                "return_on_equity": ratio(net_income, self.total_equity) * 100.0,
                "net_profit_margin": ratio(net_income, self.total_income) * 100.0,
                "net_income": net_income,
                "total_income": self.total_income,
            }),
            Ratio::Debt => json!({
                "debt_ratio": ratio(liabilities, self.total_assets) * 100.0,
                "leverage_ratio": ratio(liabilities, self.total_equity),
                "total_liabilities": liabilities,
                "total_equity": self.total_equity,
            }),
            Ratio::Efficiency => json!({
                "asset_turnover": ratio(self.total_income, self.total_assets),
            }),
        }
    }
}

/// Liquidity, profitability, debt and efficiency ratios over a period.
pub struct AnalyzeFinancialRatiosTool;

impl AnalyzeFinancialRatiosTool {
    async fn balance(
        client: &OdooClient,
        params: &FinancialRatioInput,
        group: &str,
        account_type: Option<&str>,
    ) -> Result<f64, ToolError> {
        let mut domain = Domain::new().term("account_id.user_type_id.internal_group", "=", group);
        if let Some(account_type) = account_type {
            domain.push("account_id.user_type_id.type", "=", account_type);
        }
        domain.push("date", ">=", params.date_from.as_str());
        domain.push("date", "<=", params.date_to.as_str());
        domain.push("parent_state", "=", "posted");

        let lines = client
            .search_read(
                "account.move.line",
                &domain,
                SearchOptions::fields(&["account_id", "balance"]),
            )
            .await?;
        Ok(sum_field(&lines, "balance"))
    }
}

#[async_trait::async_trait]
impl OdooTool for AnalyzeFinancialRatiosTool {
    const NAME: &'static str = "analyze_financial_ratios";
    const DESCRIPTION: &'static str = "Calculate key financial ratios from posted journal items over a period. Families: 'liquidity' (current ratio), 'profitability' (ROA, ROE, net margin), 'debt' (debt ratio, leverage), 'efficiency' (asset turnover).";
    type Params = FinancialRatioInput;

    #[instrument(skip_all, fields(from = %params.date_from, to = %params.date_to, ratios = ?params.ratios))]
    async fn execute(client: &OdooClient, params: FinancialRatioInput) -> Result<Json, ToolError> {
        let balances = Balances {
            total_assets: Self::balance(client, &params, "asset", None).await?,
            current_assets: Self::balance(client, &params, "asset", Some("liquidity")).await?,
            total_liabilities: Self::balance(client, &params, "liability", None).await?,
            current_liabilities: Self::balance(client, &params, "liability", Some("payable")).await?,
            total_equity: Self::balance(client, &params, "equity", None).await?,
            total_income: Self::balance(client, &params, "income", None).await?,
            total_expenses: Self::balance(client, &params, "expense", None).await?,
        };
        debug!(?balances, "Balances loaded");

        let mut ratios = Map::new();
        for family in &params.ratios {
            ratios.insert(family.as_str().to_string(), balances.compute(*family));
        }

        Ok(json!({
            "period": { "from": params.date_from, "to": params.date_to },
            "summary": {
                "total_assets": balances.total_assets,
                "total_liabilities": balances.total_liabilities.abs(),
                "total_equity": balances.total_equity,
                "total_income": balances.total_income,
                "total_expenses": balances.total_expenses.abs(),
                "net_income": balances.net_income(),
            },
            "ratios": ratios,
        }))
    }
}
