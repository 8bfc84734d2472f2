use super::range::{ResolvedRange, ISO_DATE_FORMAT};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Query for `GET /api/dashboard-data`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardDataQuery {
    /// Start date in format "YYYY-MM-DD", inclusive
    pub start: String,
    /// End date in format "YYYY-MM-DD", inclusive
    pub end: String,
}

impl From<ResolvedRange> for DashboardDataQuery {
    fn from(range: ResolvedRange) -> Self {
        Self {
            start: range.start.format(ISO_DATE_FORMAT).to_string(),
            end: range.end.format(ISO_DATE_FORMAT).to_string(),
        }
    }
}

/// Aggregated sales for one requested range
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AggregatedSalesResult {
    /// Sales for the requested range
    pub period_sales: f64,
    pub today_sales: f64,
    /// Calendar week-to-date
    pub week_sales: f64,
    /// Calendar month-to-date
    pub month_sales: f64,
    pub total_customers: u64,
    /// Per-day figures keyed by local calendar day; days without sales may be absent
    pub daily_sales: BTreeMap<NaiveDate, DailySales>,
    /// Share of sales per category, in percent
    pub category_sales: BTreeMap<String, f64>,
    pub top_items: Vec<TopItem>,
    pub monthly_trend: Vec<MonthlyTrendPoint>,
}

/// Field names that identify an inlined result (no `data` envelope)
pub const AGGREGATED_SALES_FIELDS: [&str; 9] = [
    "periodSales",
    "todaySales",
    "weekSales",
    "monthSales",
    "totalCustomers",
    "dailySales",
    "categorySales",
    "topItems",
    "monthlyTrend",
];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DailySales {
    pub sales: f64,
    pub orders: u64,
    pub customers: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TopItem {
    pub name: String,
    pub quantity: u64,
    pub sales: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MonthlyTrendPoint {
    /// Month label as sent by the backend, e.g. "2024-06"
    pub month: String,
    pub sales: f64,
}

/// Preferred response shape: `{ "data": { ... } }`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardDataEnvelope {
    pub data: AggregatedSalesResult,
}
