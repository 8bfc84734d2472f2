//! Render pipeline: fetched data -> view models -> write targets
//!
//! Functions here are pure; the only side effects happen in [`DashboardView`]
//! implementations.

use super::gate::{RefreshOutcome, RefreshScope};
use crate::shared::date_utils::{format_day, format_short_range};
use chrono::NaiveDate;
use contracts::dashboards::d402_sales_overview::{
    month_to_date, week_to_date, AggregatedSalesResult, CalendarMonth, DailySales,
    MonthlyTrendPoint, RangeSelector, ResolvedRange, TopItem,
};
use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;

/// Write targets of the dashboard page.
///
/// Summary, chart and top items methods touch disjoint regions, so each
/// controller only ever calls its own subset.
pub trait DashboardView {
    fn set_loading(&self, scope: RefreshScope, loading: bool);
    fn set_error(&self, scope: RefreshScope, message: Option<String>);

    fn set_active_preset(&self, preset: Option<&'static str>);
    fn set_summary_label(&self, label: &str);
    fn render_summary(&self, cards: SummaryCards);
    fn render_calendar(&self, annotations: CalendarAnnotations);

    fn set_chart_period(&self, days: u32);
    fn render_charts(&self, charts: ChartBundle);

    fn render_top_items(&self, list: TopItemsList);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CardFormat {
    Money,
    Count,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCard {
    pub key: &'static str,
    pub title: String,
    pub value: f64,
    pub format: CardFormat,
    pub subtitle: Option<String>,
    /// Always None: no baseline period is fetched
    pub change_percent: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryCards {
    pub range: ResolvedRange,
    pub cards: Vec<SummaryCard>,
}

/// Four summary cards: selected period, calendar week, calendar month, customers.
///
/// Week and month subtitles come from `today`, not from the selector.
pub fn summary_cards(
    result: &AggregatedSalesResult,
    selector: RangeSelector,
    range: ResolvedRange,
    today: NaiveDate,
) -> SummaryCards {
    let cards = vec![
        SummaryCard {
            key: "period",
            title: "Продажи за период".to_string(),
            value: result.period_sales,
            format: CardFormat::Money,
            subtitle: Some(selector.label()),
            change_percent: None,
        },
        SummaryCard {
            key: "week",
            title: "Неделя".to_string(),
            value: result.week_sales,
            format: CardFormat::Money,
            subtitle: Some(format_short_range(&week_to_date(today))),
            change_percent: None,
        },
        SummaryCard {
            key: "month",
            title: "Месяц".to_string(),
            value: result.month_sales,
            format: CardFormat::Money,
            subtitle: Some(format_short_range(&month_to_date(today))),
            change_percent: None,
        },
        SummaryCard {
            key: "customers",
            title: "Покупатели".to_string(),
            value: result.total_customers as f64,
            format: CardFormat::Count,
            subtitle: None,
            change_percent: None,
        },
    ];
    SummaryCards { range, cards }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyPoint {
    pub day: NaiveDate,
    pub label: String,
    pub sales: f64,
    pub orders: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    pub category: String,
    pub percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartBundle {
    pub range: ResolvedRange,
    pub daily: Vec<DailyPoint>,
    pub categories: Vec<DonutSlice>,
    pub trend: Vec<MonthlyTrendPoint>,
}

/// One point per day of `range`; days missing from `daily_sales` are zero
pub fn daily_series(
    daily_sales: &BTreeMap<NaiveDate, DailySales>,
    range: ResolvedRange,
) -> Vec<DailyPoint> {
    range
        .days()
        .map(|day| {
            let figures = daily_sales.get(&day).copied().unwrap_or_default();
            DailyPoint {
                day,
                label: format_day(day),
                sales: figures.sales,
                orders: figures.orders,
            }
        })
        .collect()
}

/// Donut slices, largest share first
pub fn category_slices(category_sales: &BTreeMap<String, f64>) -> Vec<DonutSlice> {
    let mut slices: Vec<DonutSlice> = category_sales
        .iter()
        .filter(|(_, percent)| percent.is_finite())
        .map(|(category, percent)| DonutSlice {
            category: category.clone(),
            percent: *percent,
        })
        .collect();
    slices.sort_by(|a, b| {
        b.percent
            .partial_cmp(&a.percent)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.category.cmp(&b.category))
    });
    slices
}

pub fn chart_bundle(result: &AggregatedSalesResult, range: ResolvedRange) -> ChartBundle {
    ChartBundle {
        range,
        daily: daily_series(&result.daily_sales, range),
        categories: category_slices(&result.category_sales),
        trend: result.monthly_trend.clone(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedItem {
    pub rank: usize,
    pub name: String,
    pub quantity: u64,
    pub sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TopItemsList {
    pub range: ResolvedRange,
    pub items: Vec<RankedItem>,
}

/// Rank by sales, then quantity, then name; keep the first `limit`
pub fn top_items_list(items: &[TopItem], range: ResolvedRange, limit: usize) -> TopItemsList {
    let mut sorted: Vec<&TopItem> = items.iter().collect();
    sorted.sort_by(|a, b| {
        b.sales
            .partial_cmp(&a.sales)
            .unwrap_or(Ordering::Equal)
            .then_with(|| b.quantity.cmp(&a.quantity))
            .then_with(|| a.name.cmp(&b.name))
    });

    let items = sorted
        .into_iter()
        .take(limit)
        .enumerate()
        .map(|(i, item)| RankedItem {
            rank: i + 1,
            name: item.name.clone(),
            quantity: item.quantity,
            sales: item.sales,
        })
        .collect();

    TopItemsList { range, items }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarDay {
    pub day: NaiveDate,
    /// None when the last summary result has no figures for the day
    pub sales: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CalendarAnnotations {
    pub year: i32,
    pub month: u32,
    pub days: Vec<CalendarDay>,
}

/// Per-day sales overlay for every day of the displayed month
pub fn calendar_annotations(
    month: CalendarMonth,
    daily_sales: &BTreeMap<NaiveDate, DailySales>,
) -> CalendarAnnotations {
    let days = month
        .bounds()
        .days()
        .map(|day| CalendarDay {
            day,
            sales: daily_sales.get(&day).map(|d| d.sales),
        })
        .collect();
    CalendarAnnotations {
        year: month.year,
        month: month.month,
        days,
    }
}

/// Clear the loading state once a refresh is over.
///
/// A coalesced request leaves loading on: the running refresh will finish it.
pub fn settle(view: &dyn DashboardView, scope: RefreshScope, outcome: &RefreshOutcome) {
    match outcome {
        RefreshOutcome::Coalesced => {}
        RefreshOutcome::Failed(err) => {
            view.set_loading(scope, false);
            view.set_error(scope, Some(err.to_string()));
        }
        RefreshOutcome::Applied | RefreshOutcome::Stale => {
            view.set_loading(scope, false);
        }
    }
}
