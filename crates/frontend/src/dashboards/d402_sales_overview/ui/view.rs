use crate::dashboards::d402_sales_overview::gate::RefreshScope;
use crate::dashboards::d402_sales_overview::render::{
    CalendarAnnotations, ChartBundle, DashboardView, SummaryCards, TopItemsList,
};
use leptos::prelude::*;

/// Loading flag and last error of one scope
#[derive(Clone, Copy)]
pub struct ScopeStatus {
    pub loading: RwSignal<bool>,
    pub error: RwSignal<Option<String>>,
}

impl ScopeStatus {
    fn new() -> Self {
        Self {
            loading: RwSignal::new(false),
            error: RwSignal::new(None),
        }
    }
}

/// [`DashboardView`] backed by signals the components read from
#[derive(Clone, Copy)]
pub struct SignalView {
    pub summary_status: ScopeStatus,
    pub chart_status: ScopeStatus,
    pub top_items_status: ScopeStatus,
    pub active_preset: RwSignal<Option<&'static str>>,
    pub summary_label: RwSignal<String>,
    pub chart_days: RwSignal<u32>,
    pub summary: RwSignal<Option<SummaryCards>>,
    pub calendar: RwSignal<Option<CalendarAnnotations>>,
    pub charts: RwSignal<Option<ChartBundle>>,
    pub top_items: RwSignal<Option<TopItemsList>>,
}

impl SignalView {
    pub fn new() -> Self {
        Self {
            summary_status: ScopeStatus::new(),
            chart_status: ScopeStatus::new(),
            top_items_status: ScopeStatus::new(),
            active_preset: RwSignal::new(None),
            summary_label: RwSignal::new(String::new()),
            chart_days: RwSignal::new(0),
            summary: RwSignal::new(None),
            calendar: RwSignal::new(None),
            charts: RwSignal::new(None),
            top_items: RwSignal::new(None),
        }
    }

    pub fn status(&self, scope: RefreshScope) -> ScopeStatus {
        match scope {
            RefreshScope::Summary => self.summary_status,
            RefreshScope::Chart => self.chart_status,
            RefreshScope::TopItems => self.top_items_status,
        }
    }
}

impl DashboardView for SignalView {
    fn set_loading(&self, scope: RefreshScope, loading: bool) {
        self.status(scope).loading.set(loading);
    }

    fn set_error(&self, scope: RefreshScope, message: Option<String>) {
        self.status(scope).error.set(message);
    }

    fn set_active_preset(&self, preset: Option<&'static str>) {
        self.active_preset.set(preset);
    }

    fn set_summary_label(&self, label: &str) {
        self.summary_label.set(label.to_string());
    }

    fn render_summary(&self, cards: SummaryCards) {
        self.summary.set(Some(cards));
    }

    fn render_calendar(&self, annotations: CalendarAnnotations) {
        self.calendar.set(Some(annotations));
    }

    fn set_chart_period(&self, days: u32) {
        self.chart_days.set(days);
    }

    fn render_charts(&self, charts: ChartBundle) {
        self.charts.set(Some(charts));
    }

    fn render_top_items(&self, list: TopItemsList) {
        self.top_items.set(Some(list));
    }
}
