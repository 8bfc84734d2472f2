use super::api::{HttpSalesGateway, SalesGateway};
use super::calendar::{CalendarNavigator, MonthDirection};
use super::chart::ChartRefreshController;
use super::config::DashboardConfig;
use super::gate::RefreshOutcome;
use super::render::DashboardView;
use super::summary::SummaryRefreshController;
use super::top_items::TopItemsRefreshController;
use crate::shared::clock::{Clock, LocalClock};
use chrono::NaiveDate;
use contracts::dashboards::d402_sales_overview::{parse_iso_date, CalendarMonth, RangeSelector};
use std::rc::Rc;

/// Page-lifetime context of the sales overview.
///
/// Holds the three scope controllers and routes host UI events to them.
/// Defaults: summary on "today", chart on the configured period, calendar on
/// the current month. Nothing to tear down.
pub struct SalesDashboard {
    summary: SummaryRefreshController,
    chart: ChartRefreshController,
    top_items: TopItemsRefreshController,
    calendar: CalendarNavigator,
}

impl SalesDashboard {
    pub fn new(
        config: DashboardConfig,
        gateway: Rc<dyn SalesGateway>,
        view: Rc<dyn DashboardView>,
        clock: Rc<dyn Clock>,
    ) -> Self {
        let calendar = CalendarNavigator::new(CalendarMonth::containing(clock.today()));
        let summary = SummaryRefreshController::new(
            Rc::clone(&gateway),
            Rc::clone(&view),
            Rc::clone(&clock),
            calendar.shared_month(),
        );
        let chart = ChartRefreshController::new(
            Rc::clone(&gateway),
            Rc::clone(&view),
            Rc::clone(&clock),
            config.default_chart_days,
        );
        let top_items = TopItemsRefreshController::new(gateway, view, config.top_items_limit);

        Self {
            summary,
            chart,
            top_items,
            calendar,
        }
    }

    /// Dashboard talking to the real backend with the browser's calendar day
    pub fn with_http(config: DashboardConfig, view: Rc<dyn DashboardView>) -> Self {
        let gateway = HttpSalesGateway::new(
            &config.api_base,
            &config.endpoint,
            config.request_timeout_ms,
        );
        Self::new(config, Rc::new(gateway), view, Rc::new(LocalClock))
    }

    pub fn summary(&self) -> &SummaryRefreshController {
        &self.summary
    }

    pub fn chart(&self) -> &ChartRefreshController {
        &self.chart
    }

    pub fn top_items(&self) -> &TopItemsRefreshController {
        &self.top_items
    }

    pub fn calendar(&self) -> &CalendarNavigator {
        &self.calendar
    }

    /// First load: push defaults to the view and fetch every scope
    pub async fn init(&self) {
        log::info!("d402: initial load");
        self.summary.show_selection();
        self.summary.render_calendar();
        self.chart.show_period();
        self.refresh_all().await;
    }

    /// Range button ("today" | "week" | "month"); unknown keys are ignored
    pub async fn select_preset(&self, key: &str) -> Option<RefreshOutcome> {
        let Some(selector) = RangeSelector::from_preset(key) else {
            log::warn!("d402: unknown range preset '{}'", key);
            return None;
        };
        Some(self.summary.select_range(selector).await)
    }

    /// Custom start/end from the date inputs (YYYY-MM-DD)
    pub async fn select_custom(&self, start: &str, end: &str) -> Option<RefreshOutcome> {
        let (Some(start), Some(end)) = (parse_iso_date(start), parse_iso_date(end)) else {
            log::warn!("d402: ignoring custom range '{}'..'{}'", start, end);
            return None;
        };
        if start > end {
            log::warn!("d402: custom range starts after it ends, sending as-is");
        }
        Some(
            self.summary
                .select_range(RangeSelector::Custom(start, end))
                .await,
        )
    }

    /// Chart period selector; refreshes charts and top items, never the summary
    pub async fn set_chart_period(&self, days: u32) -> (RefreshOutcome, RefreshOutcome) {
        self.chart.set_period(days, &self.top_items).await
    }

    /// Calendar month navigation; refreshes the summary only
    pub async fn change_month(&self, direction: MonthDirection) -> RefreshOutcome {
        let month = self.calendar.shift(direction);
        log::debug!("d402: calendar moved to {}-{:02}", month.year, month.month);
        self.summary.render_calendar();
        self.summary.refresh().await
    }

    /// Calendar day click selects that single day for the summary
    pub async fn click_day(&self, day: NaiveDate) -> RefreshOutcome {
        self.summary
            .select_range(RangeSelector::Custom(day, day))
            .await
    }

    /// Manual refresh: replay current selections without resetting them
    pub async fn refresh_all(&self) {
        let period = self.chart.current_range();
        let (summary, chart, top_items) = futures::join!(
            self.summary.refresh(),
            self.chart.refresh(),
            self.top_items.refresh(period)
        );
        log::debug!(
            "d402: refresh_all done: summary={:?} chart={:?} top_items={:?}",
            summary,
            chart,
            top_items
        );
    }
}
