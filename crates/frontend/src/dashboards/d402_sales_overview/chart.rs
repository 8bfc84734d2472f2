use super::api::SalesGateway;
use super::gate::{RefreshOutcome, RefreshScope, ScopeRefresher};
use super::render::{chart_bundle, settle, DashboardView};
use super::top_items::TopItemsRefreshController;
use crate::shared::clock::Clock;
use chrono::NaiveDate;
use contracts::dashboards::d402_sales_overview::{resolve, RangeSelector, ResolvedRange};
use std::cell::Cell;
use std::rc::Rc;

/// Resolved range of a chart period.
///
/// Top items are ranked over this range, never over the summary selection.
/// It can only be built from a period length, so a summary selector cannot
/// reach the top-items request by accident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPeriodRange(ResolvedRange);

impl ChartPeriodRange {
    pub fn for_period(days: u32, today: NaiveDate) -> Self {
        Self(resolve(RangeSelector::LastNDays(days), today))
    }

    pub fn range(&self) -> ResolvedRange {
        self.0
    }
}

/// Longest chart period in days; the daily series has one point per day
pub const MAX_PERIOD_DAYS: u32 = 366;

fn clamp_period(days: u32) -> u32 {
    days.clamp(1, MAX_PERIOD_DAYS)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChartPeriodState {
    /// Period length in days, 1..=MAX_PERIOD_DAYS
    pub days: u32,
}

/// Drives the daily bar/line chart, the category donut and the monthly trend
pub struct ChartRefreshController {
    state: Cell<ChartPeriodState>,
    refresher: ScopeRefresher,
    gateway: Rc<dyn SalesGateway>,
    view: Rc<dyn DashboardView>,
    clock: Rc<dyn Clock>,
}

impl ChartRefreshController {
    pub fn new(
        gateway: Rc<dyn SalesGateway>,
        view: Rc<dyn DashboardView>,
        clock: Rc<dyn Clock>,
        default_days: u32,
    ) -> Self {
        Self {
            state: Cell::new(ChartPeriodState {
                days: clamp_period(default_days),
            }),
            refresher: ScopeRefresher::new(RefreshScope::Chart),
            gateway,
            view,
            clock,
        }
    }

    pub fn period(&self) -> u32 {
        self.state.get().days
    }

    /// Push the current period to the period selector
    pub fn show_period(&self) {
        self.view.set_chart_period(self.period());
    }

    pub fn current_range(&self) -> ChartPeriodRange {
        ChartPeriodRange::for_period(self.period(), self.clock.today())
    }

    /// Store a new period and refresh charts and top items over its range.
    ///
    /// Both requests go out together; each has its own gate.
    pub async fn set_period(
        &self,
        days: u32,
        top_items: &TopItemsRefreshController,
    ) -> (RefreshOutcome, RefreshOutcome) {
        let days = clamp_period(days);
        self.state.set(ChartPeriodState { days });
        self.view.set_chart_period(days);
        let period = self.current_range();
        log::info!("chart: period set to {} days ({})", days, period.range());

        futures::join!(self.refresh(), top_items.refresh(period))
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.view.set_loading(RefreshScope::Chart, true);

        let outcome = self
            .refresher
            .run(
                || {
                    let range = self.current_range().range();
                    let gateway = Rc::clone(&self.gateway);
                    async move {
                        gateway
                            .fetch_sales(range)
                            .await
                            .map(|result| (range, result))
                    }
                },
                |(range, result)| {
                    self.view.set_error(RefreshScope::Chart, None);
                    self.view.render_charts(chart_bundle(&result, range));
                },
            )
            .await;

        settle(self.view.as_ref(), RefreshScope::Chart, &outcome);
        outcome
    }
}
