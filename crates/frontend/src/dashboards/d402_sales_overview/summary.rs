use super::api::SalesGateway;
use super::gate::{RefreshOutcome, RefreshScope, ScopeRefresher};
use super::render::{calendar_annotations, settle, summary_cards, DashboardView};
use crate::shared::clock::Clock;
use contracts::dashboards::d402_sales_overview::{
    resolve, AggregatedSalesResult, CalendarMonth, RangeSelector, ResolvedRange,
};
use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Summary range selection. Only [`SummaryRefreshController::select_range`] changes it.
#[derive(Debug, Clone, PartialEq)]
pub struct SummaryState {
    pub selector: RangeSelector,
    pub label: String,
}

impl Default for SummaryState {
    fn default() -> Self {
        Self {
            selector: RangeSelector::Today,
            label: RangeSelector::Today.label(),
        }
    }
}

/// Drives the four summary cards and the calendar overlay
pub struct SummaryRefreshController {
    state: RefCell<SummaryState>,
    displayed_month: Rc<Cell<CalendarMonth>>,
    last_result: RefCell<Option<Rc<AggregatedSalesResult>>>,
    last_range: Cell<Option<ResolvedRange>>,
    refresher: ScopeRefresher,
    gateway: Rc<dyn SalesGateway>,
    view: Rc<dyn DashboardView>,
    clock: Rc<dyn Clock>,
}

impl SummaryRefreshController {
    pub fn new(
        gateway: Rc<dyn SalesGateway>,
        view: Rc<dyn DashboardView>,
        clock: Rc<dyn Clock>,
        displayed_month: Rc<Cell<CalendarMonth>>,
    ) -> Self {
        Self {
            state: RefCell::new(SummaryState::default()),
            displayed_month,
            last_result: RefCell::new(None),
            last_range: Cell::new(None),
            refresher: ScopeRefresher::new(RefreshScope::Summary),
            gateway,
            view,
            clock,
        }
    }

    pub fn state(&self) -> SummaryState {
        self.state.borrow().clone()
    }

    pub fn selector(&self) -> RangeSelector {
        self.state.borrow().selector
    }

    /// Range of the last rendered summary
    pub fn last_range(&self) -> Option<ResolvedRange> {
        self.last_range.get()
    }

    /// Push selection affordances (active preset button, label) to the view
    pub fn show_selection(&self) {
        let state = self.state.borrow();
        self.view.set_active_preset(state.selector.preset_key());
        self.view.set_summary_label(&state.label);
    }

    /// Change the summary range and refresh the summary cards only
    pub async fn select_range(&self, selector: RangeSelector) -> RefreshOutcome {
        {
            let mut state = self.state.borrow_mut();
            state.selector = selector;
            state.label = selector.label();
        }
        log::info!("summary: range selected: {}", selector.label());
        self.show_selection();
        self.refresh().await
    }

    pub async fn refresh(&self) -> RefreshOutcome {
        self.view.set_loading(RefreshScope::Summary, true);

        let outcome = self
            .refresher
            .run(
                || {
                    let selector = self.state.borrow().selector;
                    let today = self.clock.today();
                    let range = resolve(selector, today);
                    let gateway = Rc::clone(&self.gateway);
                    async move {
                        gateway
                            .fetch_sales(range)
                            .await
                            .map(|result| (selector, range, today, result))
                    }
                },
                |(selector, range, today, result)| {
                    self.view.set_error(RefreshScope::Summary, None);
                    self.view
                        .render_summary(summary_cards(&result, selector, range, today));
                    self.last_range.set(Some(range));
                    *self.last_result.borrow_mut() = Some(Rc::new(result));
                    self.render_calendar();
                },
            )
            .await;

        settle(self.view.as_ref(), RefreshScope::Summary, &outcome);
        outcome
    }

    /// Re-draw the per-day overlay for the displayed month from the last result
    pub fn render_calendar(&self) {
        let month = self.displayed_month.get();
        let last_result = self.last_result.borrow();
        let annotations = match last_result.as_deref() {
            Some(result) => calendar_annotations(month, &result.daily_sales),
            None => calendar_annotations(month, &Default::default()),
        };
        self.view.render_calendar(annotations);
    }
}
