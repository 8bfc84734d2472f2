//! Fakes shared by the controller tests

use super::api::SalesGateway;
use super::error::GatewayError;
use super::gate::RefreshScope;
use super::render::{
    CalendarAnnotations, ChartBundle, DashboardView, SummaryCards, TopItemsList,
};
use crate::shared::clock::Clock;
use async_trait::async_trait;
use chrono::NaiveDate;
use contracts::dashboards::d402_sales_overview::{
    AggregatedSalesResult, DailySales, MonthlyTrendPoint, ResolvedRange, TopItem,
};
use futures::channel::oneshot;
use std::cell::{Cell, RefCell};

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub struct FixedClock(pub Cell<NaiveDate>);

impl FixedClock {
    pub fn new(today: NaiveDate) -> Self {
        Self(Cell::new(today))
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0.get()
    }
}

/// Result whose figures identify the range it was fetched for
pub fn sample_result(range: ResolvedRange) -> AggregatedSalesResult {
    let mut result = AggregatedSalesResult {
        period_sales: 100.0 * range.len_days() as f64,
        today_sales: 100.0,
        week_sales: 700.0,
        month_sales: 3000.0,
        total_customers: range.len_days() as u64,
        ..Default::default()
    };
    for day in range.days() {
        result.daily_sales.insert(
            day,
            DailySales {
                sales: 100.0,
                orders: 2,
                customers: 1,
            },
        );
    }
    result.category_sales.insert("Кофе".to_string(), 70.0);
    result.category_sales.insert("Чай".to_string(), 30.0);
    result.top_items.push(TopItem {
        name: format!("item {}", range),
        quantity: 3,
        sales: 300.0,
    });
    result.monthly_trend.push(MonthlyTrendPoint {
        month: range.end.format("%Y-%m").to_string(),
        sales: result.period_sales,
    });
    result
}

type Reply = Result<AggregatedSalesResult, GatewayError>;

/// Gateway answering from a closure, or parking requests until resolved by hand
pub struct FakeGateway {
    requests: RefCell<Vec<ResolvedRange>>,
    deferred: bool,
    pending: RefCell<Vec<(ResolvedRange, oneshot::Sender<Reply>)>>,
    responder: RefCell<Box<dyn FnMut(ResolvedRange) -> Reply>>,
}

impl FakeGateway {
    pub fn immediate() -> Self {
        Self {
            requests: RefCell::new(Vec::new()),
            deferred: false,
            pending: RefCell::new(Vec::new()),
            responder: RefCell::new(Box::new(|range| Ok(sample_result(range)))),
        }
    }

    pub fn deferred() -> Self {
        Self {
            deferred: true,
            ..Self::immediate()
        }
    }

    pub fn respond_with(&self, responder: impl FnMut(ResolvedRange) -> Reply + 'static) {
        *self.responder.borrow_mut() = Box::new(responder);
    }

    pub fn requests(&self) -> Vec<ResolvedRange> {
        self.requests.borrow().clone()
    }

    pub fn pending_ranges(&self) -> Vec<ResolvedRange> {
        self.pending.borrow().iter().map(|(r, _)| *r).collect()
    }

    /// Answer the parked request at `index`
    pub fn resolve(&self, index: usize, reply: Reply) {
        let (_, tx) = self.pending.borrow_mut().remove(index);
        let _ = tx.send(reply);
    }

    /// Answer the parked request for `range` with its sample result
    pub fn resolve_range(&self, range: ResolvedRange) {
        let index = self
            .pending
            .borrow()
            .iter()
            .position(|(r, _)| *r == range)
            .expect("no pending request for range");
        self.resolve(index, Ok(sample_result(range)));
    }
}

#[async_trait(?Send)]
impl SalesGateway for FakeGateway {
    async fn fetch_sales(&self, range: ResolvedRange) -> Reply {
        self.requests.borrow_mut().push(range);
        if self.deferred {
            let (tx, rx) = oneshot::channel();
            self.pending.borrow_mut().push((range, tx));
            rx.await
                .unwrap_or_else(|_| Err(GatewayError::Transport("dropped".to_string())))
        } else {
            let mut responder = self.responder.borrow_mut();
            (*responder)(range)
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ViewEvent {
    Loading(RefreshScope, bool),
    Error(RefreshScope, Option<String>),
    ActivePreset(Option<&'static str>),
    SummaryLabel(String),
    Summary(SummaryCards),
    Calendar(CalendarAnnotations),
    ChartPeriod(u32),
    Charts(ChartBundle),
    TopItems(TopItemsList),
}

#[derive(Default)]
pub struct RecordingView {
    pub events: RefCell<Vec<ViewEvent>>,
}

impl RecordingView {
    fn push(&self, event: ViewEvent) {
        self.events.borrow_mut().push(event);
    }

    pub fn summaries(&self) -> Vec<SummaryCards> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Summary(s) => Some(s.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn charts(&self) -> Vec<ChartBundle> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Charts(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn top_items(&self) -> Vec<TopItemsList> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::TopItems(t) => Some(t.clone()),
                _ => None,
            })
            .collect()
    }

    pub fn calendars(&self) -> Vec<CalendarAnnotations> {
        self.events
            .borrow()
            .iter()
            .filter_map(|e| match e {
                ViewEvent::Calendar(c) => Some(c.clone()),
                _ => None,
            })
            .collect()
    }

    /// Last loading flag reported for `scope`
    pub fn is_loading(&self, scope: RefreshScope) -> bool {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|e| match e {
                ViewEvent::Loading(s, loading) if *s == scope => Some(*loading),
                _ => None,
            })
            .unwrap_or(false)
    }

    pub fn last_error(&self, scope: RefreshScope) -> Option<String> {
        self.events
            .borrow()
            .iter()
            .rev()
            .find_map(|e| match e {
                ViewEvent::Error(s, message) if *s == scope => Some(message.clone()),
                _ => None,
            })
            .flatten()
    }

    pub fn clear(&self) {
        self.events.borrow_mut().clear();
    }
}

impl DashboardView for RecordingView {
    fn set_loading(&self, scope: RefreshScope, loading: bool) {
        self.push(ViewEvent::Loading(scope, loading));
    }

    fn set_error(&self, scope: RefreshScope, message: Option<String>) {
        self.push(ViewEvent::Error(scope, message));
    }

    fn set_active_preset(&self, preset: Option<&'static str>) {
        self.push(ViewEvent::ActivePreset(preset));
    }

    fn set_summary_label(&self, label: &str) {
        self.push(ViewEvent::SummaryLabel(label.to_string()));
    }

    fn render_summary(&self, cards: SummaryCards) {
        self.push(ViewEvent::Summary(cards));
    }

    fn render_calendar(&self, annotations: CalendarAnnotations) {
        self.push(ViewEvent::Calendar(annotations));
    }

    fn set_chart_period(&self, days: u32) {
        self.push(ViewEvent::ChartPeriod(days));
    }

    fn render_charts(&self, charts: ChartBundle) {
        self.push(ViewEvent::Charts(charts));
    }

    fn render_top_items(&self, list: TopItemsList) {
        self.push(ViewEvent::TopItems(list));
    }
}
