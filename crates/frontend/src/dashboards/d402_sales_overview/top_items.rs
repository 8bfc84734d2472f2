use super::api::SalesGateway;
use super::chart::ChartPeriodRange;
use super::gate::{RefreshOutcome, RefreshScope, ScopeRefresher};
use super::render::{settle, top_items_list, DashboardView};
use std::cell::Cell;
use std::rc::Rc;

/// Drives the ranked "top items" list.
///
/// The ranking follows the chart period: `refresh` only accepts a
/// [`ChartPeriodRange`], so picking a summary preset, a custom range or a
/// calendar day never changes it. Its gate is separate from the chart's even
/// though both use the same range.
pub struct TopItemsRefreshController {
    period: Cell<Option<ChartPeriodRange>>,
    limit: usize,
    refresher: ScopeRefresher,
    gateway: Rc<dyn SalesGateway>,
    view: Rc<dyn DashboardView>,
}

impl TopItemsRefreshController {
    pub fn new(gateway: Rc<dyn SalesGateway>, view: Rc<dyn DashboardView>, limit: usize) -> Self {
        Self {
            period: Cell::new(None),
            limit,
            refresher: ScopeRefresher::new(RefreshScope::TopItems),
            gateway,
            view,
        }
    }

    /// Chart period the list was last requested for
    pub fn period(&self) -> Option<ChartPeriodRange> {
        self.period.get()
    }

    pub async fn refresh(&self, period: ChartPeriodRange) -> RefreshOutcome {
        self.period.set(Some(period));
        self.view.set_loading(RefreshScope::TopItems, true);

        let outcome = self
            .refresher
            .run(
                || {
                    let range = self.period.get().unwrap_or(period).range();
                    let gateway = Rc::clone(&self.gateway);
                    async move {
                        gateway
                            .fetch_sales(range)
                            .await
                            .map(|result| (range, result))
                    }
                },
                |(range, result)| {
                    self.view.set_error(RefreshScope::TopItems, None);
                    self.view
                        .render_top_items(top_items_list(&result.top_items, range, self.limit));
                },
            )
            .await;

        settle(self.view.as_ref(), RefreshScope::TopItems, &outcome);
        outcome
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboards::d402_sales_overview::testing::*;
    use contracts::dashboards::d402_sales_overview::{ResolvedRange, TopItem};
    use futures::executor::{block_on, LocalPool};
    use futures::task::LocalSpawnExt;

    fn controller(gateway: Rc<FakeGateway>, view: Rc<RecordingView>, limit: usize) -> Rc<TopItemsRefreshController> {
        Rc::new(TopItemsRefreshController::new(gateway, view, limit))
    }

    #[test]
    fn test_refresh_ranks_and_limits() {
        let gateway = Rc::new(FakeGateway::immediate());
        gateway.respond_with(|range| {
            let mut result = sample_result(range);
            result.top_items = (1..=5)
                .map(|i| TopItem {
                    name: format!("item {}", i),
                    quantity: i,
                    sales: 10.0 * i as f64,
                })
                .collect();
            Ok(result)
        });
        let view = Rc::new(RecordingView::default());
        let top = controller(gateway.clone(), view.clone(), 3);

        let period = ChartPeriodRange::for_period(7, date(2024, 6, 10));
        assert_eq!(block_on(top.refresh(period)), RefreshOutcome::Applied);

        let lists = view.top_items();
        let names: Vec<&str> = lists[0].items.iter().map(|i| i.name.as_str()).collect();
        assert_eq!(names, vec!["item 5", "item 4", "item 3"]);
        assert_eq!(top.period(), Some(period));
    }

    #[test]
    fn test_newer_period_replaces_in_flight_request() {
        let gateway = Rc::new(FakeGateway::deferred());
        let view = Rc::new(RecordingView::default());
        let top = controller(gateway.clone(), view.clone(), 10);
        let mut pool = LocalPool::new();
        let spawner = pool.spawner();
        let today = date(2024, 6, 10);

        for days in [7, 90] {
            let top = top.clone();
            spawner
                .spawn_local(async move {
                    top.refresh(ChartPeriodRange::for_period(days, today)).await;
                })
                .unwrap();
            pool.run_until_stalled();
        }

        let week = ResolvedRange::new(date(2024, 6, 4), today);
        let quarter = ChartPeriodRange::for_period(90, today).range();
        assert_eq!(gateway.pending_ranges(), vec![week]);

        gateway.resolve_range(week);
        pool.run_until_stalled();
        assert!(view.top_items().is_empty());

        gateway.resolve_range(quarter);
        pool.run_until_stalled();
        let lists = view.top_items();
        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].range, quarter);
        assert_eq!(gateway.requests(), vec![week, quarter]);
    }
}
