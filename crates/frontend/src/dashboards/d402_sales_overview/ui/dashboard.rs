use super::calendar_panel::CalendarPanel;
use super::range_toolbar::RangeToolbar;
use super::top_items_table::TopItemsTable;
use super::view::{ScopeStatus, SignalView};
use crate::dashboards::d402_sales_overview::calendar::MonthDirection;
use crate::dashboards::d402_sales_overview::config::DashboardConfig;
use crate::dashboards::d402_sales_overview::dashboard::SalesDashboard;
use crate::shared::chart_bridge::{render_chart, ChartKind};
use crate::shared::components::StatCard;
use crate::shared::date_utils::format_short_range;
use chrono::NaiveDate;
use leptos::prelude::*;
use leptos::task::spawn_local;
use std::rc::Rc;
use thaw::*;

const DAILY_CANVAS: &str = "d402-daily-chart";
const CATEGORY_CANVAS: &str = "d402-category-chart";
const TREND_CANVAS: &str = "d402-trend-chart";

const CARD_PLACEHOLDERS: [&str; 4] = ["Продажи за период", "Неделя", "Месяц", "Покупатели"];

/// Loading and error banners of one scope
#[component]
fn ScopeBanner(status: ScopeStatus) -> impl IntoView {
    view! {
        {move || {
            if status.loading.get() {
                view! {
                    <div class="d402-loading">
                        <span>"Загрузка данных..."</span>
                    </div>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }
        }}
        {move || {
            if let Some(err) = status.error.get() {
                view! {
                    <div class="d402-error">
                        <strong>"⚠ Ошибка: "</strong>
                        {err}
                    </div>
                }.into_any()
            } else {
                view! { <></> }.into_any()
            }
        }}
    }
}

/// Sales overview dashboard component
#[component]
pub fn SalesOverviewDashboard(config: DashboardConfig) -> impl IntoView {
    let view = SignalView::new();
    let chart_periods = config.chart_periods.clone();

    // SalesDashboard holds Rc/Cell state, not Send+Sync, store locally
    let dashboard = StoredValue::new_local(Rc::new(SalesDashboard::with_http(
        config,
        Rc::new(view),
    )));

    // Initial load on mount
    Effect::new(move |_| {
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.init().await;
        });
    });

    // Hand chart data to the page's charting library whenever it changes
    Effect::new(move |_| {
        let Some(bundle) = view.charts.get() else {
            return;
        };
        let results = [
            render_chart(DAILY_CANVAS, ChartKind::BarLine, &bundle.daily),
            render_chart(CATEGORY_CANVAS, ChartKind::Donut, &bundle.categories),
            render_chart(TREND_CANVAS, ChartKind::Line, &bundle.trend),
        ];
        for err in results.into_iter().filter_map(Result::err) {
            log::error!("Failed to render D402 chart: {:?}", err);
        }
    });

    let on_preset = Callback::new(move |key: &'static str| {
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.select_preset(key).await;
        });
    });

    let on_custom = Callback::new(move |(start, end): (String, String)| {
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.select_custom(&start, &end).await;
        });
    });

    let on_month = Callback::new(move |direction: MonthDirection| {
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.change_month(direction).await;
        });
    });

    let on_day = Callback::new(move |day: NaiveDate| {
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.click_day(day).await;
        });
    });

    let on_period_change = move |ev: leptos::ev::Event| {
        let Ok(days) = event_target_value(&ev).parse::<u32>() else {
            return;
        };
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.set_chart_period(days).await;
        });
    };

    let on_refresh = move |_| {
        let dashboard = dashboard.get_value();
        spawn_local(async move {
            dashboard.refresh_all().await;
        });
    };

    let cards = (0..CARD_PLACEHOLDERS.len())
        .map(|idx| {
            let card = Signal::derive(move || {
                view.summary
                    .get()
                    .and_then(|s| s.cards.get(idx).cloned())
            });
            view! { <StatCard card=card placeholder=CARD_PLACEHOLDERS[idx]/> }
        })
        .collect_view();

    let chart_caption = move || {
        view.charts
            .get()
            .map(|c| format_short_range(&c.range))
            .unwrap_or_default()
    };

    view! {
        <div id="d402_sales_overview--dashboard" data-page-category="dashboard" class="d402-dashboard">
            <Flex justify=FlexJustify::SpaceBetween align=FlexAlign::Center>
                <h2>"Обзор продаж"</h2>
                <Button appearance=ButtonAppearance::Secondary on_click=on_refresh>
                    "Обновить"
                </Button>
            </Flex>

            <section class="d402-summary">
                <RangeToolbar
                    active_preset=view.active_preset
                    label=view.summary_label
                    on_preset=on_preset
                    on_custom=on_custom
                />
                <ScopeBanner status=view.summary_status/>
                <div class="d402-cards">{cards}</div>
                <CalendarPanel annotations=view.calendar on_month=on_month on_day=on_day/>
            </section>

            <section class="d402-charts">
                <Flex align=FlexAlign::Center gap=FlexGap::Small>
                    <label>"Период графиков:"</label>
                    <select
                        prop:value=move || view.chart_days.get().to_string()
                        on:change=on_period_change
                    >
                        {chart_periods
                            .into_iter()
                            .map(|days| {
                                view! {
                                    <option value=days.to_string()>{format!("{} дн.", days)}</option>
                                }
                            })
                            .collect_view()}
                    </select>
                    <span class="d402-range-label">{chart_caption}</span>
                </Flex>
                <ScopeBanner status=view.chart_status/>
                <div class="d402-chart-grid">
                    <canvas id=DAILY_CANVAS></canvas>
                    <canvas id=CATEGORY_CANVAS></canvas>
                    <canvas id=TREND_CANVAS></canvas>
                </div>
            </section>

            <section class="d402-top">
                <ScopeBanner status=view.top_items_status/>
                <TopItemsTable list=view.top_items/>
            </section>
        </div>
    }
}
