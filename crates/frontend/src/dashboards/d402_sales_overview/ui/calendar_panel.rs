use crate::dashboards::d402_sales_overview::calendar::MonthDirection;
use crate::dashboards::d402_sales_overview::render::CalendarAnnotations;
use crate::shared::date_utils::format_date;
use crate::shared::number_format::format_money;
use chrono::{Datelike, NaiveDate};
use leptos::prelude::*;
use thaw::*;

const MONTH_NAMES: [&str; 12] = [
    "Январь", "Февраль", "Март", "Апрель", "Май", "Июнь", "Июль", "Август", "Сентябрь",
    "Октябрь", "Ноябрь", "Декабрь",
];

const WEEKDAYS: [&str; 7] = ["Пн", "Вт", "Ср", "Чт", "Пт", "Сб", "Вс"];

fn month_title(year: i32, month: u32) -> String {
    let name = MONTH_NAMES
        .get(month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or("?");
    format!("{} {}", name, year)
}

/// Empty cells before the 1st in a Monday-first grid
fn leading_blanks(annotations: &CalendarAnnotations) -> usize {
    annotations
        .days
        .first()
        .map(|d| d.day.weekday().num_days_from_monday() as usize)
        .unwrap_or(0)
}

/// Month grid with per-day sales of the current summary range
#[component]
pub fn CalendarPanel(
    #[prop(into)] annotations: Signal<Option<CalendarAnnotations>>,
    on_month: Callback<MonthDirection>,
    on_day: Callback<NaiveDate>,
) -> impl IntoView {
    let title = move || {
        annotations
            .get()
            .map(|a| month_title(a.year, a.month))
            .unwrap_or_default()
    };

    let grid = move || {
        let Some(annotations) = annotations.get() else {
            return view! { <></> }.into_any();
        };
        let blanks = (0..leading_blanks(&annotations))
            .map(|_| view! { <div class="d402-calendar__cell d402-calendar__cell--blank"></div> })
            .collect_view();
        let days = annotations
            .days
            .into_iter()
            .map(|cell| {
                let day = cell.day;
                let class = if cell.sales.is_some() {
                    "d402-calendar__cell d402-calendar__cell--in-range"
                } else {
                    "d402-calendar__cell"
                };
                view! {
                    <div class=class title=format_date(day) on:click=move |_| on_day.run(day)>
                        <div class="d402-calendar__day">{day.day()}</div>
                        {cell.sales.map(|sales| view! {
                            <div class="d402-calendar__sales">{format_money(sales)}</div>
                        })}
                    </div>
                }
            })
            .collect_view();
        view! { {blanks} {days} }.into_any()
    };

    view! {
        <div class="d402-calendar">
            <Flex align=FlexAlign::Center justify=FlexJustify::SpaceBetween>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_month.run(MonthDirection::Previous)
                    attr:title="Предыдущий месяц"
                >
                    "‹"
                </Button>
                <strong>{title}</strong>
                <Button
                    size=ButtonSize::Small
                    appearance=ButtonAppearance::Subtle
                    on_click=move |_| on_month.run(MonthDirection::Next)
                    attr:title="Следующий месяц"
                >
                    "›"
                </Button>
            </Flex>
            <div class="d402-calendar__grid">
                {WEEKDAYS
                    .into_iter()
                    .map(|name| view! { <div class="d402-calendar__weekday">{name}</div> })
                    .collect_view()}
                {grid}
            </div>
        </div>
    }
}
