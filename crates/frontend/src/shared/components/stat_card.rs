use crate::dashboards::d402_sales_overview::render::{CardFormat, SummaryCard};
use crate::shared::number_format::{format_count, format_money};
use leptos::prelude::*;

fn format_value(value: f64, format: CardFormat) -> String {
    match format {
        CardFormat::Money => format_money(value),
        CardFormat::Count => format_count(value.max(0.0).round() as u64),
    }
}

#[component]
pub fn StatCard(
    /// Card to show; None while the first load is pending
    #[prop(into)]
    card: Signal<Option<SummaryCard>>,
    /// Title used before any data arrived
    #[prop(into)]
    placeholder: String,
) -> impl IntoView {
    let title = move || {
        card.get()
            .map(|c| c.title)
            .unwrap_or_else(|| placeholder.clone())
    };

    let formatted = move || match card.get() {
        Some(c) => format_value(c.value, c.format),
        None => "—".to_string(),
    };

    let subtitle_view = move || {
        card.get().and_then(|c| c.subtitle).map(|s| {
            view! { <div class="stat-card__subtitle">{s}</div> }
        })
    };

    view! {
        <div class="stat-card">
            <div class="stat-card__content">
                <div class="stat-card__label">{title}</div>
                <div class="stat-card__value">{formatted}</div>
                {subtitle_view}
            </div>
        </div>
    }
}
