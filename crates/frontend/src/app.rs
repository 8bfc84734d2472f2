use crate::dashboards::d402_sales_overview::config::load_config;
use crate::dashboards::SalesOverviewDashboard;
use leptos::prelude::*;
use thaw::ConfigProvider;

#[component]
pub fn App() -> impl IntoView {
    // Embedded defaults plus ?chart_days=.. style overrides from the URL
    let config = load_config();

    view! {
        <ConfigProvider>
            <SalesOverviewDashboard config=config />
        </ConfigProvider>
    }
}
