mod calendar_panel;
mod dashboard;
mod range_toolbar;
mod top_items_table;
mod view;

pub use dashboard::SalesOverviewDashboard;
pub use view::SignalView;
