//! D402 Sales overview - summary cards, daily/category/trend charts and top items
//!
//! Three scopes refresh independently:
//! - summary: follows the summary range selector (presets, custom dates, calendar)
//! - chart: follows the chart period in days
//! - top items: follows the chart period too, never the summary selector

pub mod api;
pub mod calendar;
pub mod chart;
pub mod config;
pub mod dashboard;
pub mod error;
pub mod gate;
pub mod render;
pub mod summary;
pub mod top_items;
pub mod ui;

#[cfg(test)]
pub(crate) mod testing;

pub use dashboard::SalesDashboard;
pub use error::GatewayError;
pub use gate::{RefreshOutcome, RefreshScope};
