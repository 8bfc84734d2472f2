pub mod d402_sales_overview;

pub use d402_sales_overview::ui::SalesOverviewDashboard;
