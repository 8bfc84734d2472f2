pub mod api_utils;
pub mod chart_bridge;
pub mod clock;
pub mod components;
pub mod date_utils;
pub mod number_format;
