/// Utilities for date formatting
///
/// Provides consistent date formatting across the application
use chrono::NaiveDate;
use contracts::dashboards::d402_sales_overview::ResolvedRange;

/// Format a date as DD.MM.YYYY
/// Example: 2024-03-15 -> "15.03.2024"
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d.%m.%Y").to_string()
}

/// Short day label used on chart axes and calendar cells
/// Example: 2024-03-15 -> "15.03"
pub fn format_day(date: NaiveDate) -> String {
    date.format("%d.%m").to_string()
}

/// Format a range as "DD.MM – DD.MM", collapsing single days
pub fn format_short_range(range: &ResolvedRange) -> String {
    if range.start == range.end {
        format_day(range.start)
    } else {
        format!("{} – {}", format_day(range.start), format_day(range.end))
    }
}
