use chrono::{Datelike, Duration, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used on the wire and in query strings
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

/// Date format used in labels shown to the user
pub const DISPLAY_DATE_FORMAT: &str = "%d.%m.%Y";

/// Semantic period selection held by a dashboard controller
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RangeSelector {
    Today,
    /// Rolling window of `n` calendar days ending today
    LastNDays(u32),
    /// Explicit bounds, passed through as-is
    Custom(NaiveDate, NaiveDate),
}

impl RangeSelector {
    /// Map a preset key from the range buttons ("today", "week", "month")
    pub fn from_preset(key: &str) -> Option<Self> {
        match key {
            "today" => Some(Self::Today),
            "week" => Some(Self::LastNDays(7)),
            "month" => Some(Self::LastNDays(30)),
            _ => None,
        }
    }

    /// Reverse of [`RangeSelector::from_preset`], None for anything without a button
    pub fn preset_key(&self) -> Option<&'static str> {
        match self {
            Self::Today => Some("today"),
            Self::LastNDays(7) => Some("week"),
            Self::LastNDays(30) => Some("month"),
            _ => None,
        }
    }

    /// Human-readable label for the period
    pub fn label(&self) -> String {
        match self {
            Self::Today => "Сегодня".to_string(),
            Self::LastNDays(n) => format!("Последние {} дн.", n),
            Self::Custom(start, end) if start == end => {
                start.format(DISPLAY_DATE_FORMAT).to_string()
            }
            Self::Custom(start, end) => format!(
                "{} – {}",
                start.format(DISPLAY_DATE_FORMAT),
                end.format(DISPLAY_DATE_FORMAT)
            ),
        }
    }
}

/// Concrete inclusive pair of calendar days sent to the backend
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ResolvedRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl ResolvedRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    pub fn single(day: NaiveDate) -> Self {
        Self::new(day, day)
    }

    /// Number of inclusive days, 0 for an inverted custom range
    pub fn len_days(&self) -> i64 {
        if self.end < self.start {
            0
        } else {
            (self.end - self.start).num_days() + 1
        }
    }

    /// Every calendar day of the range in order
    pub fn days(&self) -> impl Iterator<Item = NaiveDate> {
        let end = self.end;
        self.start.iter_days().take_while(move |d| *d <= end)
    }
}

impl fmt::Display for ResolvedRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}..{}",
            self.start.format(ISO_DATE_FORMAT),
            self.end.format(ISO_DATE_FORMAT)
        )
    }
}

/// Resolve a selector against an injected `today`.
///
/// `LastNDays(n)` always yields exactly `n` days ending today (0 is read as 1).
/// The start saturates at the earliest representable date instead of
/// overflowing. `Custom` bounds are not validated here.
pub fn resolve(selector: RangeSelector, today: NaiveDate) -> ResolvedRange {
    match selector {
        RangeSelector::Today => ResolvedRange::single(today),
        RangeSelector::LastNDays(n) => {
            let n = i64::from(n.max(1));
            let start = today
                .checked_sub_signed(Duration::days(n - 1))
                .unwrap_or(NaiveDate::MIN);
            ResolvedRange::new(start, today)
        }
        RangeSelector::Custom(start, end) => ResolvedRange::new(start, end),
    }
}

/// ISO week (Monday-based) from its first day up to `today`
pub fn week_to_date(today: NaiveDate) -> ResolvedRange {
    let monday = today - Duration::days(i64::from(today.weekday().num_days_from_monday()));
    ResolvedRange::new(monday, today)
}

/// Calendar month from the 1st up to `today`
pub fn month_to_date(today: NaiveDate) -> ResolvedRange {
    ResolvedRange::new(CalendarMonth::containing(today).first_day(), today)
}

pub fn parse_iso_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value.trim(), ISO_DATE_FORMAT).ok()
}

/// Month shown by the calendar widget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarMonth {
    pub year: i32,
    /// 1..=12
    pub month: u32,
}

impl CalendarMonth {
    pub fn containing(day: NaiveDate) -> Self {
        Self {
            year: day.year(),
            month: day.month(),
        }
    }

    /// Move by `delta` months, rolling the year over in both directions
    pub fn shifted(&self, delta: i32) -> Self {
        let total = self.year * 12 + (self.month as i32 - 1) + delta;
        Self {
            year: total.div_euclid(12),
            month: total.rem_euclid(12) as u32 + 1,
        }
    }

    pub fn first_day(&self) -> NaiveDate {
        NaiveDate::from_ymd_opt(self.year, self.month, 1).unwrap_or(NaiveDate::MIN)
    }

    pub fn last_day(&self) -> NaiveDate {
        self.shifted(1)
            .first_day()
            .pred_opt()
            .unwrap_or_else(|| self.first_day())
    }

    pub fn bounds(&self) -> ResolvedRange {
        ResolvedRange::new(self.first_day(), self.last_day())
    }
}
