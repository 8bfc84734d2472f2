use chrono::{Local, NaiveDate};

/// Source of the current calendar day
pub trait Clock {
    fn today(&self) -> NaiveDate;
}

/// Local calendar day of the browser, not UTC-shifted
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalClock;

impl Clock for LocalClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}
