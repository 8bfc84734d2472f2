use contracts::dashboards::d402_sales_overview::CalendarMonth;
use std::cell::Cell;
use std::rc::Rc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonthDirection {
    Previous,
    Next,
}

impl MonthDirection {
    pub fn delta(self) -> i32 {
        match self {
            Self::Previous => -1,
            Self::Next => 1,
        }
    }
}

/// Month currently shown by the calendar.
///
/// The cell is shared with the summary controller, which draws the per-day
/// sales overlay for whatever month is displayed.
#[derive(Debug, Clone)]
pub struct CalendarNavigator {
    displayed: Rc<Cell<CalendarMonth>>,
}

impl CalendarNavigator {
    pub fn new(initial: CalendarMonth) -> Self {
        Self {
            displayed: Rc::new(Cell::new(initial)),
        }
    }

    pub fn shared_month(&self) -> Rc<Cell<CalendarMonth>> {
        Rc::clone(&self.displayed)
    }

    pub fn displayed(&self) -> CalendarMonth {
        self.displayed.get()
    }

    pub fn shift(&self, direction: MonthDirection) -> CalendarMonth {
        let next = self.displayed.get().shifted(direction.delta());
        self.displayed.set(next);
        next
    }
}
