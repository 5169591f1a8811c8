//! Month grid generation.
//!
//! A month view is always six weeks of seven days, Sunday first. Days of the
//! neighbouring months pad the grid on both sides.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, Days, Months, NaiveDate};

use crate::date::{DisplayZone, to_iso};
use crate::error::{PetcareError, PetcareResult};

pub const WEEK_LEN: usize = 7;
pub const GRID_WEEKS: usize = 6;
pub const GRID_CELLS: usize = WEEK_LEN * GRID_WEEKS;

pub const WEEKDAY_LABELS: [&str; WEEK_LEN] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];

/// First cell of the grid whose month starts on `first`, or `None` when the
/// six weeks do not fit in chrono's date range.
fn grid_start(first: NaiveDate) -> Option<NaiveDate> {
    let leading = first.weekday().num_days_from_sunday() as u64;
    let start = first.checked_sub_days(Days::new(leading))?;
    start.checked_add_days(Days::new(GRID_CELLS as u64 - 1))?;
    Some(start)
}

/// A year and a zero-based month (0 = January).
///
/// Only months whose whole grid is representable exist, so the outermost
/// months of chrono's range are rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    first: NaiveDate,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> PetcareResult<Self> {
        if month > 11 {
            return Err(PetcareError::InvalidMonth(month));
        }
        let first = NaiveDate::from_ymd_opt(year, month + 1, 1)
            .filter(|first| grid_start(*first).is_some())
            .ok_or_else(|| PetcareError::InvalidDate(format!("{}-{:02}", year, month + 1)))?;
        Ok(YearMonth { first })
    }

    fn from_first(first: NaiveDate) -> Option<Self> {
        grid_start(first).map(|_| YearMonth { first })
    }

    /// The month containing `date`, or the nearest month with a full grid.
    pub fn of(date: NaiveDate) -> Self {
        let mut first = date.with_day(1).unwrap_or(date);
        loop {
            if let Some(period) = Self::from_first(first) {
                return period;
            }
            let inward = if first.year() < 0 {
                first.checked_add_months(Months::new(1))
            } else {
                first.checked_sub_months(Months::new(1))
            };
            match inward {
                Some(next) => first = next,
                None => return YearMonth { first },
            }
        }
    }

    pub fn current(zone: DisplayZone) -> Self {
        Self::of(zone.today())
    }

    pub fn year(&self) -> i32 {
        self.first.year()
    }

    /// Zero-based month.
    pub fn month(&self) -> u32 {
        self.first.month0()
    }

    pub fn first_day(&self) -> NaiveDate {
        self.first
    }

    pub fn prev(&self) -> Self {
        self.first
            .checked_sub_months(Months::new(1))
            .and_then(Self::from_first)
            .unwrap_or(*self)
    }

    pub fn next(&self) -> Self {
        self.first
            .checked_add_months(Months::new(1))
            .and_then(Self::from_first)
            .unwrap_or(*self)
    }

    pub fn days_in_month(&self) -> u32 {
        match self.first.checked_add_months(Months::new(1)) {
            Some(next) => (next - self.first).num_days() as u32,
            // Last month of chrono's range.
            None => (NaiveDate::MAX - self.first).num_days() as u32 + 1,
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.year() == self.year() && date.month0() == self.month()
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.first.format("%B %Y"))
    }
}

/// Parses `YYYY-MM` (one-based month, as typed by people).
impl FromStr for YearMonth {
    type Err = PetcareError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PetcareError::Validation(format!("Invalid month '{}'. Expected YYYY-MM", s));
        let (year, month) = s.trim().split_once('-').ok_or_else(invalid)?;
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u32 = month.parse().map_err(|_| invalid())?;
        if !(1..=12).contains(&month) {
            return Err(invalid());
        }
        YearMonth::new(year, month - 1)
    }
}

/// One day in the month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CalendarCell {
    pub year: i32,
    /// Zero-based month.
    pub month: u32,
    pub day: u32,
    pub is_in_current_month: bool,
    pub date: NaiveDate,
}

impl CalendarCell {
    fn new(date: NaiveDate, period: YearMonth) -> Self {
        CalendarCell {
            year: date.year(),
            month: date.month0(),
            day: date.day(),
            is_in_current_month: period.contains(date),
            date,
        }
    }

    pub fn iso_date(&self) -> String {
        to_iso(self.date)
    }
}

/// The 6×7 display matrix of a month.
#[derive(Debug, Clone)]
pub struct MonthGrid {
    period: YearMonth,
    cells: Vec<CalendarCell>,
}

impl MonthGrid {
    pub fn new(period: YearMonth) -> Self {
        let first = period.first_day();
        let start = grid_start(first).unwrap_or(first);

        let cells = start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| CalendarCell::new(date, period))
            .collect();

        MonthGrid { period, cells }
    }

    pub fn period(&self) -> YearMonth {
        self.period
    }

    pub fn cells(&self) -> &[CalendarCell] {
        &self.cells
    }

    pub fn weeks(&self) -> impl Iterator<Item = &[CalendarCell]> {
        self.cells.chunks(WEEK_LEN)
    }
}

/// Build the grid for `year` and zero-based `month`.
pub fn month_grid(year: i32, month: u32) -> PetcareResult<MonthGrid> {
    YearMonth::new(year, month).map(MonthGrid::new)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn ym(year: i32, month: u32) -> YearMonth {
        YearMonth::new(year, month).unwrap()
    }

    #[test]
    fn every_month_has_42_cells() {
        for year in [1999, 2000, 2023, 2024, 2100] {
            for month in 0..12 {
                let grid = month_grid(year, month).unwrap();
                assert_eq!(grid.cells().len(), GRID_CELLS);
                assert_eq!(grid.weeks().count(), GRID_WEEKS);

                let in_month: Vec<_> = grid
                    .cells()
                    .iter()
                    .filter(|c| c.is_in_current_month)
                    .collect();
                assert_eq!(in_month.len() as u32, ym(year, month).days_in_month());
                assert_eq!(in_month[0].day, 1);

                let first_index = grid
                    .cells()
                    .iter()
                    .position(|c| c.is_in_current_month)
                    .unwrap();
                let first = NaiveDate::from_ymd_opt(year, month + 1, 1).unwrap();
                assert_eq!(first_index as u32, first.weekday().num_days_from_sunday());
            }
        }
    }

    #[test]
    fn grid_starts_on_sunday() {
        let grid = month_grid(2024, 5).unwrap();
        assert!(grid.cells().iter().step_by(WEEK_LEN).all(|c| c.date.weekday() == Weekday::Sun));
    }

    #[test]
    fn leading_and_trailing_cells_carry_their_own_month() {
        // March 2024 starts on a Friday.
        let grid = month_grid(2024, 2).unwrap();
        let first = grid.cells()[0];
        assert_eq!((first.year, first.month, first.day), (2024, 1, 25));
        assert!(!first.is_in_current_month);

        let last = grid.cells()[GRID_CELLS - 1];
        assert_eq!((last.year, last.month, last.day), (2024, 3, 6));
        assert_eq!(last.iso_date(), "2024-04-06");
    }

    #[test]
    fn january_pads_with_previous_december() {
        let grid = month_grid(2025, 0).unwrap();
        let first = grid.cells()[0];
        assert_eq!((first.year, first.month, first.day), (2024, 11, 29));
    }

    #[test]
    fn month_starting_on_sunday_has_no_leading_days() {
        // September 2024 starts on a Sunday.
        let grid = month_grid(2024, 8).unwrap();
        assert!(grid.cells()[0].is_in_current_month);
        assert_eq!(grid.cells()[0].day, 1);
    }

    #[test]
    fn rejects_month_out_of_range() {
        assert!(matches!(month_grid(2024, 12), Err(PetcareError::InvalidMonth(12))));
    }

    #[test]
    fn rejects_months_at_the_ends_of_the_date_range() {
        let last_year = NaiveDate::MAX.year();
        assert!(matches!(month_grid(last_year, 11), Err(PetcareError::InvalidDate(_))));
        assert_eq!(month_grid(last_year, 10).unwrap().cells().len(), GRID_CELLS);

        let first_year = NaiveDate::MIN.year();
        assert!(matches!(month_grid(first_year, 0), Err(PetcareError::InvalidDate(_))));
        assert_eq!(month_grid(first_year, 1).unwrap().cells().len(), GRID_CELLS);
    }

    #[test]
    fn edge_dates_map_to_full_grids() {
        for date in [NaiveDate::MIN, NaiveDate::MAX] {
            let period = YearMonth::of(date);
            for period in [period, period.prev(), period.next()] {
                let grid = MonthGrid::new(period);
                assert_eq!(grid.cells().len(), GRID_CELLS);
                assert_eq!(grid.cells()[0].date.weekday(), Weekday::Sun);
            }
        }
        assert_eq!(YearMonth::of(NaiveDate::MAX), ym(NaiveDate::MAX.year(), 10));
        assert_eq!(YearMonth::of(NaiveDate::MAX).next(), ym(NaiveDate::MAX.year(), 10));
        assert_eq!(ym(NaiveDate::MAX.year(), 10).days_in_month(), 30);
    }

    #[test]
    fn navigation_wraps_years() {
        assert_eq!(ym(2024, 11).next(), ym(2025, 0));
        assert_eq!(ym(2024, 0).prev(), ym(2023, 11));
        assert_eq!(ym(2024, 1).days_in_month(), 29);
        assert_eq!(ym(2023, 1).days_in_month(), 28);
    }

    #[test]
    fn parse_year_month() {
        assert_eq!("2024-06".parse::<YearMonth>().unwrap(), ym(2024, 5));
        assert!("2024-13".parse::<YearMonth>().is_err());
        assert!("june".parse::<YearMonth>().is_err());
        assert_eq!(ym(2024, 5).to_string(), "June 2024");
    }
}
