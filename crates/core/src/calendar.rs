//! Month-view calendar bucketing.
//!
//! Builds the cells of a 7-column month grid (weeks start on Sunday) and
//! drops each item into the cell of its calendar day.

use chrono::{Datelike, Local, NaiveDate};

use crate::error::CoreError;
use crate::types::Timestamp;

/// One cell of the month grid.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarCell<T> {
    pub date: NaiveDate,
    /// `false` for the leading filler cells taken from the previous month.
    pub is_current_month: bool,
    pub items: Vec<T>,
}

/// The day an item is shown on: its due day, else the local day it was created.
pub fn calendar_day(due: Option<NaiveDate>, created_at: Timestamp) -> NaiveDate {
    due.unwrap_or_else(|| created_at.with_timezone(&Local).date_naive())
}

/// Weekday index of a date, 0 = Sunday .. 6 = Saturday.
pub fn weekday_index(date: NaiveDate) -> u32 {
    date.weekday().num_days_from_sunday()
}

/// Number of days in the given month.
pub fn days_in_month(year: i32, month: u32) -> Result<u32, CoreError> {
    let first = first_of_month(year, month)?;
    let next = first
        .checked_add_months(chrono::Months::new(1))
        .ok_or_else(|| CoreError::validation(format!("Year {year} is out of range")))?;
    let days = next.signed_duration_since(first).num_days();
    u32::try_from(days).map_err(|_| CoreError::Internal(format!("Bad month length {days}")))
}

/// Build the grid for `year`/`month`.
///
/// The grid starts with one filler cell per weekday preceding the 1st
/// (carrying the trailing dates of the previous month, never any items),
/// followed by exactly one cell per day of the month. Items dated outside
/// the month are dropped; items within a day keep their input order.
pub fn month_grid<T, I>(year: i32, month: u32, items: I) -> Result<Vec<CalendarCell<T>>, CoreError>
where
    I: IntoIterator<Item = (NaiveDate, T)>,
{
    let first = first_of_month(year, month)?;
    let leading = weekday_index(first);
    let days = days_in_month(year, month)?;

    let mut cells: Vec<CalendarCell<T>> = Vec::with_capacity((leading + days) as usize);

    for offset in (1..=leading).rev() {
        cells.push(CalendarCell {
            date: first - chrono::Days::new(u64::from(offset)),
            is_current_month: false,
            items: Vec::new(),
        });
    }

    for day in 0..days {
        cells.push(CalendarCell {
            date: first + chrono::Days::new(u64::from(day)),
            is_current_month: true,
            items: Vec::new(),
        });
    }

    for (date, item) in items {
        if date.year() != year || date.month() != month {
            continue;
        }
        let index = (leading + date.day() - 1) as usize;
        cells[index].items.push(item);
    }

    Ok(cells)
}

fn first_of_month(year: i32, month: u32) -> Result<NaiveDate, CoreError> {
    if !(1..=12).contains(&month) {
        return Err(CoreError::validation(format!(
            "Month must be between 1 and 12, got {month}"
        )));
    }
    NaiveDate::from_ymd_opt(year, month, 1)
        .ok_or_else(|| CoreError::validation(format!("Year {year} is out of range")))
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn month_lengths() {
        assert_eq!(days_in_month(2024, 2).unwrap(), 29);
        assert_eq!(days_in_month(2025, 2).unwrap(), 28);
        assert_eq!(days_in_month(2025, 4).unwrap(), 30);
        assert_eq!(days_in_month(2025, 12).unwrap(), 31);
    }

    #[test]
    fn june_2025_starts_on_sunday_without_fillers() {
        // 2025-06-01 is a Sunday.
        assert_eq!(weekday_index(ymd(2025, 6, 1)), 0);
        let grid = month_grid::<(), _>(2025, 6, []).unwrap();
        assert_eq!(grid.len(), 30);
        assert!(grid.iter().all(|c| c.is_current_month));
        assert_eq!(grid[0].date, ymd(2025, 6, 1));
    }

    #[test]
    fn march_2025_has_six_fillers() {
        // 2025-03-01 is a Saturday.
        assert_eq!(weekday_index(ymd(2025, 3, 1)), 6);
        let grid = month_grid::<(), _>(2025, 3, []).unwrap();
        assert_eq!(grid.len(), 6 + 31);

        let fillers: Vec<_> = grid.iter().take_while(|c| !c.is_current_month).collect();
        assert_eq!(fillers.len(), 6);
        assert_eq!(fillers[0].date, ymd(2025, 2, 23));
        assert_eq!(fillers[5].date, ymd(2025, 2, 28));
        assert_eq!(grid[6].date, ymd(2025, 3, 1));
        assert_eq!(grid.last().unwrap().date, ymd(2025, 3, 31));
    }

    #[test]
    fn items_land_on_their_day() {
        let items = vec![
            (ymd(2025, 3, 1), "a"),
            (ymd(2025, 3, 15), "b"),
            (ymd(2025, 3, 15), "c"),
            (ymd(2025, 4, 1), "outside"),
            (ymd(2025, 2, 28), "filler-day"),
        ];
        let grid = month_grid(2025, 3, items).unwrap();

        let day = |d: u32| grid.iter().find(|c| c.is_current_month && c.date.day() == d).unwrap();
        assert_eq!(day(1).items, vec!["a"]);
        assert_eq!(day(15).items, vec!["b", "c"]);
        assert!(grid.iter().filter(|c| !c.is_current_month).all(|c| c.items.is_empty()));
        assert_eq!(grid.iter().map(|c| c.items.len()).sum::<usize>(), 3);
    }

    #[test]
    fn invalid_month_rejected() {
        assert!(matches!(
            month_grid::<(), _>(2025, 13, []),
            Err(CoreError::Validation(_))
        ));
        assert!(matches!(
            month_grid::<(), _>(2025, 0, []),
            Err(CoreError::Validation(_))
        ));
    }

    #[test]
    fn calendar_day_prefers_due_date() {
        let created = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(calendar_day(Some(ymd(2025, 2, 1)), created), ymd(2025, 2, 1));
    }

    #[test]
    fn calendar_day_falls_back_to_creation_day() {
        let created = Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap();
        assert_eq!(calendar_day(None, created), ymd(2025, 1, 10));
    }
}
