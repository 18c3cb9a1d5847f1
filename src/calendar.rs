//! Month geometry: month helpers and the week grid builder.

use chrono::{NaiveDateTime, Weekday};
use tracing::trace;

use crate::error::{DayPickerError, Result};
use crate::types::{CalendarDate, DAYS_PER_WEEK, FIXED_WEEKS_COUNT, Week, WeekGrid};

/// Day 1 of the date's month.
pub fn first_day_of_month(d: CalendarDate) -> CalendarDate {
    d.add_days(1 - i64::from(d.day()))
}

/// Noon of day 1 of the date's month.
pub fn start_of_month(d: CalendarDate) -> NaiveDateTime {
    first_day_of_month(d).at_noon()
}

fn first_day_of_next_month(d: CalendarDate) -> CalendarDate {
    // Day 1 plus 31 days always lands within the first days of the next month
    first_day_of_month(first_day_of_month(d).add_days(31))
}

/// Number of days in the date's month: the day before the first of next month.
pub fn days_in_month(d: CalendarDate) -> u32 {
    first_day_of_next_month(d).add_days(-1).day()
}

/// Signed number of months from `d1` to `d2`, ignoring the day of month.
pub fn months_diff(d1: CalendarDate, d2: CalendarDate) -> i32 {
    (d2.month0() as i32 - d1.month0() as i32) + 12 * (d2.year() - d1.year())
}

/// Shift by whole months. The day is clamped to the target month's length.
pub fn add_months(d: CalendarDate, months: i32) -> Option<CalendarDate> {
    let total = d.year().checked_mul(12)? + d.month0() as i32 + months;
    let year = total.div_euclid(12);
    let month0 = total.rem_euclid(12) as u32;
    let target_first = CalendarDate::new(year, month0, 1)?;
    let day = d.day().min(days_in_month(target_first));
    CalendarDate::new(year, month0, day)
}

/// Convert a weekday index (0 = Sunday .. 6 = Saturday).
///
/// Anything outside 0-6 is a caller error and is reported, not wrapped.
pub fn weekday_from_index(index: i64) -> Result<Weekday> {
    match index {
        0 => Ok(Weekday::Sun),
        1 => Ok(Weekday::Mon),
        2 => Ok(Weekday::Tue),
        3 => Ok(Weekday::Wed),
        4 => Ok(Weekday::Thu),
        5 => Ok(Weekday::Fri),
        6 => Ok(Weekday::Sat),
        _ => Err(DayPickerError::InvalidFirstDayOfWeek(index)),
    }
}

/// Weekday index with Sunday = 0.
pub fn weekday_index(weekday: Weekday) -> u32 {
    weekday.num_days_from_sunday()
}

fn consecutive_week(start: CalendarDate) -> Week {
    std::array::from_fn(|i| start.add_days(i as i64))
}

/// Build the weeks displayed for the anchor's month.
///
/// In-month days are split into runs, a new run starting on every
/// `first_day_of_week`. The first run is padded with the preceding days so it
/// ends on its original last day, the last run with the following days. With
/// `fixed_weeks` the grid continues with whole weeks up to six rows.
pub fn build_week_grid(
    anchor: CalendarDate,
    first_day_of_week: Weekday,
    fixed_weeks: bool,
) -> WeekGrid {
    let first = first_day_of_month(anchor);
    let month_days = (0..days_in_month(anchor)).map(|i| first.add_days(i64::from(i)));

    // (first day of the run, number of in-month days in it)
    let mut runs: Vec<(CalendarDate, usize)> = Vec::with_capacity(FIXED_WEEKS_COUNT);
    for day in month_days {
        match runs.last_mut() {
            Some((_, len)) if day.weekday() != first_day_of_week => *len += 1,
            _ => runs.push((day, 1)),
        }
    }

    let mut grid: WeekGrid = runs
        .iter()
        .enumerate()
        .map(|(i, &(start, len))| {
            let leading_pad = if i == 0 { DAYS_PER_WEEK - len } else { 0 };
            // Trailing padding falls out of taking seven consecutive days
            consecutive_week(start.add_days(-(leading_pad as i64)))
        })
        .collect();

    if fixed_weeks
        && let Some(last_week) = grid.last()
    {
        let next = last_week[DAYS_PER_WEEK - 1].add_days(1);
        let missing = FIXED_WEEKS_COUNT.saturating_sub(grid.len());
        let extra: Vec<Week> = (0..missing)
            .map(|w| consecutive_week(next.add_days((w * DAYS_PER_WEEK) as i64)))
            .collect();
        grid.extend(extra);
    }

    trace!(
        anchor = %anchor,
        ?first_day_of_week,
        fixed_weeks,
        weeks = grid.len(),
        "built week grid"
    );
    grid
}
