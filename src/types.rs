//! Type definitions and constants for calendar geometry and formatting.

use std::fmt;
use std::str::FromStr;

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Weekday};
use clap::ValueEnum;

use crate::error::DayPickerError;
use crate::modifiers::ModifierMap;
use crate::props::ClassNames;

/// A calendar day without time of day.
///
/// Months are exposed both 0-based (`month0`, January = 0) and 1-based
/// (`month`). Arithmetic works on whole days, so daylight-saving and timezone
/// transitions can never move a value onto a neighbouring day.
///
/// Constructed values lie in years [`MIN_YEAR`]..=[`MAX_YEAR`], far enough
/// inside chrono's range that the padding of a week grid (a few weeks either
/// way) can always be computed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct CalendarDate(NaiveDate);

const NOON: NaiveTime = match NaiveTime::from_hms_opt(12, 0, 0) {
    Some(time) => time,
    None => panic!("noon is a valid time"),
};

impl CalendarDate {
    /// Build a date from a 0-based month index. Returns `None` for dates that
    /// do not exist (e.g. month index 1, day 30).
    pub fn new(year: i32, month0: u32, day: u32) -> Option<Self> {
        Self::from_ymd(year, month0.checked_add(1)?, day)
    }

    /// Build a date from a 1-based month number.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> Option<Self> {
        if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
            return None;
        }
        NaiveDate::from_ymd_opt(year, month, day).map(Self)
    }

    pub fn year(self) -> i32 {
        self.0.year()
    }

    /// Month index, January = 0.
    pub fn month0(self) -> u32 {
        self.0.month0()
    }

    /// Month number, January = 1.
    pub fn month(self) -> u32 {
        self.0.month()
    }

    pub fn day(self) -> u32 {
        self.0.day()
    }

    pub fn weekday(self) -> Weekday {
        self.0.weekday()
    }

    pub fn naive(self) -> NaiveDate {
        self.0
    }

    /// Timestamp of this day at 12:00, for consumers that need a point in time.
    pub fn at_noon(self) -> NaiveDateTime {
        self.0.and_time(NOON)
    }

    /// Shift by a signed number of days, `None` if the result leaves chrono's
    /// supported range.
    pub fn checked_add_days(self, days: i64) -> Option<Self> {
        self.0.checked_add_signed(TimeDelta::try_days(days)?).map(Self)
    }

    /// Shift by a signed number of days.
    ///
    /// Shifts of up to a few thousand years stay in range for any constructed
    /// value. Panics if the result leaves chrono's supported date range; use
    /// [`checked_add_days`](Self::checked_add_days) for arbitrary offsets.
    pub fn add_days(self, days: i64) -> Self {
        Self(self.0 + TimeDelta::days(days))
    }

    pub fn is_same_day(self, other: CalendarDate) -> bool {
        self == other
    }

    /// True if both dates fall in the same month of the same year.
    pub fn is_same_month(self, other: CalendarDate) -> bool {
        self.year() == other.year() && self.month0() == other.month0()
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DayPickerError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        Self::from_ymd(date.year(), date.month(), date.day())
            .ok_or_else(|| DayPickerError::InvalidDate(date.to_string()))
    }
}

impl TryFrom<NaiveDateTime> for CalendarDate {
    type Error = DayPickerError;

    fn try_from(datetime: NaiveDateTime) -> Result<Self, Self::Error> {
        Self::try_from(datetime.date())
    }
}

impl FromStr for CalendarDate {
    type Err = DayPickerError;

    /// Parse an ISO `YYYY-MM-DD` date (1-based month, as written by humans).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .ok()
            .and_then(|date| Self::try_from(date).ok())
            .ok_or_else(|| DayPickerError::InvalidDate(s.to_string()))
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Seven consecutive days starting on the configured first day of week.
pub type Week = [CalendarDate; DAYS_PER_WEEK];

/// Weeks covering one month, padded with days of the adjacent months.
pub type WeekGrid = Vec<Week>;

/// Column display mode for multi-month layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ColumnsMode {
    /// Fixed number of columns.
    Fixed(u32),
    /// Auto-detect from terminal width.
    Auto,
}

/// How a rendered calendar is written out.
#[derive(Debug, Clone, Copy, PartialEq, ValueEnum)]
#[value(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Month grids, one row per week.
    Grid,
    /// One line per grid day with its modifier names.
    List,
}

/// Rendering context containing all display options.
#[derive(Clone, Debug)]
pub struct CalContext {
    /// Weekday at the left edge of every week row.
    pub first_day_of_week: Weekday,
    /// Always render six week rows.
    pub fixed_weeks: bool,
    /// Render days of the adjacent months instead of blank cells.
    pub show_outside_days: bool,
    /// Whether to use ANSI color codes in output.
    pub color: bool,
    /// Today's date, receives the `today` modifier.
    pub today: CalendarDate,
    /// Locale tag used for month and weekday names.
    pub locale: String,
    /// Whether to show year in month headers.
    pub show_year_in_header: bool,
    /// Width of gutter between months in multi-month display.
    pub gutter_width: usize,
    /// Column display mode.
    pub columns: ColumnsMode,
    pub format: OutputFormat,
    /// Modifier rules resolved for every rendered day.
    pub modifiers: ModifierMap,
    /// Names of the modifiers styled as selected and disabled.
    pub class_names: ClassNames,
}

/// Earliest year a [`CalendarDate`] can be constructed in.
pub const MIN_YEAR: i32 = 1;
/// Latest year a [`CalendarDate`] can be constructed in.
pub const MAX_YEAR: i32 = 9999;

pub const DAYS_PER_WEEK: usize = 7;
pub const FIXED_WEEKS_COUNT: usize = 6;

/// Width of a rendered month: 7 cells of 2 characters plus 6 separators.
pub const MONTH_WIDTH: usize = 20;
pub const GUTTER_WIDTH_REGULAR: usize = 2;

// Built-in modifiers added by the renderer
pub const MODIFIER_TODAY: &str = "today";
pub const MODIFIER_OUTSIDE: &str = "outside";

pub const COLOR_ENABLED_BY_DEFAULT: bool = true;

// ANSI color codes
pub const COLOR_RESET: &str = "\x1b[0m";
pub const COLOR_REVERSE: &str = "\x1b[7m";
pub const COLOR_DIM: &str = "\x1b[2m";
pub const COLOR_RED: &str = "\x1b[91m";
pub const COLOR_TEAL: &str = "\x1b[96m";
pub const COLOR_SAND_YELLOW: &str = "\x1b[93m";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_based_month_constructor() {
        let date = CalendarDate::new(2015, 8, 19).unwrap();
        assert_eq!(date.month(), 9);
        assert_eq!(date.month0(), 8);
        assert_eq!(date.to_string(), "2015-09-19");
    }

    #[test]
    fn rejects_nonexistent_dates() {
        assert!(CalendarDate::new(2015, 1, 29).is_none());
        assert!(CalendarDate::new(2015, 12, 1).is_none());
        assert!(CalendarDate::new(2015, u32::MAX, 1).is_none());
    }

    #[test]
    fn parses_iso_dates() {
        let date: CalendarDate = "2016-02-29".parse().unwrap();
        assert_eq!(date, CalendarDate::from_ymd(2016, 2, 29).unwrap());
        assert!("2015-02-29".parse::<CalendarDate>().is_err());
        assert!("tomorrow".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn noon_timestamp_keeps_the_day() {
        let date = CalendarDate::new(1979, 8, 19).unwrap();
        let noon = date.at_noon();
        assert_eq!(noon.date(), date.naive());
        assert_eq!(noon.time(), NaiveTime::from_hms_opt(12, 0, 0).unwrap());
        assert_eq!(CalendarDate::try_from(noon).unwrap(), date);
    }

    #[test]
    fn construction_is_limited_to_supported_years() {
        assert!(CalendarDate::from_ymd(MAX_YEAR, 12, 31).is_some());
        assert!(CalendarDate::from_ymd(MIN_YEAR, 1, 1).is_some());
        assert!(CalendarDate::from_ymd(MAX_YEAR + 1, 1, 1).is_none());
        assert!(CalendarDate::from_ymd(MIN_YEAR - 1, 12, 31).is_none());
        assert!(CalendarDate::try_from(NaiveDate::MAX).is_err());
        assert!(CalendarDate::try_from(NaiveDate::MIN).is_err());
        assert!("10000-01-01".parse::<CalendarDate>().is_err());
    }

    #[test]
    fn checked_day_arithmetic() {
        let date = CalendarDate::from_ymd(MAX_YEAR, 12, 31).unwrap();
        assert_eq!(date.checked_add_days(1).map(|d| d.year()), Some(MAX_YEAR + 1));
        assert!(date.checked_add_days(i64::MAX).is_none());
        assert!(date.checked_add_days(-1_000_000_000).is_none());
    }

    #[test]
    fn day_arithmetic_crosses_month_and_year() {
        let date = CalendarDate::new(2015, 11, 31).unwrap();
        assert_eq!(date.add_days(1), CalendarDate::new(2016, 0, 1).unwrap());
        assert_eq!(date.add_days(-31), CalendarDate::new(2015, 10, 30).unwrap());
    }
}
