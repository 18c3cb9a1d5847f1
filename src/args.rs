//! Command-line argument parsing using clap.
//!
//! Arguments: `[month] [year]`, a single `YYYY-MM-DD` date, or a single year.

use std::io::IsTerminal;

use chrono::Month;
use clap::{Parser, ValueHint};
use tracing::debug;

use crate::calendar::{first_day_of_month, weekday_from_index};
use crate::config::{DayPickerConfig, resolve_config_path};
use crate::error::{DayPickerError, Result};
use crate::locale::{ChronoLocaleUtils, get_system_locale};
use crate::modifiers::ModifierRule;
use crate::props::{DayPickerProps, first_day_of_week_from_props, modifiers_from_props};
use crate::types::{
    COLOR_ENABLED_BY_DEFAULT, CalContext, CalendarDate, ColumnsMode, GUTTER_WIDTH_REGULAR,
    OutputFormat,
};

#[derive(Parser, Debug)]
#[command(name = "daypicker")]
#[command(about = "Displays month grids with day modifiers highlighted", long_about = None)]
#[command(version)]
#[command(after_help = HELP_MESSAGE)]
pub struct Args {
    /// Week starts on Sunday.
    #[arg(
        short = 's',
        long,
        help_heading = "Calendar options",
        conflicts_with_all = ["monday", "first_day"]
    )]
    pub sunday: bool,

    /// Week starts on Monday.
    #[arg(short = 'm', long, help_heading = "Calendar options", conflicts_with = "first_day")]
    pub monday: bool,

    /// First day of week (0 = Sunday .. 6 = Saturday).
    #[arg(
        long,
        help_heading = "Calendar options",
        value_name = "0-6",
        allow_negative_numbers = true
    )]
    pub first_day: Option<i64>,

    /// Locale for names and the default first day of week (e.g. it_IT).
    #[arg(long, help_heading = "Calendar options", value_name = "tag")]
    pub locale: Option<String>,

    /// Always display six weeks per month.
    #[arg(short = 'f', long, help_heading = "Calendar options")]
    pub fixed_weeks: bool,

    /// Number of months to display.
    #[arg(
        short = 'n',
        long = "months",
        help_heading = "Display options",
        value_name = "num",
        value_parser = clap::value_parser!(u32).range(1..=MAX_MONTHS)
    )]
    pub months_count: Option<u32>,

    /// Leave days of adjacent months blank.
    #[arg(long, help_heading = "Display options")]
    pub hide_outside_days: bool,

    /// Output format.
    #[arg(long, default_value = "grid", help_heading = "Display options", value_name = "format")]
    pub format: OutputFormat,

    /// Selected days rule (repeatable).
    #[arg(long = "select", help_heading = "Modifiers", value_name = "rule")]
    pub select: Vec<String>,

    /// Disabled days rule (repeatable).
    #[arg(long = "disable", help_heading = "Modifiers", value_name = "rule")]
    pub disable: Vec<String>,

    /// Custom modifier as NAME=RULE (repeatable).
    #[arg(long = "modifier", help_heading = "Modifiers", value_name = "name=rule")]
    pub modifier: Vec<String>,

    /// TOML config file (default: ~/.config/daypicker/config.toml if present).
    #[arg(long, value_name = "path", value_hint = ValueHint::FilePath)]
    pub config: Option<String>,

    /// Month (1-12 or name), a full YYYY-MM-DD date, or a year.
    #[arg(index = 1, value_name = "month", value_hint = ValueHint::Other)]
    pub month_arg: Option<String>,

    /// Year (1-9999).
    #[arg(index = 2, value_name = "year", value_hint = ValueHint::Other)]
    pub year_arg: Option<String>,

    /// Disable colorized output.
    #[arg(long, help_heading = "Output options")]
    pub no_color: bool,

    /// Number of columns for multiple months (or "auto" for terminal width).
    #[arg(short = 'c', long = "columns", help_heading = "Output options", value_name = "width")]
    pub columns: Option<String>,

    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Upper bound for `--months`: a century of grids.
pub const MAX_MONTHS: i64 = 1200;

/// Help message displayed with --help.
const HELP_MESSAGE: &str = "Rule syntax:
  2015-09-19              A single day
  2015-09-18..2015-09-20  Inclusive range
  >2015-09-18             Every day after
  <2015-09-15             Every day before
  sat,sun                 Days of week (combine any rules with commas)

Examples:
  daypicker                          Display current month
  daypicker 9 2015 --select 2015-09-19
  daypicker 2015 -n 3 -m             Three months from January 2015, Monday first
  daypicker --disable '<2015-09-15' --modifier weekend=sat,sun 9 2015
  daypicker --format list 2015-09-19";

impl Args {
    pub fn parse() -> Self {
        Parser::parse()
    }
}

impl CalContext {
    pub fn new(args: &Args) -> Result<Self> {
        let today = get_today_date()?;
        let color = !args.no_color && COLOR_ENABLED_BY_DEFAULT && std::io::stdout().is_terminal();

        let columns = match args.columns.as_deref() {
            Some("auto") | None => ColumnsMode::Auto,
            Some(s) => {
                let n = s.parse::<u32>().map_err(|_| {
                    DayPickerError::InvalidArgument(format!("columns value: {}", s))
                })?;
                if n == 0 {
                    return Err(DayPickerError::InvalidArgument(
                        "columns must be positive".to_string(),
                    ));
                }
                ColumnsMode::Fixed(n)
            }
        };

        let props = build_props(args)?;
        let first_day_of_week = first_day_of_week_from_props(&props, Some(&ChronoLocaleUtils));
        debug!(
            locale = %props.locale,
            ?first_day_of_week,
            modifiers = props.modifiers.len(),
            "resolved props"
        );

        Ok(CalContext {
            first_day_of_week,
            fixed_weeks: props.fixed_weeks,
            show_outside_days: props.show_outside_days,
            color,
            today,
            modifiers: modifiers_from_props(&props),
            class_names: props.class_names,
            locale: props.locale,
            show_year_in_header: true,
            gutter_width: GUTTER_WIDTH_REGULAR,
            columns,
            format: args.format,
        })
    }
}

/// Props from defaults, then the config file, then command-line flags.
pub fn build_props(args: &Args) -> Result<DayPickerProps> {
    let mut props = DayPickerProps {
        locale: get_system_locale(),
        ..DayPickerProps::default()
    };

    if let Some(path) = resolve_config_path(args.config.as_deref()) {
        DayPickerConfig::load(&path)?.apply_to(&mut props)?;
    }

    if let Some(locale) = &args.locale {
        props.locale = locale.clone();
    }
    if args.sunday {
        props.first_day_of_week = Some(chrono::Weekday::Sun);
    } else if args.monday {
        props.first_day_of_week = Some(chrono::Weekday::Mon);
    } else if let Some(index) = args.first_day {
        props.first_day_of_week = Some(weekday_from_index(index)?);
    }
    if args.fixed_weeks {
        props.fixed_weeks = true;
    }
    if args.hide_outside_days {
        props.show_outside_days = false;
    }

    props.selected_days = merge_rules(props.selected_days.take(), &args.select)?;
    props.disabled_days = merge_rules(props.disabled_days.take(), &args.disable)?;

    for spec in &args.modifier {
        let (name, rule) = spec.split_once('=').ok_or_else(|| {
            DayPickerError::InvalidArgument(format!("modifier must be NAME=RULE: {}", spec))
        })?;
        props.modifiers.insert(name.trim(), rule.parse::<ModifierRule>()?);
    }

    Ok(props)
}

/// Combine an existing rule with rules parsed from flags into one flat `Any`.
fn merge_rules(existing: Option<ModifierRule>, specs: &[String]) -> Result<Option<ModifierRule>> {
    if specs.is_empty() {
        return Ok(existing);
    }
    let mut rules = Vec::new();
    for rule in existing.into_iter().chain(
        specs
            .iter()
            .map(|s| s.parse::<ModifierRule>())
            .collect::<Result<Vec<_>>>()?,
    ) {
        match rule {
            ModifierRule::Any(items) => rules.extend(items),
            single => rules.push(single),
        }
    }
    Ok(Some(ModifierRule::Any(rules)))
}

/// Get today's date, respecting DAYPICKER_TODAY environment variable for testing.
pub fn get_today_date() -> Result<CalendarDate> {
    if let Ok(test_time) = std::env::var("DAYPICKER_TODAY")
        && let Ok(date) = test_time.parse::<CalendarDate>()
    {
        return Ok(date);
    }
    CalendarDate::try_from(chrono::Local::now().date_naive())
}

/// Parse month from string (numeric 1-12 or English name).
pub fn parse_month(s: &str) -> Option<u32> {
    if let Ok(n) = s.parse::<u32>() {
        return (1..=12).contains(&n).then_some(n);
    }
    s.parse::<Month>().ok().map(|m| m.number_from_month())
}

fn parse_year(s: &str) -> Result<i32> {
    let year = s
        .parse::<i32>()
        .map_err(|_| DayPickerError::InvalidArgument(format!("year: {}", s)))?;
    if !(1..=9999).contains(&year) {
        return Err(DayPickerError::InvalidArgument(format!("year: {} (must be 1-9999)", year)));
    }
    Ok(year)
}

fn month_start(year: i32, month: u32) -> Result<CalendarDate> {
    CalendarDate::from_ymd(year, month, 1)
        .ok_or_else(|| DayPickerError::InvalidDate(format!("{}-{:02}", year, month)))
}

/// Calculate the first displayed month and the default number of months.
///
/// Argument patterns:
/// - no args: current month
/// - 1 arg: `YYYY-MM-DD` date, year (4 digits, whole year) or month
/// - 2 args: month year
pub fn get_display_date(args: &Args) -> Result<(CalendarDate, u32)> {
    let today = get_today_date()?;

    match (args.month_arg.as_deref(), args.year_arg.as_deref()) {
        (None, _) => Ok((first_day_of_month(today), 1)),
        (Some(val), None) => {
            if let Ok(date) = val.parse::<CalendarDate>() {
                return Ok((first_day_of_month(date), 1));
            }
            if let Ok(num) = val.parse::<i32>()
                && (1000..=9999).contains(&num)
            {
                return Ok((month_start(num, 1)?, 12));
            }
            let month = parse_month(val)
                .ok_or_else(|| DayPickerError::InvalidArgument(val.to_string()))?;
            Ok((month_start(today.year(), month)?, 1))
        }
        (Some(month), Some(year)) => {
            let month = parse_month(month)
                .ok_or_else(|| DayPickerError::InvalidArgument(format!("month: {}", month)))?;
            Ok((month_start(parse_year(year)?, month)?, 1))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_flattens_nested_sequences() {
        let existing = ModifierRule::Any(vec![ModifierRule::Day("2015-09-01".parse().unwrap())]);
        let merged = merge_rules(Some(existing), &["2015-09-19".to_string()])
            .unwrap()
            .unwrap();
        match &merged {
            ModifierRule::Any(items) => assert_eq!(items.len(), 2),
            other => panic!("expected Any, got {other:?}"),
        }
        assert!(merged.matches("2015-09-01".parse().unwrap()));
        assert!(merged.matches("2015-09-19".parse().unwrap()));
    }

    #[test]
    fn merge_without_flags_keeps_existing() {
        assert!(merge_rules(None, &[]).unwrap().is_none());
    }

    #[test]
    fn parse_month_names_and_numbers() {
        assert_eq!(parse_month("9"), Some(9));
        assert_eq!(parse_month("sep"), Some(9));
        assert_eq!(parse_month("September"), Some(9));
        assert_eq!(parse_month("13"), None);
        assert_eq!(parse_month("foo"), None);
    }
}
