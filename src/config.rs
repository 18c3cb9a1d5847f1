//! TOML configuration: display options and modifier rules.
//!
//! ```toml
//! first_day_of_week = 1
//! locale = "it_IT"
//! fixed_weeks = true
//! selected_days = 2015-09-19
//! disabled_days = [{ before = 2015-09-01 }, { days_of_week = [0] }]
//!
//! [modifiers]
//! holiday = [2015-12-25, "2016-01-01"]
//! vacation = { from = 2015-08-01, to = 2015-08-15 }
//! ```
//!
//! Modifier values that do not describe a rule are dropped with a warning and
//! never match.

use std::path::{Path, PathBuf};

use serde::Deserialize;
use toml::Value;
use tracing::{debug, info, warn};

use crate::calendar::weekday_from_index;
use crate::error::{DayPickerError, Result};
use crate::modifiers::{ModifierMap, ModifierRule};
use crate::props::DayPickerProps;
use crate::types::CalendarDate;

/// Location checked when no config path is given.
pub const DEFAULT_CONFIG_PATH: &str = "~/.config/daypicker/config.toml";

/// Top-level config file.
#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct DayPickerConfig {
    /// 0 = Sunday .. 6 = Saturday.
    pub first_day_of_week: Option<i64>,
    pub locale: Option<String>,
    pub fixed_weeks: Option<bool>,
    pub show_outside_days: Option<bool>,
    pub selected_days: Option<Value>,
    pub disabled_days: Option<Value>,
    #[serde(default)]
    pub class_names: ClassNamesToml,
    #[serde(default)]
    pub modifiers: toml::Table,
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct ClassNamesToml {
    pub selected: Option<String>,
    pub disabled: Option<String>,
}

impl DayPickerConfig {
    pub fn from_toml_str(s: &str) -> Result<Self> {
        Ok(toml::from_str(s)?)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let toml_str =
            std::fs::read_to_string(path).map_err(|source| DayPickerError::ConfigRead {
                path: path.to_path_buf(),
                source,
            })?;
        let config = Self::from_toml_str(&toml_str)?;
        info!(path = %path.display(), modifiers = config.modifiers.len(), "loaded config");
        Ok(config)
    }

    /// Apply the file's settings on top of `props`.
    pub fn apply_to(&self, props: &mut DayPickerProps) -> Result<()> {
        if let Some(index) = self.first_day_of_week {
            props.first_day_of_week = Some(weekday_from_index(index)?);
        }
        if let Some(locale) = &self.locale {
            props.locale = locale.clone();
        }
        if let Some(fixed_weeks) = self.fixed_weeks {
            props.fixed_weeks = fixed_weeks;
        }
        if let Some(show) = self.show_outside_days {
            props.show_outside_days = show;
        }
        if let Some(selected) = &self.class_names.selected {
            props.class_names.selected = selected.clone();
        }
        if let Some(disabled) = &self.class_names.disabled {
            props.class_names.disabled = disabled.clone();
        }
        if let Some(value) = &self.selected_days {
            props.selected_days = rule_from_toml("selected_days", value);
        }
        if let Some(value) = &self.disabled_days {
            props.disabled_days = rule_from_toml("disabled_days", value);
        }
        for (name, rule) in self.modifier_map().iter() {
            props.modifiers.insert(name, rule.cloned());
        }
        Ok(())
    }

    /// The `[modifiers]` table in file order.
    pub fn modifier_map(&self) -> ModifierMap {
        self.modifiers
            .iter()
            .map(|(name, value)| (name.clone(), rule_from_toml(name, value)))
            .collect()
    }
}

/// Expand `~` in `path`, or fall back to [`DEFAULT_CONFIG_PATH`] if that file exists.
pub fn resolve_config_path(path: Option<&str>) -> Option<PathBuf> {
    match path {
        Some(p) => Some(PathBuf::from(shellexpand::tilde(p).as_ref())),
        None => {
            let default = PathBuf::from(shellexpand::tilde(DEFAULT_CONFIG_PATH).as_ref());
            default.is_file().then_some(default)
        }
    }
}

/// Convert a TOML value into a rule. Unusable values yield `None`.
pub fn rule_from_toml(name: &str, value: &Value) -> Option<ModifierRule> {
    match value {
        Value::Array(items) => {
            let rules: Vec<ModifierRule> = items
                .iter()
                .filter_map(|item| match item {
                    Value::Array(_) => {
                        debug!(modifier = name, "ignoring nested array");
                        None
                    }
                    other => rule_from_toml(name, other),
                })
                .collect();
            Some(ModifierRule::Any(rules))
        }
        Value::Table(table) => table_rule(name, table),
        Value::Boolean(false) => None,
        other => match date_from_toml(other) {
            Some(day) => Some(ModifierRule::Day(day)),
            None => {
                warn!(modifier = name, value = %other, "ignoring malformed modifier rule");
                None
            }
        },
    }
}

/// Range, then after, then before, then days of week.
fn table_rule(name: &str, table: &toml::Table) -> Option<ModifierRule> {
    let date = |key: &str| table.get(key).and_then(date_from_toml);

    if let (Some(from), Some(to)) = (date("from"), date("to")) {
        return Some(ModifierRule::range(from, to));
    }
    if let Some(after) = date("after") {
        return Some(ModifierRule::After(after));
    }
    if let Some(before) = date("before") {
        return Some(ModifierRule::Before(before));
    }
    if let Some(Value::Array(days)) = table.get("days_of_week") {
        let weekdays: Vec<_> = days
            .iter()
            .filter_map(|d| match d {
                Value::Integer(i) => weekday_from_index(*i).ok(),
                Value::String(s) => s.parse().ok(),
                _ => None,
            })
            .collect();
        return Some(ModifierRule::days_of_week(&weekdays));
    }
    warn!(modifier = name, "ignoring table without from/to, after, before or days_of_week");
    None
}

fn date_from_toml(value: &Value) -> Option<CalendarDate> {
    match value {
        Value::Datetime(datetime) => datetime.date.and_then(|d| {
            CalendarDate::from_ymd(i32::from(d.year), u32::from(d.month), u32::from(d.day))
        }),
        Value::String(s) => s.parse().ok(),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month0: u32, day: u32) -> CalendarDate {
        CalendarDate::new(year, month0, day).unwrap()
    }

    fn value(toml_str: &str) -> Value {
        let table: toml::Table = toml::from_str(toml_str).unwrap();
        table["v"].clone()
    }

    #[test]
    fn range_wins_over_bounds() {
        let v = value("v = { from = 2015-09-18, to = 2015-09-20, after = 2015-10-01 }");
        let rule = rule_from_toml("foo", &v).unwrap();
        assert!(rule.matches(date(2015, 8, 19)));
        assert!(!rule.matches(date(2015, 9, 5)));
    }

    #[test]
    fn half_range_falls_through_to_bounds() {
        let v = value("v = { from = 2015-09-18, before = 2015-09-15 }");
        let rule = rule_from_toml("foo", &v).unwrap();
        assert!(rule.matches(date(2015, 8, 10)));
        assert!(!rule.matches(date(2015, 8, 19)));

        assert!(rule_from_toml("foo", &value("v = { to = 2015-09-18 }")).is_none());
    }

    #[test]
    fn malformed_values_are_dropped() {
        assert!(rule_from_toml("foo", &value("v = false")).is_none());
        assert!(rule_from_toml("foo", &value("v = 42")).is_none());
        assert!(rule_from_toml("foo", &value("v = \"test\"")).is_none());
    }

    #[test]
    fn arrays_skip_junk_entries() {
        let v = value("v = [false, \"test\", [2015-09-21], 2015-09-21]");
        let rule = rule_from_toml("foo", &v).unwrap();
        match &rule {
            ModifierRule::Any(items) => assert_eq!(items.len(), 1),
            other => panic!("expected Any, got {other:?}"),
        }
        assert!(rule.matches(date(2015, 8, 21)));
    }

    #[test]
    fn days_of_week_accepts_indexes_and_names() {
        let v = value("v = { days_of_week = [0, \"sat\", 9] }");
        let rule = rule_from_toml("weekend", &v).unwrap();
        assert!(rule.matches(date(2015, 8, 19))); // Saturday
        assert!(rule.matches(date(2015, 8, 20))); // Sunday
        assert!(!rule.matches(date(2015, 8, 21)));
    }

    #[test]
    fn modifier_order_follows_file() {
        let config = DayPickerConfig::from_toml_str(
            "[modifiers]\nzeta = 2015-09-19\nalpha = 2015-09-19\nmid = false\n",
        )
        .unwrap();
        let names: Vec<_> = config.modifier_map().names().map(str::to_string).collect();
        assert_eq!(names, ["zeta", "alpha", "mid"]);
    }

    #[test]
    fn invalid_first_day_of_week_is_rejected() {
        let config = DayPickerConfig::from_toml_str("first_day_of_week = 7").unwrap();
        let mut props = DayPickerProps::default();
        assert!(matches!(
            config.apply_to(&mut props),
            Err(DayPickerError::InvalidFirstDayOfWeek(7))
        ));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        assert!(matches!(
            DayPickerConfig::from_toml_str("colour = true"),
            Err(DayPickerError::ConfigParse(_))
        ));
    }
}
