//! Modifier rules and the per-day modifier resolver.
//!
//! A modifier is a named classification of a day ("selected", "disabled",
//! "holiday", ...). Each modifier name maps to a [`ModifierRule`]; resolving a
//! day against a [`ModifierMap`] yields the names whose rules match it.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::Weekday;

use crate::error::DayPickerError;
use crate::types::CalendarDate;

/// Shared day predicate.
pub type DayPredicate = Arc<dyn Fn(CalendarDate) -> bool + Send + Sync>;

/// A rule deciding whether a modifier applies to a day.
#[derive(Clone)]
pub enum ModifierRule {
    /// Exactly this day.
    Day(CalendarDate),
    /// Every day from `from` to `to`, both inclusive.
    Range { from: CalendarDate, to: CalendarDate },
    /// Every day strictly after the bound.
    After(CalendarDate),
    /// Every day strictly before the bound.
    Before(CalendarDate),
    /// Days for which the predicate returns true.
    Predicate(DayPredicate),
    /// Matches when any element matches. Elements are tested one level deep:
    /// a nested `Any` never matches.
    Any(Vec<ModifierRule>),
}

impl ModifierRule {
    pub fn range(from: CalendarDate, to: CalendarDate) -> Self {
        ModifierRule::Range { from, to }
    }

    pub fn predicate<F>(f: F) -> Self
    where
        F: Fn(CalendarDate) -> bool + Send + Sync + 'static,
    {
        ModifierRule::Predicate(Arc::new(f))
    }

    /// Predicate rule matching days falling on any of the given weekdays.
    pub fn days_of_week(weekdays: &[Weekday]) -> Self {
        let weekdays = weekdays.to_vec();
        Self::predicate(move |day| weekdays.contains(&day.weekday()))
    }

    /// Test the rule against a day.
    pub fn matches(&self, day: CalendarDate) -> bool {
        match self {
            ModifierRule::Any(items) => items.iter().any(|item| item.matches_single(day)),
            single => single.matches_single(day),
        }
    }

    fn matches_single(&self, day: CalendarDate) -> bool {
        match self {
            ModifierRule::Day(d) => day.is_same_day(*d),
            ModifierRule::Range { from, to } => *from <= day && day <= *to,
            ModifierRule::After(bound) => day > *bound,
            ModifierRule::Before(bound) => day < *bound,
            ModifierRule::Predicate(f) => f(day),
            ModifierRule::Any(_) => false,
        }
    }
}

impl fmt::Debug for ModifierRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ModifierRule::Day(d) => f.debug_tuple("Day").field(d).finish(),
            ModifierRule::Range { from, to } => f
                .debug_struct("Range")
                .field("from", from)
                .field("to", to)
                .finish(),
            ModifierRule::After(d) => f.debug_tuple("After").field(d).finish(),
            ModifierRule::Before(d) => f.debug_tuple("Before").field(d).finish(),
            ModifierRule::Predicate(_) => f.write_str("Predicate(..)"),
            ModifierRule::Any(items) => f.debug_tuple("Any").field(items).finish(),
        }
    }
}

impl From<CalendarDate> for ModifierRule {
    fn from(day: CalendarDate) -> Self {
        ModifierRule::Day(day)
    }
}

impl From<Vec<ModifierRule>> for ModifierRule {
    fn from(items: Vec<ModifierRule>) -> Self {
        ModifierRule::Any(items)
    }
}

impl FromStr for ModifierRule {
    type Err = DayPickerError;

    /// Parse the command-line rule syntax: comma-separated `YYYY-MM-DD`,
    /// `FROM..TO`, `>DATE` (after), `<DATE` (before) or weekday names.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut rules = s
            .split(',')
            .map(|part| parse_single_rule(part.trim()))
            .collect::<Result<Vec<_>, _>>()?;
        if rules.len() == 1 {
            Ok(rules.remove(0))
        } else {
            Ok(ModifierRule::Any(rules))
        }
    }
}

fn parse_single_rule(s: &str) -> Result<ModifierRule, DayPickerError> {
    if let Some((from, to)) = s.split_once("..") {
        return Ok(ModifierRule::range(from.parse()?, to.parse()?));
    }
    if let Some(after) = s.strip_prefix('>') {
        return Ok(ModifierRule::After(after.parse()?));
    }
    if let Some(before) = s.strip_prefix('<') {
        return Ok(ModifierRule::Before(before.parse()?));
    }
    if let Ok(weekday) = s.parse::<Weekday>() {
        return Ok(ModifierRule::days_of_week(&[weekday]));
    }
    s.parse::<CalendarDate>()
        .map(ModifierRule::Day)
        .map_err(|_| DayPickerError::InvalidRule(s.to_string()))
}

/// Ordered map from modifier name to rule.
///
/// A `None` rule is kept in place but never matches. Inserting an existing
/// name replaces its rule without moving it.
#[derive(Clone, Debug, Default)]
pub struct ModifierMap {
    entries: Vec<(String, Option<ModifierRule>)>,
}

impl ModifierMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, rule: impl Into<Option<ModifierRule>>) {
        let name = name.into();
        let rule = rule.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some(entry) => entry.1 = rule,
            None => self.entries.push((name, rule)),
        }
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, name: impl Into<String>, rule: impl Into<Option<ModifierRule>>) -> Self {
        self.insert(name, rule);
        self
    }

    pub fn get(&self, name: &str) -> Option<&ModifierRule> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .and_then(|(_, rule)| rule.as_ref())
    }

    pub fn contains_key(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ModifierRule>)> {
        self.entries.iter().map(|(n, rule)| (n.as_str(), rule.as_ref()))
    }
}

impl<N: Into<String>, R: Into<Option<ModifierRule>>> FromIterator<(N, R)> for ModifierMap {
    fn from_iter<I: IntoIterator<Item = (N, R)>>(iter: I) -> Self {
        let mut map = ModifierMap::new();
        for (name, rule) in iter {
            map.insert(name, rule);
        }
        map
    }
}

/// Names of the modifiers whose rules match `day`, in map order.
pub fn resolve_modifiers(day: CalendarDate, rules: &ModifierMap) -> Vec<String> {
    rules
        .iter()
        .filter_map(|(name, rule)| {
            rule.filter(|rule| rule.matches(day))
                .map(|_| name.to_string())
        })
        .collect()
}
