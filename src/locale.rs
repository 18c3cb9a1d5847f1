//! Locale lookups: first day of week and localized month/weekday names.

use chrono::{Locale, NaiveDate, Weekday};

/// Locale service consulted when no explicit first day of week is given.
pub trait LocaleUtils {
    /// Weekday that starts a week row in the given locale.
    fn first_day_of_week(&self, locale: &str) -> Weekday;

    /// Nominative month name, `month` 1-based.
    fn month_name(&self, month: u32, locale: &str) -> String {
        match NaiveDate::from_ymd_opt(2000, month, 1) {
            Some(date) => date
                .format_localized("%B", parse_locale(locale))
                .to_string(),
            None => month.to_string(),
        }
    }

    /// 2-character weekday abbreviation.
    fn weekday_short(&self, weekday: Weekday, locale: &str) -> String {
        // 2000-01-03 is a Monday
        let base_date = NaiveDate::from_ymd_opt(2000, 1, 3).unwrap_or_default();
        let offset = weekday.num_days_from_monday() as i64;
        let date = base_date + chrono::Duration::days(offset);
        let day_name = date
            .format_localized("%a", parse_locale(locale))
            .to_string();
        day_name.chars().take(2).collect()
    }
}

/// Default locale service backed by chrono's locale tables.
#[derive(Debug, Clone, Copy, Default)]
pub struct ChronoLocaleUtils;

// Territories whose weeks start on Sunday or Saturday; everything else starts on Monday.
const SUNDAY_TERRITORIES: &[&str] = &[
    "US", "CA", "MX", "BR", "JP", "KR", "TW", "HK", "CN", "IL", "IN", "PH", "ZA",
];
const SATURDAY_TERRITORIES: &[&str] = &[
    "AF", "DZ", "EG", "IQ", "IR", "JO", "KW", "LY", "OM", "QA", "SD", "SY",
];

impl LocaleUtils for ChronoLocaleUtils {
    fn first_day_of_week(&self, locale: &str) -> Weekday {
        let (language, territory) = split_tag(locale);
        let territory = match territory {
            Some(t) => t,
            None => match language.as_str() {
                "en" | "c" | "posix" => "US".to_string(),
                "ja" => "JP".to_string(),
                "ko" => "KR".to_string(),
                "he" => "IL".to_string(),
                "zh" => "CN".to_string(),
                "ar" => "EG".to_string(),
                _ => return Weekday::Mon,
            },
        };
        if SUNDAY_TERRITORIES.contains(&territory.as_str()) {
            Weekday::Sun
        } else if SATURDAY_TERRITORIES.contains(&territory.as_str()) {
            Weekday::Sat
        } else {
            Weekday::Mon
        }
    }
}

/// Strip codeset and modifier: `ru_RU.UTF-8@euro` -> `ru_RU`.
fn strip_tag(tag: &str) -> &str {
    let tag = tag.split('.').next().unwrap_or(tag);
    tag.split('@').next().unwrap_or(tag)
}

/// Split a locale tag into lowercase language and uppercase territory.
fn split_tag(tag: &str) -> (String, Option<String>) {
    let mut parts = strip_tag(tag).split(['_', '-']);
    let language = parts.next().unwrap_or_default().to_lowercase();
    let territory = parts
        .find(|p| p.len() == 2 && p.chars().all(|c| c.is_ascii_alphabetic()))
        .map(|p| p.to_uppercase());
    (language, territory)
}

/// Resolve a locale tag (`it`, `it-IT`, `it_IT.UTF-8`) to a chrono locale, falling back to en_US.
pub fn parse_locale(tag: &str) -> Locale {
    let (language, territory) = split_tag(tag);
    let territory = territory.unwrap_or_else(|| language.to_uppercase());
    format!("{}_{}", language, territory)
        .parse()
        .unwrap_or(Locale::en_US)
}

/// Get system locale tag from environment (LC_ALL > LC_TIME > LANG > en_US).
pub fn get_system_locale() -> String {
    let tag = std::env::var("LC_ALL")
        .or_else(|_| std::env::var("LC_TIME"))
        .or_else(|_| std::env::var("LANG"))
        .unwrap_or_else(|_| "en_US.UTF-8".to_string());
    let tag = strip_tag(&tag);
    if tag.is_empty() {
        "en_US".to_string()
    } else {
        tag.to_string()
    }
}

/// Weekdays in display order, starting at `first_day_of_week`.
pub fn get_weekday_order(first_day_of_week: Weekday) -> [Weekday; 7] {
    let mut weekday = first_day_of_week;
    std::array::from_fn(|_| {
        let current = weekday;
        weekday = weekday.succ();
        current
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_day_of_week_by_territory() {
        let utils = ChronoLocaleUtils;
        assert_eq!(utils.first_day_of_week("en_US.UTF-8"), Weekday::Sun);
        assert_eq!(utils.first_day_of_week("en-GB"), Weekday::Mon);
        assert_eq!(utils.first_day_of_week("it"), Weekday::Mon);
        assert_eq!(utils.first_day_of_week("en"), Weekday::Sun);
        assert_eq!(utils.first_day_of_week("ar_EG"), Weekday::Sat);
        assert_eq!(utils.first_day_of_week("C"), Weekday::Sun);
    }

    #[test]
    fn locale_tags_resolve() {
        assert_eq!(parse_locale("ru_RU.UTF-8"), Locale::ru_RU);
        assert_eq!(parse_locale("de-DE"), Locale::de_DE);
        assert_eq!(parse_locale("it"), Locale::it_IT);
        assert_eq!(parse_locale("xx"), Locale::en_US);
    }

    #[test]
    fn weekday_order_wraps() {
        let order = get_weekday_order(Weekday::Sat);
        assert_eq!(order[0], Weekday::Sat);
        assert_eq!(order[1], Weekday::Sun);
        assert_eq!(order[6], Weekday::Fri);
    }
}
