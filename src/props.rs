//! Day picker properties and the adapters deriving modifiers and the first
//! day of week from them.

use chrono::Weekday;

use crate::locale::LocaleUtils;
use crate::modifiers::{ModifierMap, ModifierRule};

/// Modifier names used for the day picker's built-in states.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassNames {
    pub selected: String,
    pub disabled: String,
}

impl Default for ClassNames {
    fn default() -> Self {
        Self {
            selected: "selected".to_string(),
            disabled: "disabled".to_string(),
        }
    }
}

/// Inputs of a day picker that affect geometry and modifiers.
#[derive(Debug, Clone)]
pub struct DayPickerProps {
    /// Custom modifiers, resolved in insertion order.
    pub modifiers: ModifierMap,
    pub selected_days: Option<ModifierRule>,
    pub disabled_days: Option<ModifierRule>,
    pub class_names: ClassNames,
    /// Explicit first day of week; the locale decides when unset.
    pub first_day_of_week: Option<Weekday>,
    pub locale: String,
    pub fixed_weeks: bool,
    pub show_outside_days: bool,
}

impl Default for DayPickerProps {
    fn default() -> Self {
        Self {
            modifiers: ModifierMap::new(),
            selected_days: None,
            disabled_days: None,
            class_names: ClassNames::default(),
            first_day_of_week: None,
            locale: "en".to_string(),
            fixed_weeks: false,
            show_outside_days: true,
        }
    }
}

/// Custom modifiers with selected and disabled days injected under their
/// class names.
pub fn modifiers_from_props(props: &DayPickerProps) -> ModifierMap {
    let mut modifiers = props.modifiers.clone();
    if let Some(selected) = &props.selected_days {
        modifiers.insert(props.class_names.selected.clone(), selected.clone());
    }
    if let Some(disabled) = &props.disabled_days {
        modifiers.insert(props.class_names.disabled.clone(), disabled.clone());
    }
    modifiers
}

/// First day of week: explicit value, then the locale service, then Sunday.
pub fn first_day_of_week_from_props(
    props: &DayPickerProps,
    locale_utils: Option<&dyn LocaleUtils>,
) -> Weekday {
    if let Some(weekday) = props.first_day_of_week {
        return weekday;
    }
    if let Some(utils) = locale_utils {
        return utils.first_day_of_week(&props.locale);
    }
    Weekday::Sun
}
