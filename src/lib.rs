//! Day picker calendar geometry and per-day modifier classification.
//!
//! Features:
//! - Week grids for a month, padded with adjacent-month days, optionally six rows
//! - Modifier rules (days, ranges, open bounds, predicates) resolved per day
//! - Locale-aware first day of week and names
//! - Terminal rendering with modifier highlighting and a TOML config file

pub mod args;
pub mod calendar;
pub mod config;
pub mod error;
pub mod formatter;
pub mod locale;
pub mod logging;
pub mod modifiers;
pub mod props;
pub mod types;

pub use calendar::build_week_grid;
pub use error::{DayPickerError, Result};
pub use modifiers::{ModifierMap, ModifierRule, resolve_modifiers};
pub use types::{CalendarDate, Week, WeekGrid};
