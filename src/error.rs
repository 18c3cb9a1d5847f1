//! Error types for daypicker operations.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum DayPickerError {
    #[error("Invalid date: {0}")]
    InvalidDate(String),

    #[error("Invalid first day of week: {0} (must be 0-6)")]
    InvalidFirstDayOfWeek(i64),

    #[error("Invalid rule: {0}")]
    InvalidRule(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config: {0}")]
    ConfigParse(#[from] toml::de::Error),
}

pub type Result<T> = std::result::Result<T, DayPickerError>;
