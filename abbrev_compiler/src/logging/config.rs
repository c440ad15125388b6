//! Logging settings: compile-time ceilings plus runtime preferences
//!
//! Preferences come from the `ABBREV_LOGGING_*` environment variables
//! unless a binary installs its own with [`init_runtime_preferences`]
//! before [`init_global_logging`](super::init_global_logging).

use crate::config::constants::compile_time::logging::{
    DEFAULT_LOG_MESSAGE_LENGTH, MAX_LOG_MESSAGE_LENGTH,
};
use crate::config::runtime::LoggingPreferences;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    check_message_length(preferences.max_message_length)?;
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Logging preferences already installed".to_string())
}

fn preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

fn check_message_length(length: usize) -> Result<(), String> {
    if length == 0 || length > MAX_LOG_MESSAGE_LENGTH {
        return Err(format!(
            "context value limit must be within 1..={}, got {}",
            MAX_LOG_MESSAGE_LENGTH, length
        ));
    }
    Ok(())
}

pub fn get_min_log_level() -> LogLevel {
    preferences().min_log_level
}

pub fn use_structured_logging() -> bool {
    preferences().use_structured_logging
}

/// Context values longer than this are cut and marked with `...`
pub fn get_max_message_length() -> usize {
    preferences().max_message_length
}

/// Checks the effective preferences, including ones read from the environment
pub fn validate_config() -> Result<(), String> {
    check_message_length(preferences().max_message_length)
}

pub fn get_config_summary() -> String {
    let preferences = preferences();
    format!(
        "logging: level={} format={} context_limit={} (default {})",
        preferences.min_log_level.as_str(),
        if preferences.use_structured_logging {
            "json"
        } else {
            "text"
        },
        preferences.max_message_length,
        DEFAULT_LOG_MESSAGE_LENGTH,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_preferences_are_valid() {
        assert!(check_message_length(DEFAULT_LOG_MESSAGE_LENGTH).is_ok());
    }

    #[test]
    fn test_message_limit_bounds() {
        assert!(check_message_length(0).is_err());
        assert!(check_message_length(MAX_LOG_MESSAGE_LENGTH).is_ok());
        assert!(check_message_length(MAX_LOG_MESSAGE_LENGTH + 1).is_err());
    }

    #[test]
    fn test_summary_names_level() {
        assert!(get_config_summary().starts_with("logging: level="));
    }
}
