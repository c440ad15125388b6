// RUNTIME PREFERENCES (User Experience)

use crate::config::constants::compile_time::{conversion, logging};
use crate::logging::LogLevel;
use serde::{Deserialize, Serialize};
use std::env;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingPreferences {
    /// Whether to emit JSON lines instead of plain text
    pub use_structured_logging: bool,

    /// Minimum level that reaches the logger
    pub min_log_level: LogLevel,

    /// Truncation length for context values
    pub max_message_length: usize,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            use_structured_logging: env::var(env_vars::LOGGING_USE_STRUCTURED)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(false),
            min_log_level: env::var(env_vars::LOGGING_MIN_LEVEL)
                .ok()
                .and_then(|v| LogLevel::parse(&v))
                .unwrap_or(LogLevel::Warning),
            max_message_length: env::var(env_vars::LOGGING_MAX_MESSAGE_LENGTH)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(logging::DEFAULT_LOG_MESSAGE_LENGTH),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpansionPreferences {
    /// Upper bound for the number of repeated clones in one expansion
    pub max_repeat: usize,

    /// Syntax used when the caller names none
    pub default_syntax: Option<String>,

    /// Fixed seed for lorem generation; random per call when unset
    pub lorem_seed: Option<u64>,

    /// TOML file with global option overrides
    pub config_file: Option<String>,
}

impl Default for ExpansionPreferences {
    fn default() -> Self {
        Self {
            max_repeat: env::var(env_vars::MAX_REPEAT)
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(conversion::DEFAULT_MAX_REPEAT),
            default_syntax: env::var(env_vars::DEFAULT_SYNTAX).ok(),
            lorem_seed: env::var(env_vars::LOREM_SEED)
                .ok()
                .and_then(|v| v.parse().ok()),
            config_file: env::var(env_vars::CONFIG_FILE).ok(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RuntimeConfig {
    pub logging: LoggingPreferences,
    pub expansion: ExpansionPreferences,
}

/// Environment variable names for configuration
pub mod env_vars {
    pub const LOGGING_USE_STRUCTURED: &str = "ABBREV_LOGGING_USE_STRUCTURED";
    pub const LOGGING_MIN_LEVEL: &str = "ABBREV_LOGGING_MIN_LEVEL";
    pub const LOGGING_MAX_MESSAGE_LENGTH: &str = "ABBREV_LOGGING_MAX_MESSAGE_LENGTH";

    pub const MAX_REPEAT: &str = "ABBREV_MAX_REPEAT";
    pub const DEFAULT_SYNTAX: &str = "ABBREV_DEFAULT_SYNTAX";
    pub const LOREM_SEED: &str = "ABBREV_LOREM_SEED";
    pub const CONFIG_FILE: &str = "ABBREV_CONFIG";
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_preferences_roundtrip_through_toml() {
        let config = RuntimeConfig {
            logging: LoggingPreferences {
                use_structured_logging: true,
                min_log_level: LogLevel::Debug,
                max_message_length: 64,
            },
            expansion: ExpansionPreferences {
                max_repeat: 400,
                default_syntax: Some("pug".to_string()),
                lorem_seed: Some(7),
                config_file: None,
            },
        };

        let text = toml::to_string(&config).unwrap();
        assert!(text.contains("min_log_level = \"debug\""));

        let parsed: RuntimeConfig = toml::from_str(&text).unwrap();
        assert_eq!(parsed.expansion.max_repeat, 400);
        assert_eq!(parsed.expansion.default_syntax.as_deref(), Some("pug"));
    }

    #[test]
    fn test_env_var_names_exist() {
        assert!(env_vars::MAX_REPEAT.starts_with("ABBREV_"));
        assert!(env_vars::LOGGING_MIN_LEVEL.starts_with("ABBREV_"));
    }
}
