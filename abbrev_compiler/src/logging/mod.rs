//! Global logging module
//!
//! Process-wide logger behind a `OnceLock`. Every function here is a no-op
//! until [`init_global_logging`] runs, so the library can be embedded
//! without any logging setup.

pub mod codes;
pub mod config;
pub mod events;
pub mod macros;
pub mod service;

use std::sync::{Arc, OnceLock};

pub use codes::Code;
pub use events::{LogEvent, LogLevel};
pub use service::{Logger, LoggingService, MemoryLogger, MultiLogger, StderrFormat, StderrLogger};

static GLOBAL_LOGGER: OnceLock<Arc<LoggingService>> = OnceLock::new();

/// Installs the process logger from the `ABBREV_LOGGING_*` preferences
///
/// Fails when called twice or when a code the stages report on every
/// failure path has no registry entry.
pub fn init_global_logging() -> Result<(), String> {
    config::validate_config().map_err(|e| {
        format!("{}: invalid logging configuration: {}", codes::system::INITIALIZATION_FAILURE, e)
    })?;

    let required = [
        codes::system::INTERNAL_ERROR,
        codes::lexical::UNEXPECTED_CHARACTER,
        codes::syntax::UNEXPECTED_TOKEN,
        codes::snippets::INVALID_SNIPPET,
        codes::config::INVALID_CONFIG,
    ];
    if let Some(code) = required
        .iter()
        .find(|code| codes::get_error_metadata(code.as_str()).is_none())
    {
        return Err(format!("Missing metadata for error code: {}", code));
    }

    let service = Arc::new(service::create_configured_service());
    GLOBAL_LOGGER
        .set(service.clone())
        .map_err(|_| "Global logger already initialized")?;

    service.log_event(
        LogEvent::success(
            codes::success::SYSTEM_INITIALIZATION_COMPLETED,
            "Logging initialized",
        )
        .with_context("min_level", service.min_level().as_str()),
    );
    Ok(())
}

pub fn is_initialized() -> bool {
    GLOBAL_LOGGER.get().is_some()
}

pub fn try_get_global_logger() -> Option<&'static LoggingService> {
    GLOBAL_LOGGER.get().map(|service| service.as_ref())
}

/// True when a global logger exists and accepts debug events
pub fn debug_enabled() -> bool {
    try_get_global_logger()
        .map(|logger| logger.should_log(LogLevel::Debug))
        .unwrap_or(false)
}

fn attach_context(mut event: LogEvent, context: Vec<(&str, String)>) -> LogEvent {
    let limit = config::get_max_message_length();
    for (key, value) in context {
        if value.chars().count() > limit {
            let truncated: String = value.chars().take(limit).collect();
            event = event.with_context(key, &format!("{}...", truncated));
        } else {
            event = event.with_context(key, &value);
        }
    }
    event
}

/// Used by `log_error!`
pub fn log_error_with_context(
    code: Code,
    message: &str,
    span: Option<crate::utils::Span>,
    context: Vec<(&str, String)>,
) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let mut event = LogEvent::error(code, message);
    if let Some(span) = span {
        event = event.with_span(span);
    }
    logger.log_event(attach_context(event, context));
}

/// Used by `log_success!`
pub fn log_success_with_context(code: Code, message: &str, context: Vec<(&str, String)>) {
    if let Some(logger) = try_get_global_logger() {
        logger.log_event(attach_context(LogEvent::success(code, message), context));
    }
}

/// Used by `log_info!`, `log_warning!` and `log_debug!`
pub fn log_with_level(level: LogLevel, message: &str, context: Vec<(&str, String)>) {
    let Some(logger) = try_get_global_logger() else {
        return;
    };

    let event = match level {
        LogLevel::Error => LogEvent::error(codes::system::INTERNAL_ERROR, message),
        LogLevel::Warning => LogEvent::warning(message),
        LogLevel::Info => LogEvent::info(message),
        LogLevel::Debug => LogEvent::debug(message),
    };
    logger.log_event(attach_context(event, context));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_logging_before_init_is_noop() {
        log_with_level(LogLevel::Info, "no logger yet", vec![("k", "v".to_string())]);
        log_error_with_context(codes::system::INTERNAL_ERROR, "ignored", None, vec![]);
    }

    #[test]
    fn test_context_truncation() {
        let long = "x".repeat(config::get_max_message_length() + 10);
        let event = attach_context(LogEvent::info("m"), vec![("value", long)]);
        assert!(event.context_value("value").is_some_and(|v| v.ends_with("...")));
    }
}
