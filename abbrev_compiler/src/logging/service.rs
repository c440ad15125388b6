//! Logging service and logger backends

use super::codes::Code;
use super::config;
use super::events::{LogEvent, LogLevel};
use std::sync::{Arc, Mutex};

pub trait Logger: Send + Sync {
    fn log(&self, event: &LogEvent);
}

/// Level filter in front of a logger backend
pub struct LoggingService {
    logger: Arc<dyn Logger>,
    min_level: LogLevel,
}

impl LoggingService {
    pub fn new(logger: Arc<dyn Logger>, min_level: LogLevel) -> Self {
        Self { logger, min_level }
    }

    /// Service built from the runtime logging preferences
    pub fn with_config() -> Self {
        let min_level = config::get_min_log_level();
        let format = if config::use_structured_logging() {
            StderrFormat::Json
        } else {
            StderrFormat::Text
        };
        Self::new(Arc::new(StderrLogger::new(format)), min_level)
    }

    pub fn min_level(&self) -> LogLevel {
        self.min_level
    }

    pub fn should_log(&self, level: LogLevel) -> bool {
        level <= self.min_level
    }

    pub fn log_event(&self, event: LogEvent) {
        if self.should_log(event.level) {
            self.logger.log(&event);
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StderrFormat {
    Text,
    /// One JSON object per line
    Json,
}

/// Writes events to stderr; stdout carries only expansion output
pub struct StderrLogger {
    format: StderrFormat,
}

impl StderrLogger {
    pub fn new(format: StderrFormat) -> Self {
        Self { format }
    }
}

impl Logger for StderrLogger {
    fn log(&self, event: &LogEvent) {
        let line = match self.format {
            StderrFormat::Text => event.format(),
            StderrFormat::Json => event.format_json().unwrap_or_else(|_| event.format()),
        };
        eprintln!("{}", line);
    }
}

/// Keeps events in memory so tests can inspect what a stage reported
#[derive(Default)]
pub struct MemoryLogger {
    events: Mutex<Vec<LogEvent>>,
}

impl MemoryLogger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get_events(&self) -> Vec<LogEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn clear(&self) {
        if let Ok(mut events) = self.events.lock() {
            events.clear();
        }
    }

    pub fn event_count(&self) -> usize {
        self.events.lock().map(|events| events.len()).unwrap_or(0)
    }

    pub fn has_error_with_code(&self, code: Code) -> bool {
        self.get_events()
            .iter()
            .any(|event| event.is_error() && event.code == code)
    }

    pub fn has_success_with_code(&self, code: Code) -> bool {
        self.get_events()
            .iter()
            .any(|event| event.is_info() && event.code == code)
    }
}

impl Logger for MemoryLogger {
    fn log(&self, event: &LogEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// Sends each event to several loggers
pub struct MultiLogger {
    loggers: Vec<Arc<dyn Logger>>,
}

impl MultiLogger {
    pub fn new() -> Self {
        Self {
            loggers: Vec::new(),
        }
    }

    pub fn add_logger(&mut self, logger: Arc<dyn Logger>) {
        self.loggers.push(logger);
    }

    pub fn with_memory(mut self) -> (Self, Arc<MemoryLogger>) {
        let memory = Arc::new(MemoryLogger::new());
        self.add_logger(memory.clone());
        (self, memory)
    }
}

impl Default for MultiLogger {
    fn default() -> Self {
        Self::new()
    }
}

impl Logger for MultiLogger {
    fn log(&self, event: &LogEvent) {
        for logger in &self.loggers {
            logger.log(event);
        }
    }
}

pub fn create_configured_service() -> LoggingService {
    LoggingService::with_config()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_memory_logger_captures_events() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Debug);

        service.log_event(LogEvent::error(codes::syntax::UNCLOSED_QUOTE, "Unclosed quote"));
        service.log_event(LogEvent::success(codes::success::EXPANSION_COMPLETE, "Expanded"));

        assert_eq!(memory.event_count(), 2);
        assert!(memory.has_error_with_code(codes::syntax::UNCLOSED_QUOTE));
        assert!(memory.has_success_with_code(codes::success::EXPANSION_COMPLETE));
    }

    #[test]
    fn test_log_level_filtering() {
        let memory = Arc::new(MemoryLogger::new());
        let service = LoggingService::new(memory.clone(), LogLevel::Warning);

        service.log_event(LogEvent::debug("hidden"));
        service.log_event(LogEvent::warning("shown"));

        assert_eq!(memory.event_count(), 1);
        assert!(memory.get_events()[0].is_warning());
    }

    #[test]
    fn test_multi_logger_fans_out() {
        let (mut multi, first) = MultiLogger::new().with_memory();
        let second = Arc::new(MemoryLogger::new());
        multi.add_logger(second.clone());

        let service = LoggingService::new(Arc::new(multi), LogLevel::Info);
        service.log_event(LogEvent::info("one"));
        service.log_event(LogEvent::debug("filtered"));

        assert_eq!(first.event_count(), 1);
        assert_eq!(second.event_count(), 1);
        first.clear();
        assert_eq!(first.event_count(), 0);
    }
}
