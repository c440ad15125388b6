//! Log events emitted by the expansion stages

use super::codes::{self, Code};
use crate::utils::Span;
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error = 0,
    Warning = 1,
    Info = 2,
    Debug = 3,
}

impl LogLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Error => "ERROR",
            LogLevel::Warning => "WARN",
            LogLevel::Info => "INFO",
            LogLevel::Debug => "DEBUG",
        }
    }

    /// Accepts a level name or its number (`ABBREV_LOGGING_MIN_LEVEL=3`)
    pub fn parse(level: &str) -> Option<Self> {
        match level.to_lowercase().as_str() {
            "error" | "0" => Some(LogLevel::Error),
            "warning" | "warn" | "1" => Some(LogLevel::Warning),
            "info" | "2" => Some(LogLevel::Info),
            "debug" | "3" => Some(LogLevel::Debug),
            _ => None,
        }
    }
}

/// One message from a stage, with the abbreviation range it refers to
#[derive(Debug, Clone)]
pub struct LogEvent {
    pub timestamp: SystemTime,
    pub level: LogLevel,
    pub code: Code,
    pub message: String,
    /// Character range in the abbreviation, if the event is about one
    pub span: Option<Span>,
    /// Key/value pairs in the order the call site listed them
    pub context: Vec<(String, String)>,
}

impl LogEvent {
    fn new(level: LogLevel, code: Code, message: &str) -> Self {
        Self {
            timestamp: SystemTime::now(),
            level,
            code,
            message: message.to_string(),
            span: None,
            context: Vec::new(),
        }
    }

    pub fn error(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Error, code, message)
    }

    pub fn warning(message: &str) -> Self {
        Self::new(LogLevel::Warning, Code::new("W000"), message)
    }

    pub fn info(message: &str) -> Self {
        Self::new(LogLevel::Info, Code::new("I000"), message)
    }

    /// Info event carrying a registered success code
    pub fn success(code: Code, message: &str) -> Self {
        Self::new(LogLevel::Info, code, message)
    }

    pub fn debug(message: &str) -> Self {
        Self::new(LogLevel::Debug, Code::new("D000"), message)
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn with_context(mut self, key: &str, value: &str) -> Self {
        self.context.push((key.to_string(), value.to_string()));
        self
    }

    pub fn context_value(&self, key: &str) -> Option<&str> {
        self.context
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn is_error(&self) -> bool {
        self.level == LogLevel::Error
    }

    pub fn is_warning(&self) -> bool {
        self.level == LogLevel::Warning
    }

    pub fn is_info(&self) -> bool {
        self.level == LogLevel::Info
    }

    pub fn category(&self) -> &'static str {
        codes::get_category(self.code.as_str())
    }

    /// `[ERROR] E020 Unexpected character (col 5) abbreviation="div%"`
    pub fn format(&self) -> String {
        let mut line = format!("[{}] {} {}", self.level.as_str(), self.code, self.message);

        if let Some(span) = &self.span {
            if span.is_empty() {
                line.push_str(&format!(" (col {})", span.start.column));
            } else {
                line.push_str(&format!(" (cols {}-{})", span.start.column, span.end.column));
            }
        }
        for (key, value) in &self.context {
            line.push_str(&format!(" {}={:?}", key, value));
        }
        line
    }

    /// JSON line for tooling; error events carry their registry metadata
    pub fn format_json(&self) -> Result<String, serde_json::Error> {
        let millis = self
            .timestamp
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut json = serde_json::json!({
            "ts": millis,
            "level": self.level.as_str(),
            "code": self.code.as_str(),
            "category": self.category(),
            "message": self.message,
        });

        if self.is_error() {
            let code = self.code.as_str();
            json["severity"] = codes::get_severity(code).as_str().into();
            json["recoverable"] = codes::is_recoverable(code).into();
            json["action"] = codes::get_action(code).into();
        }

        if let Some(span) = &self.span {
            json["range"] = serde_json::json!([span.start.offset, span.end.offset]);
        }

        if !self.context.is_empty() {
            json["context"] = self
                .context
                .iter()
                .map(|(k, v)| (k.clone(), serde_json::Value::String(v.clone())))
                .collect::<serde_json::Map<_, _>>()
                .into();
        }

        serde_json::to_string(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::codes;

    #[test]
    fn test_error_event_category() {
        let event = LogEvent::error(codes::syntax::UNCLOSED_QUOTE, "Unclosed quote");

        assert!(event.is_error());
        assert_eq!(event.code.as_str(), "E042");
        assert_eq!(event.category(), "Syntax");
    }

    #[test]
    fn test_format_points_at_column() {
        let event = LogEvent::error(codes::lexical::UNEXPECTED_CHARACTER, "Unexpected character")
            .with_span(Span::point(4))
            .with_context("abbreviation", "div%");

        assert_eq!(
            event.format(),
            "[ERROR] E020 Unexpected character (col 5) abbreviation=\"div%\""
        );
    }

    #[test]
    fn test_format_range_and_context_order() {
        let event = LogEvent::info("Expanding")
            .with_span(Span::from_offsets(0, 2))
            .with_context("type", "markup")
            .with_context("syntax", "html");

        assert_eq!(
            event.format(),
            "[INFO] I000 Expanding (cols 1-3) type=\"markup\" syntax=\"html\""
        );
        assert_eq!(event.context_value("syntax"), Some("html"));
    }

    #[test]
    fn test_json_formatting() {
        let event = LogEvent::success(codes::success::EXPANSION_COMPLETE, "Expanded")
            .with_context("syntax", "html");

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["level"], "INFO");
        assert_eq!(json["code"], "I090");
        assert_eq!(json["context"]["syntax"], "html");
        assert!(json.get("severity").is_none());
    }

    #[test]
    fn test_json_error_metadata() {
        let event = LogEvent::error(codes::syntax::UNCLOSED_ATTRIBUTE_SET, "Unclosed")
            .with_span(Span::point(3));

        let json: serde_json::Value = serde_json::from_str(&event.format_json().unwrap()).unwrap();
        assert_eq!(json["range"], serde_json::json!([3, 3]));
        assert!(json["recoverable"].is_boolean());
    }

    #[test]
    fn test_log_level_parsing() {
        assert_eq!(LogLevel::parse("WARN"), Some(LogLevel::Warning));
        assert_eq!(LogLevel::parse("3"), Some(LogLevel::Debug));
        assert_eq!(LogLevel::parse("verbose"), None);
    }
}
