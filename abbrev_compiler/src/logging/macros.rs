//! Logging macros over [`Code`](crate::logging::Code)
//!
//! Context is written as `"key" => value` pairs; values only need
//! `Display`. All macros are silent until a global logger is installed.

/// Collects `"key" => value` pairs into owned context entries
#[doc(hidden)]
#[macro_export]
macro_rules! __log_context {
    () => {
        ::std::vec::Vec::<(&str, ::std::string::String)>::new()
    };
    ($($key:expr => $value:expr),+) => {
        vec![$(($key, ::std::format!("{}", $value))),+]
    };
}

/// Error event with a code; `span = ...` takes an `Option<Span>` into the abbreviation
#[macro_export]
macro_rules! log_error {
    ($code:expr, $message:expr, span = $span:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            $span,
            $crate::__log_context!($($key => $value),*),
        )
    };

    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_error_with_context(
            $code,
            $message,
            None,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_success {
    ($code:expr, $message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_success_with_context(
            $code,
            $message,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_with_level(
            $crate::logging::LogLevel::Info,
            $message,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

#[macro_export]
macro_rules! log_warning {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        $crate::logging::log_with_level(
            $crate::logging::LogLevel::Warning,
            $message,
            $crate::__log_context!($($key => $value),*),
        )
    };
}

/// Context values are not formatted unless debug events are enabled
#[macro_export]
macro_rules! log_debug {
    ($message:expr $(, $key:expr => $value:expr)*) => {
        if $crate::logging::debug_enabled() {
            $crate::logging::log_with_level(
                $crate::logging::LogLevel::Debug,
                $message,
                $crate::__log_context!($($key => $value),*),
            )
        }
    };
}

#[cfg(test)]
mod tests {
    use crate::logging::codes;
    use crate::utils::Span;

    #[test]
    fn test_macros_are_safe_without_global_logger() {
        log_error!(codes::lexical::UNEXPECTED_CHARACTER, "Unexpected character",
            "position" => 4,
            "char" => '%'
        );
        log_error!(codes::syntax::UNCLOSED_QUOTE, "Unclosed quote", span = Some(Span::point(2)));
        log_success!(codes::success::TOKENIZATION_COMPLETE, "Tokenized", "tokens" => 7);
        log_info!("Expanding", "syntax" => "html");
        log_warning!("Snippet ignored", "key" => "a:b");
        log_debug!("Debug only");
    }

    #[test]
    fn test_context_pairs_are_formatted_in_order() {
        let context = __log_context!("tokens" => 7, "syntax" => "pug");
        assert_eq!(
            context,
            vec![("tokens", "7".to_string()), ("syntax", "pug".to_string())]
        );
    }
}
