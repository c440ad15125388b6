//! Error and success codes shared by every expansion stage
//!
//! Errors are registered with a category, severity and a hint for the
//! user; success codes only tag log events.

// ============================================================================
// CODE WRAPPER TYPE
// ============================================================================

/// Universal code wrapper for both error and success codes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Code(&'static str);

impl Code {
    pub const fn new(code: &'static str) -> Self {
        Self(code)
    }

    pub fn as_str(&self) -> &'static str {
        self.0
    }
}

impl std::fmt::Display for Code {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

// ============================================================================
// ERROR CLASSIFICATION TYPES
// ============================================================================

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Critical = 0,
    High = 1,
    Medium = 2,
    Low = 3,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Severity::Critical => "Critical",
            Severity::High => "High",
            Severity::Medium => "Medium",
            Severity::Low => "Low",
        }
    }
}

/// Registry entry describing one error code
#[derive(Debug, Clone, Copy)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
}

/// Character scanner and tokenizer error codes
pub mod lexical {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E020");
    pub const EXPECTING_BRACE: Code = Code::new("E021");
    pub const UNEXPECTED_BRACKET: Code = Code::new("E022");
    pub const ABBREVIATION_TOO_LONG: Code = Code::new("E023");
}

/// Token stream parser error codes
pub mod syntax {
    use super::Code;

    pub const UNEXPECTED_CHARACTER: Code = Code::new("E040");
    pub const UNEXPECTED_TOKEN: Code = Code::new("E041");
    pub const UNCLOSED_QUOTE: Code = Code::new("E042");
    pub const UNCLOSED_ATTRIBUTE_SET: Code = Code::new("E043");
    pub const UNEXPECTED_STYLESHEET_TOKEN: Code = Code::new("E044");
}

/// Snippet registry error codes
pub mod snippets {
    use super::Code;

    pub const INVALID_SNIPPET: Code = Code::new("E060");
    pub const RECURSIVE_SNIPPET: Code = Code::new("E061");
}

/// Configuration error codes
pub mod config {
    use super::Code;

    pub const INVALID_CONFIG: Code = Code::new("E100");
    pub const CONFIG_READ_FAILURE: Code = Code::new("E101");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const OPERATION_COMPLETED_SUCCESSFULLY: Code = Code::new("I001");
    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");

    pub const TOKENIZATION_COMPLETE: Code = Code::new("I020");
    pub const PARSE_COMPLETE: Code = Code::new("I040");
    pub const CONVERSION_COMPLETE: Code = Code::new("I050");
    pub const SNIPPETS_RESOLVED: Code = Code::new("I060");
    pub const TRANSFORMS_APPLIED: Code = Code::new("I070");
    pub const OUTPUT_COMPLETE: Code = Code::new("I080");
    pub const EXPANSION_COMPLETE: Code = Code::new("I090");
    pub const EXTRACTION_COMPLETE: Code = Code::new("I091");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTRY: &[ErrorMetadata] = &[
    ErrorMetadata {
        code: "ERR001",
        category: "System",
        severity: Severity::Critical,
        recoverable: false,
        description: "Critical internal engine error",
        recommended_action: "File a bug report with the abbreviation that triggered it",
    },
    ErrorMetadata {
        code: "ERR002",
        category: "System",
        severity: Severity::Critical,
        recoverable: false,
        description: "Engine initialization failure",
        recommended_action: "Check logging configuration and environment variables",
    },
    ErrorMetadata {
        code: "E020",
        category: "Lexical",
        severity: Severity::High,
        recoverable: true,
        description: "Character cannot start any abbreviation token",
        recommended_action: "Remove or escape the character with a backslash",
    },
    ErrorMetadata {
        code: "E021",
        category: "Lexical",
        severity: Severity::High,
        recoverable: true,
        description: "Field or placeholder is missing its closing brace",
        recommended_action: "Close the ${...} field with '}'",
    },
    ErrorMetadata {
        code: "E022",
        category: "Lexical",
        severity: Severity::High,
        recoverable: true,
        description: "Closing bracket without matching opening bracket",
        recommended_action: "Balance the round brackets of the stylesheet function",
    },
    ErrorMetadata {
        code: "E023",
        category: "Lexical",
        severity: Severity::Medium,
        recoverable: true,
        description: "Abbreviation exceeds maximum supported length",
        recommended_action: "Split the abbreviation into smaller parts",
    },
    ErrorMetadata {
        code: "E040",
        category: "Syntax",
        severity: Severity::High,
        recoverable: true,
        description: "Tokens left over after parsing the abbreviation",
        recommended_action: "Check operator placement and bracket balance",
    },
    ErrorMetadata {
        code: "E041",
        category: "Syntax",
        severity: Severity::High,
        recoverable: true,
        description: "Token is not allowed at this position",
        recommended_action: "Check attribute set and function argument syntax",
    },
    ErrorMetadata {
        code: "E042",
        category: "Syntax",
        severity: Severity::Medium,
        recoverable: true,
        description: "Quoted attribute value is not closed",
        recommended_action: "Add the matching closing quote",
    },
    ErrorMetadata {
        code: "E043",
        category: "Syntax",
        severity: Severity::Medium,
        recoverable: true,
        description: "Attribute set is not closed",
        recommended_action: "Add ']' after the last attribute",
    },
    ErrorMetadata {
        code: "E044",
        category: "Syntax",
        severity: Severity::High,
        recoverable: true,
        description: "Stylesheet abbreviation contains a misplaced token",
        recommended_action: "Check property separators and function arguments",
    },
    ErrorMetadata {
        code: "E060",
        category: "Snippets",
        severity: Severity::Medium,
        recoverable: true,
        description: "Snippet body could not be parsed",
        recommended_action: "Fix or remove the snippet definition",
    },
    ErrorMetadata {
        code: "E061",
        category: "Snippets",
        severity: Severity::Low,
        recoverable: true,
        description: "Snippet refers to itself",
        recommended_action: "Remove the self reference from the snippet body",
    },
    ErrorMetadata {
        code: "E100",
        category: "Config",
        severity: Severity::High,
        recoverable: true,
        description: "Configuration value is invalid",
        recommended_action: "Check option names and value types",
    },
    ErrorMetadata {
        code: "E101",
        category: "Config",
        severity: Severity::High,
        recoverable: true,
        description: "Configuration file could not be read",
        recommended_action: "Check the path and file permissions",
    },
];

/// Metadata for a registered error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    REGISTRY.iter().find(|metadata| metadata.code == code)
}

pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code).map_or(Severity::Medium, |metadata| metadata.severity)
}

/// Unknown codes are treated as recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code).map_or(true, |metadata| metadata.recoverable)
}

pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown error", |metadata| metadata.description)
}

pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code).map_or("No specific action available", |metadata| {
        metadata.recommended_action
    })
}

pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code).map_or("Unknown", |metadata| metadata.category)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_error_code_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            lexical::UNEXPECTED_CHARACTER,
            lexical::EXPECTING_BRACE,
            lexical::UNEXPECTED_BRACKET,
            lexical::ABBREVIATION_TOO_LONG,
            syntax::UNEXPECTED_CHARACTER,
            syntax::UNEXPECTED_TOKEN,
            syntax::UNCLOSED_QUOTE,
            syntax::UNCLOSED_ATTRIBUTE_SET,
            syntax::UNEXPECTED_STYLESHEET_TOKEN,
            snippets::INVALID_SNIPPET,
            snippets::RECURSIVE_SNIPPET,
            config::INVALID_CONFIG,
            config::CONFIG_READ_FAILURE,
        ];
        for code in all {
            assert!(
                get_error_metadata(code.as_str()).is_some(),
                "missing metadata for {}",
                code
            );
        }
    }

    #[test]
    fn test_unknown_code_fallbacks() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
    }

    #[test]
    fn test_codes_are_unique() {
        let mut seen: Vec<&str> = REGISTRY.iter().map(|metadata| metadata.code).collect();
        seen.sort_unstable();
        seen.dedup();
        assert_eq!(seen.len(), REGISTRY.len());
    }

    #[test]
    fn test_system_errors_are_fatal() {
        assert_eq!(get_severity(system::INTERNAL_ERROR.as_str()), Severity::Critical);
        assert!(!is_recoverable(system::INTERNAL_ERROR.as_str()));
        assert!(is_recoverable(syntax::UNEXPECTED_TOKEN.as_str()));
    }
}
