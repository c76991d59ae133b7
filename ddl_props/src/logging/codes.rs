//! Consolidated diagnostic codes and classification system
//!
//! Single source of truth for all error codes, their metadata, and classification functions.

use std::collections::HashMap;
use std::sync::OnceLock;

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

/// Complete metadata for an error code
#[derive(Debug, Clone)]
pub struct ErrorMetadata {
    pub code: &'static str,
    pub category: &'static str,
    pub severity: Severity,
    pub recoverable: bool,
    pub requires_halt: bool,
    pub description: &'static str,
    pub recommended_action: &'static str,
}

impl ErrorMetadata {
    pub const fn new(
        code: &'static str,
        category: &'static str,
        severity: Severity,
        recoverable: bool,
        requires_halt: bool,
        description: &'static str,
        recommended_action: &'static str,
    ) -> Self {
        Self {
            code,
            category,
            severity,
            recoverable,
            requires_halt,
            description,
            recommended_action,
        }
    }
}

// ============================================================================
// ERROR CODE CONSTANTS
// ============================================================================

/// System error codes
pub mod system {
    use super::Code;

    pub const INTERNAL_ERROR: Code = Code::new("ERR001");
    pub const INITIALIZATION_FAILURE: Code = Code::new("ERR002");
    pub const CONFIG_LOAD_FAILURE: Code = Code::new("ERR003");
}

/// Lexical error codes
pub mod lexical {
    use super::Code;

    pub const INVALID_CHARACTER: Code = Code::new("E020");
    pub const UNTERMINATED_STRING: Code = Code::new("E021");
    pub const UNTERMINATED_IDENTIFIER: Code = Code::new("E022");
    pub const IDENTIFIER_TOO_LONG: Code = Code::new("E023");
    pub const STRING_TOO_LARGE: Code = Code::new("E024");
    pub const INPUT_TOO_LARGE: Code = Code::new("E025");
    pub const TOO_MANY_TOKENS: Code = Code::new("E027");
}

/// Grammar matching error codes
pub mod grammar {
    use super::Code;

    pub const GRAMMAR_MISMATCH: Code = Code::new("E040");
    pub const NESTING_TOO_DEEP: Code = Code::new("E041");
    pub const LIST_TOO_LONG: Code = Code::new("E042");
}

/// Typecheck error codes
pub mod typecheck {
    use super::Code;

    pub const INVALID_VALUE: Code = Code::new("E060");
}

/// Render error codes
pub mod render {
    use super::Code;

    pub const RENDER_UNSUPPORTED: Code = Code::new("E080");
    pub const VALUE_SHAPE_MISMATCH: Code = Code::new("E081");
}

/// Named collection error codes
pub mod collection {
    use super::Code;

    pub const DUPLICATE_KEY: Code = Code::new("E090");
}

// ============================================================================
// SUCCESS CODE CONSTANTS
// ============================================================================

/// Success codes
pub mod success {
    use super::Code;

    pub const SYSTEM_INITIALIZATION_COMPLETED: Code = Code::new("I004");
    pub const PROPS_PARSED: Code = Code::new("I041");
}

// ============================================================================
// ERROR METADATA REGISTRY
// ============================================================================

const REGISTRY_ENTRIES: &[ErrorMetadata] = &[
    // System errors
    ErrorMetadata::new(
        "ERR001",
        "System",
        Severity::Critical,
        false,
        true,
        "Critical internal error",
        "File a bug report with the input that triggered it",
    ),
    ErrorMetadata::new(
        "ERR002",
        "System",
        Severity::Critical,
        false,
        true,
        "Initialization failure",
        "Check logging and runtime configuration",
    ),
    ErrorMetadata::new(
        "ERR003",
        "System",
        Severity::High,
        true,
        false,
        "Runtime configuration could not be loaded",
        "Check the configuration file path and TOML syntax",
    ),
    // Lexical errors
    ErrorMetadata::new(
        "E020",
        "Lexical",
        Severity::High,
        false,
        false,
        "Invalid character in clause text",
        "Remove control characters from the input",
    ),
    ErrorMetadata::new(
        "E021",
        "Lexical",
        Severity::High,
        false,
        false,
        "Unterminated string literal",
        "Close the single-quoted string",
    ),
    ErrorMetadata::new(
        "E022",
        "Lexical",
        Severity::High,
        false,
        false,
        "Unterminated quoted identifier",
        "Close the double-quoted identifier",
    ),
    ErrorMetadata::new(
        "E023",
        "Lexical",
        Severity::Medium,
        false,
        false,
        "Identifier exceeds maximum length",
        "Shorten the identifier",
    ),
    ErrorMetadata::new(
        "E024",
        "Lexical",
        Severity::Medium,
        false,
        false,
        "String literal exceeds maximum size",
        "Reduce the literal size",
    ),
    ErrorMetadata::new(
        "E025",
        "Lexical",
        Severity::High,
        false,
        true,
        "Input exceeds maximum size",
        "Split the statement or raise the compile-time limit",
    ),
    ErrorMetadata::new(
        "E027",
        "Lexical",
        Severity::High,
        false,
        true,
        "Token count exceeds maximum",
        "Split the statement or raise the compile-time limit",
    ),
    // Grammar errors
    ErrorMetadata::new(
        "E040",
        "Grammar",
        Severity::High,
        false,
        false,
        "Clause text does not match the property grammar",
        "Check the clause label, separators and value shape",
    ),
    ErrorMetadata::new(
        "E041",
        "Grammar",
        Severity::High,
        false,
        true,
        "Parenthesized nesting exceeds maximum depth",
        "Flatten the clause or raise the compile-time limit",
    ),
    ErrorMetadata::new(
        "E042",
        "Grammar",
        Severity::Medium,
        false,
        false,
        "Delimited list exceeds maximum item count",
        "Reduce the list length or raise the compile-time limit",
    ),
    // Typecheck errors
    ErrorMetadata::new(
        "E060",
        "Typecheck",
        Severity::High,
        false,
        false,
        "Matched value failed semantic validation",
        "Use one of the accepted values for this property",
    ),
    // Render errors
    ErrorMetadata::new(
        "E080",
        "Render",
        Severity::Critical,
        false,
        true,
        "Property kind has no render form",
        "Remove the value from the record or render the clause by hand",
    ),
    ErrorMetadata::new(
        "E081",
        "Render",
        Severity::Critical,
        false,
        true,
        "Value shape does not match the property kind",
        "Produce values through typecheck before rendering",
    ),
    // Collection errors
    ErrorMetadata::new(
        "E090",
        "Collection",
        Severity::Critical,
        false,
        true,
        "Duplicate key in named property collection",
        "Give every property in the collection a unique key",
    ),
    // Success codes
    ErrorMetadata::new(
        "I004",
        "System",
        Severity::Low,
        true,
        false,
        "Logging system initialized",
        "No action required",
    ),
    ErrorMetadata::new(
        "I041",
        "Grammar",
        Severity::Low,
        true,
        false,
        "Property block parsed",
        "No action required",
    ),
];

/// Error metadata registry using OnceLock for thread safety
static ERROR_REGISTRY: OnceLock<HashMap<&'static str, &'static ErrorMetadata>> = OnceLock::new();

fn get_error_registry() -> &'static HashMap<&'static str, &'static ErrorMetadata> {
    ERROR_REGISTRY.get_or_init(|| {
        REGISTRY_ENTRIES
            .iter()
            .map(|metadata| (metadata.code, metadata))
            .collect()
    })
}

// ============================================================================
// CLASSIFICATION FUNCTIONS
// ============================================================================

/// Get error metadata for a specific error code
pub fn get_error_metadata(code: &str) -> Option<&'static ErrorMetadata> {
    get_error_registry().get(code).copied()
}

/// Get error severity from error code
pub fn get_severity(code: &str) -> Severity {
    get_error_metadata(code)
        .map(|metadata| metadata.severity)
        .unwrap_or(Severity::Medium)
}

/// Check if error is recoverable
pub fn is_recoverable(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.recoverable)
        .unwrap_or(true)
}

/// Check if error requires immediate halt
pub fn requires_halt(code: &str) -> bool {
    get_error_metadata(code)
        .map(|metadata| metadata.requires_halt)
        .unwrap_or(false)
}

/// Get human-readable description for error code
pub fn get_description(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.description)
        .unwrap_or("Unknown error")
}

/// Get recommended action for error code
pub fn get_action(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.recommended_action)
        .unwrap_or("No specific action available")
}

/// Get error category from error code
pub fn get_category(code: &str) -> &'static str {
    get_error_metadata(code)
        .map(|metadata| metadata.category)
        .unwrap_or("Unknown")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_code_has_metadata() {
        let all = [
            system::INTERNAL_ERROR,
            system::INITIALIZATION_FAILURE,
            system::CONFIG_LOAD_FAILURE,
            lexical::INVALID_CHARACTER,
            lexical::UNTERMINATED_STRING,
            lexical::UNTERMINATED_IDENTIFIER,
            lexical::IDENTIFIER_TOO_LONG,
            lexical::STRING_TOO_LARGE,
            lexical::INPUT_TOO_LARGE,
            lexical::TOO_MANY_TOKENS,
            grammar::GRAMMAR_MISMATCH,
            grammar::NESTING_TOO_DEEP,
            grammar::LIST_TOO_LONG,
            typecheck::INVALID_VALUE,
            render::RENDER_UNSUPPORTED,
            render::VALUE_SHAPE_MISMATCH,
            collection::DUPLICATE_KEY,
            success::SYSTEM_INITIALIZATION_COMPLETED,
            success::PROPS_PARSED,
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
    fn test_unknown_code_defaults() {
        assert_eq!(get_description("X999"), "Unknown error");
        assert_eq!(get_category("X999"), "Unknown");
        assert_eq!(get_severity("X999"), Severity::Medium);
        assert!(is_recoverable("X999"));
        assert!(!requires_halt("X999"));
    }

    #[test]
    fn test_render_errors_halt() {
        assert!(requires_halt(render::RENDER_UNSUPPORTED.as_str()));
        assert_eq!(get_category(grammar::GRAMMAR_MISMATCH.as_str()), "Grammar");
        assert_eq!(
            get_severity(system::INTERNAL_ERROR.as_str()),
            Severity::Critical
        );
    }
}
