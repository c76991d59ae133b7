//! Lexical analysis module
//!
//! Turns clause text into a [`TokenStream`]. Limits on input size, identifier
//! length, string size and token count are compile-time constants.

pub mod analyzer;

use crate::config::compile_time::lexical::*;
use crate::tokens::TokenStream;

pub use analyzer::{LexerError, LexicalAnalyzer, LexicalMetrics};

/// Tokenize clause text with a fresh analyzer
pub fn tokenize(source: &str) -> Result<TokenStream, LexerError> {
    LexicalAnalyzer::new().tokenize(source)
}

/// Validate lexical error codes and compile-time limits
pub fn validate_tokenization() -> Result<(), String> {
    let lexical_codes = [
        crate::logging::codes::lexical::INVALID_CHARACTER,
        crate::logging::codes::lexical::UNTERMINATED_STRING,
        crate::logging::codes::lexical::UNTERMINATED_IDENTIFIER,
        crate::logging::codes::lexical::IDENTIFIER_TOO_LONG,
        crate::logging::codes::lexical::STRING_TOO_LARGE,
        crate::logging::codes::lexical::INPUT_TOO_LARGE,
        crate::logging::codes::lexical::TOO_MANY_TOKENS,
    ];

    for code in &lexical_codes {
        if crate::logging::codes::get_error_metadata(code.as_str()).is_none() {
            return Err(format!(
                "Lexical error code {} not found in metadata registry",
                code.as_str()
            ));
        }
    }

    if MAX_IDENTIFIER_LENGTH == 0 {
        return Err("MAX_IDENTIFIER_LENGTH cannot be zero".to_string());
    }
    if MAX_STRING_SIZE > MAX_INPUT_SIZE {
        return Err("MAX_STRING_SIZE cannot exceed MAX_INPUT_SIZE".to_string());
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tokens::Token;

    #[test]
    fn test_validate_tokenization() {
        assert!(validate_tokenization().is_ok());
    }

    #[test]
    fn test_tokenize_helper() {
        let stream = tokenize("WITH TAG (a = 'b')").unwrap();
        assert_eq!(stream.len(), 8);
        assert_eq!(stream.current_token(), &Token::Word("WITH".to_string()));
    }

    #[test]
    fn test_empty_input() {
        let stream = tokenize("   ").unwrap();
        assert!(stream.is_empty());
        assert!(stream.is_at_end());
    }
}
