//! Token vocabulary for DDL property clauses
//!
//! Keywords are not distinguished from other words at this level; labels such
//! as `COMMENT` or `DATA_RETENTION_TIME_IN_DAYS` are matched case-insensitively
//! by the grammar layer against [`Token::Word`].
use serde::{Deserialize, Serialize};
use std::fmt;

/// Lexical token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Token {
    // === WORDS AND LITERALS ===
    /// Bare word: letter or underscore, then letters, digits, `_` or `$`
    Word(String),
    /// Double-quoted identifier, content without quotes (`""` unescaped)
    QuotedIdentifier(String),
    /// Single-quoted string, content without quotes (`''` and `\'` unescaped)
    StringLiteral(String),
    /// Numeric literal as written, optional sign and fraction
    Number(String),

    // === PUNCTUATION ===
    Equals,     // =
    Arrow,      // =>
    LeftParen,  // (
    RightParen, // )
    Comma,      // ,
    Dot,        // .
    Semicolon,  // ;
    /// Any other printable character (`*`, `:`, `+`, ...)
    Symbol(char),

    // === TRIVIA ===
    /// Run of spaces, tabs and carriage returns
    Whitespace,
    Newline,
    /// `--` line comment, text after the dashes
    Comment(String),
    Eof,
}

/// Broad token classes used in diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenClass {
    Word,
    Literal,
    Punctuation,
    Trivia,
    End,
}

impl Token {
    /// Tokens visible to the grammar (whitespace and comments are not)
    pub fn is_significant(&self) -> bool {
        !matches!(self, Self::Whitespace | Self::Newline | Self::Comment(_))
    }

    /// Structural punctuation that a wildcard match never consumes
    pub fn is_structural(&self) -> bool {
        matches!(
            self,
            Self::Equals
                | Self::Arrow
                | Self::LeftParen
                | Self::RightParen
                | Self::Comma
                | Self::Semicolon
                | Self::Eof
        )
    }

    /// Case-insensitive keyword comparison against a bare word
    pub fn is_keyword(&self, keyword: &str) -> bool {
        matches!(self, Self::Word(word) if word.eq_ignore_ascii_case(keyword))
    }

    pub fn as_word(&self) -> Option<&str> {
        match self {
            Self::Word(word) => Some(word),
            _ => None,
        }
    }

    /// Identifier text for bare words and quoted identifiers
    pub fn as_identifier(&self) -> Option<&str> {
        match self {
            Self::Word(name) | Self::QuotedIdentifier(name) => Some(name),
            _ => None,
        }
    }

    pub fn as_string_literal(&self) -> Option<&str> {
        match self {
            Self::StringLiteral(content) => Some(content),
            _ => None,
        }
    }

    pub fn token_class(&self) -> TokenClass {
        match self {
            Self::Word(_) | Self::QuotedIdentifier(_) => TokenClass::Word,
            Self::StringLiteral(_) | Self::Number(_) => TokenClass::Literal,
            Self::Equals
            | Self::Arrow
            | Self::LeftParen
            | Self::RightParen
            | Self::Comma
            | Self::Dot
            | Self::Semicolon
            | Self::Symbol(_) => TokenClass::Punctuation,
            Self::Whitespace | Self::Newline | Self::Comment(_) => TokenClass::Trivia,
            Self::Eof => TokenClass::End,
        }
    }

    /// Canonical SQL spelling, re-escaping quoted forms
    pub fn to_sql(&self) -> String {
        match self {
            Self::Word(word) => word.clone(),
            Self::QuotedIdentifier(name) => format!("\"{}\"", name.replace('"', "\"\"")),
            Self::StringLiteral(content) => quote_string(content),
            Self::Number(text) => text.clone(),
            Self::Equals => "=".to_string(),
            Self::Arrow => "=>".to_string(),
            Self::LeftParen => "(".to_string(),
            Self::RightParen => ")".to_string(),
            Self::Comma => ",".to_string(),
            Self::Dot => ".".to_string(),
            Self::Semicolon => ";".to_string(),
            Self::Symbol(ch) => ch.to_string(),
            Self::Whitespace => " ".to_string(),
            Self::Newline => "\n".to_string(),
            Self::Comment(text) => format!("--{}", text),
            Self::Eof => String::new(),
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Eof => write!(f, "<EOF>"),
            other => write!(f, "{}", other.to_sql()),
        }
    }
}

/// Wrap text in single quotes, doubling embedded quotes
pub fn quote_string(content: &str) -> String {
    format!("'{}'", content.replace('\'', "''"))
}

/// Character that may start a bare word
pub fn is_word_start(ch: char) -> bool {
    ch.is_alphabetic() || ch == '_'
}

/// Character that may continue a bare word
pub fn is_word_continue(ch: char) -> bool {
    ch.is_alphanumeric() || ch == '_' || ch == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_comparison_is_case_insensitive() {
        let token = Token::Word("Comment".to_string());
        assert!(token.is_keyword("COMMENT"));
        assert!(token.is_keyword("comment"));
        assert!(!token.is_keyword("TAG"));
        assert!(!Token::StringLiteral("comment".to_string()).is_keyword("comment"));
    }

    #[test]
    fn test_significance_and_structure() {
        assert!(!Token::Whitespace.is_significant());
        assert!(!Token::Comment(" note".to_string()).is_significant());
        assert!(Token::Eof.is_significant());
        assert!(Token::Arrow.is_structural());
        assert!(!Token::Dot.is_structural());
        assert!(!Token::Symbol('*').is_structural());
    }

    #[test]
    fn test_to_sql_reescapes() {
        assert_eq!(Token::StringLiteral("it's".to_string()).to_sql(), "'it''s'");
        assert_eq!(
            Token::QuotedIdentifier("my \"col\"".to_string()).to_sql(),
            "\"my \"\"col\"\"\""
        );
        assert_eq!(Token::Arrow.to_string(), "=>");
        assert_eq!(Token::Eof.to_string(), "<EOF>");
    }

    #[test]
    fn test_token_classes() {
        assert_eq!(Token::Number("-1.5".to_string()).token_class(), TokenClass::Literal);
        assert_eq!(Token::QuotedIdentifier("x".to_string()).token_class(), TokenClass::Word);
        assert_eq!(Token::Newline.token_class(), TokenClass::Trivia);
    }

    #[test]
    fn test_word_characters() {
        assert!(is_word_start('_'));
        assert!(!is_word_start('1'));
        assert!(is_word_continue('$'));
        assert!(!is_word_continue('-'));
    }
}
