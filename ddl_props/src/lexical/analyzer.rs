//! Core lexical analyzer for DDL property clauses
//!
//! Single pass over the clause text producing spanned tokens. Size limits are
//! compile-time constants generated from the build profile.

use crate::config::compile_time::lexical::*;
use crate::logging::codes;
use crate::tokens::{is_word_continue, is_word_start, SpannedToken, Token, TokenClass, TokenStream};
use crate::utils::{Position, Span};
use crate::{log_debug, log_error};
use std::iter::Peekable;
use std::str::CharIndices;

/// Lexical analysis errors with compile-time boundaries
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LexerError {
    #[error("Invalid character: {character:?} at line {line}, column {column}")]
    InvalidCharacter {
        character: char,
        line: u32,
        column: u32,
    },

    #[error("Unterminated string literal starting at line {line}, column {column}")]
    UnterminatedString { line: u32, column: u32 },

    #[error("Unterminated quoted identifier starting at line {line}, column {column}")]
    UnterminatedIdentifier { line: u32, column: u32 },

    #[error("Identifier too long: {length} characters (max {MAX_IDENTIFIER_LENGTH})")]
    IdentifierTooLong { length: usize },

    #[error("String too large: {size} bytes (max {MAX_STRING_SIZE})")]
    StringTooLarge { size: usize },

    #[error("Input too large: {size} bytes (max {MAX_INPUT_SIZE})")]
    InputTooLarge { size: usize },

    #[error("Too many tokens: {count} (max {MAX_TOKEN_COUNT})")]
    TooManyTokens { count: usize },
}

impl LexerError {
    pub fn error_code(&self) -> crate::logging::Code {
        match self {
            LexerError::InvalidCharacter { .. } => codes::lexical::INVALID_CHARACTER,
            LexerError::UnterminatedString { .. } => codes::lexical::UNTERMINATED_STRING,
            LexerError::UnterminatedIdentifier { .. } => codes::lexical::UNTERMINATED_IDENTIFIER,
            LexerError::IdentifierTooLong { .. } => codes::lexical::IDENTIFIER_TOO_LONG,
            LexerError::StringTooLarge { .. } => codes::lexical::STRING_TOO_LARGE,
            LexerError::InputTooLarge { .. } => codes::lexical::INPUT_TOO_LARGE,
            LexerError::TooManyTokens { .. } => codes::lexical::TOO_MANY_TOKENS,
        }
    }
}

/// Per-run tokenization metrics
#[derive(Debug, Default, Clone)]
pub struct LexicalMetrics {
    pub total_tokens: usize,
    pub word_tokens: usize,
    pub literal_tokens: usize,
    pub punctuation_tokens: usize,
    pub comment_count: usize,
    pub max_string_length: usize,
}

impl LexicalMetrics {
    fn record_token(&mut self, token: &Token) {
        self.total_tokens += 1;

        match token.token_class() {
            TokenClass::Word => self.word_tokens += 1,
            TokenClass::Literal => self.literal_tokens += 1,
            TokenClass::Punctuation => self.punctuation_tokens += 1,
            TokenClass::Trivia => {
                if matches!(token, Token::Comment(_)) {
                    self.comment_count += 1;
                }
            }
            TokenClass::End => {}
        }

        if let Token::StringLiteral(content) = token {
            self.max_string_length = self.max_string_length.max(content.len());
        }
    }
}

/// Character cursor tracking line and column
struct Cursor<'a> {
    chars: Peekable<CharIndices<'a>>,
    pos: Position,
}

impl<'a> Cursor<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            chars: source.char_indices().peekable(),
            pos: Position::start(),
        }
    }

    fn peek(&mut self) -> Option<char> {
        self.chars.peek().map(|(_, ch)| *ch)
    }

    fn peek_second(&self) -> Option<char> {
        let mut lookahead = self.chars.clone();
        lookahead.next();
        lookahead.next().map(|(_, ch)| ch)
    }

    fn bump(&mut self) -> Option<char> {
        let (_, ch) = self.chars.next()?;
        self.pos = self.pos.advance(ch);
        Some(ch)
    }

    fn eat_while(&mut self, mut predicate: impl FnMut(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(ch) = self.peek() {
            if !predicate(ch) {
                break;
            }
            text.push(ch);
            self.bump();
        }
        text
    }
}

/// Core lexical analyzer
pub struct LexicalAnalyzer {
    metrics: LexicalMetrics,
}

impl LexicalAnalyzer {
    pub fn new() -> Self {
        Self {
            metrics: LexicalMetrics::default(),
        }
    }

    /// Metrics from the most recent tokenization
    pub fn metrics(&self) -> &LexicalMetrics {
        &self.metrics
    }

    /// Tokenize clause text into a stream
    pub fn tokenize(&mut self, source: &str) -> Result<TokenStream, LexerError> {
        self.metrics = LexicalMetrics::default();

        if source.len() > MAX_INPUT_SIZE {
            let error = LexerError::InputTooLarge { size: source.len() };
            log_error!(error.error_code(), "Clause text exceeds input limit",
                "size" => source.len(),
                "limit" => MAX_INPUT_SIZE
            );
            return Err(error);
        }

        let mut cursor = Cursor::new(source);
        let mut tokens = Vec::new();

        while let Some(ch) = cursor.peek() {
            if tokens.len() >= MAX_TOKEN_COUNT {
                let error = LexerError::TooManyTokens {
                    count: tokens.len(),
                };
                log_error!(error.error_code(), "Token limit exceeded",
                    span = Span::point(cursor.pos),
                    "limit" => MAX_TOKEN_COUNT
                );
                return Err(error);
            }

            let start = cursor.pos;
            let token = match self.next_token(&mut cursor, ch) {
                Ok(token) => token,
                Err(error) => {
                    log_error!(error.error_code(), "Lexical analysis failed",
                        span = Span::point(start),
                        "character" => ch.escape_debug(),
                        "tokens_processed" => tokens.len()
                    );
                    return Err(error);
                }
            };

            self.metrics.record_token(&token);
            tokens.push(SpannedToken::new(token, Span::new(start, cursor.pos)));
        }

        tokens.push(SpannedToken::new(Token::Eof, Span::point(cursor.pos)));

        log_debug!("Tokenization completed",
            "tokens" => self.metrics.total_tokens,
            "words" => self.metrics.word_tokens,
            "literals" => self.metrics.literal_tokens,
            "comments" => self.metrics.comment_count
        );

        Ok(TokenStream::new(source, tokens))
    }

    fn next_token(&mut self, cursor: &mut Cursor<'_>, ch: char) -> Result<Token, LexerError> {
        let token = match ch {
            ' ' | '\t' | '\r' => {
                cursor.eat_while(|c| matches!(c, ' ' | '\t' | '\r'));
                Token::Whitespace
            }
            '\n' => {
                cursor.bump();
                Token::Newline
            }
            '-' if cursor.peek_second() == Some('-') => {
                cursor.bump();
                cursor.bump();
                Token::Comment(cursor.eat_while(|c| c != '\n'))
            }
            '-' if cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) => {
                self.lex_number(cursor)?
            }
            '0'..='9' => self.lex_number(cursor)?,
            '\'' => self.lex_string(cursor)?,
            '"' => self.lex_quoted_identifier(cursor)?,
            '=' => {
                cursor.bump();
                if cursor.peek() == Some('>') {
                    cursor.bump();
                    Token::Arrow
                } else {
                    Token::Equals
                }
            }
            '(' => self.single(cursor, Token::LeftParen),
            ')' => self.single(cursor, Token::RightParen),
            ',' => self.single(cursor, Token::Comma),
            '.' => self.single(cursor, Token::Dot),
            ';' => self.single(cursor, Token::Semicolon),
            c if is_word_start(c) => {
                let word = cursor.eat_while(is_word_continue);
                Self::check_identifier_length(&word)?;
                Token::Word(word)
            }
            c if c.is_control() => {
                return Err(LexerError::InvalidCharacter {
                    character: c,
                    line: cursor.pos.line,
                    column: cursor.pos.column,
                });
            }
            c => self.single(cursor, Token::Symbol(c)),
        };

        Ok(token)
    }

    fn single(&self, cursor: &mut Cursor<'_>, token: Token) -> Token {
        cursor.bump();
        token
    }

    /// Numbers followed directly by word characters (`1d`, `3XL`) lex as words
    fn lex_number(&self, cursor: &mut Cursor<'_>) -> Result<Token, LexerError> {
        let mut text = String::new();
        if cursor.peek() == Some('-') {
            text.push('-');
            cursor.bump();
        }

        text.push_str(&cursor.eat_while(|c| c.is_ascii_digit()));

        if cursor.peek() == Some('.') && cursor.peek_second().is_some_and(|c| c.is_ascii_digit()) {
            text.push('.');
            cursor.bump();
            text.push_str(&cursor.eat_while(|c| c.is_ascii_digit()));
        }

        if cursor.peek().is_some_and(is_word_continue) {
            text.push_str(&cursor.eat_while(is_word_continue));
            Self::check_identifier_length(&text)?;
            return Ok(Token::Word(text));
        }

        Ok(Token::Number(text))
    }

    fn lex_string(&self, cursor: &mut Cursor<'_>) -> Result<Token, LexerError> {
        let start = cursor.pos;
        let unterminated = LexerError::UnterminatedString {
            line: start.line,
            column: start.column,
        };

        cursor.bump();
        let mut content = String::new();

        loop {
            match cursor.bump() {
                None => return Err(unterminated),
                Some('\'') => {
                    if cursor.peek() == Some('\'') {
                        cursor.bump();
                        content.push('\'');
                    } else {
                        break;
                    }
                }
                Some('\\') => match cursor.bump() {
                    None => return Err(unterminated),
                    Some(escaped @ ('\'' | '\\')) => content.push(escaped),
                    Some(other) => {
                        content.push('\\');
                        content.push(other);
                    }
                },
                Some(ch) => content.push(ch),
            }

            if content.len() > MAX_STRING_SIZE {
                return Err(LexerError::StringTooLarge {
                    size: content.len(),
                });
            }
        }

        Ok(Token::StringLiteral(content))
    }

    fn lex_quoted_identifier(&self, cursor: &mut Cursor<'_>) -> Result<Token, LexerError> {
        let start = cursor.pos;
        cursor.bump();
        let mut name = String::new();

        loop {
            match cursor.bump() {
                None => {
                    return Err(LexerError::UnterminatedIdentifier {
                        line: start.line,
                        column: start.column,
                    })
                }
                Some('"') => {
                    if cursor.peek() == Some('"') {
                        cursor.bump();
                        name.push('"');
                    } else {
                        break;
                    }
                }
                Some(ch) => name.push(ch),
            }
        }

        Self::check_identifier_length(&name)?;
        Ok(Token::QuotedIdentifier(name))
    }

    fn check_identifier_length(name: &str) -> Result<(), LexerError> {
        let length = name.chars().count();
        if length > MAX_IDENTIFIER_LENGTH {
            Err(LexerError::IdentifierTooLong { length })
        } else {
            Ok(())
        }
    }
}

impl Default for LexicalAnalyzer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn significant(source: &str) -> Vec<Token> {
        LexicalAnalyzer::new()
            .tokenize(source)
            .unwrap()
            .iter_significant()
            .map(|spanned| spanned.token.clone())
            .collect()
    }

    fn word(text: &str) -> Token {
        Token::Word(text.to_string())
    }

    #[test]
    fn test_basic_clause() {
        assert_eq!(
            significant("COMMENT = 'hello'"),
            vec![
                word("COMMENT"),
                Token::Equals,
                Token::StringLiteral("hello".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_arrow_and_punctuation() {
        assert_eq!(
            significant("AT(offset => -60.5);"),
            vec![
                word("AT"),
                Token::LeftParen,
                word("offset"),
                Token::Arrow,
                Token::Number("-60.5".to_string()),
                Token::RightParen,
                Token::Semicolon,
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_string_escapes() {
        assert_eq!(
            significant(r"'it''s' 'a\'b' 'c\nd'"),
            vec![
                Token::StringLiteral("it's".to_string()),
                Token::StringLiteral("a'b".to_string()),
                Token::StringLiteral("c\\nd".to_string()),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_quoted_identifier_and_dotted_path() {
        assert_eq!(
            significant("db.\"My \"\"Schema\"\"\".tbl$1"),
            vec![
                word("db"),
                Token::Dot,
                Token::QuotedIdentifier("My \"Schema\"".to_string()),
                Token::Dot,
                word("tbl$1"),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_comments_and_symbols_are_tokenized() {
        let tokens = significant("SELECT * -- trailing note\nFROM t::x");
        assert_eq!(
            tokens,
            vec![
                word("SELECT"),
                Token::Symbol('*'),
                word("FROM"),
                word("t"),
                Token::Symbol(':'),
                Token::Symbol(':'),
                word("x"),
                Token::Eof
            ]
        );
    }

    #[test]
    fn test_number_followed_by_letters_is_word() {
        assert_eq!(significant("3XL 42"), vec![word("3XL"), Token::Number("42".to_string()), Token::Eof]);
    }

    #[test]
    fn test_spans_track_lines() {
        let stream = LexicalAnalyzer::new().tokenize("a\n  b").unwrap();
        let b = stream.iter_significant().nth(1).unwrap();
        assert_eq!(b.span.start, Position::new(4, 2, 3));
        assert_eq!(stream.text_of(b), "b");
    }

    #[test]
    fn test_unterminated_string() {
        let result = LexicalAnalyzer::new().tokenize("COMMENT = 'oops");
        assert_matches!(
            result,
            Err(LexerError::UnterminatedString { line: 1, column: 11 })
        );
    }

    #[test]
    fn test_unterminated_identifier() {
        let result = LexicalAnalyzer::new().tokenize("\"abc");
        assert_matches!(result, Err(LexerError::UnterminatedIdentifier { .. }));
    }

    #[test]
    fn test_control_character_rejected() {
        let result = LexicalAnalyzer::new().tokenize("a \u{0} b");
        assert_matches!(
            result,
            Err(LexerError::InvalidCharacter { character: '\u{0}', line: 1, column: 3 })
        );
        assert_eq!(
            result.unwrap_err().error_code(),
            codes::lexical::INVALID_CHARACTER
        );
    }

    #[test]
    fn test_identifier_too_long() {
        let long = "x".repeat(MAX_IDENTIFIER_LENGTH + 1);
        let result = LexicalAnalyzer::new().tokenize(&long);
        assert_matches!(result, Err(LexerError::IdentifierTooLong { .. }));
    }

    #[test]
    fn test_metrics() {
        let mut analyzer = LexicalAnalyzer::new();
        analyzer.tokenize("TAG (a = 'b') -- note").unwrap();

        let metrics = analyzer.metrics();
        assert_eq!(metrics.word_tokens, 2);
        assert_eq!(metrics.literal_tokens, 1);
        assert_eq!(metrics.punctuation_tokens, 3);
        assert_eq!(metrics.comment_count, 1);
        assert_eq!(metrics.max_string_length, 1);
    }
}
