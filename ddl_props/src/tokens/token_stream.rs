//! Span-accurate token stream over a single clause
//!
//! The stream owns its source text so grammar primitives can capture original
//! text (balanced groups, free-text query bodies) by byte offset while matching
//! only significant tokens.

use crate::tokens::token::Token;
use crate::utils::{SourceMap, Span};

/// A token with its source span
#[derive(Debug, Clone, PartialEq)]
pub struct SpannedToken {
    pub token: Token,
    pub span: Span,
}

impl SpannedToken {
    pub fn new(token: Token, span: Span) -> Self {
        Self { token, span }
    }
}

/// Token stream with a significant-token view and checkpoint/restore
#[derive(Debug, Clone)]
pub struct TokenStream {
    source: String,
    /// All tokens, trivia included, in source order
    all_tokens: Vec<SpannedToken>,
    /// Indices into all_tokens for significant tokens; always ends with Eof
    significant_indices: Vec<usize>,
    /// Current position in significant_indices
    position: usize,
    /// Furthest position reached, kept across restores for error reporting
    furthest: usize,
}

impl TokenStream {
    /// Build a stream; an Eof token is appended when missing
    pub fn new(source: impl Into<String>, mut tokens: Vec<SpannedToken>) -> Self {
        let source = source.into();

        if !matches!(tokens.last(), Some(last) if last.token == Token::Eof) {
            let end = tokens
                .last()
                .map(|last| last.span.end)
                .unwrap_or_else(crate::utils::Position::start);
            tokens.push(SpannedToken::new(Token::Eof, Span::point(end)));
        }

        let significant_indices = tokens
            .iter()
            .enumerate()
            .filter(|(_, spanned)| spanned.token.is_significant())
            .map(|(index, _)| index)
            .collect();

        Self {
            source,
            all_tokens: tokens,
            significant_indices,
            position: 0,
            furthest: 0,
        }
    }

    // === NAVIGATION ===

    /// Current significant token; the final Eof once exhausted
    pub fn current(&self) -> &SpannedToken {
        self.peek_ahead(0)
    }

    pub fn current_token(&self) -> &Token {
        &self.current().token
    }

    pub fn current_span(&self) -> Span {
        self.current().span
    }

    /// Significant token `n` positions ahead, clamped to Eof
    pub fn peek_ahead(&self, n: usize) -> &SpannedToken {
        let last = self.significant_indices.len() - 1;
        let index = self.significant_indices[(self.position + n).min(last)];
        &self.all_tokens[index]
    }

    /// Move past the current token, returning it
    pub fn advance(&mut self) -> &SpannedToken {
        let index = self.significant_indices[self.position];
        if self.position + 1 < self.significant_indices.len() {
            self.position += 1;
            self.furthest = self.furthest.max(self.position);
        }
        &self.all_tokens[index]
    }

    /// Advance when the current token is the given keyword
    pub fn advance_if_keyword(&mut self, keyword: &str) -> bool {
        if self.current_token().is_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub fn is_at_end(&self) -> bool {
        matches!(self.current_token(), Token::Eof)
    }

    /// Number of significant tokens, Eof included
    pub fn len(&self) -> usize {
        self.significant_indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() <= 1
    }

    pub fn remaining_count(&self) -> usize {
        self.significant_indices.len() - 1 - self.position
    }

    // === BACKTRACKING ===

    pub fn checkpoint(&self) -> usize {
        self.position
    }

    pub fn restore(&mut self, checkpoint: usize) {
        self.position = checkpoint.min(self.significant_indices.len() - 1);
    }

    /// Span of the furthest token any match attempt reached
    pub fn furthest_span(&self) -> Span {
        self.all_tokens[self.significant_indices[self.furthest]].span
    }

    // === SOURCE ACCESS ===

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Byte offset where the current token starts
    pub fn current_offset(&self) -> usize {
        self.current_span().start.offset
    }

    /// Byte offset just after the previously consumed significant token
    pub fn previous_end_offset(&self) -> usize {
        if self.position == 0 {
            return self.current_offset();
        }
        let index = self.significant_indices[self.position - 1];
        self.all_tokens[index].span.end.offset
    }

    /// Original source text between two byte offsets
    pub fn slice(&self, start: usize, end: usize) -> &str {
        let end = end.min(self.source.len());
        &self.source[start.min(end)..end]
    }

    /// Original source text of a token
    pub fn text_of(&self, spanned: &SpannedToken) -> &str {
        spanned.span.slice(&self.source)
    }

    pub fn all_tokens(&self) -> &[SpannedToken] {
        &self.all_tokens
    }

    pub fn iter_significant(&self) -> impl Iterator<Item = &SpannedToken> {
        self.significant_indices
            .iter()
            .map(move |&index| &self.all_tokens[index])
    }

    // === DIAGNOSTICS ===

    /// Caret-style error report against the stream's source
    pub fn format_error(&self, span: Span, message: &str) -> String {
        SourceMap::new(&self.source).format_error(&span, message)
    }

    pub fn diagnostic(&self) -> String {
        let current = self.current();
        format!(
            "TokenStream(pos: {}/{}, current: '{}' at {})",
            self.position,
            self.significant_indices.len(),
            current.token,
            current.span
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Position;

    fn stream_for(source: &str, tokens: Vec<(Token, usize, usize)>) -> TokenStream {
        let spanned = tokens
            .into_iter()
            .map(|(token, start, end)| {
                SpannedToken::new(
                    token,
                    Span::new(
                        Position::new(start, 1, start as u32 + 1),
                        Position::new(end, 1, end as u32 + 1),
                    ),
                )
            })
            .collect();
        TokenStream::new(source, spanned)
    }

    fn sample() -> TokenStream {
        stream_for(
            "tag ( a )",
            vec![
                (Token::Word("tag".to_string()), 0, 3),
                (Token::Whitespace, 3, 4),
                (Token::LeftParen, 4, 5),
                (Token::Whitespace, 5, 6),
                (Token::Word("a".to_string()), 6, 7),
                (Token::Whitespace, 7, 8),
                (Token::RightParen, 8, 9),
            ],
        )
    }

    #[test]
    fn test_significant_view_skips_trivia_and_appends_eof() {
        let stream = sample();
        let tokens: Vec<&Token> = stream.iter_significant().map(|t| &t.token).collect();

        assert_eq!(tokens.len(), 5);
        assert_eq!(tokens[1], &Token::LeftParen);
        assert_eq!(tokens[4], &Token::Eof);
        assert_eq!(stream.remaining_count(), 4);
    }

    #[test]
    fn test_advance_stops_at_eof() {
        let mut stream = sample();
        for _ in 0..10 {
            stream.advance();
        }
        assert!(stream.is_at_end());
        assert_eq!(stream.remaining_count(), 0);
    }

    #[test]
    fn test_checkpoint_restore() {
        let mut stream = sample();
        assert!(stream.advance_if_keyword("TAG"));
        let saved = stream.checkpoint();

        stream.advance();
        stream.advance();
        assert_eq!(stream.current_token(), &Token::RightParen);

        stream.restore(saved);
        assert_eq!(stream.current_token(), &Token::LeftParen);
        assert_eq!(stream.furthest_span().start.offset, 8);
    }

    #[test]
    fn test_source_slicing() {
        let mut stream = sample();
        stream.advance();
        let start = stream.current_offset();
        stream.advance();
        stream.advance();
        stream.advance();

        assert_eq!(stream.slice(start, stream.previous_end_offset()), "( a )");
        assert_eq!(stream.text_of(stream.current()), "");
    }

    #[test]
    fn test_empty_stream() {
        let stream = TokenStream::new("", Vec::new());
        assert!(stream.is_empty());
        assert!(stream.is_at_end());
        assert!(stream.diagnostic().contains("<EOF>"));
    }
}
