//! Token-level matchers the value grammars are composed from
//!
//! A matcher either consumes input and returns a value, or leaves the stream
//! exactly where it was. Matchers that count parentheses fail with a
//! [`GrammarError`] once nesting exceeds the compile-time limit.

use super::GrammarError;
use crate::config::compile_time::grammar::{MAX_LIST_ITEMS, MAX_NESTING_DEPTH};
use crate::tokens::{Token, TokenStream};

/// Structured match of one entry in a column list
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMatch {
    /// Column name with identifier quotes removed
    pub name: String,
    /// Data type word as written; absent for name-only lists
    pub data_type: Option<String>,
    /// Type parameters inside their parentheses, as written
    pub type_args: Option<String>,
    pub comment: Option<String>,
}

// === KEYWORDS AND OPERATORS ===

/// Match a sequence of keywords, all or nothing
pub fn keyword_sequence(stream: &mut TokenStream, words: &[String]) -> bool {
    let saved = stream.checkpoint();
    for word in words {
        if !stream.advance_if_keyword(word) {
            stream.restore(saved);
            return false;
        }
    }
    true
}

/// Match literal text word by word against the source, case-insensitively
///
/// Token boundaries must line up with the end of each word, so members such
/// as `SNOWPARK-OPTIMIZED` match across several tokens while `ROW` never
/// matches the start of `ROWS`. Returns the text as written.
pub fn literal_text(stream: &mut TokenStream, text: &str) -> Option<String> {
    let saved = stream.checkpoint();
    let start = stream.current_offset();
    let mut consumed_end = start;

    for word in text.split_whitespace() {
        if stream.is_at_end() {
            stream.restore(saved);
            return None;
        }

        let word_start = stream.current_offset();
        let word_end = word_start + word.len();
        let matches_word = stream
            .source()
            .get(word_start..word_end)
            .is_some_and(|found| found.eq_ignore_ascii_case(word));
        if !matches_word {
            stream.restore(saved);
            return None;
        }

        while !stream.is_at_end() && stream.current_offset() < word_end {
            consumed_end = stream.advance().span.end.offset;
        }
        if consumed_end != word_end {
            stream.restore(saved);
            return None;
        }
    }

    if consumed_end == start {
        return None;
    }
    Some(stream.slice(start, consumed_end).to_string())
}

fn punctuation(stream: &mut TokenStream, expected: &Token) -> bool {
    if stream.current_token() == expected {
        stream.advance();
        true
    } else {
        false
    }
}

pub fn equals(stream: &mut TokenStream) -> bool {
    punctuation(stream, &Token::Equals)
}

pub fn arrow(stream: &mut TokenStream) -> bool {
    punctuation(stream, &Token::Arrow)
}

pub fn left_paren(stream: &mut TokenStream) -> bool {
    punctuation(stream, &Token::LeftParen)
}

pub fn right_paren(stream: &mut TokenStream) -> bool {
    punctuation(stream, &Token::RightParen)
}

pub fn comma(stream: &mut TokenStream) -> bool {
    punctuation(stream, &Token::Comma)
}

// === SINGLE-TOKEN VALUES ===

/// Any single non-structural token, as written in the source
pub fn any_token(stream: &mut TokenStream) -> Option<String> {
    if stream.current_token().is_structural() {
        return None;
    }
    let spanned = stream.advance().clone();
    Some(stream.text_of(&spanned).to_string())
}

/// Like [`any_token`], but string literals yield their unquoted content
pub fn scalar(stream: &mut TokenStream) -> Option<String> {
    if let Token::StringLiteral(content) = stream.current_token() {
        let content = content.clone();
        stream.advance();
        return Some(content);
    }
    any_token(stream)
}

/// Bare or double-quoted identifier, as written
pub fn identifier(stream: &mut TokenStream) -> Option<String> {
    match stream.current_token() {
        Token::Word(_) | Token::QuotedIdentifier(_) => {
            let spanned = stream.advance().clone();
            Some(stream.text_of(&spanned).to_string())
        }
        _ => None,
    }
}

/// Dotted identifier path such as `db.schema.table`
pub fn qualified_identifier(stream: &mut TokenStream) -> Option<Vec<String>> {
    let mut parts = vec![identifier(stream)?];

    while stream.current_token() == &Token::Dot {
        let saved = stream.checkpoint();
        stream.advance();
        match identifier(stream) {
            Some(part) => parts.push(part),
            None => {
                stream.restore(saved);
                break;
            }
        }
    }

    Some(parts)
}

/// Single-quoted string, content only
pub fn quoted_string(stream: &mut TokenStream) -> Option<String> {
    let content = stream.current_token().as_string_literal()?.to_string();
    stream.advance();
    Some(content)
}

// === RAW TEXT CAPTURE ===

fn nesting_error(stream: &TokenStream) -> GrammarError {
    GrammarError::NestingTooDeep {
        limit: MAX_NESTING_DEPTH,
        span: stream.current_span(),
    }
}

/// Parenthesized group captured as original text, outer parentheses included
pub fn balanced_group(stream: &mut TokenStream) -> Result<Option<String>, GrammarError> {
    if stream.current_token() != &Token::LeftParen {
        return Ok(None);
    }

    let saved = stream.checkpoint();
    let start = stream.current_offset();
    let mut depth = 0usize;

    loop {
        match stream.current_token() {
            Token::LeftParen => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(nesting_error(stream));
                }
            }
            Token::RightParen => {
                depth -= 1;
                if depth == 0 {
                    stream.advance();
                    break;
                }
            }
            Token::Eof => {
                stream.restore(saved);
                return Ok(None);
            }
            _ => {}
        }
        stream.advance();
    }

    Ok(Some(stream.slice(start, stream.previous_end_offset()).to_string()))
}

/// Capture raw text until a stop condition at parenthesis depth zero
///
/// An unmatched `)` always stops the capture. Reaching end of input first is
/// no match. Empty captures do not match.
fn raw_text_until(
    stream: &mut TokenStream,
    stop: impl Fn(&Token) -> bool,
) -> Result<Option<String>, GrammarError> {
    let saved = stream.checkpoint();
    let start = stream.current_offset();
    let mut depth = 0usize;

    loop {
        let token = stream.current_token();
        match token {
            Token::Eof => {
                stream.restore(saved);
                return Ok(None);
            }
            Token::RightParen if depth == 0 => break,
            _ if depth == 0 && stop(token) => break,
            Token::LeftParen => {
                depth += 1;
                if depth > MAX_NESTING_DEPTH {
                    return Err(nesting_error(stream));
                }
            }
            Token::RightParen => depth -= 1,
            _ => {}
        }
        stream.advance();
    }

    if stream.checkpoint() == saved {
        return Ok(None);
    }
    let text = stream.slice(start, stream.previous_end_offset()).trim();
    Ok(Some(text.to_string()))
}

/// Raw text up to the closing parenthesis of the enclosing group
pub fn raw_until_close_paren(stream: &mut TokenStream) -> Result<Option<String>, GrammarError> {
    raw_text_until(stream, |_| false)
}

/// Raw text up to, not including, a top-level keyword
///
/// The keyword must follow; it is left unconsumed.
pub fn text_until(stream: &mut TokenStream, keyword: &str) -> Result<Option<String>, GrammarError> {
    raw_text_until(stream, |token| token.is_keyword(keyword))
}

/// Everything from the current token to end of input, trailing space trimmed
pub fn remaining_text(stream: &mut TokenStream) -> Option<String> {
    if stream.is_at_end() {
        return None;
    }
    let start = stream.current_offset();
    let text = stream.source()[start..].trim_end().to_string();
    while !stream.is_at_end() {
        stream.advance();
    }
    Some(text)
}

// === LISTS ===

/// Comma-separated list of one or more items
///
/// A trailing comma with no item after it is left unconsumed.
pub fn delimited<T>(
    stream: &mut TokenStream,
    mut item: impl FnMut(&mut TokenStream) -> Result<Option<T>, GrammarError>,
) -> Result<Option<Vec<T>>, GrammarError> {
    repeat_items(stream, &mut item, true)
}

/// One or more items, commas between them optional
pub fn repeated<T>(
    stream: &mut TokenStream,
    mut item: impl FnMut(&mut TokenStream) -> Result<Option<T>, GrammarError>,
) -> Result<Option<Vec<T>>, GrammarError> {
    repeat_items(stream, &mut item, false)
}

fn repeat_items<T>(
    stream: &mut TokenStream,
    item: &mut impl FnMut(&mut TokenStream) -> Result<Option<T>, GrammarError>,
    require_comma: bool,
) -> Result<Option<Vec<T>>, GrammarError> {
    let Some(first) = item(stream)? else {
        return Ok(None);
    };
    let mut items = vec![first];

    loop {
        let saved = stream.checkpoint();
        if !comma(stream) && require_comma {
            break;
        }
        match item(stream)? {
            Some(next) => {
                if items.len() >= MAX_LIST_ITEMS {
                    return Err(GrammarError::ListTooLong {
                        limit: MAX_LIST_ITEMS,
                        span: stream.current_span(),
                    });
                }
                items.push(next);
            }
            None => {
                stream.restore(saved);
                break;
            }
        }
    }

    Ok(Some(items))
}

// === COLUMNS ===

fn column_name(stream: &mut TokenStream) -> Option<String> {
    let name = stream.current_token().as_identifier()?.to_string();
    stream.advance();
    Some(name)
}

fn column_comment(stream: &mut TokenStream) -> Option<String> {
    let saved = stream.checkpoint();
    if !stream.advance_if_keyword("COMMENT") {
        return None;
    }
    let comment = quoted_string(stream);
    if comment.is_none() {
        stream.restore(saved);
    }
    comment
}

/// `name type[(args)] [COMMENT 'text']`
pub fn column_definition(stream: &mut TokenStream) -> Result<Option<ColumnMatch>, GrammarError> {
    let saved = stream.checkpoint();
    let Some(name) = column_name(stream) else {
        return Ok(None);
    };
    let Some(data_type) = stream.current_token().as_word().map(str::to_string) else {
        stream.restore(saved);
        return Ok(None);
    };
    stream.advance();

    let type_args = balanced_group(stream)?.map(|group| {
        let inner = group
            .strip_prefix('(')
            .and_then(|rest| rest.strip_suffix(')'))
            .unwrap_or(group.as_str());
        inner.trim().to_string()
    });

    Ok(Some(ColumnMatch {
        name,
        data_type: Some(data_type),
        type_args,
        comment: column_comment(stream),
    }))
}

/// `name [COMMENT 'text']`
pub fn column_name_entry(stream: &mut TokenStream) -> Result<Option<ColumnMatch>, GrammarError> {
    let Some(name) = column_name(stream) else {
        return Ok(None);
    };
    Ok(Some(ColumnMatch {
        name,
        data_type: None,
        type_args: None,
        comment: column_comment(stream),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;
    use assert_matches::assert_matches;

    fn words(label: &str) -> Vec<String> {
        crate::grammar::label_words(label)
    }

    #[test]
    fn test_keyword_sequence_is_all_or_nothing() {
        let mut stream = tokenize("row access policy").unwrap();
        assert!(!keyword_sequence(&mut stream, &words("ROW ACCESS TABLE")));
        assert_eq!(stream.checkpoint(), 0);
        assert!(keyword_sequence(&mut stream, &words("ROW ACCESS POLICY")));
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_literal_text_spans_tokens() {
        let mut stream = tokenize("snowpark-optimized").unwrap();
        assert_eq!(
            literal_text(&mut stream, "SNOWPARK-OPTIMIZED").as_deref(),
            Some("snowpark-optimized")
        );
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_literal_text_respects_word_boundaries() {
        let mut stream = tokenize("ROWS").unwrap();
        assert_eq!(literal_text(&mut stream, "ROW"), None);
        assert_eq!(stream.checkpoint(), 0);

        let mut stream = tokenize("x small").unwrap();
        assert_eq!(literal_text(&mut stream, "X SMALL").as_deref(), Some("x small"));
    }

    #[test]
    fn test_any_token_skips_structural_punctuation() {
        let mut stream = tokenize("= 'abc'").unwrap();
        assert_eq!(any_token(&mut stream), None);
        assert!(equals(&mut stream));
        assert_eq!(any_token(&mut stream).as_deref(), Some("'abc'"));
    }

    #[test]
    fn test_scalar_unquotes_strings() {
        let mut stream = tokenize("'it''s' 42").unwrap();
        assert_eq!(scalar(&mut stream).as_deref(), Some("it's"));
        assert_eq!(scalar(&mut stream).as_deref(), Some("42"));
    }

    #[test]
    fn test_qualified_identifier() {
        let mut stream = tokenize("db.\"My Schema\".tbl").unwrap();
        assert_eq!(
            qualified_identifier(&mut stream),
            Some(vec![
                "db".to_string(),
                "\"My Schema\"".to_string(),
                "tbl".to_string()
            ])
        );

        let mut stream = tokenize("db. 5").unwrap();
        assert_eq!(qualified_identifier(&mut stream), Some(vec!["db".to_string()]));
        assert_eq!(stream.current_token(), &Token::Dot);
    }

    #[test]
    fn test_balanced_group_keeps_original_text() {
        let mut stream = tokenize("(a = (b, c)) rest").unwrap();
        assert_eq!(
            balanced_group(&mut stream).unwrap().as_deref(),
            Some("(a = (b, c))")
        );
        assert!(stream.current_token().is_keyword("rest"));

        let mut unclosed = tokenize("(a, (b)").unwrap();
        assert_eq!(balanced_group(&mut unclosed).unwrap(), None);
        assert_eq!(unclosed.checkpoint(), 0);
    }

    #[test]
    fn test_balanced_group_nesting_limit() {
        let depth = MAX_NESTING_DEPTH + 1;
        let source = format!("{}x{}", "(".repeat(depth), ")".repeat(depth));
        let mut stream = tokenize(&source).unwrap();
        assert_matches!(
            balanced_group(&mut stream),
            Err(GrammarError::NestingTooDeep { .. })
        );
    }

    #[test]
    fn test_text_until_keyword_is_paren_aware() {
        let mut stream = tokenize("date_trunc(day, ts) as select 1").unwrap();
        assert_eq!(
            text_until(&mut stream, "AS").unwrap().as_deref(),
            Some("date_trunc(day, ts)")
        );
        assert!(stream.current_token().is_keyword("AS"));

        let mut stream = tokenize("f(x as y) + 1 as v").unwrap();
        assert_eq!(
            text_until(&mut stream, "AS").unwrap().as_deref(),
            Some("f(x as y) + 1")
        );
        assert!(stream.current_token().is_keyword("AS"));
    }

    #[test]
    fn test_text_until_requires_keyword() {
        let mut stream = tokenize("f(x as y) + 1").unwrap();
        assert_eq!(text_until(&mut stream, "AS").unwrap(), None);
        assert_eq!(stream.checkpoint(), 0);
    }

    #[test]
    fn test_raw_until_close_paren() {
        let mut stream = tokenize("'2024-01-01'::timestamp_tz)").unwrap();
        assert_eq!(
            raw_until_close_paren(&mut stream).unwrap().as_deref(),
            Some("'2024-01-01'::timestamp_tz")
        );
        assert!(right_paren(&mut stream));

        let mut unclosed = tokenize("abc").unwrap();
        assert_eq!(raw_until_close_paren(&mut unclosed).unwrap(), None);
    }

    #[test]
    fn test_remaining_text() {
        let mut stream = tokenize("select *\nfrom t  \n").unwrap();
        assert_eq!(
            remaining_text(&mut stream).as_deref(),
            Some("select *\nfrom t")
        );
        assert!(stream.is_at_end());
        assert_eq!(remaining_text(&mut stream), None);
    }

    #[test]
    fn test_delimited_leaves_trailing_comma() {
        let mut stream = tokenize("a, b, c,").unwrap();
        let items = delimited(&mut stream, |s| Ok(any_token(s))).unwrap();
        assert_eq!(items, Some(vec!["a".to_string(), "b".to_string(), "c".to_string()]));
        assert_eq!(stream.current_token(), &Token::Comma);
    }

    #[test]
    fn test_repeated_accepts_optional_commas() {
        let mut stream = tokenize("a b, c").unwrap();
        let items = repeated(&mut stream, |s| Ok(any_token(s))).unwrap();
        assert_eq!(items.map(|v| v.len()), Some(3));
    }

    #[test]
    fn test_column_definition() {
        let mut stream = tokenize("\"User Id\" int, name varchar comment 'x'").unwrap();
        let columns = delimited(&mut stream, column_definition)
            .unwrap()
            .unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].name, "User Id");
        assert_eq!(columns[0].data_type.as_deref(), Some("int"));
        assert_eq!(columns[0].comment, None);
        assert_eq!(columns[1].comment.as_deref(), Some("x"));
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_column_definition_type_args() {
        let mut stream = tokenize("amount number(38, 2) comment 'usd', code varchar( 3 )").unwrap();
        let columns = delimited(&mut stream, column_definition).unwrap().unwrap();

        assert_eq!(columns.len(), 2);
        assert_eq!(columns[0].data_type.as_deref(), Some("number"));
        assert_eq!(columns[0].type_args.as_deref(), Some("38, 2"));
        assert_eq!(columns[0].comment.as_deref(), Some("usd"));
        assert_eq!(columns[1].type_args.as_deref(), Some("3"));
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_column_name_entry() {
        let mut stream = tokenize("id comment 'key', \"Display Name\"").unwrap();
        let columns = delimited(&mut stream, column_name_entry)
            .unwrap()
            .unwrap();

        assert_eq!(columns[0].comment.as_deref(), Some("key"));
        assert_eq!(columns[1].name, "Display Name");
        assert_eq!(columns[1].data_type, None);
    }
}
