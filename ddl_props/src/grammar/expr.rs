//! Composable value grammar
//!
//! An [`Expr`] is evaluated against a [`TokenStream`] with backtracking. Every
//! evaluation either succeeds, appending its outputs, or fails leaving both
//! the stream position and the output list untouched.

use super::keywords::{label_words, Keyword};
use super::primitives;
use super::GrammarError;
use crate::tokens::TokenStream;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Value captured by a grammar match, before typechecking
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum RawValue {
    Text(String),
    List(Vec<RawValue>),
}

impl RawValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text),
            Self::List(_) => None,
        }
    }

    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::List(_) => "list",
        }
    }

    /// Top-level items; plain text counts as a one-item list
    pub fn into_items(self) -> Vec<RawValue> {
        match self {
            Self::List(items) => items,
            text => vec![text],
        }
    }

    /// All text leaves, depth first
    pub fn flatten(self) -> Vec<String> {
        match self {
            Self::Text(text) => vec![text],
            Self::List(items) => items.into_iter().flat_map(RawValue::flatten).collect(),
        }
    }
}

impl fmt::Display for RawValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::List(items) => {
                f.write_str("[")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{}", item)?;
                }
                f.write_str("]")
            }
        }
    }
}

impl From<&str> for RawValue {
    fn from(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

impl From<String> for RawValue {
    fn from(text: String) -> Self {
        Self::Text(text)
    }
}

impl<T: Into<RawValue>> From<Vec<T>> for RawValue {
    fn from(items: Vec<T>) -> Self {
        Self::List(items.into_iter().map(Into::into).collect())
    }
}

/// Value grammar node
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// Keyword sequence, matched and discarded
    Keywords(Vec<String>),
    /// Literal text such as an enumeration member, yielded as written
    Literal(String),
    Equals,
    Arrow,
    /// Any single non-structural token, as written
    Any,
    /// Any token; string literals yield their content
    Scalar,
    Identifier,
    /// Dotted path, yielded as one list of parts
    QualifiedIdentifier,
    /// Dotted path, yielded as one dot-joined text
    QualifiedName,
    QuotedString,
    /// Parenthesized group as original text, parentheses included
    BalancedText,
    RemainingText,
    /// Raw text up to a top-level keyword, which must follow unconsumed
    TextUntil(Keyword),
    RawUntilCloseParen,
    Optional(Box<Expr>),
    Sequence(Vec<Expr>),
    /// First alternative that matches wins
    FirstOf(Vec<Expr>),
    /// Comma-separated list, outputs flattened
    Delimited(Box<Expr>),
    /// One or more repetitions, commas optional
    Repeated(Box<Expr>),
    /// Inner outputs nested as one list
    Group(Box<Expr>),
    Parens(Box<Expr>),
}

impl Expr {
    /// Keyword sequence for a clause label
    pub fn keywords(label: &str) -> Self {
        Self::Keywords(label_words(label))
    }

    pub fn literal(text: impl Into<String>) -> Self {
        Self::Literal(text.into())
    }

    pub fn optional(inner: Expr) -> Self {
        Self::Optional(Box::new(inner))
    }

    pub fn delimited(item: Expr) -> Self {
        Self::Delimited(Box::new(item))
    }

    pub fn repeated(item: Expr) -> Self {
        Self::Repeated(Box::new(item))
    }

    pub fn group(inner: Expr) -> Self {
        Self::Group(Box::new(inner))
    }

    pub fn parens(inner: Expr) -> Self {
        Self::Parens(Box::new(inner))
    }

    /// Whether a capture of this expression is always a list
    pub fn is_list_shaped(&self) -> bool {
        match self {
            Self::Delimited(_) | Self::Repeated(_) => true,
            Self::Optional(inner) | Self::Parens(inner) => inner.is_list_shaped(),
            _ => false,
        }
    }

    /// Match and collect this expression's outputs as one captured value
    ///
    /// A single output is captured as itself unless the expression is
    /// list-shaped; anything else becomes a list.
    pub fn capture(&self, stream: &mut TokenStream) -> Result<Option<RawValue>, GrammarError> {
        let mut outputs = Vec::new();
        if !self.eval(stream, &mut outputs)? {
            return Ok(None);
        }

        let value = if !self.is_list_shaped() && outputs.len() == 1 {
            outputs.remove(0)
        } else {
            RawValue::List(outputs)
        };
        Ok(Some(value))
    }

    pub(crate) fn eval(
        &self,
        stream: &mut TokenStream,
        out: &mut Vec<RawValue>,
    ) -> Result<bool, GrammarError> {
        let matched = match self {
            Self::Keywords(words) => primitives::keyword_sequence(stream, words),
            Self::Literal(text) => push_text(out, primitives::literal_text(stream, text)),
            Self::Equals => primitives::equals(stream),
            Self::Arrow => primitives::arrow(stream),
            Self::Any => push_text(out, primitives::any_token(stream)),
            Self::Scalar => push_text(out, primitives::scalar(stream)),
            Self::Identifier => push_text(out, primitives::identifier(stream)),
            Self::QualifiedIdentifier => match primitives::qualified_identifier(stream) {
                Some(parts) => {
                    out.push(RawValue::from(parts));
                    true
                }
                None => false,
            },
            Self::QualifiedName => push_text(
                out,
                primitives::qualified_identifier(stream).map(|parts| parts.join(".")),
            ),
            Self::QuotedString => push_text(out, primitives::quoted_string(stream)),
            Self::BalancedText => push_text(out, primitives::balanced_group(stream)?),
            Self::RemainingText => push_text(out, primitives::remaining_text(stream)),
            Self::TextUntil(keyword) => {
                push_text(out, primitives::text_until(stream, keyword.as_str())?)
            }
            Self::RawUntilCloseParen => {
                push_text(out, primitives::raw_until_close_paren(stream)?)
            }
            Self::Optional(inner) => {
                inner.eval(stream, out)?;
                true
            }
            Self::Sequence(items) => {
                let saved = stream.checkpoint();
                let output_len = out.len();
                for item in items {
                    if !item.eval(stream, out)? {
                        stream.restore(saved);
                        out.truncate(output_len);
                        return Ok(false);
                    }
                }
                true
            }
            Self::FirstOf(alternatives) => {
                for alternative in alternatives {
                    if alternative.eval(stream, out)? {
                        return Ok(true);
                    }
                }
                false
            }
            Self::Delimited(item) => {
                let items = primitives::delimited(stream, |s| item.eval_isolated(s))?;
                extend_flat(out, items)
            }
            Self::Repeated(item) => {
                let items = primitives::repeated(stream, |s| item.eval_isolated(s))?;
                extend_flat(out, items)
            }
            Self::Group(inner) => match inner.eval_isolated(stream)? {
                Some(outputs) => {
                    out.push(RawValue::List(outputs));
                    true
                }
                None => false,
            },
            Self::Parens(inner) => {
                let saved = stream.checkpoint();
                let output_len = out.len();
                let matched = primitives::left_paren(stream)
                    && inner.eval(stream, out)?
                    && primitives::right_paren(stream);
                if !matched {
                    stream.restore(saved);
                    out.truncate(output_len);
                }
                matched
            }
        };

        Ok(matched)
    }

    fn eval_isolated(&self, stream: &mut TokenStream) -> Result<Option<Vec<RawValue>>, GrammarError> {
        let mut outputs = Vec::new();
        Ok(self.eval(stream, &mut outputs)?.then_some(outputs))
    }
}

fn push_text(out: &mut Vec<RawValue>, text: Option<String>) -> bool {
    match text {
        Some(text) => {
            out.push(RawValue::Text(text));
            true
        }
        None => false,
    }
}

fn extend_flat(out: &mut Vec<RawValue>, items: Option<Vec<Vec<RawValue>>>) -> bool {
    match items {
        Some(items) => {
            out.extend(items.into_iter().flatten());
            true
        }
        None => false,
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fn join(f: &mut fmt::Formatter<'_>, items: &[Expr], separator: &str) -> fmt::Result {
            for (index, item) in items.iter().enumerate() {
                if index > 0 {
                    f.write_str(separator)?;
                }
                write!(f, "{}", item)?;
            }
            Ok(())
        }

        match self {
            Self::Keywords(words) => f.write_str(&words.join(" ")),
            Self::Literal(text) => write!(f, "{}", text.to_ascii_uppercase()),
            Self::Equals => f.write_str("="),
            Self::Arrow => f.write_str("=>"),
            Self::Any => f.write_str("<any>"),
            Self::Scalar => f.write_str("<scalar>"),
            Self::Identifier => f.write_str("<identifier>"),
            Self::QualifiedIdentifier | Self::QualifiedName => {
                f.write_str("<qualified-identifier>")
            }
            Self::QuotedString => f.write_str("'<string>'"),
            Self::BalancedText => f.write_str("( ... )"),
            Self::RemainingText => f.write_str("<text>"),
            Self::TextUntil(keyword) => write!(f, "<text> {}", keyword),
            Self::RawUntilCloseParen => f.write_str("<text>"),
            Self::Optional(inner) => write!(f, "[{}]", inner),
            Self::Sequence(items) => join(f, items, " "),
            Self::FirstOf(alternatives) => {
                f.write_str("{")?;
                join(f, alternatives, " | ")?;
                f.write_str("}")
            }
            Self::Delimited(item) => write!(f, "{0} [, {0} ...]", item),
            Self::Repeated(item) => write!(f, "{0} [{0} ...]", item),
            Self::Group(inner) => write!(f, "{}", inner),
            Self::Parens(inner) => write!(f, "( {} )", inner),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexical::tokenize;

    fn capture(expr: &Expr, source: &str) -> Option<RawValue> {
        let mut stream = tokenize(source).unwrap();
        expr.capture(&mut stream).unwrap()
    }

    #[test]
    fn test_single_output_is_captured_as_text() {
        assert_eq!(capture(&Expr::Any, "TRUE"), Some(RawValue::from("TRUE")));
        assert_eq!(capture(&Expr::Any, ")"), None);
    }

    #[test]
    fn test_delimited_is_always_a_list() {
        let expr = Expr::delimited(Expr::Any);
        assert_eq!(capture(&expr, "a"), Some(RawValue::from(vec!["a"])));
        assert_eq!(
            capture(&expr, "a, b , c"),
            Some(RawValue::from(vec!["a", "b", "c"]))
        );
    }

    #[test]
    fn test_key_value_pairs_flatten() {
        let expr = Expr::delimited(Expr::Sequence(vec![Expr::Scalar, Expr::Equals, Expr::Scalar]));
        assert_eq!(
            capture(&expr, "env = 'prod', team = 'data'"),
            Some(RawValue::from(vec!["env", "prod", "team", "data"]))
        );
    }

    #[test]
    fn test_qualified_name_is_one_text() {
        let expr = Expr::Sequence(vec![Expr::QualifiedName, Expr::Equals, Expr::Scalar]);
        assert_eq!(
            capture(&expr, "db.sch.env = 'prod'"),
            Some(RawValue::from(vec!["db.sch.env", "prod"]))
        );
    }

    #[test]
    fn test_grouped_identifiers_nest() {
        let expr = Expr::delimited(Expr::QualifiedIdentifier);
        let captured = capture(&expr, "a.b, c").unwrap();
        assert_eq!(
            captured,
            RawValue::List(vec![
                RawValue::from(vec!["a", "b"]),
                RawValue::from(vec!["c"]),
            ])
        );
        assert_eq!(captured.flatten(), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_sequence_backtracks_on_failure() {
        let expr = Expr::FirstOf(vec![
            Expr::Sequence(vec![Expr::Any, Expr::Arrow, Expr::Any]),
            Expr::Sequence(vec![Expr::Any, Expr::Equals, Expr::Any]),
        ]);
        let mut stream = tokenize("offset = -60").unwrap();
        let mut out = Vec::new();

        assert!(expr.eval(&mut stream, &mut out).unwrap());
        assert_eq!(out, vec![RawValue::from("offset"), RawValue::from("-60")]);
        assert!(stream.is_at_end());
    }

    #[test]
    fn test_failed_eval_leaves_state_untouched() {
        let expr = Expr::parens(Expr::delimited(Expr::Any));
        let mut stream = tokenize("(a, b").unwrap();
        let mut out = Vec::new();

        assert!(!expr.eval(&mut stream, &mut out).unwrap());
        assert!(out.is_empty());
        assert_eq!(stream.checkpoint(), 0);
    }

    #[test]
    fn test_first_of_prefers_earlier_alternatives() {
        let expr = Expr::FirstOf(vec![Expr::literal("X-LARGE"), Expr::Any]);
        assert_eq!(capture(&expr, "x-large"), Some(RawValue::from("x-large")));
        assert_eq!(capture(&expr, "huge"), Some(RawValue::from("huge")));
    }

    #[test]
    fn test_display_describes_grammar() {
        let expr = Expr::Sequence(vec![
            Expr::optional(Expr::keywords("with")),
            Expr::keywords("tag"),
            Expr::parens(Expr::delimited(Expr::Any)),
        ]);
        assert_eq!(expr.to_string(), "[WITH] TAG ( <any> [, <any> ...] )");
    }

    #[test]
    fn test_raw_value_display() {
        let value = RawValue::from(vec!["a", "b"]);
        assert_eq!(value.to_string(), "[a, b]");
        assert_eq!(value.shape_name(), "list");
        assert_eq!(RawValue::from("x").into_items(), vec![RawValue::from("x")]);
    }
}
