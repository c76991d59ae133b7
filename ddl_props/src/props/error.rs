//! Property parse, typecheck and render errors

use crate::config::compile_time::grammar::MAX_REPORTED_TEXT_LENGTH;
use crate::grammar::GrammarError;
use crate::lexical::LexerError;
use crate::logging::{codes, Code};
use crate::utils::Span;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PropError {
    #[error("Text does not match the {label} clause grammar: '{text}'")]
    GrammarMismatch {
        label: String,
        text: String,
        span: Option<Span>,
    },

    #[error("Invalid value '{value}' for {label}: expected {expected}")]
    InvalidValue {
        label: String,
        value: String,
        expected: String,
        /// Valid members, for enumerated kinds
        allowed: Vec<String>,
    },

    #[error("{kind} clause {label} cannot be rendered")]
    RenderUnsupported { label: String, kind: &'static str },

    #[error("Value for {label} has the wrong shape: expected {expected}, found {found}")]
    ValueShape {
        label: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("Duplicate property key '{key}'")]
    DuplicateKey { key: String },

    #[error("Parentheses nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize, span: Span },

    #[error("List longer than {limit} items")]
    ListTooLong { limit: usize, span: Span },

    #[error(transparent)]
    Lexical(#[from] LexerError),
}

impl PropError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::GrammarMismatch { .. } => codes::grammar::GRAMMAR_MISMATCH,
            Self::InvalidValue { .. } => codes::typecheck::INVALID_VALUE,
            Self::RenderUnsupported { .. } => codes::render::RENDER_UNSUPPORTED,
            Self::ValueShape { .. } => codes::render::VALUE_SHAPE_MISMATCH,
            Self::DuplicateKey { .. } => codes::collection::DUPLICATE_KEY,
            Self::NestingTooDeep { .. } => codes::grammar::NESTING_TOO_DEEP,
            Self::ListTooLong { .. } => codes::grammar::LIST_TOO_LONG,
            Self::Lexical(err) => err.error_code(),
        }
    }

    /// Grammar mismatch with the offending text cut to a reportable length
    pub fn grammar_mismatch(label: &str, text: &str, span: Option<Span>) -> Self {
        Self::GrammarMismatch {
            label: label.to_string(),
            text: truncate_for_report(text.trim()),
            span,
        }
    }

    pub fn invalid_value(label: &str, value: impl Into<String>, expected: impl Into<String>) -> Self {
        Self::InvalidValue {
            label: label.to_string(),
            value: value.into(),
            expected: expected.into(),
            allowed: Vec::new(),
        }
    }

    pub fn span(&self) -> Option<Span> {
        match self {
            Self::GrammarMismatch { span, .. } => *span,
            Self::NestingTooDeep { span, .. } | Self::ListTooLong { span, .. } => Some(*span),
            _ => None,
        }
    }
}

impl From<GrammarError> for PropError {
    fn from(err: GrammarError) -> Self {
        match err {
            GrammarError::NestingTooDeep { limit, span } => Self::NestingTooDeep { limit, span },
            GrammarError::ListTooLong { limit, span } => Self::ListTooLong { limit, span },
        }
    }
}

fn truncate_for_report(text: &str) -> String {
    match text.char_indices().nth(MAX_REPORTED_TEXT_LENGTH) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
