//! Clause grammars
//!
//! Token-level [`primitives`] are composed into [`Expr`] value grammars, and
//! [`GrammarBuilder`] assembles those into a fixed-order [`Grammar`] per
//! property descriptor.

pub mod builder;
pub mod expr;
pub mod keywords;
pub mod primitives;

pub use builder::{Grammar, GrammarBuilder, Segment, SegmentKind};
pub use expr::{Expr, RawValue};
pub use keywords::{canonical_label, label_words, Keyword};
pub use primitives::ColumnMatch;

use crate::logging::Code;
use crate::utils::Span;

/// Structural limits hit while matching
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GrammarError {
    #[error("Parentheses nested deeper than {limit} levels at {span}")]
    NestingTooDeep { limit: usize, span: Span },

    #[error("List longer than {limit} items at {span}")]
    ListTooLong { limit: usize, span: Span },
}

impl GrammarError {
    pub fn error_code(&self) -> Code {
        match self {
            Self::NestingTooDeep { .. } => crate::logging::codes::grammar::NESTING_TOO_DEEP,
            Self::ListTooLong { .. } => crate::logging::codes::grammar::LIST_TOO_LONG,
        }
    }

    pub fn span(&self) -> Span {
        match self {
            Self::NestingTooDeep { span, .. } | Self::ListTooLong { span, .. } => *span,
        }
    }
}
