//! Token system for DDL property clauses
//!
//! Clause text is turned into a [`TokenStream`] by the lexical analyzer. The
//! stream keeps every token with its span but exposes only significant tokens
//! to the grammar layer, so whitespace and `--` comments never influence a
//! match while original text stays recoverable by byte offset.

pub mod token;
pub mod token_stream;

pub use token::{is_word_continue, is_word_start, quote_string, Token, TokenClass};
pub use token_stream::{SpannedToken, TokenStream};

pub use crate::utils::{Position, Span};
