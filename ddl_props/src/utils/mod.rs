//! Shared source-location utilities for the lexer and grammar matcher

pub mod span;

pub use span::{Position, SourceMap, Span};
