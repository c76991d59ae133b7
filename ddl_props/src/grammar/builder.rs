//! Fixed-order clause grammar assembly
//!
//! Every clause grammar has the same shape:
//!
//! ```text
//! [filler] LABEL [filler] [=] value      -- value optionally in ( )
//! ```
//!
//! Which segments exist is decided once by [`GrammarBuilder::build`]; whether a
//! segment is optional is recorded on the segment itself.

use super::expr::{Expr, RawValue};
use super::keywords::{label_words, Keyword};
use super::GrammarError;
use crate::tokens::TokenStream;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    LeadingFiller,
    Label,
    TrailingFiller,
    Equals,
    Value,
}

/// One named piece of a clause grammar
#[derive(Debug, Clone, PartialEq)]
pub struct Segment {
    pub kind: SegmentKind,
    pub expr: Expr,
    pub optional: bool,
}

#[derive(Debug, Clone, Default)]
pub struct GrammarBuilder {
    label: Option<String>,
    consumed_words: Vec<String>,
    equals: bool,
    parens: bool,
    value: Option<Expr>,
}

impl GrammarBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn label(mut self, label: Option<&str>) -> Self {
        self.label = label.map(str::to_string);
        self
    }

    /// Filler keywords accepted, and discarded, around the label
    pub fn consume<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.consumed_words = words
            .into_iter()
            .flat_map(|word| label_words(word.as_ref()))
            .collect();
        self
    }

    pub fn equals(mut self, required: bool) -> Self {
        self.equals = required;
        self
    }

    pub fn parens(mut self, wrapped: bool) -> Self {
        self.parens = wrapped;
        self
    }

    pub fn value(mut self, expr: Expr) -> Self {
        self.value = Some(expr);
        self
    }

    pub fn build(self) -> Grammar {
        let mut segments = Vec::with_capacity(5);

        let filler = (!self.consumed_words.is_empty()).then(|| {
            Expr::Sequence(
                self.consumed_words
                    .iter()
                    .map(|word| Expr::optional(Expr::Keywords(vec![word.clone()])))
                    .collect(),
            )
        });

        if let Some(filler) = &filler {
            segments.push(Segment {
                kind: SegmentKind::LeadingFiller,
                expr: filler.clone(),
                optional: true,
            });
        }

        let label = self.label.as_deref().map(label_words).filter(|w| !w.is_empty());
        if let Some(words) = label {
            segments.push(Segment {
                kind: SegmentKind::Label,
                expr: Expr::Keywords(words),
                optional: false,
            });
        }

        if let Some(filler) = filler {
            segments.push(Segment {
                kind: SegmentKind::TrailingFiller,
                expr: filler,
                optional: true,
            });
        }

        if self.equals {
            segments.push(Segment {
                kind: SegmentKind::Equals,
                expr: Expr::Equals,
                optional: false,
            });
        }

        let value = self.value.unwrap_or(Expr::Any);
        segments.push(Segment {
            kind: SegmentKind::Value,
            expr: if self.parens { Expr::parens(value) } else { value },
            optional: false,
        });

        Grammar { segments }
    }
}

/// Compiled clause grammar, immutable once built
#[derive(Debug, Clone, PartialEq)]
pub struct Grammar {
    segments: Vec<Segment>,
}

impl Grammar {
    pub fn builder() -> GrammarBuilder {
        GrammarBuilder::new()
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    pub fn value_expr(&self) -> Option<&Expr> {
        self.segments
            .iter()
            .find(|segment| segment.kind == SegmentKind::Value)
            .map(|segment| &segment.expr)
    }

    /// Match segments in order from the current position, returning the value
    ///
    /// On no match the stream is left where it was.
    pub fn match_stream(&self, stream: &mut TokenStream) -> Result<Option<RawValue>, GrammarError> {
        let saved = stream.checkpoint();
        let mut captured = None;

        for segment in &self.segments {
            let matched = match segment.kind {
                SegmentKind::Value => {
                    captured = segment.expr.capture(stream)?;
                    captured.is_some()
                }
                _ => segment.expr.eval(stream, &mut Vec::new())?,
            };

            if !matched && !segment.optional {
                stream.restore(saved);
                return Ok(None);
            }
        }

        Ok(captured)
    }

    /// Match the whole remaining stream
    pub fn match_all(&self, stream: &mut TokenStream) -> Result<Option<RawValue>, GrammarError> {
        let saved = stream.checkpoint();
        match self.match_stream(stream)? {
            Some(value) if stream.is_at_end() => Ok(Some(value)),
            Some(_) => {
                stream.restore(saved);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    /// Match up to a keyword that must come next, leaving the keyword and
    /// whatever follows it unconsumed
    pub fn match_before(
        &self,
        stream: &mut TokenStream,
        keyword: Keyword,
    ) -> Result<Option<RawValue>, GrammarError> {
        let saved = stream.checkpoint();
        match self.match_stream(stream)? {
            Some(value) if stream.current_token().is_keyword(keyword.as_str()) => Ok(Some(value)),
            Some(_) => {
                stream.restore(saved);
                Ok(None)
            }
            None => Ok(None),
        }
    }
}

impl fmt::Display for Grammar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, segment) in self.segments.iter().enumerate() {
            if index > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{}", segment.expr)?;
        }
        Ok(())
    }
}
