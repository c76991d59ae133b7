//! Named, ordered collections of property descriptors

use super::error::PropError;
use super::format::tidy_sql;
use super::prop::Prop;
use super::value::Record;
use crate::grammar::primitives;
use crate::lexical::tokenize;
use crate::logging::codes;
use crate::{log_error, log_success};

/// Ordered mapping from clause key to descriptor
///
/// Declaration order is render order. Keys are unique.
#[derive(Debug, Clone, Default)]
pub struct Props {
    name: Option<String>,
    start_token: Option<String>,
    entries: Vec<(String, Prop)>,
}

impl Props {
    pub fn new<I, K>(entries: I) -> Result<Self, PropError>
    where
        I: IntoIterator<Item = (K, Prop)>,
        K: Into<String>,
    {
        let mut collected: Vec<(String, Prop)> = Vec::new();
        for (key, prop) in entries {
            let key = key.into();
            if collected.iter().any(|(existing, _)| *existing == key) {
                log_error!(codes::collection::DUPLICATE_KEY, "Duplicate property key",
                    "key" => &key
                );
                return Err(PropError::DuplicateKey { key });
            }
            collected.push((key, prop));
        }

        Ok(Self {
            name: None,
            start_token: None,
            entries: collected,
        })
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Introductory text accepted, and skipped, before the first clause
    pub fn with_start_token(mut self, token: impl Into<String>) -> Self {
        self.start_token = Some(token.into());
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn start_token(&self) -> Option<&str> {
        self.start_token.as_deref()
    }

    pub fn get(&self, key: &str) -> Option<&Prop> {
        self.entries
            .iter()
            .find(|(existing, _)| existing == key)
            .map(|(_, prop)| prop)
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(key, _)| key.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Prop)> {
        self.entries.iter().map(|(key, prop)| (key.as_str(), prop))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or("property block")
    }

    /// Render every populated clause in declaration order
    ///
    /// Missing and unset keys are skipped. A clause kind that cannot render
    /// fails the whole call.
    pub fn render(&self, record: &Record) -> Result<String, PropError> {
        let mut fragments = Vec::with_capacity(self.entries.len());
        for (key, prop) in &self.entries {
            if let Some(value) = record.get(key) {
                fragments.push(prop.render(Some(value))?);
            }
        }
        Ok(tidy_sql(fragments))
    }

    /// Parse a block of clauses into a record
    ///
    /// Clauses may appear in any order, separated by commas or whitespace,
    /// and each descriptor matches at most once.
    pub fn parse(&self, text: &str) -> Result<Record, PropError> {
        let result = self.parse_block(text);
        match &result {
            Ok(record) => {
                log_success!(codes::success::PROPS_PARSED, "Property block parsed",
                    "block" => self.display_name(),
                    "clauses" => record.len()
                );
            }
            Err(err) => {
                log_error!(err.error_code(), "Property block parse failed",
                    "block" => self.display_name(),
                    "error" => err
                );
            }
        }
        result
    }

    pub(crate) fn parse_block(&self, text: &str) -> Result<Record, PropError> {
        let mut stream = tokenize(text)?;
        if let Some(token) = &self.start_token {
            primitives::literal_text(&mut stream, token);
        }

        let mut record = Record::new();
        let mut matched = vec![false; self.entries.len()];

        while !stream.is_at_end() {
            let before = stream.checkpoint();
            let mut progressed = false;

            for (index, (key, prop)) in self.entries.iter().enumerate() {
                if matched[index] {
                    continue;
                }
                if let Some(value) = prop.match_stream(&mut stream)? {
                    if stream.checkpoint() == before {
                        continue;
                    }
                    record.set(key.clone(), value);
                    matched[index] = true;
                    progressed = true;
                    break;
                }
            }

            if !progressed {
                let remaining = stream.slice(stream.current_offset(), text.len());
                return Err(PropError::grammar_mismatch(
                    self.display_name(),
                    remaining,
                    Some(stream.current_span()),
                ));
            }

            primitives::comma(&mut stream);
        }

        Ok(record)
    }
}
