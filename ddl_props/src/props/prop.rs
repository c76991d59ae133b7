//! Property descriptors
//!
//! A [`Prop`] pairs one clause shape with its conversion rules. The shape is
//! compiled into a [`Grammar`] at construction and never changes afterwards;
//! `parse`, `typecheck` and `render` dispatch on the closed [`PropKind`].

use super::collection::Props;
use super::enums::{DataType, EnumDomain, EnumValue, SqlEnum};
use super::error::PropError;
use super::format::{render_identifier, strip_outer_parens, tidy_sql};
use super::value::{Column, ColumnName, PropValue};
use crate::grammar::{
    canonical_label, primitives, ColumnMatch, Expr, Grammar, GrammarBuilder, GrammarError, Keyword,
    RawValue,
};
use crate::lexical::tokenize;
use crate::logging::config;
use crate::tokens::{quote_string, TokenStream};
use crate::{log_debug, log_error};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

/// Settings that refine a descriptor's clause shape
///
/// Unset fields keep the kind's defaults. Every descriptor gets its own
/// containers; nothing is shared between instances.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PropOptions {
    pub requires_equals: Option<bool>,
    pub wrapped_in_parens: Option<bool>,
    pub alternate_tokens: Vec<String>,
    pub consumed_words: Vec<String>,
}

impl PropOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn equals(mut self, required: bool) -> Self {
        self.requires_equals = Some(required);
        self
    }

    pub fn parens(mut self, wrapped: bool) -> Self {
        self.wrapped_in_parens = Some(wrapped);
        self
    }

    pub fn alternate_tokens<I, S>(mut self, tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.alternate_tokens = tokens.into_iter().map(Into::into).collect();
        self
    }

    pub fn consume<I, S>(mut self, words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.consumed_words = words.into_iter().map(Into::into).collect();
        self
    }
}

/// The clause shapes a descriptor can take
#[derive(Debug, Clone)]
pub enum PropKind {
    Bool,
    Int,
    String,
    /// Bare label, true when present
    Flag,
    Identifier,
    IdentifierList,
    StringList,
    /// Parenthesized block parsed by a nested collection
    PropSet(Props),
    /// `[WITH] TAG (k = 'v', ...)`
    Tags,
    /// Parenthesized `k = v` pairs, kept as written
    Dict,
    Enum(EnumDomain),
    EnumList(EnumDomain),
    /// Bare enumeration member with no label
    EnumFlag(EnumDomain),
    /// Everything up to end of input
    Query,
    /// Text up to a top-level `AS`
    Expression,
    /// `AT | BEFORE (KEY => value)`
    TimeTravel,
    /// `IF (EXISTS (...))`
    AlertCondition,
    /// Label-less `KEY = value` pairs
    SessionParameters,
    Columns,
    ColumnNames,
}

impl PropKind {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Bool => "bool",
            Self::Int => "int",
            Self::String => "string",
            Self::Flag => "flag",
            Self::Identifier => "identifier",
            Self::IdentifierList => "identifier list",
            Self::StringList => "string list",
            Self::PropSet(_) => "property set",
            Self::Tags => "tags",
            Self::Dict => "dict",
            Self::Enum(_) => "enum",
            Self::EnumList(_) => "enum list",
            Self::EnumFlag(_) => "enum flag",
            Self::Query => "query",
            Self::Expression => "expression",
            Self::TimeTravel => "time travel",
            Self::AlertCondition => "alert condition",
            Self::SessionParameters => "session parameters",
            Self::Columns => "columns",
            Self::ColumnNames => "column names",
        }
    }

    /// Domain value shape this kind produces and renders
    pub fn value_shape(&self) -> &'static str {
        match self {
            Self::Bool | Self::Flag => "bool",
            Self::Int => "int",
            Self::String | Self::Identifier | Self::Query | Self::Expression => "string",
            Self::AlertCondition => "string",
            Self::IdentifierList | Self::StringList => "list",
            Self::PropSet(_) => "nested record",
            Self::Tags | Self::Dict | Self::SessionParameters => "map",
            Self::TimeTravel => "single-entry map",
            Self::Enum(_) | Self::EnumFlag(_) => "enum",
            Self::EnumList(_) => "enum list",
            Self::Columns => "columns",
            Self::ColumnNames => "column names",
        }
    }

    /// Whether rendering a present value is supported at all
    pub fn can_render(&self) -> bool {
        !matches!(
            self,
            Self::IdentifierList
                | Self::PropSet(_)
                | Self::Dict
                | Self::SessionParameters
                | Self::ColumnNames
        )
    }

    fn default_equals(&self) -> bool {
        matches!(
            self,
            Self::Bool
                | Self::Int
                | Self::String
                | Self::Identifier
                | Self::IdentifierList
                | Self::StringList
                | Self::PropSet(_)
                | Self::Dict
                | Self::Enum(_)
                | Self::EnumList(_)
        )
    }

    fn default_parens(&self) -> bool {
        matches!(
            self,
            Self::Tags | Self::Dict | Self::TimeTravel | Self::AlertCondition
        )
    }

    fn default_consumed_words(&self) -> Vec<String> {
        match self {
            Self::Tags => vec![Keyword::With.as_str().to_string()],
            _ => Vec::new(),
        }
    }

    /// Keyword that must follow the clause, left for the caller to consume
    fn trailing_keyword(&self) -> Option<Keyword> {
        match self {
            Self::Expression => Some(Keyword::As),
            _ => None,
        }
    }

    fn value_expr(&self) -> Expr {
        match self {
            Self::Bool | Self::Int | Self::String => Expr::Any,
            // The label itself is the value; see `compile_grammar`.
            Self::Flag => Expr::Any,
            Self::Identifier => Expr::QualifiedIdentifier,
            Self::IdentifierList => Expr::delimited(Expr::QualifiedIdentifier),
            Self::StringList => Expr::FirstOf(vec![
                Expr::parens(Expr::delimited(Expr::Any)),
                Expr::delimited(Expr::Any),
            ]),
            Self::PropSet(_) | Self::Columns | Self::ColumnNames => Expr::BalancedText,
            Self::Tags => Expr::delimited(Expr::Sequence(vec![
                Expr::FirstOf(vec![Expr::QualifiedName, Expr::Scalar]),
                Expr::Equals,
                Expr::Scalar,
            ])),
            Self::Dict => {
                Expr::delimited(Expr::Sequence(vec![Expr::Any, Expr::Equals, Expr::Any]))
            }
            Self::Enum(domain) => Expr::FirstOf(member_alternatives(domain, true)),
            Self::EnumList(domain) => {
                Expr::delimited(Expr::FirstOf(member_alternatives(domain, true)))
            }
            Self::EnumFlag(domain) => Expr::FirstOf(member_alternatives(domain, false)),
            Self::Query => Expr::RemainingText,
            Self::Expression => Expr::TextUntil(Keyword::As),
            Self::TimeTravel => {
                Expr::Sequence(vec![Expr::Any, Expr::Arrow, Expr::RawUntilCloseParen])
            }
            Self::AlertCondition => Expr::Sequence(vec![
                Expr::Keywords(vec![Keyword::Exists.as_str().to_string()]),
                Expr::BalancedText,
            ]),
            Self::SessionParameters => {
                Expr::repeated(Expr::Sequence(vec![Expr::Any, Expr::Equals, Expr::Any]))
            }
        }
    }
}

/// Exact member matches first, longest first, then optionally any token so
/// that non-members reach typecheck and fail there with the member list
fn member_alternatives(domain: &EnumDomain, with_fallback: bool) -> Vec<Expr> {
    let mut alternatives: Vec<Expr> = domain.match_order().into_iter().map(Expr::literal).collect();
    if with_fallback {
        alternatives.push(Expr::Any);
    }
    alternatives
}

/// Immutable descriptor for one clause shape
#[derive(Debug, Clone)]
pub struct Prop {
    label: Option<String>,
    requires_equals: bool,
    wrapped_in_parens: bool,
    alternate_tokens: BTreeSet<String>,
    consumed_words: Vec<String>,
    kind: PropKind,
    grammar: Grammar,
}

impl Prop {
    fn new(label: Option<&str>, kind: PropKind) -> Self {
        let label = label.map(canonical_label).filter(|label| !label.is_empty());
        let requires_equals = kind.default_equals();
        let wrapped_in_parens = kind.default_parens();
        let consumed_words = kind.default_consumed_words();
        let grammar = compile_grammar(
            label.as_deref(),
            requires_equals,
            wrapped_in_parens,
            &consumed_words,
            &kind,
        );

        Self {
            label,
            requires_equals,
            wrapped_in_parens,
            alternate_tokens: BTreeSet::new(),
            consumed_words,
            kind,
            grammar,
        }
    }

    // === CATALOGUE ===

    pub fn boolean(label: &str) -> Self {
        Self::new(Some(label), PropKind::Bool)
    }

    pub fn integer(label: &str) -> Self {
        Self::new(Some(label), PropKind::Int)
    }

    pub fn string(label: &str) -> Self {
        Self::new(Some(label), PropKind::String)
    }

    pub fn flag(label: &str) -> Self {
        Self::new(Some(label), PropKind::Flag)
    }

    pub fn identifier(label: &str) -> Self {
        Self::new(Some(label), PropKind::Identifier)
    }

    pub fn identifier_list(label: &str) -> Self {
        Self::new(Some(label), PropKind::IdentifierList)
    }

    pub fn string_list(label: &str) -> Self {
        Self::new(Some(label), PropKind::StringList)
    }

    pub fn prop_set(label: &str, props: Props) -> Self {
        Self::new(Some(label), PropKind::PropSet(props))
    }

    pub fn tags() -> Self {
        Self::new(Some(Keyword::Tag.as_str()), PropKind::Tags)
    }

    pub fn dict(label: &str) -> Self {
        Self::new(Some(label), PropKind::Dict)
    }

    pub fn enumeration(label: &str, domain: EnumDomain) -> Self {
        Self::new(Some(label), PropKind::Enum(domain))
    }

    pub fn enum_list(label: &str, domain: EnumDomain) -> Self {
        Self::new(Some(label), PropKind::EnumList(domain))
    }

    pub fn enum_flag(domain: EnumDomain) -> Self {
        Self::new(None, PropKind::EnumFlag(domain))
    }

    pub fn query(label: &str) -> Self {
        Self::new(Some(label), PropKind::Query)
    }

    pub fn expression(label: &str) -> Self {
        Self::new(Some(label), PropKind::Expression)
    }

    pub fn time_travel(label: &str) -> Self {
        Self::new(Some(label), PropKind::TimeTravel)
    }

    pub fn alert_condition() -> Self {
        Self::new(Some(Keyword::If.as_str()), PropKind::AlertCondition)
    }

    pub fn session_parameters() -> Self {
        Self::new(None, PropKind::SessionParameters)
    }

    pub fn columns() -> Self {
        Self::new(None, PropKind::Columns)
    }

    pub fn column_names() -> Self {
        Self::new(None, PropKind::ColumnNames)
    }

    /// Refine the clause shape, recompiling the grammar
    pub fn with_options(self, options: PropOptions) -> Self {
        let requires_equals = options.requires_equals.unwrap_or(self.requires_equals);
        let wrapped_in_parens = options.wrapped_in_parens.unwrap_or(self.wrapped_in_parens);
        let consumed_words = if options.consumed_words.is_empty() {
            self.consumed_words
        } else {
            options.consumed_words
        };
        let mut alternate_tokens = self.alternate_tokens;
        alternate_tokens.extend(
            options
                .alternate_tokens
                .iter()
                .map(|token| token.to_lowercase()),
        );

        let grammar = compile_grammar(
            self.label.as_deref(),
            requires_equals,
            wrapped_in_parens,
            &consumed_words,
            &self.kind,
        );

        Self {
            label: self.label,
            requires_equals,
            wrapped_in_parens,
            alternate_tokens,
            consumed_words,
            kind: self.kind,
            grammar,
        }
    }

    // === ACCESSORS ===

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    /// Label, or the kind name for positional clauses
    pub fn display_name(&self) -> &str {
        self.label.as_deref().unwrap_or_else(|| self.kind.name())
    }

    pub fn requires_equals(&self) -> bool {
        self.requires_equals
    }

    pub fn wrapped_in_parens(&self) -> bool {
        self.wrapped_in_parens
    }

    /// Lowercase synonyms for the label; recorded but not matched
    pub fn alternate_tokens(&self) -> &BTreeSet<String> {
        &self.alternate_tokens
    }

    pub fn consumed_words(&self) -> &[String] {
        &self.consumed_words
    }

    pub fn kind(&self) -> &PropKind {
        &self.kind
    }

    pub fn grammar(&self) -> &Grammar {
        &self.grammar
    }

    // === PARSE ===

    /// Parse a complete clause into its domain value
    ///
    /// An expression clause stops before its trailing `AS`; the rest of the
    /// text belongs to the enclosing statement.
    pub fn parse(&self, text: &str) -> Result<PropValue, PropError> {
        let result = self.parse_clause(text);
        if let Err(err) = &result {
            log_error!(err.error_code(), "Clause parse failed",
                "label" => self.display_name(),
                "error" => err
            );
        }
        result
    }

    fn parse_clause(&self, text: &str) -> Result<PropValue, PropError> {
        let mut stream = tokenize(text)?;
        let matched = match self.kind.trailing_keyword() {
            Some(keyword) => self.grammar.match_before(&mut stream, keyword)?,
            None => self.grammar.match_all(&mut stream)?,
        };
        let raw = matched.ok_or_else(|| {
            PropError::grammar_mismatch(self.display_name(), text, Some(stream.furthest_span()))
        })?;
        self.typecheck(raw)
    }

    /// Match this clause at the stream position, for block parsing
    ///
    /// `Ok(None)` means the clause is not here and the stream is unchanged.
    pub(crate) fn match_stream(&self, stream: &mut TokenStream) -> Result<Option<PropValue>, PropError> {
        if config::log_match_attempts() {
            log_debug!("Trying clause grammar",
                "label" => self.display_name(),
                "grammar" => &self.grammar,
                "offset" => stream.current_offset()
            );
        }

        match self.grammar.match_stream(stream)? {
            Some(raw) => self.typecheck(raw).map(Some),
            None => Ok(None),
        }
    }

    // === TYPECHECK ===

    /// Convert a captured value into the domain value for this kind
    pub fn typecheck(&self, raw: RawValue) -> Result<PropValue, PropError> {
        if config::log_typecheck_details() {
            log_debug!("Typechecking clause value",
                "label" => self.display_name(),
                "kind" => self.kind.name(),
                "raw" => &raw
            );
        }

        match &self.kind {
            PropKind::Bool => {
                let text = self.expect_text(&raw)?;
                match text.to_ascii_lowercase().as_str() {
                    "true" => Ok(PropValue::Bool(true)),
                    "false" => Ok(PropValue::Bool(false)),
                    _ => Err(self.invalid(text, "TRUE or FALSE")),
                }
            }
            PropKind::Int => {
                let text = self.expect_text(&raw)?;
                text.trim()
                    .parse::<i64>()
                    .map(PropValue::Int)
                    .map_err(|_| self.invalid(text, "an integer"))
            }
            PropKind::String | PropKind::Query => {
                Ok(PropValue::String(self.expect_text(&raw)?.to_string()))
            }
            PropKind::Flag => Ok(PropValue::Bool(true)),
            PropKind::Identifier => Ok(PropValue::String(raw.flatten().join("."))),
            PropKind::IdentifierList => Ok(PropValue::List(
                raw.into_items()
                    .into_iter()
                    .map(|parts| parts.flatten().join("."))
                    .collect(),
            )),
            PropKind::StringList => Ok(PropValue::List(
                raw.flatten()
                    .into_iter()
                    .map(|item| item.trim().to_string())
                    .collect(),
            )),
            PropKind::PropSet(props) => {
                let text = self.expect_text(&raw)?;
                props
                    .parse_block(strip_outer_parens(text))
                    .map(PropValue::Nested)
            }
            PropKind::Tags | PropKind::Dict | PropKind::SessionParameters => {
                self.pairs(raw).map(PropValue::Map)
            }
            PropKind::Enum(domain) | PropKind::EnumFlag(domain) => {
                let text = self.expect_text(&raw)?;
                self.resolve_member(domain, text).map(PropValue::Enum)
            }
            PropKind::EnumList(domain) => raw
                .flatten()
                .iter()
                .map(|item| self.resolve_member(domain, item))
                .collect::<Result<Vec<_>, _>>()
                .map(PropValue::EnumList),
            PropKind::Expression => Ok(PropValue::String(self.expect_text(&raw)?.trim().to_string())),
            PropKind::TimeTravel => {
                let rendered = raw.to_string();
                match <[String; 2]>::try_from(raw.flatten()) {
                    Ok([key, value]) => Ok(PropValue::Map(BTreeMap::from([(key, value)]))),
                    Err(_) => Err(self.invalid(rendered, "KEY => value")),
                }
            }
            PropKind::AlertCondition => {
                let text = self.expect_text(&raw)?;
                Ok(PropValue::String(strip_outer_parens(text).trim().to_string()))
            }
            PropKind::Columns => {
                let text = self.expect_text(&raw)?;
                self.column_matches(text, true)?
                    .into_iter()
                    .map(|column| self.to_column(column))
                    .collect::<Result<Vec<_>, _>>()
                    .map(PropValue::Columns)
            }
            PropKind::ColumnNames => {
                let text = self.expect_text(&raw)?;
                let names = self
                    .column_matches(text, false)?
                    .into_iter()
                    .map(|column| ColumnName {
                        name: column.name,
                        comment: column.comment,
                    })
                    .collect();
                Ok(PropValue::ColumnNames(names))
            }
        }
    }

    fn invalid(&self, value: impl Into<String>, expected: &str) -> PropError {
        PropError::invalid_value(self.display_name(), value, expected)
    }

    fn expect_text<'a>(&self, raw: &'a RawValue) -> Result<&'a str, PropError> {
        raw.as_text()
            .ok_or_else(|| self.invalid(raw.to_string(), "a single value"))
    }

    fn resolve_member(&self, domain: &EnumDomain, text: &str) -> Result<EnumValue, PropError> {
        domain.resolve(text).ok_or_else(|| PropError::InvalidValue {
            label: self.display_name().to_string(),
            value: text.to_string(),
            expected: domain.describe(),
            allowed: domain.members().to_vec(),
        })
    }

    /// Alternating keys and values zipped into a map; odd counts are rejected
    fn pairs(&self, raw: RawValue) -> Result<BTreeMap<String, String>, PropError> {
        let rendered = raw.to_string();
        let items = raw.flatten();
        if items.len() % 2 != 0 {
            return Err(self.invalid(rendered, "key/value pairs"));
        }

        let mut map = BTreeMap::new();
        let mut items = items.into_iter();
        while let (Some(key), Some(value)) = (items.next(), items.next()) {
            map.insert(key, value);
        }
        Ok(map)
    }

    fn column_matches(&self, text: &str, typed: bool) -> Result<Vec<ColumnMatch>, PropError> {
        let inner = strip_outer_parens(text);
        let mut stream = tokenize(inner)?;
        if stream.is_at_end() {
            return Ok(Vec::new());
        }

        let entry: fn(&mut TokenStream) -> Result<Option<ColumnMatch>, GrammarError> = if typed {
            primitives::column_definition
        } else {
            primitives::column_name_entry
        };

        match primitives::delimited(&mut stream, entry)? {
            Some(columns) if stream.is_at_end() => Ok(columns),
            _ => Err(PropError::grammar_mismatch(self.display_name(), inner, None)),
        }
    }

    fn to_column(&self, column: ColumnMatch) -> Result<Column, PropError> {
        let data_type = column.data_type.unwrap_or_default();
        let data_type = DataType::from_sql(&data_type).ok_or_else(|| PropError::InvalidValue {
            label: format!("{}.{}", self.display_name(), column.name),
            value: data_type.clone(),
            expected: "a column data type".to_string(),
            allowed: DataType::variants()
                .iter()
                .map(|variant| variant.as_sql().to_string())
                .collect(),
        })?;

        Ok(Column {
            name: column.name,
            data_type,
            type_args: column.type_args,
            comment: column.comment,
        })
    }

    // === RENDER ===

    /// Render a value as canonical clause text; `None` renders nothing
    pub fn render(&self, value: Option<&PropValue>) -> Result<String, PropError> {
        let Some(value) = value else {
            return Ok(String::new());
        };

        let fragment = self.render_value(value)?;
        if config::log_rendered_fragments() {
            log_debug!("Rendered clause",
                "label" => self.display_name(),
                "fragment" => &fragment
            );
        }
        Ok(fragment)
    }

    fn render_value(&self, value: &PropValue) -> Result<String, PropError> {
        let label = self.label.as_deref().unwrap_or("");
        let eq = if self.requires_equals { "=" } else { "" };

        let fragment = match (&self.kind, value) {
            (PropKind::Bool, PropValue::Bool(flag)) => {
                tidy_sql([label, eq, if *flag { "TRUE" } else { "FALSE" }])
            }
            (PropKind::Int, PropValue::Int(number)) => tidy_sql([label, eq, number.to_string().as_str()]),
            (PropKind::String, PropValue::String(text)) => tidy_sql([label, eq, quote_string(text).as_str()]),
            (PropKind::Flag, PropValue::Bool(present)) => {
                if *present {
                    label.to_string()
                } else {
                    String::new()
                }
            }
            (PropKind::Identifier, PropValue::String(name)) => tidy_sql([label, eq, name.as_str()]),
            (PropKind::StringList, PropValue::List(items)) => {
                if items.is_empty() {
                    return Ok(String::new());
                }
                tidy_sql([label, eq, format!("({})", items.join(", ")).as_str()])
            }
            (PropKind::Tags, PropValue::Map(tags)) => {
                if tags.is_empty() {
                    return Ok(String::new());
                }
                let pairs: Vec<String> = tags
                    .iter()
                    .map(|(key, value)| format!("{} = {}", key, quote_string(value)))
                    .collect();
                tidy_sql([label, eq, format!("({})", pairs.join(", ")).as_str()])
            }
            (PropKind::Enum(domain), PropValue::Enum(member)) => {
                self.check_member(domain, member)?;
                tidy_sql([label, eq, member.value.as_str()])
            }
            (PropKind::EnumList(domain), PropValue::EnumList(members)) => {
                if members.is_empty() {
                    return Ok(String::new());
                }
                for member in members {
                    self.check_member(domain, member)?;
                }
                let joined = members
                    .iter()
                    .map(|member| member.value.as_str())
                    .collect::<Vec<_>>()
                    .join(", ");
                let values = if self.wrapped_in_parens {
                    format!("({})", joined)
                } else {
                    joined
                };
                tidy_sql([label, eq, values.as_str()])
            }
            (PropKind::EnumFlag(domain), PropValue::Enum(member)) => {
                self.check_member(domain, member)?;
                member.value.clone()
            }
            (PropKind::Query | PropKind::Expression, PropValue::String(text)) => {
                tidy_sql([label, eq, text.as_str()])
            }
            (PropKind::TimeTravel, PropValue::Map(entry)) if entry.len() == 1 => {
                let clause: Vec<String> = entry
                    .iter()
                    .map(|(key, value)| format!("({} => {})", key, value))
                    .collect();
                tidy_sql([label, eq, clause.concat().as_str()])
            }
            (PropKind::AlertCondition, PropValue::String(condition)) => {
                format!("{}(EXISTS( {} ))", label, condition)
            }
            (PropKind::Columns, PropValue::Columns(columns)) => {
                let rendered: Vec<String> = columns.iter().map(render_column).collect();
                tidy_sql([label, eq, format!("({})", rendered.join(", ")).as_str()])
            }
            (kind, _) if !kind.can_render() => {
                return Err(PropError::RenderUnsupported {
                    label: self.display_name().to_string(),
                    kind: kind.name(),
                });
            }
            (kind, value) => {
                return Err(PropError::ValueShape {
                    label: self.display_name().to_string(),
                    expected: kind.value_shape(),
                    found: value.shape_name(),
                });
            }
        };

        Ok(fragment)
    }

    fn check_member(&self, domain: &EnumDomain, member: &EnumValue) -> Result<(), PropError> {
        if domain.contains(member) {
            Ok(())
        } else {
            Err(PropError::InvalidValue {
                label: self.display_name().to_string(),
                value: member.value.clone(),
                expected: domain.describe(),
                allowed: domain.members().to_vec(),
            })
        }
    }
}

fn compile_grammar(
    label: Option<&str>,
    requires_equals: bool,
    wrapped_in_parens: bool,
    consumed_words: &[String],
    kind: &PropKind,
) -> Grammar {
    let builder = GrammarBuilder::new().consume(consumed_words);
    match (kind, label) {
        (PropKind::Flag, Some(label)) => builder.value(Expr::literal(label)).build(),
        _ => builder
            .label(label)
            .equals(requires_equals)
            .parens(wrapped_in_parens)
            .value(kind.value_expr())
            .build(),
    }
}

fn render_column(column: &Column) -> String {
    let comment = column
        .comment
        .as_deref()
        .map(|comment| format!(" COMMENT {}", quote_string(comment)))
        .unwrap_or_default();
    let type_args = column
        .type_args
        .as_deref()
        .map(|args| format!("({})", args))
        .unwrap_or_default();
    format!(
        "{} {}{}{}",
        render_identifier(&column.name),
        column.data_type,
        type_args,
        comment
    )
}

impl fmt::Display for Prop {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}('{}')", self.kind.name(), self.display_name())
    }
}
