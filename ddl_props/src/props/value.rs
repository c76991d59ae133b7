//! Typed domain values exchanged with callers

use super::enums::{DataType, EnumValue};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One entry of a column list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
    /// Precision, scale or length, e.g. `38, 2` for `NUMBER(38, 2)`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub type_args: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
            type_args: None,
            comment: None,
        }
    }

    pub fn with_type_args(mut self, args: impl Into<String>) -> Self {
        self.type_args = Some(args.into());
        self
    }

    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }
}

/// One entry of a column-name list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnName {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Domain value of a clause
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PropValue {
    Bool(bool),
    Int(i64),
    String(String),
    List(Vec<String>),
    Map(BTreeMap<String, String>),
    /// Result of a nested property set
    Nested(Record),
    Enum(EnumValue),
    EnumList(Vec<EnumValue>),
    Columns(Vec<Column>),
    ColumnNames(Vec<ColumnName>),
}

impl PropValue {
    pub fn shape_name(&self) -> &'static str {
        match self {
            Self::Bool(_) => "bool",
            Self::Int(_) => "int",
            Self::String(_) => "string",
            Self::List(_) => "list",
            Self::Map(_) => "map",
            Self::Nested(_) => "nested record",
            Self::Enum(_) => "enum",
            Self::EnumList(_) => "enum list",
            Self::Columns(_) => "columns",
            Self::ColumnNames(_) => "column names",
        }
    }

    pub fn string(text: impl Into<String>) -> Self {
        Self::String(text.into())
    }

    pub fn list<I, S>(items: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::List(items.into_iter().map(Into::into).collect())
    }

    pub fn map<I, K, V>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::Map(
            entries
                .into_iter()
                .map(|(key, value)| (key.into(), value.into()))
                .collect(),
        )
    }
}

impl From<bool> for PropValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PropValue {
    fn from(value: i64) -> Self {
        Self::Int(value)
    }
}

impl From<&str> for PropValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_string())
    }
}

impl From<String> for PropValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<EnumValue> for PropValue {
    fn from(value: EnumValue) -> Self {
        Self::Enum(value)
    }
}

/// Values keyed by clause name
///
/// A key may be present with no value, which means explicitly unset. Render
/// treats that the same as a missing key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    fields: BTreeMap<String, Option<PropValue>>,
}

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<PropValue>) -> Self {
        self.set(key, value);
        self
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<PropValue>) {
        self.fields.insert(key.into(), Some(value.into()));
    }

    /// Mark a key present but absent
    pub fn unset(&mut self, key: impl Into<String>) {
        self.fields.insert(key.into(), None);
    }

    pub fn get(&self, key: &str) -> Option<&PropValue> {
        self.fields.get(key).and_then(Option::as_ref)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<PropValue> {
        self.fields.remove(key).flatten()
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&PropValue>)> {
        self.fields
            .iter()
            .map(|(key, value)| (key.as_str(), value.as_ref()))
    }
}

impl<K: Into<String>> FromIterator<(K, PropValue)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, PropValue)>>(iter: I) -> Self {
        let mut record = Self::new();
        for (key, value) in iter {
            record.set(key, value);
        }
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_unset_reads_as_absent() {
        let mut record = Record::new().with("comment", "hello").with("enabled", true);
        record.unset("comment");

        assert!(record.contains_key("comment"));
        assert_eq!(record.get("comment"), None);
        assert_eq!(record.get("enabled"), Some(&PropValue::Bool(true)));
        assert_eq!(record.len(), 2);
    }

    #[test]
    fn test_record_from_iterator() {
        let record: Record = vec![("a", PropValue::Int(1)), ("b", PropValue::string("x"))]
            .into_iter()
            .collect();
        let keys: Vec<&str> = record.iter().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_serde_shape() {
        let record = Record::new()
            .with("tags", PropValue::map([("env", "prod")]))
            .with(
                "columns",
                PropValue::Columns(vec![Column::new("id", DataType::Int)]),
            );

        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["tags"]["map"]["env"], "prod");
        assert_eq!(json["columns"]["columns"][0]["data_type"], "INT");
        assert!(json["columns"]["columns"][0].get("comment").is_none());

        let back: Record = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
