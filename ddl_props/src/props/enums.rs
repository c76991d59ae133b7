//! Closed enumerations used by enum-valued clauses
//!
//! Rust enums describe a vocabulary through [`SqlEnum`]; descriptors work with
//! the type-erased [`EnumDomain`] (type name plus allowed members) and produce
//! [`EnumValue`]s, which convert back with [`EnumValue::to_enum`].

use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed SQL vocabulary with a canonical spelling per member
pub trait SqlEnum: Sized + Copy + 'static {
    const TYPE_NAME: &'static str;

    fn variants() -> &'static [Self];

    fn as_sql(&self) -> &'static str;

    /// Case-insensitive lookup by serialized form
    fn from_sql(text: &str) -> Option<Self> {
        let text = text.trim();
        Self::variants()
            .iter()
            .copied()
            .find(|variant| variant.as_sql().eq_ignore_ascii_case(text))
    }
}

/// Declare a fieldless enum implementing [`SqlEnum`]
///
/// ```
/// ddl_props::sql_enum! {
///     pub enum ScalingPolicy: "SCALING_POLICY" {
///         Standard => "STANDARD",
///         Economy => "ECONOMY",
///     }
/// }
///
/// use ddl_props::props::SqlEnum;
/// assert_eq!(ScalingPolicy::from_sql("economy"), Some(ScalingPolicy::Economy));
/// ```
#[macro_export]
macro_rules! sql_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident : $type_name:literal {
            $($(#[$variant_meta:meta])* $variant:ident => $sql:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
        $vis enum $name {
            $($(#[$variant_meta])* $variant),+
        }

        impl $crate::props::SqlEnum for $name {
            const TYPE_NAME: &'static str = $type_name;

            fn variants() -> &'static [Self] {
                &[$(Self::$variant),+]
            }

            fn as_sql(&self) -> &'static str {
                match self {
                    $(Self::$variant => $sql),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::props::SqlEnum::as_sql(self))
            }
        }
    };
}

crate::sql_enum! {
    /// Column data types accepted in column lists
    pub enum DataType: "DATA_TYPE" {
        Number => "NUMBER",
        Decimal => "DECIMAL",
        Numeric => "NUMERIC",
        Int => "INT",
        Integer => "INTEGER",
        BigInt => "BIGINT",
        SmallInt => "SMALLINT",
        TinyInt => "TINYINT",
        ByteInt => "BYTEINT",
        Float => "FLOAT",
        Float4 => "FLOAT4",
        Float8 => "FLOAT8",
        Double => "DOUBLE",
        Real => "REAL",
        Varchar => "VARCHAR",
        Char => "CHAR",
        Character => "CHARACTER",
        String => "STRING",
        Text => "TEXT",
        Binary => "BINARY",
        Varbinary => "VARBINARY",
        Boolean => "BOOLEAN",
        Date => "DATE",
        DateTime => "DATETIME",
        Time => "TIME",
        Timestamp => "TIMESTAMP",
        TimestampLtz => "TIMESTAMP_LTZ",
        TimestampNtz => "TIMESTAMP_NTZ",
        TimestampTz => "TIMESTAMP_TZ",
        Variant => "VARIANT",
        Object => "OBJECT",
        Array => "ARRAY",
        Geography => "GEOGRAPHY",
        Geometry => "GEOMETRY",
        Vector => "VECTOR",
    }
}

impl Serialize for DataType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_sql())
    }
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_sql(&text)
            .ok_or_else(|| serde::de::Error::custom(format!("unknown data type '{}'", text)))
    }
}

/// A member of some enumeration, by type name and canonical spelling
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct EnumValue {
    pub enum_type: String,
    pub value: String,
}

impl EnumValue {
    pub fn of<E: SqlEnum>(member: E) -> Self {
        Self {
            enum_type: E::TYPE_NAME.to_string(),
            value: member.as_sql().to_string(),
        }
    }

    /// Back to the typed member; `None` for a value of another enumeration
    pub fn to_enum<E: SqlEnum>(&self) -> Option<E> {
        if self.enum_type != E::TYPE_NAME {
            return None;
        }
        E::from_sql(&self.value)
    }
}

impl fmt::Display for EnumValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

/// Enumeration type identifier plus the members a clause accepts
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumDomain {
    enum_type: String,
    members: Vec<String>,
}

impl EnumDomain {
    /// Every member of `E`
    pub fn of<E: SqlEnum>() -> Self {
        Self::subset(E::variants())
    }

    /// Only the listed members of `E`, duplicates dropped
    pub fn subset<E: SqlEnum>(members: &[E]) -> Self {
        let mut spellings: Vec<String> = Vec::with_capacity(members.len());
        for member in members {
            let sql = member.as_sql();
            if !spellings.iter().any(|known| known == sql) {
                spellings.push(sql.to_string());
            }
        }

        Self {
            enum_type: E::TYPE_NAME.to_string(),
            members: spellings,
        }
    }

    pub fn enum_type(&self) -> &str {
        &self.enum_type
    }

    /// Canonical member spellings in declaration order
    pub fn members(&self) -> &[String] {
        &self.members
    }

    /// Case-insensitive membership lookup
    pub fn resolve(&self, raw: &str) -> Option<EnumValue> {
        let raw = raw.trim();
        self.members
            .iter()
            .find(|member| member.eq_ignore_ascii_case(raw))
            .map(|member| EnumValue {
                enum_type: self.enum_type.clone(),
                value: member.clone(),
            })
    }

    pub fn contains(&self, value: &EnumValue) -> bool {
        value.enum_type == self.enum_type && self.members.iter().any(|m| *m == value.value)
    }

    /// Members longest first, so a member never loses to its own prefix
    pub fn match_order(&self) -> Vec<&str> {
        let mut ordered: Vec<&str> = self.members.iter().map(String::as_str).collect();
        ordered.sort_by(|a, b| b.len().cmp(&a.len()));
        ordered
    }

    pub fn describe(&self) -> String {
        format!("one of {}", self.members.join(", "))
    }
}
