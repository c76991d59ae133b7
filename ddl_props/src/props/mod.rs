//! Typed, bidirectional property clauses
//!
//! [`Prop`] descriptors parse clause text into [`PropValue`]s and render them
//! back; [`Props`] groups descriptors into an ordered, named block.

pub mod collection;
pub mod enums;
pub mod error;
pub mod format;
pub mod prop;
pub mod value;

pub use crate::grammar::RawValue;
pub use collection::Props;
pub use enums::{DataType, EnumDomain, EnumValue, SqlEnum};
pub use error::PropError;
pub use format::tidy_sql;
pub use prop::{Prop, PropKind, PropOptions};
pub use value::{Column, ColumnName, PropValue, Record};
