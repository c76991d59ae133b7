// Internal modules
pub mod config;
pub mod grammar;
pub mod lexical;
#[macro_use]
pub mod logging;
pub mod props;
pub mod tokens;
pub mod utils;

#[cfg(any(test, feature = "test-support"))]
pub mod testing;

// Re-export key types for library consumers
pub use props::{
    tidy_sql, Column, ColumnName, DataType, EnumDomain, EnumValue, Prop, PropError, PropKind,
    PropOptions, PropValue, Props, RawValue, Record, SqlEnum,
};
