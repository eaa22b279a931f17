//! SQL data types for column declarations.

use core::fmt;
use std::fmt::Write;

/// The declared SQL type of a column.
///
/// Used by typed column declarations (`<name> <type>`) inside CREATE TABLE.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DataType {
    /// Small integer (2 bytes).
    Smallint,
    /// Integer (4 bytes).
    Integer,
    /// Big integer (8 bytes).
    Bigint,
    /// Real (4-byte float).
    Real,
    /// Double precision (8-byte float).
    Double,
    /// Decimal with optional precision and scale.
    Decimal {
        /// Total number of digits.
        precision: Option<u16>,
        /// Number of digits after the decimal point.
        scale: Option<u16>,
    },
    /// Fixed-length character string.
    Char(Option<u32>),
    /// Variable-length character string.
    Varchar(Option<u32>),
    /// Unbounded text.
    Text,
    /// Binary large object.
    Blob,
    /// Date.
    Date,
    /// Time of day.
    Time,
    /// Timestamp.
    Timestamp,
    /// Boolean.
    Boolean,
    /// Any other type, rendered verbatim (e.g. `"NUMBER(10)"` or `"JSONB"`).
    Custom(String),
}

impl DataType {
    fn keyword(&self) -> &str {
        match self {
            Self::Smallint => "SMALLINT",
            Self::Integer => "INTEGER",
            Self::Bigint => "BIGINT",
            Self::Real => "REAL",
            Self::Double => "DOUBLE",
            Self::Decimal { .. } => "DECIMAL",
            Self::Char(_) => "CHAR",
            Self::Varchar(_) => "VARCHAR",
            Self::Text => "TEXT",
            Self::Blob => "BLOB",
            Self::Date => "DATE",
            Self::Time => "TIME",
            Self::Timestamp => "TIMESTAMP",
            Self::Boolean => "BOOLEAN",
            Self::Custom(name) => name,
        }
    }

    /// Appends the SQL spelling of the type, including its length or
    /// precision when one is set.
    pub fn write_sql(&self, out: &mut String) {
        out.push_str(self.keyword());
        // Writing into a String cannot fail.
        let _ = match self {
            Self::Decimal {
                precision: Some(p),
                scale: Some(s),
            } => write!(out, "({p}, {s})"),
            Self::Decimal {
                precision: Some(p),
                scale: None,
            } => write!(out, "({p})"),
            Self::Char(Some(n)) | Self::Varchar(Some(n)) => write!(out, "({n})"),
            _ => Ok(()),
        };
    }

    /// Returns the SQL spelling of the type.
    #[must_use]
    pub fn to_sql(&self) -> String {
        let mut sql = String::new();
        self.write_sql(&mut sql);
        sql
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_sql())
    }
}
