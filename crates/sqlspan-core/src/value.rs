//! Application values, wire values and field kinds.
//!
//! A backend sits between two value worlds: the application-level values an
//! ORM model holds ([`Value`]) and the shapes the storage engine accepts and
//! returns ([`WireValue`]). Which translation applies is decided by the
//! logical [`FieldKind`] of the column, not by the Rust type of the value.

use std::fmt;

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::expr::SqlExpr;

/// The portable semantic type the host layer associates with a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldKind {
    /// Calendar date.
    Date,
    /// Date and time of day.
    DateTime,
    /// Fixed-point decimal.
    Decimal,
    /// Time of day.
    Time,
    /// Raw bytes.
    Binary,
    /// UUID.
    Uuid,
    /// Any kind without dialect-specific handling.
    Other,
}

impl FieldKind {
    /// Returns the ORM field name for this kind.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Date => "DateField",
            Self::DateTime => "DateTimeField",
            Self::Decimal => "DecimalField",
            Self::Time => "TimeField",
            Self::Binary => "BinaryField",
            Self::Uuid => "UUIDField",
            Self::Other => "Field",
        }
    }
}

impl fmt::Display for FieldKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An application-level value, as held by a model instance.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// NULL.
    Null,
    /// Boolean.
    Bool(bool),
    /// 64-bit integer.
    Int(i64),
    /// 64-bit float.
    Float(f64),
    /// Text.
    Text(String),
    /// Calendar date.
    Date(NaiveDate),
    /// Timestamp without a time zone.
    DateTime(NaiveDateTime),
    /// Timestamp attached to a time zone.
    DateTimeTz(DateTime<Tz>),
    /// Time of day.
    Time(NaiveTime),
    /// Fixed-point decimal.
    Decimal(Decimal),
    /// Raw bytes.
    Bytes(Vec<u8>),
    /// UUID.
    Uuid(Uuid),
    /// A deferred SQL expression evaluated by the storage engine.
    Expression(SqlExpr),
}

impl Value {
    /// Returns true for [`Value::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Self::Bool(v)
    }
}

impl From<i64> for Value {
    fn from(v: i64) -> Self {
        Self::Int(v)
    }
}

impl From<i32> for Value {
    fn from(v: i32) -> Self {
        Self::Int(i64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Self::Float(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Self::Text(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::Text(String::from(v))
    }
}

impl From<NaiveDate> for Value {
    fn from(v: NaiveDate) -> Self {
        Self::Date(v)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(v: NaiveDateTime) -> Self {
        Self::DateTime(v)
    }
}

impl From<DateTime<Tz>> for Value {
    fn from(v: DateTime<Tz>) -> Self {
        Self::DateTimeTz(v)
    }
}

impl From<NaiveTime> for Value {
    fn from(v: NaiveTime) -> Self {
        Self::Time(v)
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::Decimal(v)
    }
}

impl From<Vec<u8>> for Value {
    fn from(v: Vec<u8>) -> Self {
        Self::Bytes(v)
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Bytes(v.to_vec())
    }
}

impl From<Uuid> for Value {
    fn from(v: Uuid) -> Self {
        Self::Uuid(v)
    }
}

impl From<SqlExpr> for Value {
    fn from(v: SqlExpr) -> Self {
        Self::Expression(v)
    }
}

impl<T: Into<Self>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

/// Input of the datetime encoder.
#[derive(Debug, Clone, PartialEq)]
pub enum DateTimeValue {
    /// A wall-clock timestamp with no zone.
    Naive(NaiveDateTime),
    /// A timestamp attached to a time zone.
    Aware(DateTime<Tz>),
    /// A deferred expression; the storage engine computes the value.
    Expression(SqlExpr),
}

impl From<NaiveDateTime> for DateTimeValue {
    fn from(v: NaiveDateTime) -> Self {
        Self::Naive(v)
    }
}

impl From<DateTime<Tz>> for DateTimeValue {
    fn from(v: DateTime<Tz>) -> Self {
        Self::Aware(v)
    }
}

impl From<DateTime<Utc>> for DateTimeValue {
    fn from(v: DateTime<Utc>) -> Self {
        Self::Aware(v.with_timezone(&Tz::UTC))
    }
}

impl From<SqlExpr> for DateTimeValue {
    fn from(v: SqlExpr) -> Self {
        Self::Expression(v)
    }
}

/// A value in the shape the storage engine transmits.
#[derive(Debug, Clone, PartialEq)]
pub enum WireValue {
    /// NULL.
    Null,
    /// BOOL.
    Bool(bool),
    /// INT64.
    Int64(i64),
    /// FLOAT64.
    Float64(f64),
    /// Plain STRING.
    String(String),
    /// DATE rendered as `YYYY-MM-DD`.
    Date(String),
    /// TIMESTAMP rendered as ISO-8601 text ending in `Z`.
    Timestamp(String),
    /// TIMESTAMP already decoded by a client library; may carry nanoseconds.
    UtcTimestamp(DateTime<Utc>),
    /// BYTES as base64 text.
    Bytes(String),
    /// A deferred expression passed through to the engine untouched.
    Expression(SqlExpr),
}

impl WireValue {
    /// Returns true for [`WireValue::Null`].
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Returns a short name of the variant, used in error messages.
    #[must_use]
    pub const fn type_name(&self) -> &'static str {
        match self {
            Self::Null => "NULL",
            Self::Bool(_) => "BOOL",
            Self::Int64(_) => "INT64",
            Self::Float64(_) => "FLOAT64",
            Self::String(_) => "STRING",
            Self::Date(_) => "DATE",
            Self::Timestamp(_) | Self::UtcTimestamp(_) => "TIMESTAMP",
            Self::Bytes(_) => "BYTES",
            Self::Expression(_) => "expression",
        }
    }
}

impl<T: Into<Self>> From<Option<T>> for WireValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

impl From<f64> for WireValue {
    fn from(v: f64) -> Self {
        Self::Float64(v)
    }
}

impl From<i64> for WireValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<String> for WireValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

impl From<&str> for WireValue {
    fn from(v: &str) -> Self {
        Self::String(String::from(v))
    }
}
