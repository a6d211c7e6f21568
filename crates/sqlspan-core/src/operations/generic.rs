//! Generic ANSI operations.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, SecondsFormat};
use chrono_tz::Tz;
use rust_decimal::Decimal;
use tracing::debug;
use uuid::Uuid;

use super::DatabaseOperations;
use crate::error::{DialectError, Result};
use crate::expr::SqlExpr;
use crate::value::{FieldKind, Value, WireValue};

const DATE_FORMAT: &str = "%Y-%m-%d";
const NAIVE_TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";
const TIME_FORMAT: &str = "%H:%M:%S%.6f";

/// Backend operations using ANSI SQL.
///
/// Values are bound in lossless text forms: decimals as their digits,
/// timestamps as ISO 8601 text, times as `HH:MM:SS.ffffff`.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct GenericOperations;

impl GenericOperations {
    /// Creates the generic operations.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

/// `'value'` with embedded quotes doubled.
fn string_literal(value: &str) -> SqlExpr {
    SqlExpr::raw(format!("'{}'", value.replace('\'', "''")))
}

fn at_time_zone(field: &SqlExpr, tzname: &str) -> SqlExpr {
    SqlExpr::raw(format!("{field} AT TIME ZONE {}", string_literal(tzname)))
}

fn unexpected(kind: FieldKind, value: &WireValue) -> DialectError {
    DialectError::UnexpectedWireValue {
        kind,
        found: value.type_name(),
    }
}

/// Offset-qualified text becomes an aware UTC value, bare text a naive one.
fn parse_timestamp(text: &str) -> Result<Value> {
    match DateTime::parse_from_rfc3339(text) {
        Ok(aware) => Ok(Value::DateTimeTz(aware.with_timezone(&Tz::UTC))),
        Err(_) => Ok(Value::DateTime(NaiveDateTime::parse_from_str(
            text,
            "%Y-%m-%dT%H:%M:%S%.f",
        )?)),
    }
}

impl DatabaseOperations for GenericOperations {
    fn name(&self) -> &'static str {
        "generic"
    }

    fn sql_flush(&self, tables: &[&str], allow_cascade: bool) -> Result<Vec<String>> {
        if allow_cascade {
            return Err(DialectError::CascadeNotSupported);
        }
        let statements: Vec<String> = tables
            .iter()
            .map(|table| format!("DELETE FROM {}", self.quote_name(table)))
            .collect();
        debug!(tables = statements.len(), "generated flush statements");
        Ok(statements)
    }

    fn datetime_extract_sql(&self, unit: &str, field: SqlExpr, tzname: &str) -> SqlExpr {
        SqlExpr::extract(self.extract_name(unit), at_time_zone(&field, tzname), None)
    }

    fn date_trunc_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        SqlExpr::function("DATE_TRUNC", vec![string_literal(unit), field])
    }

    fn datetime_trunc_sql(&self, unit: &str, field: SqlExpr, tzname: &str) -> SqlExpr {
        self.date_trunc_sql(unit, at_time_zone(&field, tzname))
    }

    fn time_trunc_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        self.date_trunc_sql(unit, field)
    }

    fn adapt_value(&self, _kind: FieldKind, value: Value) -> Result<WireValue> {
        let wire = match value {
            Value::Null => WireValue::Null,
            Value::Bool(b) => WireValue::Bool(b),
            Value::Int(n) => WireValue::Int64(n),
            Value::Float(f) => WireValue::Float64(f),
            Value::Text(text) => WireValue::String(text),
            Value::Date(date) => WireValue::Date(date.format(DATE_FORMAT).to_string()),
            Value::DateTime(naive) => {
                WireValue::Timestamp(naive.format(NAIVE_TIMESTAMP_FORMAT).to_string())
            }
            Value::DateTimeTz(aware) => {
                WireValue::Timestamp(aware.to_rfc3339_opts(SecondsFormat::Micros, true))
            }
            Value::Time(time) => WireValue::String(time.format(TIME_FORMAT).to_string()),
            Value::Decimal(decimal) => WireValue::String(decimal.to_string()),
            Value::Bytes(bytes) => WireValue::Bytes(STANDARD.encode(bytes)),
            Value::Uuid(uuid) => WireValue::String(uuid.hyphenated().to_string()),
            Value::Expression(expr) => WireValue::Expression(expr),
        };
        Ok(wire)
    }

    fn convert_value(&self, kind: FieldKind, value: WireValue) -> Result<Value> {
        let value = match (kind, value) {
            (_, WireValue::Null) => Value::Null,
            (_, WireValue::Expression(expr)) => Value::Expression(expr),
            (FieldKind::Date | FieldKind::Other, WireValue::Date(text))
            | (FieldKind::Date, WireValue::String(text)) => {
                Value::Date(NaiveDate::parse_from_str(&text, DATE_FORMAT)?)
            }
            (FieldKind::DateTime | FieldKind::Other, WireValue::Timestamp(text))
            | (FieldKind::DateTime, WireValue::String(text)) => parse_timestamp(&text)?,
            (FieldKind::DateTime | FieldKind::Other, WireValue::UtcTimestamp(utc)) => {
                Value::DateTimeTz(utc.with_timezone(&Tz::UTC))
            }
            (FieldKind::Decimal, WireValue::String(text)) => Value::Decimal(text.parse()?),
            (FieldKind::Decimal, WireValue::Int64(n)) => Value::Decimal(Decimal::from(n)),
            (FieldKind::Decimal, WireValue::Float64(f)) => {
                Value::Decimal(f.to_string().parse()?)
            }
            (FieldKind::Time, WireValue::String(text)) => {
                Value::Time(NaiveTime::parse_from_str(&text, "%H:%M:%S%.f")?)
            }
            (FieldKind::Binary | FieldKind::Other, WireValue::Bytes(text))
            | (FieldKind::Binary, WireValue::String(text)) => {
                Value::Bytes(STANDARD.decode(text)?)
            }
            (FieldKind::Uuid, WireValue::String(text)) => Value::Uuid(Uuid::parse_str(&text)?),
            (FieldKind::Other, WireValue::Bool(b)) => Value::Bool(b),
            (FieldKind::Other, WireValue::Int64(n)) => Value::Int(n),
            (FieldKind::Other, WireValue::Float64(f)) => Value::Float(f),
            (FieldKind::Other, WireValue::String(text)) => Value::Text(text),
            (kind, other) => return Err(unexpected(kind, &other)),
        };
        Ok(value)
    }
}
