//! Encoding application values for parameter binding.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use sqlspan_core::{DateTimeValue, DialectError, FieldKind, Result, Value, WireValue};
use tracing::{debug, warn};
use uuid::Uuid;

use super::SpannerOperations;

/// Date prefixed to time-of-day values; Spanner has no TIME type, so time
/// columns are TIMESTAMPs on this day.
pub(super) const TIME_SENTINEL_DATE: &str = "0001-01-01";

/// Renders a wall-clock timestamp with microsecond precision and the `Z`
/// marker Spanner requires. The `Z` is not a claim that the value is UTC.
fn timestamp_str(value: &NaiveDateTime) -> String {
    format!("{}Z", value.format("%Y-%m-%dT%H:%M:%S%.6f"))
}

impl SpannerOperations {
    /// Encodes a DATE parameter.
    #[must_use]
    pub fn adapt_datefield_value(&self, value: Option<NaiveDate>) -> Option<WireValue> {
        value.map(|date| WireValue::Date(date.format("%Y-%m-%d").to_string()))
    }

    /// Encodes a datetime parameter as a TIMESTAMP string.
    ///
    /// Aware values are converted to naive wall time in the connection time
    /// zone, which requires time zone support to be enabled. Expressions are
    /// passed through for the engine to evaluate.
    pub fn adapt_datetimefield_value(
        &self,
        value: Option<DateTimeValue>,
    ) -> Result<Option<WireValue>> {
        let naive = match value {
            None => return Ok(None),
            Some(DateTimeValue::Expression(expr)) => return Ok(Some(WireValue::Expression(expr))),
            Some(DateTimeValue::Naive(naive)) => naive,
            Some(DateTimeValue::Aware(aware)) => {
                if !self.settings.use_tz {
                    warn!(value = %aware, "aware datetime with time zone support disabled");
                    return Err(DialectError::InvalidValue(String::from(
                        "the Spanner backend does not support timezone-aware datetimes \
                         when time zone support is disabled",
                    )));
                }
                let naive = aware.with_timezone(&self.settings.time_zone).naive_local();
                debug!(
                    from = %aware,
                    time_zone = self.settings.time_zone.name(),
                    %naive,
                    "made aware datetime naive"
                );
                naive
            }
        };
        Ok(Some(WireValue::Timestamp(timestamp_str(&naive))))
    }

    /// Encodes a decimal parameter as FLOAT64.
    ///
    /// Spanner has no fixed-point wire type here; digits beyond what a
    /// 64-bit float holds are lost. The float is the one nearest to the
    /// exact decimal value.
    #[must_use]
    pub fn adapt_decimalfield_value(&self, value: Option<Decimal>) -> Option<WireValue> {
        value.and_then(|decimal| {
            decimal
                .to_string()
                .parse()
                .ok()
                .or_else(|| decimal.to_f64())
                .map(WireValue::Float64)
        })
    }

    /// Encodes a time-of-day parameter as a TIMESTAMP on the sentinel date.
    #[must_use]
    pub fn adapt_timefield_value(&self, value: Option<NaiveTime>) -> Option<WireValue> {
        value.map(|time| {
            WireValue::Timestamp(format!(
                "{TIME_SENTINEL_DATE}T{}Z",
                time.format("%H:%M:%S%.6f")
            ))
        })
    }

    /// Encodes a BYTES parameter as base64 text.
    #[must_use]
    pub fn adapt_binaryfield_value(&self, value: Option<&[u8]>) -> Option<WireValue> {
        value.map(|bytes| WireValue::Bytes(STANDARD.encode(bytes)))
    }

    /// Encodes a UUID parameter as its canonical hyphenated text.
    #[must_use]
    pub fn adapt_uuidfield_value(&self, value: Option<Uuid>) -> Option<WireValue> {
        value.map(|uuid| WireValue::String(uuid.hyphenated().to_string()))
    }

    /// Encodes `value` for a column of `kind`.
    pub(super) fn adapt(&self, kind: FieldKind, value: Value) -> Result<WireValue> {
        if value.is_null() {
            return Ok(WireValue::Null);
        }
        let wire = match kind {
            FieldKind::Date => match value {
                Value::Date(date) => self.adapt_datefield_value(Some(date)),
                other => Some(self.adapt_generic(other)?),
            },
            FieldKind::DateTime => match value {
                Value::DateTime(naive) => {
                    self.adapt_datetimefield_value(Some(DateTimeValue::Naive(naive)))?
                }
                Value::DateTimeTz(aware) => {
                    self.adapt_datetimefield_value(Some(DateTimeValue::Aware(aware)))?
                }
                Value::Expression(expr) => {
                    self.adapt_datetimefield_value(Some(DateTimeValue::Expression(expr)))?
                }
                Value::Date(date) => self.adapt_datetimefield_value(Some(DateTimeValue::Naive(
                    date.and_time(NaiveTime::MIN),
                )))?,
                other => Some(self.adapt_generic(other)?),
            },
            FieldKind::Decimal => match value {
                Value::Decimal(decimal) => self.adapt_decimalfield_value(Some(decimal)),
                Value::Int(n) => self.adapt_decimalfield_value(Some(Decimal::from(n))),
                Value::Text(text) => self.adapt_decimalfield_value(Some(text.parse()?)),
                other => Some(self.adapt_generic(other)?),
            },
            FieldKind::Time => match value {
                Value::Time(time) => self.adapt_timefield_value(Some(time)),
                other => Some(self.adapt_generic(other)?),
            },
            FieldKind::Binary => match value {
                Value::Bytes(bytes) => self.adapt_binaryfield_value(Some(&bytes)),
                Value::Text(text) => self.adapt_binaryfield_value(Some(text.as_bytes())),
                other => Some(self.adapt_generic(other)?),
            },
            FieldKind::Uuid => match value {
                Value::Uuid(uuid) => self.adapt_uuidfield_value(Some(uuid)),
                Value::Text(text) => self.adapt_uuidfield_value(Some(Uuid::parse_str(&text)?)),
                other => Some(self.adapt_generic(other)?),
            },
            FieldKind::Other => Some(self.adapt_generic(value)?),
        };
        Ok(wire.unwrap_or(WireValue::Null))
    }

    /// Encodes a value by its own shape, regardless of the column kind.
    fn adapt_generic(&self, value: Value) -> Result<WireValue> {
        let wire = match value {
            Value::Null => None,
            Value::Bool(b) => Some(WireValue::Bool(b)),
            Value::Int(n) => Some(WireValue::Int64(n)),
            Value::Float(f) => Some(WireValue::Float64(f)),
            Value::Text(text) => Some(WireValue::String(text)),
            Value::Date(date) => self.adapt_datefield_value(Some(date)),
            Value::DateTime(naive) => {
                self.adapt_datetimefield_value(Some(DateTimeValue::Naive(naive)))?
            }
            Value::DateTimeTz(aware) => {
                self.adapt_datetimefield_value(Some(DateTimeValue::Aware(aware)))?
            }
            Value::Time(time) => self.adapt_timefield_value(Some(time)),
            Value::Decimal(decimal) => self.adapt_decimalfield_value(Some(decimal)),
            Value::Bytes(bytes) => self.adapt_binaryfield_value(Some(&bytes)),
            Value::Uuid(uuid) => self.adapt_uuidfield_value(Some(uuid)),
            Value::Expression(expr) => Some(WireValue::Expression(expr)),
        };
        Ok(wire.unwrap_or(WireValue::Null))
    }
}
