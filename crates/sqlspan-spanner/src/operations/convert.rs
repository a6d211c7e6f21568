//! Decoding result column values.

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, Offset, TimeZone, Timelike};
use chrono_tz::Tz;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use sqlspan_core::{DialectError, FieldKind, Result, Value, WireValue};
use tracing::debug;
use uuid::Uuid;

use super::SpannerOperations;

fn unexpected(kind: FieldKind, value: &WireValue) -> DialectError {
    DialectError::UnexpectedWireValue {
        kind,
        found: value.type_name(),
    }
}

/// Drops everything below the microsecond.
fn truncate_to_micros(value: NaiveDateTime) -> NaiveDateTime {
    let nanos = value.nanosecond();
    value.with_nanosecond(nanos - nanos % 1_000).unwrap_or(value)
}

/// Returns the UTC wall clock of a TIMESTAMP, truncated to microseconds.
fn utc_wall_clock(kind: FieldKind, value: WireValue) -> Result<NaiveDateTime> {
    let naive = match value {
        WireValue::Timestamp(text) | WireValue::String(text) => {
            DateTime::parse_from_rfc3339(&text)?.naive_utc()
        }
        WireValue::UtcTimestamp(timestamp) => timestamp.naive_utc(),
        other => return Err(unexpected(kind, &other)),
    };
    Ok(truncate_to_micros(naive))
}

/// Places a wall-clock time skipped by a forward transition using the
/// offset in effect just before the transition.
fn resolve_gap(time_zone: Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    let before = (1..=48).find_map(|hours| {
        naive
            .checked_sub_signed(Duration::hours(hours))
            .and_then(|earlier| time_zone.from_local_datetime(&earlier).latest())
    })?;
    let offset = Duration::seconds(i64::from(before.offset().fix().local_minus_utc()));
    naive
        .checked_sub_signed(offset)
        .map(|utc| time_zone.from_utc_datetime(&utc))
}

/// Converts a float through its shortest text, clamping magnitudes beyond
/// the decimal range.
fn decimal_from_float(value: f64) -> Result<Decimal> {
    match value.to_string().parse() {
        Ok(decimal) => Ok(decimal),
        Err(_) if value.is_finite() => {
            let decimal = Decimal::from_f64(value).unwrap_or(if value.abs() < 1.0 {
                Decimal::ZERO
            } else if value.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            });
            debug!(value, %decimal, "float outside the decimal range");
            Ok(decimal)
        }
        Err(err) => Err(err.into()),
    }
}

impl SpannerOperations {
    /// Decodes a TIMESTAMP into a datetime in the connection time zone.
    ///
    /// The wall clock is kept and re-tagged with the connection zone: the
    /// encoder stored naive local time behind the `Z` marker. Ambiguous wall
    /// times take the earlier instant; wall times inside a gap are placed
    /// with the offset from before the gap, so `02:30` in a `02:00` to
    /// `03:00` gap reads back as `03:30`.
    pub fn convert_datetimefield_value(&self, value: WireValue) -> Result<Option<DateTime<Tz>>> {
        if value.is_null() {
            return Ok(None);
        }
        let naive = utc_wall_clock(FieldKind::DateTime, value)?;
        let time_zone = self.settings.time_zone;
        if let Some(datetime) = time_zone.from_local_datetime(&naive).earliest() {
            return Ok(Some(datetime));
        }
        let resolved = resolve_gap(time_zone, naive).ok_or_else(|| {
            DialectError::NonexistentLocalTime {
                value: naive,
                time_zone: time_zone.name().to_string(),
            }
        })?;
        debug!(%naive, %resolved, "wall clock in a time zone gap");
        Ok(Some(resolved))
    }

    /// Decodes a FLOAT64 into a decimal.
    ///
    /// The float goes through its shortest round-trip text, never through
    /// its binary expansion, so `0.1` decodes to exactly `0.1`. Floats beyond
    /// the decimal range clamp to [`Decimal::MAX`] or [`Decimal::MIN`].
    pub fn convert_decimalfield_value(&self, value: WireValue) -> Result<Option<Decimal>> {
        let decimal: Decimal = match value {
            WireValue::Null => return Ok(None),
            WireValue::Float64(f) => decimal_from_float(f)?,
            WireValue::Int64(n) => Decimal::from(n),
            WireValue::String(text) => text.parse()?,
            other => return Err(unexpected(FieldKind::Decimal, &other)),
        };
        Ok(Some(decimal))
    }

    /// Decodes a TIMESTAMP into a time of day, discarding the date.
    pub fn convert_timefield_value(&self, value: WireValue) -> Result<Option<NaiveTime>> {
        if value.is_null() {
            return Ok(None);
        }
        Ok(Some(utc_wall_clock(FieldKind::Time, value)?.time()))
    }

    /// Decodes base64 BYTES.
    pub fn convert_binaryfield_value(&self, value: WireValue) -> Result<Option<Vec<u8>>> {
        match value {
            WireValue::Null => Ok(None),
            WireValue::Bytes(text) | WireValue::String(text) => Ok(Some(STANDARD.decode(text)?)),
            other => Err(unexpected(FieldKind::Binary, &other)),
        }
    }

    /// Decodes UUID text.
    pub fn convert_uuidfield_value(&self, value: WireValue) -> Result<Option<Uuid>> {
        match value {
            WireValue::Null => Ok(None),
            WireValue::String(text) => Ok(Some(Uuid::parse_str(&text)?)),
            other => Err(unexpected(FieldKind::Uuid, &other)),
        }
    }

    /// Decodes DATE text.
    pub fn convert_datefield_value(&self, value: WireValue) -> Result<Option<NaiveDate>> {
        match value {
            WireValue::Null => Ok(None),
            WireValue::Date(text) | WireValue::String(text) => {
                Ok(Some(NaiveDate::parse_from_str(&text, "%Y-%m-%d")?))
            }
            other => Err(unexpected(FieldKind::Date, &other)),
        }
    }

    /// Decodes `value` read from a column of `kind`.
    pub(super) fn convert(&self, kind: FieldKind, value: WireValue) -> Result<Value> {
        let value = match kind {
            FieldKind::Date => self.convert_datefield_value(value)?.into(),
            FieldKind::DateTime => self.convert_datetimefield_value(value)?.into(),
            FieldKind::Decimal => self.convert_decimalfield_value(value)?.into(),
            FieldKind::Time => self.convert_timefield_value(value)?.into(),
            FieldKind::Binary => self.convert_binaryfield_value(value)?.into(),
            FieldKind::Uuid => self.convert_uuidfield_value(value)?.into(),
            FieldKind::Other => self.convert_generic(value)?,
        };
        Ok(value)
    }

    /// Decodes a value by its wire shape alone.
    fn convert_generic(&self, value: WireValue) -> Result<Value> {
        let value = match value {
            WireValue::Null => Value::Null,
            WireValue::Bool(b) => Value::Bool(b),
            WireValue::Int64(n) => Value::Int(n),
            WireValue::Float64(f) => Value::Float(f),
            WireValue::String(text) => Value::Text(text),
            date @ WireValue::Date(_) => self.convert_datefield_value(date)?.into(),
            timestamp @ (WireValue::Timestamp(_) | WireValue::UtcTimestamp(_)) => {
                self.convert_datetimefield_value(timestamp)?.into()
            }
            bytes @ WireValue::Bytes(_) => self.convert_binaryfield_value(bytes)?.into(),
            WireValue::Expression(expr) => Value::Expression(expr),
        };
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::settings::SpannerSettings;
    use chrono::Utc;
    use sqlspan_core::DatabaseOperations;

    fn ops_in(time_zone: Tz) -> SpannerOperations {
        SpannerOperations::new(SpannerSettings::new().time_zone(time_zone))
    }

    fn timestamp(text: &str) -> WireValue {
        WireValue::Timestamp(String::from(text))
    }

    #[test]
    fn test_nulls_stay_null() {
        let ops = SpannerOperations::default();
        assert_eq!(ops.convert_datetimefield_value(WireValue::Null).unwrap(), None);
        assert_eq!(ops.convert_decimalfield_value(WireValue::Null).unwrap(), None);
        assert_eq!(ops.convert_timefield_value(WireValue::Null).unwrap(), None);
        assert_eq!(ops.convert_binaryfield_value(WireValue::Null).unwrap(), None);
        assert_eq!(ops.convert_uuidfield_value(WireValue::Null).unwrap(), None);
        assert_eq!(ops.convert_datefield_value(WireValue::Null).unwrap(), None);
        assert_eq!(
            ops.convert_value(FieldKind::Uuid, WireValue::Null).unwrap(),
            Value::Null
        );
    }

    #[test]
    fn test_datetime_truncated_and_retagged() {
        let ops = ops_in(Tz::Europe__Paris);
        let dt = ops
            .convert_datetimefield_value(timestamp("2024-03-01T09:15:30.123456789Z"))
            .unwrap()
            .unwrap();
        assert_eq!(dt.timezone(), Tz::Europe__Paris);
        assert_eq!(
            dt.naive_local(),
            NaiveDate::from_ymd_opt(2024, 3, 1)
                .unwrap()
                .and_hms_micro_opt(9, 15, 30, 123_456)
                .unwrap()
        );
        assert_eq!(dt.nanosecond() % 1_000, 0);
    }

    #[test]
    fn test_datetime_from_client_timestamp() {
        let ops = SpannerOperations::default();
        let utc = Utc.with_ymd_and_hms(2021, 6, 30, 23, 59, 59).unwrap()
            + chrono::Duration::nanoseconds(999_999_999);
        let dt = ops
            .convert_datetimefield_value(WireValue::UtcTimestamp(utc))
            .unwrap()
            .unwrap();
        assert_eq!(dt.nanosecond(), 999_999_000);
        assert_eq!(dt.timezone(), Tz::UTC);
    }

    #[test]
    fn test_datetime_in_dst_gap_uses_offset_before_gap() {
        let ops = ops_in(Tz::America__New_York);
        // 02:30 on 2024-03-10 does not exist in New York
        let dt = ops
            .convert_datetimefield_value(timestamp("2024-03-10T02:30:00.000000Z"))
            .unwrap()
            .unwrap();
        assert_eq!(
            dt.naive_utc(),
            NaiveDate::from_ymd_opt(2024, 3, 10)
                .unwrap()
                .and_hms_opt(7, 30, 0)
                .unwrap()
        );
        assert_eq!(dt.offset().to_string(), "EDT");
        assert_eq!(dt.hour(), 3);
    }

    #[test]
    fn test_resolve_gap_across_skipped_day() {
        // Samoa skipped 2011-12-30 when it moved across the date line
        let naive = NaiveDate::from_ymd_opt(2011, 12, 30)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap();
        let dt = resolve_gap(Tz::Pacific__Apia, naive).unwrap();
        assert_eq!(dt.timezone(), Tz::Pacific__Apia);
        assert_eq!(
            dt.naive_local(),
            NaiveDate::from_ymd_opt(2011, 12, 31)
                .unwrap()
                .and_hms_opt(12, 0, 0)
                .unwrap()
        );
    }

    #[test]
    fn test_datetime_ambiguous_picks_earliest() {
        let ops = ops_in(Tz::America__New_York);
        // 01:30 on 2024-11-03 happens twice in New York
        let dt = ops
            .convert_datetimefield_value(timestamp("2024-11-03T01:30:00.000000Z"))
            .unwrap()
            .unwrap();
        assert_eq!(dt.offset().to_string(), "EDT");
    }

    #[test]
    fn test_malformed_timestamp() {
        let ops = SpannerOperations::default();
        let err = ops
            .convert_datetimefield_value(timestamp("yesterday"))
            .unwrap_err();
        assert!(matches!(err, DialectError::Timestamp(_)));
        let err = ops
            .convert_datetimefield_value(WireValue::Int64(0))
            .unwrap_err();
        assert!(matches!(
            err,
            DialectError::UnexpectedWireValue {
                kind: FieldKind::DateTime,
                found: "INT64"
            }
        ));
    }

    #[test]
    fn test_decimal_from_float_uses_shortest_text() {
        let ops = SpannerOperations::default();
        let decimal = ops
            .convert_decimalfield_value(WireValue::Float64(0.1))
            .unwrap()
            .unwrap();
        assert_eq!(decimal.to_string(), "0.1");
        assert_eq!(
            ops.convert_decimalfield_value(WireValue::Int64(-4)).unwrap(),
            Some(Decimal::from(-4))
        );
    }

    #[test]
    fn test_decimal_rejects_non_finite() {
        let ops = SpannerOperations::default();
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert!(matches!(
                ops.convert_decimalfield_value(WireValue::Float64(value)),
                Err(DialectError::Decimal(_))
            ));
        }
    }

    #[test]
    fn test_decimal_clamps_beyond_range() {
        let ops = SpannerOperations::default();
        assert_eq!(
            ops.convert_decimalfield_value(WireValue::Float64(7.922_816_251_426_434e28))
                .unwrap(),
            Some(Decimal::MAX)
        );
        assert_eq!(
            ops.convert_decimalfield_value(WireValue::Float64(-1e300))
                .unwrap(),
            Some(Decimal::MIN)
        );
        let tiny = ops
            .convert_decimalfield_value(WireValue::Float64(1e-40))
            .unwrap()
            .unwrap();
        assert!(tiny.abs() < Decimal::new(1, 27));
    }

    #[test]
    fn test_time_discards_date() {
        let ops = ops_in(Tz::Asia__Tokyo);
        assert_eq!(
            ops.convert_timefield_value(timestamp("0001-01-01T23:04:05.000600Z"))
                .unwrap(),
            NaiveTime::from_hms_micro_opt(23, 4, 5, 600)
        );
    }

    #[test]
    fn test_binary_and_uuid() {
        let ops = SpannerOperations::default();
        assert_eq!(
            ops.convert_binaryfield_value(WireValue::Bytes(String::from("aGVsbG8=")))
                .unwrap(),
            Some(b"hello".to_vec())
        );
        assert!(matches!(
            ops.convert_binaryfield_value(WireValue::Bytes(String::from("***"))),
            Err(DialectError::Base64(_))
        ));
        assert_eq!(
            ops.convert_uuidfield_value(WireValue::from("67e55044-10b1-426f-9247-bb680e5fe0c8"))
                .unwrap()
                .map(|uuid| uuid.as_u128()),
            Some(0x67e5_5044_10b1_426f_9247_bb68_0e5f_e0c8)
        );
        assert!(matches!(
            ops.convert_uuidfield_value(WireValue::from("nope")),
            Err(DialectError::Uuid(_))
        ));
    }

    #[test]
    fn test_other_kind_uses_wire_shape() {
        let ops = SpannerOperations::default();
        assert_eq!(
            ops.convert_value(FieldKind::Other, WireValue::Float64(2.5))
                .unwrap(),
            Value::Float(2.5)
        );
        assert_eq!(
            ops.convert_value(FieldKind::Other, WireValue::Date(String::from("1999-12-31")))
                .unwrap(),
            Value::Date(NaiveDate::from_ymd_opt(1999, 12, 31).unwrap())
        );
        assert_eq!(
            ops.convert_value(FieldKind::Other, WireValue::from("text"))
                .unwrap(),
            Value::Text(String::from("text"))
        );
    }
}
