#![allow(dead_code)]

use chrono::{NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use sqlspan_core::{DatabaseOperations, FieldKind, Value};
use sqlspan_spanner::{SpannerOperations, SpannerSettings};

pub fn ops() -> SpannerOperations {
    SpannerOperations::default()
}

pub fn ops_in(time_zone: Tz) -> SpannerOperations {
    SpannerOperations::new(SpannerSettings::new().time_zone(time_zone))
}

pub fn naive_ops() -> SpannerOperations {
    SpannerOperations::new(SpannerSettings::new().use_tz(false))
}

pub fn datetime(y: i32, m: u32, d: u32, h: u32, min: u32, s: u32, micro: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_micro_opt(h, min, s, micro))
        .unwrap_or_else(|| panic!("invalid datetime {y}-{m}-{d} {h}:{min}:{s}.{micro}"))
}

/// Encodes `value` and decodes the result as a column of the same kind.
pub fn round_trip(ops: &SpannerOperations, kind: FieldKind, value: impl Into<Value>) -> Value {
    let wire = ops
        .adapt_value(kind, value.into())
        .unwrap_or_else(|e| panic!("Failed to adapt {kind} value: {e}"));
    ops.convert_value(kind, wire)
        .unwrap_or_else(|e| panic!("Failed to convert {kind} value: {e}"))
}
