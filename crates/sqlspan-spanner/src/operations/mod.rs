//! Spanner implementation of the database operation hooks.

mod adapt;
mod convert;
mod dates;
mod lookups;

use sqlspan_core::{
    DatabaseOperations, DialectError, FieldKind, LookupKind, Result, SqlExpr, Value, WireValue,
};
use tracing::{debug, warn};

use crate::keywords::escape_name;
use crate::settings::SpannerSettings;

pub use dates::{extract_name, monday_week};

/// Cloud Spanner database operations.
///
/// Holds only the injected [`SpannerSettings`]; every hook is a pure
/// function, so one instance can be shared across threads.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpannerOperations {
    settings: SpannerSettings,
}

impl SpannerOperations {
    /// Creates the operations for a connection with `settings`.
    #[must_use]
    pub const fn new(settings: SpannerSettings) -> Self {
        Self { settings }
    }

    /// Returns the connection settings.
    #[must_use]
    pub const fn settings(&self) -> &SpannerSettings {
        &self.settings
    }

    /// Returns the zone date parts are computed in: the caller's zone when
    /// time zone support is on, UTC otherwise.
    fn effective_zone<'a>(&self, tzname: &'a str) -> &'a str {
        if self.settings.use_tz {
            tzname
        } else {
            "UTC"
        }
    }
}

impl DatabaseOperations for SpannerOperations {
    fn name(&self) -> &'static str {
        "spanner"
    }

    fn quote_name(&self, name: &str) -> String {
        escape_name(name)
    }

    fn sql_flush(&self, tables: &[&str], allow_cascade: bool) -> Result<Vec<String>> {
        if allow_cascade {
            warn!("cascading flush requested");
            return Err(DialectError::CascadeNotSupported);
        }
        // Spanner has no TRUNCATE and rejects DELETE without a WHERE clause
        let statements: Vec<String> = tables
            .iter()
            .map(|table| format!("DELETE FROM {} WHERE true", self.quote_name(table)))
            .collect();
        debug!(tables = statements.len(), "generated flush statements");
        Ok(statements)
    }

    fn extract_name<'a>(&self, unit: &'a str) -> &'a str {
        extract_name(unit)
    }

    fn datetime_extract_sql(&self, unit: &str, field: SqlExpr, tzname: &str) -> SqlExpr {
        SqlExpr::extract(
            self.extract_name(unit),
            field,
            Some(self.effective_zone(tzname)),
        )
    }

    fn time_extract_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        // Time columns are TIMESTAMPs normalized to UTC
        SqlExpr::extract(self.extract_name(unit), field, Some("UTC"))
    }

    fn date_trunc_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        dates::date_trunc(unit, field)
    }

    fn datetime_trunc_sql(&self, unit: &str, field: SqlExpr, tzname: &str) -> SqlExpr {
        dates::timestamp_trunc(unit, field, self.effective_zone(tzname))
    }

    fn time_trunc_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        dates::timestamp_trunc(unit, field, "UTC")
    }

    fn lookup_cast(&self, lookup: &LookupKind, field: SqlExpr) -> SqlExpr {
        lookups::lookup_cast(lookup, field)
    }

    fn prep_for_like_query(&self, operand: &str) -> String {
        lookups::escape_pattern(operand)
    }

    fn adapt_value(&self, kind: FieldKind, value: Value) -> Result<WireValue> {
        self.adapt(kind, value)
    }

    fn convert_value(&self, kind: FieldKind, value: WireValue) -> Result<Value> {
        self.convert(kind, value)
    }
}
