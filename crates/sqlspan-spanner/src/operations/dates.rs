//! Date part extraction and truncation.
//!
//! See <https://cloud.google.com/spanner/docs/reference/standard-sql/date_functions>
//! and the `timestamp_functions` page next to it.

use sqlspan_core::SqlExpr;

/// ORM extraction units whose `EXTRACT` name differs in Spanner.
const EXTRACT_NAMES: &[(&str, &str)] = &[
    ("week_day", "dayofweek"),
    ("iso_week", "isoweek"),
    ("iso_year", "isoyear"),
];

/// Returns the Spanner `EXTRACT` part for an ORM unit; unmapped units pass
/// through unchanged.
#[must_use]
pub fn extract_name(unit: &str) -> &str {
    EXTRACT_NAMES
        .iter()
        .find(|(orm, _)| *orm == unit)
        .map_or(unit, |&(_, spanner)| spanner)
}

/// Truncates to weeks starting on Monday.
///
/// Spanner's `WEEK` truncation snaps to Sunday. Shifting the input back one
/// day moves a Sunday into the previous week; shifting the result forward
/// one day turns the Sunday boundary into Monday.
pub fn monday_week<F>(field: SqlExpr, sub_fn: &str, add_fn: &str, truncate: F) -> SqlExpr
where
    F: FnOnce(SqlExpr) -> SqlExpr,
{
    let shifted = SqlExpr::function(sub_fn, vec![field, SqlExpr::interval(1, "DAY")]);
    SqlExpr::function(add_fn, vec![truncate(shifted), SqlExpr::interval(1, "DAY")])
}

/// `DATE_TRUNC(<field>, <unit>)`.
pub(super) fn date_trunc(unit: &str, field: SqlExpr) -> SqlExpr {
    let truncate =
        |field: SqlExpr| SqlExpr::function("DATE_TRUNC", vec![field, SqlExpr::keyword(unit)]);
    if unit == "week" {
        monday_week(field, "DATE_SUB", "DATE_ADD", truncate)
    } else {
        truncate(field)
    }
}

/// `TIMESTAMP_TRUNC(<field>, <unit>, "<zone>")`.
pub(super) fn timestamp_trunc(unit: &str, field: SqlExpr, zone: &str) -> SqlExpr {
    let truncate = |field: SqlExpr| {
        SqlExpr::function(
            "TIMESTAMP_TRUNC",
            vec![field, SqlExpr::keyword(unit), SqlExpr::string(zone)],
        )
    };
    if unit == "week" {
        monday_week(field, "TIMESTAMP_SUB", "TIMESTAMP_ADD", truncate)
    } else {
        truncate(field)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_names() {
        assert_eq!(extract_name("week_day"), "dayofweek");
        assert_eq!(extract_name("iso_week"), "isoweek");
        assert_eq!(extract_name("iso_year"), "isoyear");
        assert_eq!(extract_name("month"), "month");
        assert_eq!(extract_name("no_such_unit"), "no_such_unit");
    }

    #[test]
    fn test_monday_week_is_composable() {
        let expr = monday_week(SqlExpr::raw("d"), "SUB", "ADD", |inner| {
            SqlExpr::function("TRUNC", vec![inner])
        });
        assert_eq!(
            expr.to_sql(),
            "ADD(TRUNC(SUB(d, INTERVAL 1 DAY)), INTERVAL 1 DAY)"
        );
    }

    #[test]
    fn test_date_trunc() {
        assert_eq!(
            date_trunc("month", SqlExpr::raw("d")).to_sql(),
            "DATE_TRUNC(d, month)"
        );
        assert_eq!(
            date_trunc("week", SqlExpr::raw("d")).to_sql(),
            "DATE_ADD(DATE_TRUNC(DATE_SUB(d, INTERVAL 1 DAY), week), INTERVAL 1 DAY)"
        );
    }

    #[test]
    fn test_timestamp_trunc() {
        assert_eq!(
            timestamp_trunc("hour", SqlExpr::raw("ts"), "UTC").to_sql(),
            "TIMESTAMP_TRUNC(ts, hour, \"UTC\")"
        );
        assert_eq!(
            timestamp_trunc("week", SqlExpr::raw("ts"), "Asia/Kolkata").to_sql(),
            "TIMESTAMP_ADD(TIMESTAMP_TRUNC(TIMESTAMP_SUB(ts, INTERVAL 1 DAY), week, \"Asia/Kolkata\"), INTERVAL 1 DAY)"
        );
    }
}
