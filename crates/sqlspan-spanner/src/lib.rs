//! # sqlspan-spanner
//!
//! Cloud Spanner operations for `sqlspan-core`.
//!
//! # How Spanner differs from other dialects
//!
//! - **Identifier quoting**: Spanner quotes with backticks and only
//!   when needed. Plain names that are not [reserved keywords] are
//!   emitted bare.
//! - **No `TRUNCATE`**: flushing a table is a
//!   `DELETE FROM <table> WHERE true`. A `DELETE` without a `WHERE`
//!   clause is rejected by the server, and cascading flushes are not
//!   supported.
//! - **[TIMESTAMP] only**: there is no zone-naive datetime type and
//!   no time-of-day type. Datetimes are stored as naive wall clock
//!   time behind a `Z` marker, and times are stored on `0001-01-01`.
//! - **No `NUMERIC` on the wire**: decimals travel as `FLOAT64` and
//!   are therefore lossy beyond 15 significant digits.
//! - **Sunday weeks**: `DATE_TRUNC(..., week)` snaps to Sunday, so
//!   week truncation shifts by a day on both sides to land on Monday.
//! - **No `LIKE` escapes**: pattern lookups compile to
//!   [`REGEXP_CONTAINS`] with a regex-escaped operand.
//!
//! [reserved keywords]: https://cloud.google.com/spanner/docs/reference/standard-sql/lexical#reserved_keywords
//! [TIMESTAMP]: https://cloud.google.com/spanner/docs/reference/standard-sql/data-types#timestamp_type
//! [`REGEXP_CONTAINS`]: https://cloud.google.com/spanner/docs/reference/standard-sql/string_functions#regexp_contains
//!
//! ## Example
//!
//! ```rust
//! use chrono_tz::Tz;
//! use sqlspan_core::{DatabaseOperations, SqlExpr};
//! use sqlspan_spanner::{SpannerOperations, SpannerSettings};
//!
//! let ops = SpannerOperations::new(SpannerSettings::new().time_zone(Tz::Europe__Paris));
//!
//! let flush = ops.sql_flush(&["author", "order"], false).unwrap();
//! assert_eq!(flush[1], "DELETE FROM `order` WHERE true");
//!
//! let trunc = ops.datetime_trunc_sql("day", SqlExpr::raw("created"), "Europe/Paris");
//! assert_eq!(trunc.to_sql(), "TIMESTAMP_TRUNC(created, day, \"Europe/Paris\")");
//! ```

pub mod keywords;
pub mod operations;
mod settings;

pub use keywords::escape_name;
pub use operations::SpannerOperations;
pub use settings::SpannerSettings;
