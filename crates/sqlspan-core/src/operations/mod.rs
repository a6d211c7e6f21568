//! Database operations: the hooks a backend exposes to the host ORM.
//!
//! The host query layer calls these at fixed points: when it embeds an
//! identifier, binds a parameter, reads a result column, compiles a date
//! lookup or assembles an INSERT or a flush. Every hook is a pure function
//! of its arguments and the backend's injected settings.

mod generic;

pub use generic::GenericOperations;

use crate::converter::{ConverterChain, WireConverter};
use crate::error::Result;
use crate::expr::SqlExpr;
use crate::lookup::LookupKind;
use crate::value::{FieldKind, Value, WireValue};

/// Trait for backend-specific SQL generation and value adaptation.
pub trait DatabaseOperations {
    /// Returns the name of the backend.
    fn name(&self) -> &'static str;

    /// Quotes an identifier for embedding in generated SQL.
    fn quote_name(&self, name: &str) -> String {
        format!("\"{}\"", name.replace('"', "\"\""))
    }

    /// Renders the `VALUES` part of a multi-row INSERT.
    ///
    /// Rows and the placeholders inside each row keep the caller's order.
    fn bulk_insert_sql(&self, fields: &[&str], placeholder_rows: &[Vec<String>]) -> String {
        let rows: Vec<String> = placeholder_rows
            .iter()
            .map(|row| {
                debug_assert_eq!(row.len(), fields.len(), "placeholder row width");
                format!("({})", row.join(", "))
            })
            .collect();
        format!("VALUES {}", rows.join(", "))
    }

    /// Returns the statements that empty the given tables, one per table.
    fn sql_flush(&self, tables: &[&str], allow_cascade: bool) -> Result<Vec<String>>;

    /// Maps an ORM extraction unit to the name the backend's `EXTRACT` uses.
    fn extract_name<'a>(&self, unit: &'a str) -> &'a str {
        unit
    }

    /// Extracts a calendar component from a date.
    fn date_extract_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        SqlExpr::extract(self.extract_name(unit), field, None)
    }

    /// Extracts a calendar component from a datetime in `tzname`.
    fn datetime_extract_sql(&self, unit: &str, field: SqlExpr, tzname: &str) -> SqlExpr;

    /// Extracts a clock component from a time.
    fn time_extract_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr {
        self.date_extract_sql(unit, field)
    }

    /// Truncates a date to `unit`.
    fn date_trunc_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr;

    /// Truncates a datetime to `unit` in `tzname`.
    fn datetime_trunc_sql(&self, unit: &str, field: SqlExpr, tzname: &str) -> SqlExpr;

    /// Truncates a time to `unit`.
    fn time_trunc_sql(&self, unit: &str, field: SqlExpr) -> SqlExpr;

    /// Wraps the left-hand side of a lookup so the backend can evaluate it.
    fn lookup_cast(&self, _lookup: &LookupKind, field: SqlExpr) -> SqlExpr {
        field
    }

    /// Returns [`lookup_cast`](Self::lookup_cast) as a `%s` template, for
    /// hosts that compile lookups with format strings.
    fn lookup_cast_template(&self, lookup: &LookupKind) -> String {
        self.lookup_cast(lookup, SqlExpr::raw("%s")).to_sql()
    }

    /// Escapes a literal operand of a pattern lookup.
    ///
    /// The default escapes the `LIKE` wildcards with a backslash.
    fn prep_for_like_query(&self, operand: &str) -> String {
        operand
            .replace('\\', "\\\\")
            .replace('%', "\\%")
            .replace('_', "\\_")
    }

    /// Escapes a literal operand of an `iexact` lookup.
    fn prep_for_iexact_query(&self, operand: &str) -> String {
        self.prep_for_like_query(operand)
    }

    /// Encodes an application value for parameter binding.
    fn adapt_value(&self, kind: FieldKind, value: Value) -> Result<WireValue>;

    /// Decodes a result column value.
    fn convert_value(&self, kind: FieldKind, value: WireValue) -> Result<Value>;

    /// Returns the conversion chain for a result column of `kind`.
    ///
    /// `base` holds the host's own converters; they run first.
    fn db_converters(&self, kind: FieldKind, base: Vec<WireConverter>) -> ConverterChain<'_, Self> {
        ConverterChain::new(self, kind, base)
    }
}
