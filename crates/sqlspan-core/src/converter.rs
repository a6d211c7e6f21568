//! Result-column conversion chains.

use tracing::trace;

use crate::error::Result;
use crate::operations::DatabaseOperations;
use crate::value::{FieldKind, Value, WireValue};

/// A host-supplied converter applied to a wire value before the backend's
/// own conversion.
pub type WireConverter = Box<dyn Fn(WireValue) -> Result<WireValue> + Send + Sync>;

/// The converters applied to every value of one result column.
///
/// Built once per column by [`DatabaseOperations::db_converters`] and then
/// applied to each row.
pub struct ConverterChain<'a, O: DatabaseOperations + ?Sized> {
    ops: &'a O,
    kind: FieldKind,
    base: Vec<WireConverter>,
}

impl<'a, O: DatabaseOperations + ?Sized> ConverterChain<'a, O> {
    /// Creates a chain running `base` and then the backend conversion for `kind`.
    pub fn new(ops: &'a O, kind: FieldKind, base: Vec<WireConverter>) -> Self {
        Self { ops, kind, base }
    }

    /// Returns the field kind this chain decodes.
    #[must_use]
    pub const fn kind(&self) -> FieldKind {
        self.kind
    }

    /// Returns the number of host converters that run first.
    #[must_use]
    pub fn base_len(&self) -> usize {
        self.base.len()
    }

    /// Converts one wire value.
    ///
    /// NULL never reaches the kind-specific conversion.
    pub fn convert(&self, value: WireValue) -> Result<Value> {
        let value = self
            .base
            .iter()
            .try_fold(value, |value, convert| convert(value))?;
        if value.is_null() {
            return Ok(Value::Null);
        }
        trace!(
            backend = self.ops.name(),
            kind = %self.kind,
            wire = value.type_name(),
            "converting column value"
        );
        self.ops.convert_value(self.kind, value)
    }

    /// Converts every value of a column, stopping at the first failure.
    pub fn convert_all<I>(&self, values: I) -> Result<Vec<Value>>
    where
        I: IntoIterator<Item = WireValue>,
    {
        values.into_iter().map(|value| self.convert(value)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::DialectError;
    use crate::expr::SqlExpr;

    /// Backend whose only conversion parses integers out of strings.
    struct IntOperations;

    impl DatabaseOperations for IntOperations {
        fn name(&self) -> &'static str {
            "int"
        }

        fn sql_flush(&self, _tables: &[&str], _allow_cascade: bool) -> Result<Vec<String>> {
            Ok(vec![])
        }

        fn datetime_extract_sql(&self, unit: &str, field: SqlExpr, _tzname: &str) -> SqlExpr {
            self.date_extract_sql(unit, field)
        }

        fn date_trunc_sql(&self, _unit: &str, field: SqlExpr) -> SqlExpr {
            field
        }

        fn datetime_trunc_sql(&self, _unit: &str, field: SqlExpr, _tzname: &str) -> SqlExpr {
            field
        }

        fn time_trunc_sql(&self, _unit: &str, field: SqlExpr) -> SqlExpr {
            field
        }

        fn adapt_value(&self, _kind: FieldKind, _value: Value) -> Result<WireValue> {
            Ok(WireValue::Null)
        }

        fn convert_value(&self, kind: FieldKind, value: WireValue) -> Result<Value> {
            match value {
                WireValue::String(s) => s.parse().map(Value::Int).map_err(|_| {
                    DialectError::UnexpectedWireValue {
                        kind,
                        found: "STRING",
                    }
                }),
                other => Err(DialectError::UnexpectedWireValue {
                    kind,
                    found: other.type_name(),
                }),
            }
        }
    }

    #[test]
    fn test_base_converters_run_first() {
        let ops = IntOperations;
        let trim: WireConverter = Box::new(|value| {
            Ok(match value {
                WireValue::String(s) => WireValue::String(s.trim().to_string()),
                other => other,
            })
        });
        let chain = ops.db_converters(FieldKind::Other, vec![trim]);
        assert_eq!(chain.base_len(), 1);
        assert_eq!(chain.kind(), FieldKind::Other);
        assert_eq!(
            chain.convert(WireValue::from(" 42 ")).unwrap(),
            Value::Int(42)
        );
    }

    #[test]
    fn test_null_skips_kind_conversion() {
        let ops = IntOperations;
        let chain = ops.db_converters(FieldKind::Other, vec![]);
        // IntOperations would reject NULL; the chain never asks it
        assert_eq!(chain.convert(WireValue::Null).unwrap(), Value::Null);
    }

    #[test]
    fn test_base_converter_may_produce_null() {
        let ops = IntOperations;
        let blank_is_null: WireConverter = Box::new(|value| {
            Ok(match value {
                WireValue::String(s) if s.is_empty() => WireValue::Null,
                other => other,
            })
        });
        let chain = ops.db_converters(FieldKind::Other, vec![blank_is_null]);
        let values = chain
            .convert_all(vec![WireValue::from(""), WireValue::from("7")])
            .unwrap();
        assert_eq!(values, vec![Value::Null, Value::Int(7)]);
    }

    #[test]
    fn test_errors_propagate() {
        let ops = IntOperations;
        let chain = ops.db_converters(FieldKind::Other, vec![]);
        assert!(chain.convert(WireValue::Bool(true)).is_err());
    }
}
