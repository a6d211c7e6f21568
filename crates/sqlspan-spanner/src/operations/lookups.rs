//! Text pattern lookups.
//!
//! Spanner has no `LIKE ... ESCAPE` matching the ORM's wildcard semantics,
//! so pattern lookups compile to `REGEXP_CONTAINS` with a regex-escaped
//! operand.

use sqlspan_core::{LookupKind, SqlExpr};

use super::SpannerOperations;

/// Casts the left-hand side of text lookups to `STRING`, so e.g. an integer
/// column can be filtered with `contains`.
pub(super) fn lookup_cast(lookup: &LookupKind, field: SqlExpr) -> SqlExpr {
    if lookup.is_text_pattern() {
        field.cast("STRING")
    } else {
        field
    }
}

/// Escapes regex metacharacters in a literal operand.
pub(super) fn escape_pattern(operand: &str) -> String {
    regex::escape(operand)
}

impl SpannerOperations {
    /// Renders the `REGEXP_CONTAINS` predicate for a pattern lookup.
    ///
    /// `rhs` is the already-escaped operand (usually a parameter
    /// placeholder); anchors and the case-insensitive flag are concatenated
    /// around it. Returns `None` for lookups that are not pattern matches.
    #[must_use]
    pub fn pattern_lookup_sql(
        &self,
        lookup: &LookupKind,
        lhs: SqlExpr,
        rhs: SqlExpr,
    ) -> Option<SqlExpr> {
        let (prefix, suffix) = match lookup {
            LookupKind::IExact => ("(?i)^", "$"),
            LookupKind::Contains | LookupKind::Regex => ("", ""),
            LookupKind::IContains | LookupKind::IRegex => ("(?i)", ""),
            LookupKind::StartsWith => ("^", ""),
            LookupKind::IStartsWith => ("(?i)^", ""),
            LookupKind::EndsWith => ("", "$"),
            LookupKind::IEndsWith => ("(?i)", "$"),
            LookupKind::Exact | LookupKind::Other(_) => return None,
        };
        let pattern = if prefix.is_empty() && suffix.is_empty() {
            rhs
        } else {
            let mut parts = Vec::with_capacity(3);
            if !prefix.is_empty() {
                parts.push(SqlExpr::string(prefix));
            }
            parts.push(rhs);
            if !suffix.is_empty() {
                parts.push(SqlExpr::string(suffix));
            }
            SqlExpr::function("CONCAT", parts)
        };
        Some(SqlExpr::function("REGEXP_CONTAINS", vec![lhs, pattern]))
    }
}
