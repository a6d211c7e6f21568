//! Typed SQL fragments.
//!
//! Dialect hooks build small expression trees instead of splicing strings
//! together. A tree only becomes SQL text through [`fmt::Display`], at the
//! point where the host query compiler embeds it.

use std::fmt;

/// A SQL fragment produced by a dialect hook.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlExpr {
    /// SQL text supplied by the host (usually a compiled column
    /// reference), emitted verbatim.
    Raw(String),

    /// A bare word such as a date part or a type name.
    Keyword(String),

    /// A double-quoted string literal.
    String(String),

    /// `INTERVAL <amount> <part>`.
    Interval {
        /// Number of units.
        amount: i64,
        /// Date part, e.g. `DAY`.
        part: String,
    },

    /// A function call.
    Function {
        /// The function name.
        name: String,
        /// The arguments.
        args: Vec<SqlExpr>,
    },

    /// `EXTRACT(<part> FROM <expr> [AT TIME ZONE <zone>])`.
    Extract {
        /// Date part to extract.
        part: String,
        /// Source expression.
        expr: Box<SqlExpr>,
        /// Time zone the part is computed in (optional).
        time_zone: Option<Box<SqlExpr>>,
    },

    /// `CAST(<expr> AS <data_type>)`.
    Cast {
        /// Expression to cast.
        expr: Box<SqlExpr>,
        /// Target type.
        data_type: String,
    },
}

impl SqlExpr {
    /// Creates a verbatim fragment.
    #[must_use]
    pub fn raw(sql: impl Into<String>) -> Self {
        Self::Raw(sql.into())
    }

    /// Creates a bare keyword.
    #[must_use]
    pub fn keyword(word: impl Into<String>) -> Self {
        Self::Keyword(word.into())
    }

    /// Creates a string literal.
    #[must_use]
    pub fn string(value: impl Into<String>) -> Self {
        Self::String(value.into())
    }

    /// Creates an `INTERVAL` literal.
    #[must_use]
    pub fn interval(amount: i64, part: impl Into<String>) -> Self {
        Self::Interval {
            amount,
            part: part.into(),
        }
    }

    /// Creates a function call.
    #[must_use]
    pub fn function(name: impl Into<String>, args: Vec<Self>) -> Self {
        Self::Function {
            name: name.into(),
            args,
        }
    }

    /// Creates an `EXTRACT` expression.
    #[must_use]
    pub fn extract(part: impl Into<String>, expr: Self, time_zone: Option<&str>) -> Self {
        Self::Extract {
            part: part.into(),
            expr: Box::new(expr),
            time_zone: time_zone.map(|tz| Box::new(Self::string(tz))),
        }
    }

    /// Wraps this expression in a `CAST`.
    #[must_use]
    pub fn cast(self, data_type: impl Into<String>) -> Self {
        Self::Cast {
            expr: Box::new(self),
            data_type: data_type.into(),
        }
    }

    /// Renders the fragment to SQL text.
    #[must_use]
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl From<&str> for SqlExpr {
    fn from(sql: &str) -> Self {
        Self::raw(sql)
    }
}

impl From<String> for SqlExpr {
    fn from(sql: String) -> Self {
        Self::Raw(sql)
    }
}

impl fmt::Display for SqlExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Raw(sql) | Self::Keyword(sql) => f.write_str(sql),
            Self::String(value) => {
                f.write_str("\"")?;
                for c in value.chars() {
                    if c == '"' || c == '\\' {
                        f.write_str("\\")?;
                    }
                    write!(f, "{c}")?;
                }
                f.write_str("\"")
            }
            Self::Interval { amount, part } => write!(f, "INTERVAL {amount} {part}"),
            Self::Function { name, args } => {
                write!(f, "{name}(")?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{arg}")?;
                }
                f.write_str(")")
            }
            Self::Extract {
                part,
                expr,
                time_zone,
            } => {
                write!(f, "EXTRACT({part} FROM {expr}")?;
                if let Some(tz) = time_zone {
                    write!(f, " AT TIME ZONE {tz}")?;
                }
                f.write_str(")")
            }
            Self::Cast { expr, data_type } => write!(f, "CAST({expr} AS {data_type})"),
        }
    }
}
