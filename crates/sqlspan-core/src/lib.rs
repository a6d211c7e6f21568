//! # sqlspan-core
//!
//! Dialect-neutral building blocks for ORM database backends.
//!
//! This crate provides:
//! - The [`DatabaseOperations`] trait: the hooks a host ORM calls while
//!   compiling queries, binding parameters and reading result rows
//! - [`GenericOperations`], an ANSI backend with lossless text encodings
//! - [`SqlExpr`], a small typed tree for the SQL fragments those hooks return
//! - [`Value`] / [`WireValue`], the application and wire sides of a value,
//!   and the closed [`FieldKind`] set that decides how one maps to the other
//! - [`ConverterChain`] for per-column result conversion
//!
//! ## SQL fragments
//!
//! Hooks return trees, not strings. The host renders them when it embeds
//! them in a statement:
//!
//! ```rust
//! use sqlspan_core::SqlExpr;
//!
//! let expr = SqlExpr::function(
//!     "DATE_TRUNC",
//!     vec![SqlExpr::raw("created"), SqlExpr::keyword("month")],
//! );
//! assert_eq!(expr.to_sql(), "DATE_TRUNC(created, month)");
//! ```

pub mod converter;
mod error;
pub mod expr;
pub mod lookup;
pub mod operations;
pub mod value;

pub use converter::{ConverterChain, WireConverter};
pub use error::{DialectError, Result};
pub use expr::SqlExpr;
pub use lookup::LookupKind;
pub use operations::{DatabaseOperations, GenericOperations};
pub use value::{DateTimeValue, FieldKind, Value, WireValue};
