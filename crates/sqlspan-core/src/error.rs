//! Error types for dialect operations.

use thiserror::Error;

use crate::value::FieldKind;

/// Errors raised while adapting values or generating statements.
///
/// Parse failures on decoded wire values wrap the underlying parser error
/// unchanged; nothing here is retried.
#[derive(Debug, Error)]
pub enum DialectError {
    /// A value violates the backend configuration (e.g. an aware datetime
    /// while time zone support is disabled).
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Cascading deletes were requested on flush.
    #[error("the backend does not support cascading deletes")]
    CascadeNotSupported,

    /// The wire value shape does not fit the field kind being decoded.
    #[error("cannot convert {found} wire value for {kind}")]
    UnexpectedWireValue {
        /// Kind of the field being decoded.
        kind: FieldKind,
        /// Wire type that was received.
        found: &'static str,
    },

    /// A wall-clock time falls into a gap of the connection time zone.
    #[error("{value} does not exist in time zone {time_zone}")]
    NonexistentLocalTime {
        /// The wall-clock time.
        value: chrono::NaiveDateTime,
        /// The connection time zone.
        time_zone: String,
    },

    /// The configured time zone name is not a known IANA zone.
    #[error("unknown time zone: {0}")]
    UnknownTimeZone(String),

    /// Malformed timestamp or date text.
    #[error("malformed timestamp: {0}")]
    Timestamp(#[from] chrono::ParseError),

    /// Malformed base64 payload.
    #[error("malformed base64 payload: {0}")]
    Base64(#[from] base64::DecodeError),

    /// Malformed UUID text.
    #[error("malformed UUID: {0}")]
    Uuid(#[from] uuid::Error),

    /// Malformed or out-of-range decimal text.
    #[error("malformed decimal: {0}")]
    Decimal(#[from] rust_decimal::Error),
}

/// Result type alias for dialect operations.
pub type Result<T> = std::result::Result<T, DialectError>;
