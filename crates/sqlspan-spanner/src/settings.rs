//! Backend settings injected at construction.

use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use sqlspan_core::{DialectError, Result};

/// Time zone settings of a Spanner connection.
///
/// Deserializable so hosts can embed it in their own configuration; missing
/// fields take the [`Default`] values (`UTC`, time zone support on).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SpannerSettings {
    /// Zone naive wall-clock timestamps are interpreted in.
    pub time_zone: Tz,
    /// Whether time-zone-aware datetimes are accepted.
    pub use_tz: bool,
}

impl SpannerSettings {
    /// Creates settings with the defaults.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            time_zone: Tz::UTC,
            use_tz: true,
        }
    }

    /// Sets the connection time zone.
    #[must_use]
    pub const fn time_zone(mut self, time_zone: Tz) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// Sets the connection time zone from an IANA name.
    pub fn with_time_zone_name(self, name: &str) -> Result<Self> {
        let time_zone = name
            .parse::<Tz>()
            .map_err(|_| DialectError::UnknownTimeZone(name.to_string()))?;
        Ok(self.time_zone(time_zone))
    }

    /// Enables or disables time zone support.
    #[must_use]
    pub const fn use_tz(mut self, use_tz: bool) -> Self {
        self.use_tz = use_tz;
        self
    }
}

impl Default for SpannerSettings {
    fn default() -> Self {
        Self::new()
    }
}
