//! Session timezone used when coercing temporal frame columns.

use std::{fmt, str::FromStr, sync::Arc};

use chrono::{DateTime, FixedOffset, NaiveDateTime, TimeZone};
use chrono_tz::Tz;

use crate::error::ArrowConvertError;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Zone {
    Named(Tz),
    Fixed(FixedOffset),
}

/// Immutable session timezone: an IANA name (`Asia/Tokyo`) or a fixed offset
/// (`+05:30`).
#[derive(Debug, Clone, PartialEq)]
pub struct SessionTimezone {
    name: Arc<str>,
    zone: Zone,
}

impl SessionTimezone {
    pub fn utc() -> Self {
        Self {
            name: Arc::from("UTC"),
            zone: Zone::Named(Tz::UTC),
        }
    }

    /// Zone name as written to Arrow timestamp types.
    pub fn name(&self) -> &Arc<str> {
        &self.name
    }

    /// Interpret `micros` as a wall-clock time in this zone and return the
    /// matching UTC instant. Ambiguous times resolve to the earlier instant;
    /// times inside a gap return `None`.
    pub fn local_micros_to_utc(&self, micros: i64) -> Option<i64> {
        let naive = DateTime::from_timestamp_micros(micros)?.naive_utc();
        match self.zone {
            Zone::Named(tz) => resolve(&tz, &naive),
            Zone::Fixed(offset) => resolve(&offset, &naive),
        }
    }

    /// Wall-clock time in this zone for the UTC instant `micros`.
    pub fn utc_micros_to_local(&self, micros: i64) -> Option<i64> {
        let utc = DateTime::from_timestamp_micros(micros)?;
        let local = match self.zone {
            Zone::Named(tz) => utc.with_timezone(&tz).naive_local(),
            Zone::Fixed(offset) => utc.with_timezone(&offset).naive_local(),
        };
        Some(local.and_utc().timestamp_micros())
    }
}

fn resolve<Z: TimeZone>(zone: &Z, naive: &NaiveDateTime) -> Option<i64> {
    zone.from_local_datetime(naive)
        .earliest()
        .map(|dt| dt.timestamp_micros())
}

impl Default for SessionTimezone {
    fn default() -> Self {
        Self::utc()
    }
}

impl FromStr for SessionTimezone {
    type Err = ArrowConvertError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let zone = if let Ok(tz) = trimmed.parse::<Tz>() {
            Zone::Named(tz)
        } else if let Ok(offset) = trimmed.parse::<FixedOffset>() {
            Zone::Fixed(offset)
        } else {
            return Err(ArrowConvertError::InvalidTimezone(s.to_string()));
        };
        Ok(Self {
            name: Arc::from(trimmed),
            zone,
        })
    }
}

impl fmt::Display for SessionTimezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}
