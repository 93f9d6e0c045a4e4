//! Observation data model.
//!
//! An [`Observation`] is one timestamped record of the public address and
//! the [`Origin`] reported for it. Field names on disk (`ip`, `location`)
//! stay stable so existing history files keep loading.

use std::fmt;
use std::time::SystemTime;

use chrono::{DateTime, Local, NaiveDateTime, SubsecRound};
use serde::{Deserialize, Serialize};

#[cfg(test)]
#[path = "observation_tests.rs"]
mod tests;

/// Placeholder used for every origin field the provider did not report.
pub const UNKNOWN: &str = "Unknown";

fn unknown_field() -> String {
    UNKNOWN.to_string()
}

/// Apparent location of an address.
///
/// Two origins are equal iff all four fields are equal (case-sensitive).
/// The all-[`UNKNOWN`] origin stands in for a failed location lookup and
/// takes part in equality like any other value.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Origin {
    /// Country name.
    #[serde(default = "unknown_field")]
    pub country: String,
    /// Region or state name.
    #[serde(default = "unknown_field")]
    pub region: String,
    /// City name.
    #[serde(default = "unknown_field")]
    pub city: String,
    /// Internet service provider.
    #[serde(default = "unknown_field")]
    pub isp: String,
}

impl Origin {
    /// Creates an origin from its four fields.
    #[must_use]
    pub fn new(
        country: impl Into<String>,
        region: impl Into<String>,
        city: impl Into<String>,
        isp: impl Into<String>,
    ) -> Self {
        Self {
            country: country.into(),
            region: region.into(),
            city: city.into(),
            isp: isp.into(),
        }
    }

    /// The origin recorded when the location lookup fails.
    #[must_use]
    pub fn unknown() -> Self {
        Self::new(UNKNOWN, UNKNOWN, UNKNOWN, UNKNOWN)
    }

    /// Formats `country, region, city` without the ISP.
    #[must_use]
    pub fn place(&self) -> String {
        format!("{}, {}, {}", self.country, self.region, self.city)
    }
}

impl Default for Origin {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for Origin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.place(), self.isp)
    }
}

/// One accepted check result.
///
/// The timestamp is the local wall-clock time of the check, stored without
/// an offset (`YYYY-MM-DDTHH:MM:SS.ffffff`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Observation {
    /// When the check ran.
    #[serde(with = "timestamp_format")]
    pub timestamp: NaiveDateTime,
    /// Public address reported by the address provider.
    #[serde(rename = "ip")]
    pub address: String,
    /// Origin reported for `address`.
    #[serde(rename = "location", default)]
    pub origin: Origin,
}

impl Observation {
    /// Creates an observation with an explicit timestamp.
    #[must_use]
    pub fn new(timestamp: NaiveDateTime, address: impl Into<String>, origin: Origin) -> Self {
        Self {
            timestamp,
            address: address.into(),
            origin,
        }
    }

    /// Creates an observation stamped with the local time of `at`,
    /// truncated to microseconds.
    #[must_use]
    pub fn at(at: SystemTime, address: impl Into<String>, origin: Origin) -> Self {
        let local: DateTime<Local> = at.into();
        Self::new(local.naive_local().trunc_subsecs(6), address, origin)
    }
}

/// On-disk timestamp encoding.
///
/// Always written with six fractional digits; any ISO-8601 local
/// date-time without an offset is accepted on read.
mod timestamp_format {
    use chrono::NaiveDateTime;
    use serde::{Deserialize, Deserializer, Serializer};

    const FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

    pub fn serialize<S: Serializer>(
        timestamp: &NaiveDateTime,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&timestamp.format(FORMAT))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<NaiveDateTime, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
