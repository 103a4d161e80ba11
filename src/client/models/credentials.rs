//! API credential models

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer};

/// Metadata about the API credentials used for this session
#[derive(Debug, Clone, Deserialize)]
pub struct ApiCredentials {
    /// API key id
    #[serde(default)]
    pub api_id: String,

    /// When the credentials stop working
    #[serde(deserialize_with = "deserialize_expiration")]
    pub expiration_ts: DateTime<FixedOffset>,
}

/// Parse an expiration timestamp such as `2026-01-01T00:00:00.000+0000`.
///
/// RFC 3339 (`+00:00` offsets) is accepted as well.
pub fn parse_expiration(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z")
        .or_else(|_| DateTime::parse_from_rfc3339(value))
        .ok()
}

fn deserialize_expiration<'de, D>(deserializer: D) -> Result<DateTime<FixedOffset>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(deserializer)?;
    parse_expiration(&raw)
        .ok_or_else(|| serde::de::Error::custom(format!("invalid expiration_ts: {}", raw)))
}
