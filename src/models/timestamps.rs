use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Deserializer};

/// Layouts ApoloHRA clients send, most common first. Seconds and
/// fractional seconds are optional.
const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%dT%H:%M:%S%.f%:z", "%Y-%m-%dT%H:%M%:z"];

/// Parse an ISO 8601 date-time. A trailing `Z` or `±hh:mm` offset is
/// converted to UTC and dropped; columns are stored without time zone.
pub fn parse_timestamp(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim();

    if let Some(utc) = value.strip_suffix('Z').or_else(|| value.strip_suffix('z')) {
        return NAIVE_FORMATS
            .iter()
            .find_map(|f| NaiveDateTime::parse_from_str(utc, f).ok());
    }

    NAIVE_FORMATS
        .iter()
        .find_map(|f| NaiveDateTime::parse_from_str(value, f).ok())
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|f| DateTime::parse_from_str(value, f).ok())
                .map(|dt| dt.naive_utc())
        })
}

/// `deserialize_with` target for optional timestamp fields.
/// Pair with `#[serde(default)]` so absent fields stay `None`.
pub fn deserialize_optional<'de, D>(deserializer: D) -> Result<Option<NaiveDateTime>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        None => Ok(None),
        Some(raw) => parse_timestamp(&raw)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid date-time '{}'", raw))),
    }
}
