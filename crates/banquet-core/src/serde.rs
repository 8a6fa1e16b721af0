// Module name shadows the `serde` crate; use `::serde` for the external one.
use ::serde::{Deserialize, Deserializer, Serializer};
use chrono::{DateTime, NaiveDateTime, Utc};

/// Wall-clock format used by the back-office (`YYYY-MM-DD HH:mm:ss`, UTC).
pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Format a timestamp as `YYYY-MM-DD HH:mm:ss`.
pub fn format_datetime(dt: &DateTime<Utc>) -> String {
    dt.format(DATETIME_FORMAT).to_string()
}

/// Parse a `YYYY-MM-DD HH:mm:ss` string as UTC.
pub fn parse_datetime(s: &str) -> Result<DateTime<Utc>, chrono::ParseError> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT).map(|naive| naive.and_utc())
}

/// Serialize `DateTime<Utc>` as `YYYY-MM-DD HH:mm:ss`.
pub fn to_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&format_datetime(dt))
}

/// Serialize `Option<DateTime<Utc>>` as `YYYY-MM-DD HH:mm:ss` or `null`.
pub fn to_datetime_opt<S>(dt: &Option<DateTime<Utc>>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match dt {
        Some(dt) => s.serialize_str(&format_datetime(dt)),
        None => s.serialize_none(),
    }
}

/// Deserialize an optional `YYYY-MM-DD HH:mm:ss` string.
pub fn from_datetime_opt<'de, D>(d: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(d)?;
    raw.map(|s| parse_datetime(&s).map_err(::serde::de::Error::custom))
        .transpose()
}
