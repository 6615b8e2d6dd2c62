use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use tracing::debug;

/// Decode an optional `createdAt` field.
///
/// Anything that is not an RFC 3339 string becomes `None`, so one odd
/// timestamp never makes a whole list undecodable.
pub(crate) fn lenient<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(parse))
}

fn parse(raw: &Value) -> Option<DateTime<Utc>> {
    let parsed = raw
        .as_str()
        .and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc));
    if parsed.is_none() && !raw.is_null() {
        debug!(value = %raw, "ignoring unparseable timestamp");
    }
    parsed
}
