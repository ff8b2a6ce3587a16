//! Epoch-millisecond timestamps as Jenkins writes them.
//!
//! Change-set items carry `"timestamp": "1691515123000"` on some servers and a
//! bare integer on others. Both decode; encoding always produces the
//! string-wrapped form.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serializer, de};

#[derive(Deserialize)]
#[serde(untagged)]
enum Millis {
    Text(String),
    Number(i64),
}

pub fn serialize<S>(value: &Option<DateTime<Utc>>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(time) => serializer.serialize_str(&time.timestamp_millis().to_string()),
        None => serializer.serialize_none(),
    }
}

pub fn deserialize<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Some(raw) = Option::<Millis>::deserialize(deserializer)? else {
        return Ok(None);
    };

    let millis = match raw {
        Millis::Text(text) => text
            .trim()
            .parse::<i64>()
            .map_err(|e| de::Error::custom(format!("timestamp {text:?}: {e}")))?,
        Millis::Number(n) => n,
    };

    DateTime::from_timestamp_millis(millis)
        .map(Some)
        .ok_or_else(|| de::Error::custom(format!("timestamp {millis} out of range")))
}
