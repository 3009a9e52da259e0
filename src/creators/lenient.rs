// Lenient field decoders for backend payloads and persisted snapshots.
//
// The backend is loose about types: counts arrive as numbers or numeric
// strings, optional fields arrive as null, "", or not at all. These helpers
// fold all of that into plain Rust values at the deserialization boundary so
// the rest of the crate never has to second-guess a field.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Interpret a JSON value as a finite float. Numeric strings are accepted.
pub fn value_as_f64(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

/// Interpret a JSON value as a non-negative integer.
///
/// Fractional values are truncated, negatives clamp to zero.
pub fn value_as_u64(value: &Value) -> Option<u64> {
    if let Value::Number(n) = value {
        if let Some(u) = n.as_u64() {
            return Some(u);
        }
    }
    value_as_f64(value).map(|f| if f <= 0.0 { 0 } else { f as u64 })
}

/// Interpret a JSON value as a non-empty, trimmed string. Numbers are
/// rendered so numeric ids survive.
pub fn value_as_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => {
            let s = s.trim();
            (!s.is_empty()).then(|| s.to_string())
        }
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Parse a user-typed numeric bound. Anything unparseable is `None`.
pub fn parse_f64(raw: &str) -> Option<f64> {
    value_as_f64(&Value::String(raw.to_string()))
}

/// Parse a user-typed count bound. Anything unparseable is `None`.
pub fn parse_u64(raw: &str) -> Option<u64> {
    value_as_u64(&Value::String(raw.to_string()))
}

pub fn f64_or_zero<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value).unwrap_or(0.0))
}

pub fn u64_or_zero<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_u64(&value).unwrap_or(0))
}

pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_f64(&value))
}

pub fn opt_u64<'de, D>(deserializer: D) -> Result<Option<u64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_u64(&value))
}

pub fn opt_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_string(&value))
}

pub fn string_or_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_string(&value).unwrap_or_default())
}

/// A list of strings; non-string members are dropped, non-arrays become empty.
pub fn string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Array(items) => items.iter().filter_map(value_as_string).collect(),
        _ => Vec::new(),
    })
}

/// A timestamp given as RFC 3339 text or as epoch milliseconds.
pub fn opt_timestamp<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_as_timestamp(&value))
}

pub fn value_as_timestamp(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| dt.with_timezone(&Utc))
            .ok()
            .or_else(|| value_as_f64(value).and_then(millis_to_datetime)),
        Value::Number(_) => value_as_f64(value).and_then(millis_to_datetime),
        _ => None,
    }
}

/// Canonical key paired with the alternate spellings the backend has used.
pub type KeyAliases = &'static [(&'static str, &'static [&'static str])];

/// Fold alternate spellings of a key onto its canonical name.
///
/// The canonical key wins when it holds a non-null value, otherwise the first
/// non-null alternate does. Alternates are removed afterwards, so a payload
/// carrying both `id` and `_id` decodes as one field instead of a duplicate.
pub fn fold_aliases(value: &mut Value, aliases: KeyAliases) {
    let Value::Object(map) = value else {
        return;
    };
    for (canonical, alternates) in aliases {
        let mut chosen = map.remove(*canonical).filter(|v| !v.is_null());
        for alternate in *alternates {
            let found = map.remove(*alternate).filter(|v| !v.is_null());
            if chosen.is_none() {
                chosen = found;
            }
        }
        if let Some(v) = chosen {
            map.insert((*canonical).to_string(), v);
        }
    }
}

fn millis_to_datetime(millis: f64) -> Option<DateTime<Utc>> {
    Utc.timestamp_millis_opt(millis as i64).single()
}
